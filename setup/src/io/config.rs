//! Setup configuration read from `setup.toml` in the project root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "setup.toml";

/// Setup configuration (TOML).
///
/// Every field is optional; the defaults describe the standard project layout
/// (`client/` web front-end, `src/semantra/` package sources).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    pub frontend: FrontendConfig,
    pub package: PackageConfig,
    pub launch: LaunchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FrontendConfig {
    /// Front-end project directory, relative to the project root.
    pub dir: PathBuf,
    /// Dependency install command, run inside `dir`.
    pub install: String,
    /// Asset build command, run inside `dir`.
    pub build: String,
    /// Built asset directory, relative to `dir`.
    pub output_dir: PathBuf,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("client"),
            install: "npm install".to_string(),
            build: "npm run build".to_string(),
            output_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Installer commands tried in order from the project root; the first
    /// success wins.
    pub installers: Vec<String>,
    /// Destination for the built assets, relative to the project root.
    pub assets_dir: PathBuf,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            installers: vec!["pip install .".to_string(), "pip3 install .".to_string()],
            assets_dir: ["src", "semantra", "client_public"].iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    /// Interpreter commands probed in order for the final instruction.
    pub interpreters: Vec<String>,
    /// Script the operator is told to run, relative to the project root.
    pub script: PathBuf,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            interpreters: vec!["python".to_string(), "python3".to_string()],
            script: ["src", "semantra", "semantra.py"].iter().collect(),
        }
    }
}

impl SetupConfig {
    pub fn validate(&self) -> Result<()> {
        require_path("frontend.dir", &self.frontend.dir)?;
        require_path("frontend.output_dir", &self.frontend.output_dir)?;
        require_command("frontend.install", &self.frontend.install)?;
        require_command("frontend.build", &self.frontend.build)?;
        require_list("package.installers", &self.package.installers)?;
        require_path("package.assets_dir", &self.package.assets_dir)?;
        require_list("launch.interpreters", &self.launch.interpreters)?;
        require_path("launch.script", &self.launch.script)?;
        Ok(())
    }
}

fn require_path(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(anyhow!("{field} must not be empty"));
    }
    Ok(())
}

fn require_command(field: &str, command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(anyhow!("{field} must not be blank"));
    }
    Ok(())
}

fn require_list(field: &str, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Err(anyhow!("{field} must be a non-empty array"));
    }
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(anyhow!("{field} must not contain blank entries"));
    }
    Ok(())
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SetupConfig::default()`.
pub fn load_config(path: &Path) -> Result<SetupConfig> {
    if !path.exists() {
        let cfg = SetupConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SetupConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid {}", path.display()))?;
    Ok(cfg)
}
