//! Replacement of the packaged client asset directory.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

/// Replace `destination` with a recursive copy of `source`.
///
/// The copy is staged in a fresh temp directory next to the destination and
/// swapped in with a rename, so a failed copy leaves any existing destination
/// untouched and no other sibling is ever removed. Nothing of the old
/// destination survives a successful replacement.
#[instrument(skip_all, fields(source = %source.display(), destination = %destination.display()))]
pub fn replace_dir(source: &Path, destination: &Path) -> Result<()> {
    if !source.is_dir() {
        return Err(anyhow!("missing source directory {}", source.display()));
    }

    let (parent, name) = split_destination(destination)?;
    fs::create_dir_all(&parent).with_context(|| format!("create {}", parent.display()))?;
    let mut prefix = OsString::from(".");
    prefix.push(name);
    prefix.push(".");
    // Dropping the guard removes the staging directory if we bail out early.
    let staging = tempfile::Builder::new()
        .prefix(&prefix)
        .tempdir_in(&parent)
        .with_context(|| format!("create staging directory in {}", parent.display()))?;

    copy_dir_recursive(source, staging.path())?;
    let permissions = fs::metadata(source)
        .with_context(|| format!("stat {}", source.display()))?
        .permissions();
    fs::set_permissions(staging.path(), permissions)
        .with_context(|| format!("set permissions on {}", staging.path().display()))?;

    remove_existing(destination)?;
    fs::rename(staging.path(), destination).with_context(|| {
        format!(
            "move {} to {}",
            staging.path().display(),
            destination.display()
        )
    })?;
    debug!("asset directory replaced");
    Ok(())
}

fn split_destination(destination: &Path) -> Result<(PathBuf, &OsStr)> {
    let name = destination
        .file_name()
        .with_context(|| format!("destination has no file name {}", destination.display()))?;
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((parent, name))
}

/// Remove whatever is at `path` (directory tree, file, or symlink), if anything.
fn remove_existing(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).with_context(|| format!("stat {}", path.display())),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).with_context(|| format!("remove {}", path.display()))
    } else {
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).with_context(|| format!("create {}", dst.display()))?;
    for entry in fs::read_dir(src).with_context(|| format!("read {}", src.display()))? {
        let entry = entry.context("read entry")?;
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if path.is_dir() {
            copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target).with_context(|| format!("copy {}", path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        fs::write(path, contents).expect("write");
    }

    fn listing(root: &Path) -> Vec<String> {
        let mut out = Vec::new();
        collect(root, root, &mut out);
        out.sort();
        out
    }

    fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).expect("read_dir") {
            let path = entry.expect("entry").path();
            let rel = path.strip_prefix(root).expect("prefix");
            out.push(rel.to_string_lossy().replace('\\', "/"));
            if path.is_dir() {
                collect(root, &path, out);
            }
        }
    }

    #[test]
    fn replaces_existing_destination_contents() {
        let temp = tempdir().expect("tempdir");
        let src = temp.path().join("client/public");
        let dst = temp.path().join("pkg/client_public");
        write(&src.join("index.html"), "<html>");
        write(&src.join("build/bundle.js"), "js");
        write(&dst.join("stale.txt"), "old");
        write(&dst.join("build/old.js"), "old");

        replace_dir(&src, &dst).expect("replace");

        assert_eq!(
            listing(&dst),
            vec!["build", "build/bundle.js", "index.html"]
        );
        assert_eq!(
            fs::read_to_string(dst.join("build/bundle.js")).expect("read"),
            "js"
        );
        assert_eq!(
            listing(&temp.path().join("pkg")),
            vec![
                "client_public",
                "client_public/build",
                "client_public/build/bundle.js",
                "client_public/index.html",
            ]
        );
    }

    #[test]
    fn creates_missing_destination_and_parents() {
        let temp = tempdir().expect("tempdir");
        let src = temp.path().join("public");
        let dst = temp.path().join("src/semantra/client_public");
        write(&src.join("index.html"), "<html>");

        replace_dir(&src, &dst).expect("replace");

        assert_eq!(listing(&dst), vec!["index.html"]);
    }

    #[test]
    fn repeating_the_replacement_is_stable() {
        let temp = tempdir().expect("tempdir");
        let src = temp.path().join("public");
        let dst = temp.path().join("out");
        write(&src.join("a.txt"), "a");

        replace_dir(&src, &dst).expect("first");
        replace_dir(&src, &dst).expect("second");

        assert_eq!(listing(&dst), vec!["a.txt"]);
    }

    #[test]
    fn missing_source_leaves_destination_untouched() {
        let temp = tempdir().expect("tempdir");
        let dst = temp.path().join("out");
        write(&dst.join("keep.txt"), "keep");

        let err = replace_dir(&temp.path().join("missing"), &dst).unwrap_err();

        assert!(err.to_string().contains("missing source directory"));
        assert_eq!(listing(&dst), vec!["keep.txt"]);
    }

    #[test]
    fn file_at_destination_is_replaced() {
        let temp = tempdir().expect("tempdir");
        let src = temp.path().join("public");
        let dst = temp.path().join("out");
        write(&src.join("a.txt"), "a");
        write(&dst, "not a directory");

        replace_dir(&src, &dst).expect("replace");

        assert!(dst.is_dir());
        assert_eq!(listing(&dst), vec!["a.txt"]);
    }

    #[test]
    fn unrelated_siblings_are_left_alone() {
        let temp = tempdir().expect("tempdir");
        let src = temp.path().join("public");
        let dst = temp.path().join("pkg/client_public");
        let sibling = temp.path().join("pkg/client_public.partial");
        write(&src.join("a.txt"), "a");
        write(&sibling.join("mine.txt"), "keep");

        replace_dir(&src, &dst).expect("replace");

        assert_eq!(listing(&sibling), vec!["mine.txt"]);
        assert_eq!(listing(&dst), vec!["a.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn destination_keeps_source_directory_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().expect("tempdir");
        let src = temp.path().join("public");
        let dst = temp.path().join("out");
        write(&src.join("a.txt"), "a");
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).expect("chmod");

        replace_dir(&src, &dst).expect("replace");

        let mode = fs::metadata(&dst).expect("stat").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
