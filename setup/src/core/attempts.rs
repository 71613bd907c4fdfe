//! Ordered fallback policy: try alternatives until one succeeds.

/// Run `attempt` for each item in order, stopping at the first success.
///
/// Errors from attempts that are followed by another attempt are handed to
/// `on_discard` and dropped; if every attempt fails, the last error is
/// returned. Returns `None` when `items` is empty.
pub fn first_success<I, T, E>(
    items: &[I],
    mut attempt: impl FnMut(&I) -> Result<T, E>,
    mut on_discard: impl FnMut(&I, E),
) -> Option<Result<T, E>> {
    let (last, earlier) = items.split_last()?;
    for item in earlier {
        match attempt(item) {
            Ok(value) => return Some(Ok(value)),
            Err(err) => on_discard(item, err),
        }
    }
    Some(attempt(last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_yields_none() {
        let items: [&str; 0] = [];
        let result = first_success(&items, |_| Ok::<_, String>(()), |_, _| {});
        assert!(result.is_none());
    }

    #[test]
    fn stops_at_first_success() {
        let mut tried = Vec::new();
        let result = first_success(
            &["a", "b", "c"],
            |item| {
                tried.push(*item);
                if *item == "b" {
                    Ok(*item)
                } else {
                    Err(format!("{item} failed"))
                }
            },
            |_, _| {},
        );
        assert_eq!(result, Some(Ok("b")));
        assert_eq!(tried, vec!["a", "b"]);
    }

    #[test]
    fn surfaces_only_the_last_error() {
        let mut discarded = Vec::new();
        let result = first_success(
            &["primary", "fallback"],
            |item| Err::<(), _>(format!("{item} failed")),
            |item, err| discarded.push((*item, err)),
        );
        assert_eq!(result, Some(Err("fallback failed".to_string())));
        assert_eq!(discarded, vec![("primary", "primary failed".to_string())]);
    }
}
