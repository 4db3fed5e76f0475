//! `friends` normalization.

use animal_etl_client::FriendsField;

/// Split a comma-delimited friends string into trimmed, non-empty names.
pub fn split_delimited(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a raw `friends` value into a list of names.
///
/// Absent and blank values become an empty list. Lists are passed through
/// unchanged; delimited text is split on `,` with order preserved.
pub fn normalize_friends(raw: Option<&FriendsField>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(FriendsField::Delimited(text)) => split_delimited(text),
        Some(FriendsField::List(names)) => names.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delimited(s: &str) -> FriendsField {
        FriendsField::Delimited(s.to_string())
    }

    #[test]
    fn test_absent_and_blank_are_empty() {
        assert!(normalize_friends(None).is_empty());
        assert!(normalize_friends(Some(&delimited(""))).is_empty());
        assert!(normalize_friends(Some(&delimited("   "))).is_empty());
        assert!(normalize_friends(Some(&delimited(" , ,"))).is_empty());
    }

    #[test]
    fn test_splits_and_trims_in_order() {
        assert_eq!(
            normalize_friends(Some(&delimited("a, b,,c"))),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            normalize_friends(Some(&delimited("  Tom ,Jerry  "))),
            vec!["Tom", "Jerry"]
        );
    }

    #[test]
    fn test_single_name() {
        assert_eq!(normalize_friends(Some(&delimited("Rex"))), vec!["Rex"]);
    }

    #[test]
    fn test_list_passes_through() {
        let list = FriendsField::List(vec!["Rex".into(), "Tom".into()]);
        assert_eq!(normalize_friends(Some(&list)), vec!["Rex", "Tom"]);
    }
}
