use super::token::word_patterns;
use crate::core::option::ListOption;

/// Case-insensitive "label starts with query".
pub fn prefix_match(label: &str, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    label.to_lowercase().starts_with(&query.to_lowercase())
}

/// Option to autoselect for `query`: the first navigable option that
/// [`token_search`](super::token_search) would also return.
pub fn suggest_option<'a>(
    query: &str,
    options: &'a [ListOption],
    skip: &dyn Fn(&ListOption) -> bool,
) -> Option<&'a ListOption> {
    let patterns = word_patterns(query);
    if patterns.is_empty() {
        return None;
    }
    options
        .iter()
        .filter(|option| !skip(option))
        .find(|option| patterns.iter().all(|pattern| pattern.is_match(&option.label)))
}

/// First navigable option whose label starts with `search`. Used by type-ahead.
pub fn find_by_prefix<'a>(
    search: &str,
    options: &'a [ListOption],
    skip: &dyn Fn(&ListOption) -> bool,
) -> Option<&'a ListOption> {
    options
        .iter()
        .filter(|option| !skip(option))
        .find(|option| prefix_match(&option.label, search))
}

#[cfg(test)]
mod tests {
    use super::{find_by_prefix, prefix_match, suggest_option};
    use crate::core::option::{Options, skip_unselectable};

    #[test]
    fn prefix_match_ignores_case() {
        assert!(prefix_match("Apple", "ap"));
        assert!(prefix_match("Éclair", "éc"));
        assert!(!prefix_match("Apple", "pp"));
        assert!(!prefix_match("Apple", ""));
    }

    #[test]
    fn suggestion_is_the_first_word_prefix_match() {
        let options = Options::from_strings(["Apple", "Banana", "Cherry"]);
        let found = suggest_option("b", options.as_slice(), &skip_unselectable);
        assert_eq!(found.map(|o| o.label.as_str()), Some("Banana"));

        let apples = Options::from_strings(["Pineapple", "Red Apple", "Green Apple"]);
        let found = suggest_option("apple", apples.as_slice(), &skip_unselectable);
        assert_eq!(found.map(|o| o.label.as_str()), Some("Red Apple"));
        assert!(suggest_option(" ", apples.as_slice(), &skip_unselectable).is_none());
    }

    #[test]
    fn suggestion_passes_over_skipped_options() {
        let options = Options::from_raw(&[
            serde_json::json!({ "label": "Lemon", "disabled": true }),
            serde_json::json!("Lime"),
        ]);
        let found = suggest_option("l", options.as_slice(), &skip_unselectable);
        assert_eq!(found.map(|o| o.label.as_str()), Some("Lime"));
    }

    #[test]
    fn type_ahead_finds_first_prefix_match() {
        let options = Options::from_strings(["Apple", "Banana", "Blueberry"]);
        let found = find_by_prefix("bl", options.as_slice(), &skip_unselectable);
        assert_eq!(found.map(|o| o.index), Some(2));
        assert!(find_by_prefix("z", options.as_slice(), &skip_unselectable).is_none());
    }
}
