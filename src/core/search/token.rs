use crate::core::option::{ListOption, Options};
use regex::Regex;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    pub index: usize,
    /// Matched char ranges within the label, sorted.
    pub ranges: Vec<(usize, usize)>,
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Options whose label has, for every query token, a word starting with it.
///
/// Structural rows never match. An empty query matches every option with no
/// ranges. List order is preserved.
pub fn token_search(query: &str, options: &[ListOption]) -> Vec<TokenMatch> {
    let patterns = word_patterns(query);

    options
        .iter()
        .filter(|option| !option.unselectable)
        .filter_map(|option| {
            let mut ranges = Vec::new();
            for pattern in &patterns {
                let found = pattern.captures(&option.label)?.get(1)?;
                ranges.push((
                    char_offset(&option.label, found.start()),
                    char_offset(&option.label, found.end()),
                ));
            }
            ranges.sort_unstable();
            Some(TokenMatch {
                index: option.index,
                ranges,
            })
        })
        .collect()
}

/// Synchronous filter over raw options: the raw values of every match.
pub fn filter_raw(query: &str, options: &Options) -> Vec<Value> {
    token_search(query, options.as_slice())
        .into_iter()
        .filter_map(|found| options.get(found.index))
        .map(|option| option.value.clone())
        .collect()
}

/// Whether every token of `query` starts a word of `label`. An empty query
/// matches nothing.
pub fn matches_tokens(label: &str, query: &str) -> bool {
    let patterns = word_patterns(query);
    !patterns.is_empty() && patterns.iter().all(|pattern| pattern.is_match(label))
}

pub(crate) fn word_patterns(query: &str) -> Vec<Regex> {
    tokenize(query)
        .iter()
        .filter_map(|token| word_prefix(token))
        .collect()
}

pub(crate) fn word_prefix(token: &str) -> Option<Regex> {
    if token.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)(?:^|[^\w])({})", regex::escape(token))).ok()
}

pub(crate) fn char_offset(text: &str, byte: usize) -> usize {
    text.get(..byte).map(|head| head.chars().count()).unwrap_or(0)
}
