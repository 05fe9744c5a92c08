use super::autocomplete::prefix_match;
use super::token::{char_offset, tokenize, word_prefix};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Highlighted(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Highlighted(text) => text,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Self::Highlighted(_))
    }
}

/// Char ranges of `label` words matched by the tokens of `query`.
/// Overlapping ranges are merged.
pub fn highlight_tokens(label: &str, query: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    for token in tokenize(query) {
        let Some(pattern) = word_prefix(&token) else {
            continue;
        };
        for captures in pattern.captures_iter(label) {
            if let Some(found) = captures.get(1) {
                ranges.push((
                    char_offset(label, found.start()),
                    char_offset(label, found.end()),
                ));
            }
        }
    }
    merge(ranges)
}

/// The range of `label` covered by `query` when the label starts with it.
pub fn highlight_prefix(label: &str, query: &str) -> Vec<(usize, usize)> {
    if !prefix_match(label, query) {
        return Vec::new();
    }
    vec![(0, query.chars().count().min(label.chars().count()))]
}

/// Splits `text` into plain and highlighted runs.
pub fn segments(text: &str, highlights: &[(usize, usize)]) -> Vec<Segment> {
    if highlights.is_empty() {
        return vec![Segment::Plain(text.to_string())];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sorted = highlights.to_vec();
    sorted.sort_unstable();

    let mut out = Vec::<Segment>::new();
    let mut cursor = 0usize;
    for (start, end) in sorted {
        let start = start.min(chars.len()).max(cursor);
        let end = end.min(chars.len());
        if start > cursor {
            out.push(Segment::Plain(chars[cursor..start].iter().collect()));
        }
        if end > start {
            out.push(Segment::Highlighted(chars[start..end].iter().collect()));
        }
        cursor = end.max(cursor);
    }
    if cursor < chars.len() {
        out.push(Segment::Plain(chars[cursor..].iter().collect()));
    }
    if out.is_empty() {
        out.push(Segment::Plain(text.to_string()));
    }
    out
}

fn merge(mut ranges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    ranges.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
