pub mod autocomplete;
pub mod highlight;
pub mod token;

pub use autocomplete::{find_by_prefix, prefix_match, suggest_option};
pub use highlight::{Segment, highlight_prefix, highlight_tokens, segments};
pub use token::{TokenMatch, filter_raw, matches_tokens, token_search, tokenize};
