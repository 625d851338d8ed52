//! Tokenizer and word normalizer
//!
//! Splits raw text on whitespace, keeps only ASCII letters and digits,
//! lowercases them, and drops anything too short to carry signal.

/// Tokens of this length or shorter are discarded
pub const MIN_TOKEN_LENGTH: usize = 2;

/// Longer tokens are truncated to this length
pub const MAX_TOKEN_LENGTH: usize = 49;

const SEPARATORS: [char; 4] = [' ', '\t', '\n', '\r'];

/// Normalize a raw word: strip non-alphanumerics and lowercase the rest
pub fn normalize(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(MAX_TOKEN_LENGTH)
        .collect()
}

/// Candidate tokens of `text`, in order, repeats included
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(SEPARATORS)
        .filter(|raw| !raw.is_empty())
        .map(normalize)
        .filter(|token| token.len() > MIN_TOKEN_LENGTH)
}

/// True if `token` could have been produced by [`tokenize`]
pub fn is_valid_token(token: &str) -> bool {
    token.len() > MIN_TOKEN_LENGTH
        && token.len() <= MAX_TOKEN_LENGTH
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}
