//! Shared proptest generators.

use local_token::TOKEN_LEN;
use proptest::prelude::*;

/// Generate strings shaped like encoded tokens (44 base64 characters).
pub fn token_like_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9+/]{43}=".prop_map(|s| {
        debug_assert_eq!(s.len(), TOKEN_LEN);
        s
    })
}

/// Generate arbitrary candidate strings, including empty and non-ASCII ones.
pub fn candidate_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        token_like_strategy(),
        any::<String>(),
        "[A-Za-z0-9+/=]{0,100}",
    ]
}

/// Generate token file identifiers, optionally nested one or two levels.
pub fn file_id_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9_-]{0,12}", 1..=3).prop_map(|segments| {
        let mut id = segments.join("/");
        id.push_str(".token");
        id
    })
}

/// A way to derive a wrong candidate from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Replace the character at an index
    Replace(usize),
    /// Keep only a strict prefix of the given length
    Prefix(usize),
    /// Keep only a strict suffix starting at the given index
    Suffix(usize),
    /// Append the given text
    Append(String),
    /// Remove the character at an index
    Remove(usize),
}

/// Generate mutations applicable to a token of [`TOKEN_LEN`] characters.
pub fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (0..TOKEN_LEN).prop_map(Mutation::Replace),
        (0..TOKEN_LEN).prop_map(Mutation::Prefix),
        (1..=TOKEN_LEN).prop_map(Mutation::Suffix),
        "[A-Za-z0-9=\n ]{1,8}".prop_map(Mutation::Append),
        (0..TOKEN_LEN).prop_map(Mutation::Remove),
    ]
}

/// Apply a mutation to an ASCII token, always producing a different string.
#[must_use]
pub fn apply_mutation(token: &str, mutation: &Mutation) -> String {
    match mutation {
        Mutation::Replace(i) => {
            let mut bytes = token.as_bytes().to_vec();
            bytes[*i] = if bytes[*i] == b'A' { b'B' } else { b'A' };
            String::from_utf8_lossy(&bytes).into_owned()
        }
        Mutation::Prefix(len) => token[..*len].to_string(),
        Mutation::Suffix(start) => token[*start..].to_string(),
        Mutation::Append(extra) => format!("{token}{extra}"),
        Mutation::Remove(i) => {
            let mut s = token.to_string();
            s.remove(*i);
            s
        }
    }
}
