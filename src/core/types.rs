// src/core/types.rs

/// A unique identifier for a dictionary word. Real words occupy `1..n_words`.
pub type WordId = usize;

/// Index of a prefix bucket, always in `0..PREFIX_SPACE`.
pub type PrefixId = usize;

/// Id 0 stands for "no word": the hook of an unanchored chain.
pub const SENTINEL_WORD: WordId = 0;

/// Number of leading characters that group words into buckets.
pub const PREFIX_LEN: usize = 3;

/// Prefix space size. Every corpus covers exactly this many distinct
/// prefixes, so one sampled prefix carries `PREFIX_BITS` bits of entropy.
pub const PREFIX_SPACE: usize = 1 << PREFIX_BITS;

pub const PREFIX_BITS: u32 = 10;

/// Reduces a raw random draw to a bucket id.
pub fn prefix_of_draw(draw: u32) -> PrefixId {
    (draw as usize) & (PREFIX_SPACE - 1)
}

/// Lowercased leading `PREFIX_LEN` characters of `word`, or `None` if it is too short.
pub fn word_prefix(word: &str) -> Option<String> {
    let prefix: String = word.chars().flat_map(char::to_lowercase).take(PREFIX_LEN).collect();
    if word.chars().count() < PREFIX_LEN {
        None
    } else {
        Some(prefix)
    }
}
