// --- File: src/core/graph.rs
use crate::core::codec;
use crate::core::sequence::IdSequence;
use crate::core::types::{word_prefix, PrefixId, WordId, PREFIX_SPACE, SENTINEL_WORD};
use crate::error::{PhraseError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// The header is untrusted; never reserve more than this up front.
const MAX_PREALLOC: usize = 1 << 20;

/// Words sharing one lowercase three-letter prefix, in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixBucket {
    prefix: String,
    words: IdSequence,
}

impl PrefixBucket {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn words(&self) -> &IdSequence {
        &self.words
    }
}

/// The dictionary, its encoded follower lists and the prefix buckets.
/// Built once and only read afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordGraph {
    /// Index 0 is the sentinel and holds an empty string.
    words: Vec<String>,
    /// Encoded follower list per word id, sentinel included.
    followers: Vec<Vec<u8>>,
    buckets: Vec<PrefixBucket>,
}

impl WordGraph {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses the corpus format: a word count `n`, then `n - 1` words (ids
    /// `1..n`), then `n` encoded follower lines (ids `0..n`).
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let header = read_line_bytes(&mut reader)?
            .ok_or_else(|| PhraseError::corrupt("missing word count"))?;
        let n_words: usize = std::str::from_utf8(&header)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| PhraseError::corrupt("unparsable word count"))?;

        let mut words = Vec::with_capacity(n_words.clamp(1, MAX_PREALLOC));
        words.push(String::new());
        let mut buckets: Vec<PrefixBucket> = Vec::with_capacity(PREFIX_SPACE);
        let mut bucket_index: HashMap<String, PrefixId> = HashMap::with_capacity(PREFIX_SPACE);

        for id in 1..n_words {
            let line = read_line_bytes(&mut reader)?
                .ok_or_else(|| PhraseError::corrupt(format!("missing word {}", id)))?;
            let word = String::from_utf8(line)
                .map_err(|_| PhraseError::corrupt(format!("word {} is not valid UTF-8", id)))?;
            let prefix = word_prefix(&word)
                .ok_or_else(|| PhraseError::corrupt(format!("word {} ({:?}) is too short", id, word)))?;

            let slot = match bucket_index.get(&prefix) {
                Some(&slot) => slot,
                None => {
                    if buckets.len() == PREFIX_SPACE {
                        return Err(PhraseError::corrupt("too many prefixes"));
                    }
                    bucket_index.insert(prefix.clone(), buckets.len());
                    buckets.push(PrefixBucket { prefix, words: IdSequence::new() });
                    buckets.len() - 1
                }
            };
            buckets[slot].words.push(id);
            words.push(word);
        }

        if buckets.len() != PREFIX_SPACE {
            return Err(PhraseError::corrupt(format!(
                "not enough prefixes ({} of {})",
                buckets.len(),
                PREFIX_SPACE
            )));
        }

        let mut followers = Vec::with_capacity(n_words.min(MAX_PREALLOC));
        for id in 0..n_words {
            let line = read_line_bytes(&mut reader)?
                .ok_or_else(|| PhraseError::corrupt(format!("missing follower line {}", id)))?;
            followers.push(line);
        }

        debug!(
            "loaded word graph: {} words, {} prefix buckets",
            words.len().saturating_sub(1),
            buckets.len()
        );
        Ok(Self { words, followers, buckets })
    }

    /// Word count including the sentinel.
    pub fn n_words(&self) -> usize {
        self.words.len()
    }

    pub fn word(&self, id: WordId) -> Result<&str> {
        self.words
            .get(id)
            .map(String::as_str)
            .ok_or(PhraseError::IndexFault { index: id, len: self.words.len() })
    }

    pub fn followers_encoded(&self, id: WordId) -> Result<&[u8]> {
        self.followers
            .get(id)
            .map(Vec::as_slice)
            .ok_or(PhraseError::IndexFault { index: id, len: self.followers.len() })
    }

    /// Decodes the follower list of `id`. Not cached; every call decodes afresh.
    pub fn followers(&self, id: WordId) -> Result<IdSequence> {
        codec::decode(self.followers_encoded(id)?)
    }

    pub fn bucket(&self, prefix: PrefixId) -> Result<&PrefixBucket> {
        self.buckets
            .get(prefix)
            .ok_or(PhraseError::IndexFault { index: prefix, len: self.buckets.len() })
    }

    pub fn buckets(&self) -> &[PrefixBucket] {
        &self.buckets
    }

    /// Bucket holding words that start with `prefix` (case-insensitive).
    pub fn find_prefix(&self, prefix: &str) -> Option<PrefixId> {
        let prefix = word_prefix(prefix)?;
        self.buckets.iter().position(|b| b.prefix == prefix)
    }

    /// Real words with their ids, sentinel excluded.
    pub fn dictionary(&self) -> impl Iterator<Item = (WordId, &str)> + '_ {
        self.words.iter().enumerate().skip(1).map(|(id, w)| (id, w.as_str()))
    }

    /// One debugging line: `#id: word: <encoded, first 30 bytes> [followers]`.
    pub fn describe_word(&self, id: WordId) -> Result<String> {
        let encoded = self.followers_encoded(id)?;
        let shown = String::from_utf8_lossy(&encoded[..encoded.len().min(30)]);
        Ok(format!("#{}: {}: {} {}", id, self.word(id)?, shown, self.followers(id)?))
    }

    /// Writes the graph back out in the corpus format.
    pub fn write_corpus<W: Write>(&self, out: W) -> Result<()> {
        write_encoded_corpus(out, &self.words[1..], &self.followers)
    }

    /// Re-checks the invariants `from_reader` establishes. Used on graphs that
    /// did not come from the text format.
    pub fn validate(&self) -> Result<()> {
        if self.words.is_empty() || self.followers.len() != self.words.len() {
            return Err(PhraseError::corrupt("follower lines do not match word count"));
        }
        if self.buckets.len() != PREFIX_SPACE {
            return Err(PhraseError::corrupt(format!(
                "expected {} prefixes, found {}",
                PREFIX_SPACE,
                self.buckets.len()
            )));
        }
        let mut seen = 0;
        let mut last_first = SENTINEL_WORD;
        for bucket in &self.buckets {
            if bucket.words.is_empty() || !bucket.words.is_ascending() {
                return Err(PhraseError::corrupt(format!("bad bucket {:?}", bucket.prefix)));
            }
            // Buckets are numbered in order of their first word.
            let first = bucket.words.as_slice()[0];
            if first <= last_first {
                return Err(PhraseError::corrupt(format!(
                    "bucket {:?} out of first-seen order",
                    bucket.prefix
                )));
            }
            last_first = first;
            for id in bucket.words.iter() {
                let word = self.words.get(id).filter(|_| id != 0).ok_or_else(|| {
                    PhraseError::corrupt(format!("bucket {:?} names unknown word {}", bucket.prefix, id))
                })?;
                if word_prefix(word).as_deref() != Some(bucket.prefix.as_str()) {
                    return Err(PhraseError::corrupt(format!(
                        "word {} filed under prefix {:?}",
                        id, bucket.prefix
                    )));
                }
                seen += 1;
            }
        }
        if seen != self.words.len() - 1 {
            return Err(PhraseError::corrupt("words missing from prefix buckets"));
        }
        Ok(())
    }
}

/// Writes a corpus from plain lists: `words` are ids `1..`, `followers` are
/// ascending lists for ids `0..` (so one longer than `words`).
pub fn write_corpus_lists<W: Write, S: AsRef<str>>(
    out: W,
    words: &[S],
    followers: &[IdSequence],
) -> Result<()> {
    if followers.len() != words.len() + 1 {
        return Err(PhraseError::corrupt("need one follower list per word plus the sentinel"));
    }
    let encoded = followers
        .iter()
        .map(|f| codec::encode(f.as_slice()))
        .collect::<Result<Vec<_>>>()?;
    write_encoded_corpus(out, words, &encoded)
}

fn write_encoded_corpus<W: Write, S: AsRef<str>>(
    mut out: W,
    words: &[S],
    followers: &[Vec<u8>],
) -> Result<()> {
    writeln!(out, "{}", words.len() + 1)?;
    for word in words {
        writeln!(out, "{}", word.as_ref())?;
    }
    for line in followers {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// One raw line without its trailing `\n`, or `None` at end of input.
fn read_line_bytes<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    Ok(Some(line))
}
