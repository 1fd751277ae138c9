use crate::core::graph::WordGraph;
use crate::core::sequence::IdSequence;
use crate::core::types::{prefix_of_draw, PrefixId, WordId, PREFIX_BITS, SENTINEL_WORD};
use crate::error::{PhraseError, Result};
use log::{debug, trace};
use rand::RngCore;
use serde::Serialize;

/// Default chain length, in units of `PREFIX_BITS` bits.
pub const DEFAULT_LENGTH: usize = 5;
/// Default number of passphrases per run.
pub const DEFAULT_COUNT: usize = 32;
/// Longest chain the generator accepts (2560 bits).
pub const MAX_LENGTH: usize = 256;

/// One generated passphrase: the sampled prefixes are the password, the chosen
/// words are the mnemonic that helps remember it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passphrase {
    pub hook: Option<String>,
    pub prefixes: Vec<String>,
    pub word_ids: Vec<WordId>,
    pub words: Vec<String>,
    /// Positions where backward narrowing found no bigram-consistent candidate.
    pub mismatches: usize,
    /// Positions where forward selection could not follow the previous word.
    pub broken_links: usize,
}

impl Passphrase {
    pub fn password(&self) -> String {
        self.prefixes.concat()
    }

    /// Hook word (if any) followed by the chosen words, space separated.
    pub fn mnemonic(&self) -> String {
        self.hook
            .iter()
            .chain(self.words.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builds passphrases of a fixed length over a borrowed word graph.
/// Rounds share nothing but the graph.
pub struct PassphraseGenerator<'g> {
    graph: &'g WordGraph,
    length: usize,
    hook: WordId,
}

impl<'g> PassphraseGenerator<'g> {
    pub fn new(graph: &'g WordGraph, length: usize) -> Self {
        Self { graph, length, hook: SENTINEL_WORD }
    }

    /// Anchors every chain to `hook`. `SENTINEL_WORD` means no anchor.
    pub fn with_hook(mut self, hook: WordId) -> Result<Self> {
        self.graph.word(hook)?;
        self.hook = hook;
        Ok(self)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn entropy_bits(&self) -> usize {
        self.length.saturating_mul(PREFIX_BITS as usize)
    }

    /// One round with fresh randomness from `rng`.
    pub fn generate<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<Passphrase> {
        let draws = draw_prefixes(rng, self.length)?;
        self.generate_from_draws(&draws)
    }

    /// `count` independent rounds.
    pub fn generate_many<R: RngCore + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Vec<Passphrase>> {
        (0..count).map(|_| self.generate(rng)).collect()
    }

    /// Deterministic part of a round: `draws` are the raw 32-bit samples, one
    /// per chain position. Any other number of draws is a short read.
    pub fn generate_from_draws(&self, draws: &[u32]) -> Result<Passphrase> {
        if draws.len() != self.length {
            return Err(PhraseError::RandomSourceFault(format!(
                "expected {} draws, got {}",
                self.length,
                draws.len()
            )));
        }
        let prefix_ids: Vec<PrefixId> = draws.iter().map(|&d| prefix_of_draw(d)).collect();

        let mut prefixes = Vec::with_capacity(prefix_ids.len());
        let mut candidates = Vec::with_capacity(prefix_ids.len());
        for &prefix in &prefix_ids {
            let bucket = self.graph.bucket(prefix)?;
            prefixes.push(bucket.prefix().to_string());
            candidates.push(bucket.words().clone());
        }

        let mismatches = self.narrow_backward(&mut candidates)?;
        let (word_ids, broken_links) = self.select_forward(&candidates)?;

        let words = word_ids
            .iter()
            .map(|&id| self.graph.word(id).map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        let hook = if self.hook == SENTINEL_WORD {
            None
        } else {
            Some(self.graph.word(self.hook)?.to_string())
        };

        debug!(
            "generated {:?}: {} mismatches, {} broken links",
            prefixes, mismatches, broken_links
        );
        Ok(Passphrase { hook, prefixes, word_ids, words, mismatches, broken_links })
    }

    /// Last to first, keeps only candidates with a follower among the next
    /// position's candidates. A position that would be emptied keeps its full
    /// set and counts as a mismatch. The last position is left alone.
    fn narrow_backward(&self, candidates: &mut [IdSequence]) -> Result<usize> {
        let mut mismatches = 0;
        for i in (0..candidates.len().saturating_sub(1)).rev() {
            let (head, tail) = candidates.split_at_mut(i + 1);
            let next = &tail[0];
            let mut narrowed = IdSequence::new();
            for word in head[i].iter() {
                if self.graph.followers(word)?.overlaps(next) {
                    narrowed.push(word);
                }
            }
            if narrowed.is_empty() {
                trace!("position {}: no candidate links forward, keeping all {}", i, head[i].len());
                mismatches += 1;
            } else {
                trace!("position {}: narrowed {} -> {}", i, head[i].len(), narrowed.len());
                head[i] = narrowed;
            }
        }
        Ok(mismatches)
    }

    /// First to last, picks the lowest-id candidate that follows the previous
    /// word, else the lowest-id candidate outright.
    fn select_forward(&self, candidates: &[IdSequence]) -> Result<(Vec<WordId>, usize)> {
        let mut chosen = Vec::with_capacity(candidates.len());
        let mut broken_links = 0;
        let mut previous = self.hook;
        for set in candidates {
            let linked = set.intersect(&self.graph.followers(previous)?);
            let word = if linked.is_empty() {
                if previous != SENTINEL_WORD {
                    broken_links += 1;
                }
                set.get(0)?
            } else {
                linked.get(0)?
            };
            chosen.push(word);
            previous = word;
        }
        Ok((chosen, broken_links))
    }
}

/// Reads `4 * length` bytes from `rng` as `length` native-endian `u32`s.
pub fn draw_prefixes<R: RngCore + ?Sized>(rng: &mut R, length: usize) -> Result<Vec<u32>> {
    if length > MAX_LENGTH {
        return Err(PhraseError::InvalidLength { length, max: MAX_LENGTH });
    }
    let mut bytes = vec![0u8; 4 * length];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| PhraseError::RandomSourceFault(e.to_string()))?;
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// One passphrase of `length` words, optionally anchored to `hook`.
pub fn generate<R: RngCore + ?Sized>(
    graph: &WordGraph,
    length: usize,
    hook: Option<WordId>,
    rng: &mut R,
) -> Result<Passphrase> {
    PassphraseGenerator::new(graph, length)
        .with_hook(hook.unwrap_or(SENTINEL_WORD))?
        .generate(rng)
}
