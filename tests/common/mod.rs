#![allow(dead_code)]

use phrase_core::core::graph::write_corpus_lists;
use phrase_core::core::sequence::IdSequence;
use phrase_core::core::types::PREFIX_SPACE;
use phrase_core::WordGraph;
use rand::RngCore;

/// Three lowercase letters naming bucket `i` (`aaa`, `aab`, ...).
pub fn prefix_name(i: usize) -> String {
    let letters = [i / 676, (i / 26) % 26, i % 26];
    letters.iter().map(|&l| (b'a' + l as u8) as char).collect()
}

/// Corpus text with one `<prefix>on` word per bucket (ids `1..=PREFIX_SPACE`),
/// then `extra` words, and the given follower lists.
pub fn corpus_text(extra: &[&str], links: &[(usize, Vec<usize>)]) -> Vec<u8> {
    let mut words: Vec<String> = (0..PREFIX_SPACE).map(|i| format!("{}on", prefix_name(i))).collect();
    words.extend(extra.iter().map(|w| w.to_string()));
    let mut followers = vec![IdSequence::new(); words.len() + 1];
    for (id, next) in links {
        followers[*id] = IdSequence::from(next.clone());
    }
    let mut out = Vec::new();
    write_corpus_lists(&mut out, &words, &followers).unwrap();
    out
}

pub fn graph(extra: &[&str], links: &[(usize, Vec<usize>)]) -> WordGraph {
    WordGraph::from_reader(corpus_text(extra, links).as_slice()).unwrap()
}

/// Replays fixed 32-bit draws, cycling when it runs out.
pub struct ScriptedRng {
    draws: Vec<u32>,
    pos: usize,
    pub bytes_served: usize,
}

impl ScriptedRng {
    pub fn new(draws: Vec<u32>) -> Self {
        Self { draws, pos: 0, bytes_served: 0 }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.bytes_served += dest.len();
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_ne_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// A random source that is never available.
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {}

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "random device closed",
        )))
    }
}
