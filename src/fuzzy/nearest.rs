// File: src/fuzzy/nearest.rs
use crate::core::graph::WordGraph;
use crate::core::types::{WordId, SENTINEL_WORD};
use log::debug;

/// Levenshtein distance with unit costs and no transpositions.
///
/// Keeps a single row over the shorter string plus the diagonal cell, so
/// memory is O(min(|a|, |b|)).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut cost: Vec<usize> = (0..=short.len()).collect();
    for (i, &lc) in long.iter().enumerate() {
        let mut diagonal = cost[0];
        cost[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let substitute = diagonal + usize::from(sc != lc);
            diagonal = cost[j + 1];
            cost[j + 1] = (cost[j + 1] + 1).min(cost[j] + 1).min(substitute);
        }
    }
    cost[short.len()]
}

/// Scans the whole dictionary for the word closest to `query`.
///
/// Returns `(id, distance)`; ties go to the lowest id. On an empty dictionary
/// the sentinel comes back with `usize::MAX`.
pub fn find_nearest_with_distance(graph: &WordGraph, query: &str) -> (WordId, usize) {
    let mut best = (SENTINEL_WORD, usize::MAX);
    for (id, word) in graph.dictionary() {
        let distance = edit_distance(query, word);
        if distance < best.1 {
            best = (id, distance);
            if distance == 0 {
                break;
            }
        }
    }
    debug!("hook {:?} resolved to word {} at distance {}", query, best.0, best.1);
    best
}

pub fn find_nearest(graph: &WordGraph, query: &str) -> WordId {
    find_nearest_with_distance(graph, query).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_distances() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("sitting", "kitten"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn transpositions_cost_two() {
        assert_eq!(edit_distance("ab", "ba"), 2);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
    }
}
