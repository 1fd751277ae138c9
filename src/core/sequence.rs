// File: src/core/sequence.rs
use crate::core::types::WordId;
use crate::error::{PhraseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered, growable run of word ids.
///
/// Bucket contents and decoded follower sets are kept ascending, which is
/// what [`IdSequence::intersect`] relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequence {
    ids: Vec<WordId>,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { ids: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, id: WordId) {
        self.ids.push(id);
    }

    /// Bounds-checked access. Reading past the populated range is a logic error
    /// surfaced as [`PhraseError::IndexFault`].
    pub fn get(&self, index: usize) -> Result<WordId> {
        self.ids.get(index).copied().ok_or(PhraseError::IndexFault {
            index,
            len: self.ids.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = WordId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[WordId] {
        &self.ids
    }

    /// Ids present in both sequences, ascending. Both inputs must be ascending.
    /// O(n + m) merge scan.
    pub fn intersect(&self, other: &IdSequence) -> IdSequence {
        let (a, b) = (&self.ids, &other.ids);
        let mut out = IdSequence::new();
        let (mut ai, mut bi) = (0, 0);
        while ai < a.len() && bi < b.len() {
            match a[ai].cmp(&b[bi]) {
                std::cmp::Ordering::Equal => {
                    out.push(a[ai]);
                    ai += 1;
                    bi += 1;
                }
                std::cmp::Ordering::Less => ai += 1,
                std::cmp::Ordering::Greater => bi += 1,
            }
        }
        out
    }

    /// Cheaper than `intersect(..).is_empty()` when only overlap matters.
    pub fn overlaps(&self, other: &IdSequence) -> bool {
        let (a, b) = (&self.ids, &other.ids);
        let (mut ai, mut bi) = (0, 0);
        while ai < a.len() && bi < b.len() {
            match a[ai].cmp(&b[bi]) {
                std::cmp::Ordering::Equal => return true,
                std::cmp::Ordering::Less => ai += 1,
                std::cmp::Ordering::Greater => bi += 1,
            }
        }
        false
    }

    pub fn is_ascending(&self) -> bool {
        self.ids.windows(2).all(|w| w[0] < w[1])
    }
}

impl From<Vec<WordId>> for IdSequence {
    fn from(ids: Vec<WordId>) -> Self {
        Self { ids }
    }
}

impl FromIterator<WordId> for IdSequence {
    fn from_iter<I: IntoIterator<Item = WordId>>(iter: I) -> Self {
        Self { ids: iter.into_iter().collect() }
    }
}

impl fmt::Display for IdSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.ids.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_bounds_checked() {
        let seq = IdSequence::from(vec![4, 9]);
        assert_eq!(seq.get(1).unwrap(), 9);
        match seq.get(2) {
            Err(PhraseError::IndexFault { index, len }) => {
                assert_eq!((index, len), (2, 2));
            }
            other => panic!("expected IndexFault, got {:?}", other),
        }
        assert!(IdSequence::new().get(0).is_err());
    }

    #[test]
    fn intersect_merges_sorted_inputs() {
        let a = IdSequence::from(vec![1, 2, 3, 5, 80]);
        let b = IdSequence::from(vec![2, 5, 6, 80, 81]);
        assert_eq!(a.intersect(&b).as_slice(), &[2, 5, 80]);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&IdSequence::from(vec![4, 6])));
        assert!(a.intersect(&IdSequence::new()).is_empty());
    }

    #[test]
    fn clone_is_deep() {
        let original = IdSequence::from(vec![1, 2]);
        let mut copy = original.clone();
        copy.push(3);
        assert_eq!(original.len(), 2);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn displays_like_a_list() {
        assert_eq!(IdSequence::from(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(IdSequence::new().to_string(), "[]");
    }
}
