//! Property tests for the follower codec and sorted intersection.

use phrase_core::core::codec::{decode, encode};
use phrase_core::core::sequence::IdSequence;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Strictly ascending, non-zero ids with a mix of dense runs and wide gaps.
fn arb_ascending() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec((1usize..4, 0usize..40), 0..60).prop_map(|steps| {
        let mut ids = Vec::new();
        let mut current = 0usize;
        for (gap, run) in steps {
            current += gap * if gap == 3 { 1000 } else { 1 };
            ids.push(current);
            for _ in 0..run % 5 {
                current += 1;
                ids.push(current);
            }
        }
        ids
    })
}

fn arb_id_set() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::btree_set(1usize..200, 0..50).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn decode_inverts_encode(ids in arb_ascending()) {
        let encoded = encode(&ids).unwrap();
        prop_assert!(!encoded.contains(&b'\n'));
        let decoded = decode(&encoded).unwrap();
        prop_assert_eq!(decoded.as_slice(), ids.as_slice());
    }

    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        if let Ok(ids) = decode(&bytes) {
            prop_assert!(ids.is_ascending());
        }
    }

    #[test]
    fn intersection_is_exact(a in arb_id_set(), b in arb_id_set()) {
        let result = IdSequence::from(a.clone()).intersect(&IdSequence::from(b.clone()));
        let expected: Vec<usize> = a
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .intersection(&b.iter().copied().collect())
            .copied()
            .collect();
        prop_assert_eq!(result.as_slice(), expected.as_slice());
        prop_assert!(result.is_ascending());
    }

    #[test]
    fn intersection_commutes(a in arb_id_set(), b in arb_id_set()) {
        let a = IdSequence::from(a);
        let b = IdSequence::from(b);
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
        prop_assert_eq!(a.overlaps(&b), !a.intersect(&b).is_empty());
    }
}
