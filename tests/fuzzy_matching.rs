mod common;

use common::graph;
use phrase_core::core::types::SENTINEL_WORD;
use phrase_core::fuzzy::nearest::{edit_distance, find_nearest, find_nearest_with_distance};
use proptest::prelude::*;

#[test]
fn exact_word_is_found_at_distance_zero() {
    let graph = graph(&["amber", "ambit"], &[]);
    let amber = graph.dictionary().find(|(_, w)| *w == "amber").map(|(id, _)| id).unwrap();
    assert_eq!(find_nearest_with_distance(&graph, "amber"), (amber, 0));
}

#[test]
fn nearest_word_wins() {
    let graph = graph(&["bandit", "banner"], &[]);
    let id = find_nearest(&graph, "bandt");
    assert_eq!(graph.word(id).unwrap(), "bandit");
}

#[test]
fn ties_go_to_the_lowest_id() {
    // Both extra words sit one edit from the query; "abcon" is two away.
    let graph = graph(&["abcxa", "abcxb"], &[]);
    let (id, distance) = find_nearest_with_distance(&graph, "abcx");
    assert_eq!(distance, 1);
    assert_eq!(graph.word(id).unwrap(), "abcxa");
    assert_ne!(id, SENTINEL_WORD);
}

fn arb_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn distance_is_symmetric(a in arb_word(), b in arb_word()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn distance_zero_iff_equal(a in arb_word(), b in arb_word()) {
        prop_assert_eq!(edit_distance(&a, &b) == 0, a == b);
    }

    #[test]
    fn triangle_inequality(a in arb_word(), b in arb_word(), c in arb_word()) {
        prop_assert!(edit_distance(&a, &c) <= edit_distance(&a, &b) + edit_distance(&b, &c));
    }

    #[test]
    fn bounded_by_longer_length(a in arb_word(), b in arb_word()) {
        let d = edit_distance(&a, &b);
        prop_assert!(d <= a.len().max(b.len()));
        prop_assert!(d >= a.len().abs_diff(b.len()));
    }
}
