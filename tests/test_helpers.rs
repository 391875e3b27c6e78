//! Shared builders and proptest strategies for the integration tests

#![allow(dead_code)]
use proptest::prelude::*;
use seqforge::{ScoringMatrix, Sequence};

/// Build a DNA sequence from a literal known to be valid.
pub fn dna(text: &str) -> Sequence {
    Sequence::dna(text).expect("valid DNA literal")
}

/// Strategy over unambiguous DNA strings of `len` bases.
pub fn dna_string(len: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')], len)
        .prop_map(|bases| bases.into_iter().collect())
}

/// Strategy over DNA strings that may contain `N`.
pub fn dna_string_with_n(len: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![Just('A'), Just('C'), Just('G'), Just('T'), Just('N')],
        len,
    )
    .prop_map(|bases| bases.into_iter().collect())
}

/// Strategy over valid DNA [`Sequence`]s.
pub fn dna_sequence(len: std::ops::Range<usize>) -> impl Strategy<Value = Sequence> {
    dna_string(len).prop_map(|text| dna(&text))
}

/// Strategy over valid linear scoring matrices.
pub fn scoring_matrix() -> impl Strategy<Value = ScoringMatrix> {
    (1i32..6, -4i32..=0, -6i32..=0).prop_map(|(m, mm, gap)| {
        ScoringMatrix::linear(m, mm, gap).expect("strategy respects sign constraints")
    })
}
