use proptest::prelude::*;
use seqforge::{Sequence, SequenceError, SequenceKind};
mod test_helpers;
use test_helpers::*;

proptest! {
    #[test]
    fn complement_is_an_involution(text in dna_string_with_n(1..200)) {
        let seq = dna(&text);
        let twice = seq.complement().unwrap().complement().unwrap();
        prop_assert_eq!(twice.bases(), seq.bases());
    }

    #[test]
    fn reverse_is_an_involution(text in dna_string_with_n(1..200)) {
        let seq = dna(&text);
        let twice = seq.reverse().unwrap().reverse().unwrap();
        prop_assert_eq!(twice.bases(), seq.bases());
    }

    #[test]
    fn reverse_complement_matches_composition(text in dna_string(1..200)) {
        let seq = dna(&text);
        let rc = seq.reverse_complement().unwrap();
        prop_assert_eq!(rc.len(), seq.len());
        let back = rc.reverse_complement().unwrap();
        prop_assert_eq!(back.bases(), seq.bases());
        prop_assert!((rc.gc_content() - seq.gc_content()).abs() < 1e-12);
    }

    #[test]
    fn gc_content_is_a_fraction(text in dna_string_with_n(1..200)) {
        let gc = dna(&text).gc_content();
        prop_assert!((0.0..=1.0).contains(&gc));
    }

    #[test]
    fn transcription_round_trips(text in dna_string(1..100)) {
        let seq = dna(&text);
        let rna = seq.transcribe().unwrap();
        prop_assert_eq!(rna.kind(), SequenceKind::Rna);
        prop_assert!(!rna.bases().contains('T'));
        let back = rna.reverse_transcribe().unwrap();
        prop_assert_eq!(back.bases(), seq.bases());
    }

    #[test]
    fn lowercase_input_is_normalised(text in dna_string(1..100)) {
        let lower = Sequence::dna(&text.to_ascii_lowercase()).unwrap();
        prop_assert_eq!(lower.bases(), text.as_str());
    }
}

#[test]
fn gc_content_examples() {
    assert_eq!(dna("GCGC").gc_content(), 1.0);
    assert_eq!(dna("ATAT").gc_content(), 0.0);
    assert_eq!(dna("ATGC").gc_content(), 0.5);
}

#[test]
fn invalid_symbols_are_rejected_with_position() {
    assert!(matches!(
        Sequence::dna("ACGU"),
        Err(SequenceError::InvalidSymbol { position: 3, .. })
    ));
    assert!(matches!(
        Sequence::rna("ACGT"),
        Err(SequenceError::InvalidSymbol { position: 3, .. })
    ));
    assert_eq!(Sequence::dna(""), Err(SequenceError::EmptySequence));
}

#[test]
fn motif_search_reports_overlaps() {
    let seq = dna("AAAA");
    assert_eq!(seq.find_motif_positions("AA").unwrap(), vec![0, 1, 2]);
    assert!(seq.contains_motif("aa").unwrap());
    assert!(!seq.contains_motif("C").unwrap());
}
