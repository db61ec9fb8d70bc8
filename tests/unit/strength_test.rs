//! Scoring and classification through the public API.

use std::collections::BTreeSet;

use passkit::strength::{
    PenaltyKind, PenaltyReport, TIERS, classify, evaluate, format_crack_time, penalty_comment,
    quick_tier, score,
};
use rstest::rstest;

fn report(base: f64, penalty: f64, reasons: &[PenaltyKind]) -> PenaltyReport {
    PenaltyReport {
        length: 16,
        base_entropy_bits: base,
        total_penalty_bits: penalty,
        reasons: reasons.iter().copied().collect::<BTreeSet<_>>(),
    }
}

#[rstest]
#[case(0.0, 0)]
#[case(24.999, 0)]
#[case(25.0, 1)]
#[case(40.0, 2)]
#[case(59.9, 2)]
#[case(60.0, 3)]
#[case(80.0, 4)]
#[case(99.999, 4)]
#[case(100.0, 5)]
#[case(120.0, 6)]
#[case(400.0, 6)]
fn tier_boundaries(#[case] bits: f64, #[case] level: u8) {
    let classified = classify(&report(bits, 0.0, &[]));
    assert_eq!(classified.tier.level, level);
    assert_eq!(classified.comment, TIERS[level as usize].comment);
}

#[test]
fn empty_password_scores_zero() {
    let r = score("");
    assert_eq!(r.length, 0);
    assert_eq!(r.base_entropy_bits, 0.0);
    assert_eq!(r.total_penalty_bits, 0.0);
    assert!(r.reasons.is_empty());
    assert!(quick_tier("").is_none());
}

#[test]
fn common_word_is_penalised() {
    let r = score("password");
    assert!(r.has(PenaltyKind::CommonSubstring));
    let classified = classify(&r);
    assert_eq!(classified.comment, penalty_comment(PenaltyKind::CommonSubstring));
}

#[test]
fn repeated_run_hits_two_penalties() {
    let r = score("abcabcabcabc");
    assert!(r.has(PenaltyKind::Repetition));
    assert!(r.has(PenaltyKind::Sequence));
}

#[test]
fn override_follows_priority() {
    let classified = classify(&report(
        50.0,
        30.0,
        &[PenaltyKind::KeyboardPattern, PenaltyKind::Sequence],
    ));
    assert_eq!(classified.comment, penalty_comment(PenaltyKind::Sequence));

    // Exactly 40% keeps the tier comment.
    let classified = classify(&report(50.0, 20.0, &[PenaltyKind::Sequence]));
    assert_eq!(classified.comment, classified.tier.comment);
}

#[rstest]
#[case(0.5, "< 1 sec")]
#[case(42.0, "42 sec")]
#[case(f64::INFINITY, "Eternity")]
fn crack_time_labels(#[case] seconds: f64, #[case] expected: &str) {
    assert_eq!(format_crack_time(seconds), expected);
}

#[test]
fn strong_random_looking_password() {
    let r = evaluate("Xq7#mR2!vL9@wP4$");
    assert!(r.tier.level >= 3, "got {}", r.tier.name);
    assert_eq!(r.length, 16);
    assert!(r.crack_times.laptop > r.crack_times.supercomputer);
}
