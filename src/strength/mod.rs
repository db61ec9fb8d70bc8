//! Password strength: entropy scoring, tier classification, crack-time projection.

pub mod crack;
pub mod entropy;
pub mod tier;

pub use crack::{AttackerModel, CrackTimeEstimate, format_crack_time};
pub use entropy::{PenaltyKind, PenaltyReport, score};
pub use tier::{Rgb, StrengthTier, TIERS, tier_for};

/// Penalties above this share of base entropy replace the tier comment.
const OVERRIDE_RATIO: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthReport {
    pub tier: &'static StrengthTier,
    pub comment: &'static str,
    pub entropy_bits: f64,
    pub length: usize,
    pub crack_times: CrackTimeEstimate,
    pub penalties: PenaltyReport,
}

impl StrengthReport {
    /// Entropy rounded for display.
    pub fn rounded_bits(&self) -> u64 {
        self.entropy_bits.round() as u64
    }
}

pub fn classify(report: &PenaltyReport) -> StrengthReport {
    let bits = report.final_entropy_bits();
    let tier = tier_for(bits);

    StrengthReport {
        tier,
        comment: comment_for(report, tier),
        entropy_bits: bits,
        length: report.length,
        crack_times: CrackTimeEstimate::from_bits(bits),
        penalties: report.clone(),
    }
}

/// Score and classify in one step.
pub fn evaluate(password: &str) -> StrengthReport {
    classify(&score(password))
}

/// Tier only, for the compact meter shown beside a generated password.
pub fn quick_tier(password: &str) -> Option<&'static StrengthTier> {
    if password.is_empty() {
        return None;
    }
    Some(tier_for(score(password).final_entropy_bits()))
}

fn comment_for(report: &PenaltyReport, tier: &'static StrengthTier) -> &'static str {
    if report.total_penalty_bits <= report.base_entropy_bits * OVERRIDE_RATIO {
        return tier.comment;
    }
    // BTreeSet iterates in priority order.
    match report.reasons.iter().next() {
        Some(kind) => penalty_comment(*kind),
        None => tier.comment,
    }
}

pub fn penalty_comment(kind: PenaltyKind) -> &'static str {
    match kind {
        PenaltyKind::CommonSubstring => {
            "Uh-oh, this password contains something super common. Hackers try these first, so it's not safe for anything."
        }
        PenaltyKind::Repetition => {
            "It looks long, but there's too much repetition. That makes it easier to crack than you'd think."
        }
        PenaltyKind::Sequence => {
            "Avoid patterns like 'abc' or '123'. They're predictable and easy to brute-force."
        }
        PenaltyKind::KeyboardPattern => {
            "Patterns like 'qwerty' or 'asdf' are a hacker's favorite guess. Try mixing things up more."
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn report(base: f64, penalty: f64, reasons: &[PenaltyKind]) -> PenaltyReport {
        PenaltyReport {
            length: 10,
            base_entropy_bits: base,
            total_penalty_bits: penalty,
            reasons: reasons.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn exact_threshold_goes_up() {
        assert_eq!(classify(&report(100.0, 0.0, &[])).tier.level, 5);
        assert_eq!(classify(&report(99.999, 0.0, &[])).tier.level, 4);
    }

    #[test]
    fn default_comment_when_penalty_is_small() {
        let r = classify(&report(100.0, 40.0, &[PenaltyKind::Sequence]));
        assert_eq!(r.comment, TIERS[3].comment);
        assert_eq!(r.tier.level, 3);
    }

    #[test]
    fn override_follows_priority() {
        let r = classify(&report(
            50.0,
            30.0,
            &[PenaltyKind::KeyboardPattern, PenaltyKind::Repetition],
        ));
        assert_eq!(r.comment, penalty_comment(PenaltyKind::Repetition));

        let r = classify(&report(
            50.0,
            30.0,
            &[PenaltyKind::Sequence, PenaltyKind::CommonSubstring],
        ));
        assert_eq!(r.comment, penalty_comment(PenaltyKind::CommonSubstring));
    }

    #[test]
    fn no_override_without_reasons() {
        let r = classify(&report(10.0, 9.0, &[]));
        assert_eq!(r.comment, TIERS[0].comment);
    }

    #[test]
    fn password_gets_common_warning() {
        let r = evaluate("password");
        assert!(r.penalties.has(PenaltyKind::CommonSubstring));
        // 20 > 0.4 * 37.6
        assert_eq!(r.comment, penalty_comment(PenaltyKind::CommonSubstring));
        assert_eq!(r.tier.level, 0);
        assert_eq!(r.length, 8);
    }

    #[test]
    fn empty_input() {
        let r = evaluate("");
        assert_eq!(r.entropy_bits, 0.0);
        assert_eq!(r.tier.level, 0);
        assert!(quick_tier("").is_none());
    }

    #[test]
    fn strong_random_looking_password() {
        // 20 chars, all four classes, no penalties: 20 * log2(93) ~ 130.8 bits
        let r = evaluate("k7#Qv!2mZ$8pL@x4W^tR");
        assert!(r.penalties.reasons.is_empty());
        assert_eq!(r.tier.level, 6);
        assert_eq!(r.rounded_bits(), 131);
        assert_eq!(quick_tier("k7#Qv!2mZ$8pL@x4W^tR").map(|t| t.level), Some(6));
    }
}
