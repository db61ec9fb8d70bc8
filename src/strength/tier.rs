//! Strength tiers: thresholds, names, colors and comments.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, PartialEq)]
pub struct StrengthTier {
    pub level: u8,
    /// Exclusive upper bound in bits. The last tier is unbounded.
    pub upper_bound: f64,
    pub name: &'static str,
    pub color: Rgb,
    pub comment: &'static str,
}

pub static TIERS: [StrengthTier; 7] = [
    StrengthTier {
        level: 0,
        upper_bound: 25.0,
        name: "Very Weak",
        color: Rgb(0xef, 0x44, 0x44),
        comment: "Way too weak. A password like this could be cracked in seconds. Avoid using it anywhere, even for temporary stuff.",
    },
    StrengthTier {
        level: 1,
        upper_bound: 40.0,
        name: "Weak",
        color: Rgb(0xf9, 0x73, 0x16),
        comment: "Still pretty weak. Maybe okay for throwaway accounts or temporary logins, but don't use this where it matters.",
    },
    StrengthTier {
        level: 2,
        upper_bound: 60.0,
        name: "Fair",
        color: Rgb(0xea, 0xb3, 0x08),
        comment: "Not terrible, but not great either. Could work for low-risk accounts, but consider making it longer or adding more variety.",
    },
    StrengthTier {
        level: 3,
        upper_bound: 80.0,
        name: "Moderate",
        color: Rgb(0xa3, 0xe6, 0x35),
        comment: "Decent. Probably fine for casual sites or apps, but don't use it for banking, email, or anything sensitive.",
    },
    StrengthTier {
        level: 4,
        upper_bound: 100.0,
        name: "Strong",
        color: Rgb(0x4a, 0xde, 0x80),
        comment: "Nice! This would work well for most accounts. Still, using a password manager to create and store it is your best bet.",
    },
    StrengthTier {
        level: 5,
        upper_bound: 120.0,
        name: "Very Strong",
        color: Rgb(0x22, 0xc5, 0x5e),
        comment: "Solid stuff. You can confidently use this for sensitive accounts like your email or cloud storage.",
    },
    StrengthTier {
        level: 6,
        upper_bound: f64::INFINITY,
        name: "Excellent",
        color: Rgb(0x06, 0xb6, 0xd4),
        comment: "Top-tier. This one's ready for high-security needs like financial accounts, admin panels, or encrypted drives.",
    },
];

/// Lowest tier whose upper bound exceeds `bits`.
pub fn tier_for(bits: f64) -> &'static StrengthTier {
    TIERS
        .iter()
        .find(|tier| bits < tier.upper_bound)
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_strictly_increase() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].upper_bound < pair[1].upper_bound);
            assert_eq!(pair[0].level + 1, pair[1].level);
        }
    }

    #[test]
    fn boundaries() {
        assert_eq!(tier_for(0.0).level, 0);
        assert_eq!(tier_for(24.999).level, 0);
        assert_eq!(tier_for(25.0).level, 1);
        assert_eq!(tier_for(99.999).level, 4);
        assert_eq!(tier_for(100.0).level, 5);
        assert_eq!(tier_for(120.0).level, 6);
        assert_eq!(tier_for(f64::INFINITY).level, 6);
        assert_eq!(tier_for(f64::NAN).level, 6);
    }
}
