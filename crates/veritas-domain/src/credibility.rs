//! Credibility bands for displaying scores

/// Coarse credibility band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CredibilityLevel {
    /// Below 0.4
    VeryLow,
    /// 0.4 up to 0.6
    Low,
    /// 0.6 up to 0.8
    Moderate,
    /// 0.8 and above
    High,
}

impl CredibilityLevel {
    /// Band a score in [0, 1]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            CredibilityLevel::High
        } else if score >= 0.6 {
            CredibilityLevel::Moderate
        } else if score >= 0.4 {
            CredibilityLevel::Low
        } else {
            CredibilityLevel::VeryLow
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            CredibilityLevel::High => "High Credibility",
            CredibilityLevel::Moderate => "Moderate Credibility",
            CredibilityLevel::Low => "Low Credibility",
            CredibilityLevel::VeryLow => "Very Low Credibility",
        }
    }
}

/// Three-way tone used when colouring a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredibilityTone {
    /// 0.7 and above
    Good,
    /// 0.4 up to 0.7
    Caution,
    /// Below 0.4
    Poor,
}

impl CredibilityTone {
    /// Tone for a score in [0, 1]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            CredibilityTone::Good
        } else if score >= 0.4 {
            CredibilityTone::Caution
        } else {
            CredibilityTone::Poor
        }
    }
}

/// Round a unit score to a whole percentage for display
pub fn as_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(CredibilityLevel::from_score(1.0), CredibilityLevel::High);
        assert_eq!(CredibilityLevel::from_score(0.8), CredibilityLevel::High);
        assert_eq!(CredibilityLevel::from_score(0.79), CredibilityLevel::Moderate);
        assert_eq!(CredibilityLevel::from_score(0.6), CredibilityLevel::Moderate);
        assert_eq!(CredibilityLevel::from_score(0.4), CredibilityLevel::Low);
        assert_eq!(CredibilityLevel::from_score(0.39), CredibilityLevel::VeryLow);
        assert_eq!(CredibilityLevel::from_score(0.0), CredibilityLevel::VeryLow);
    }

    #[test]
    fn test_tone_boundaries() {
        assert_eq!(CredibilityTone::from_score(0.7), CredibilityTone::Good);
        assert_eq!(CredibilityTone::from_score(0.69), CredibilityTone::Caution);
        assert_eq!(CredibilityTone::from_score(0.4), CredibilityTone::Caution);
        assert_eq!(CredibilityTone::from_score(0.1), CredibilityTone::Poor);
    }

    #[test]
    fn test_as_percent() {
        assert_eq!(as_percent(0.42), 42);
        assert_eq!(as_percent(0.425), 43);
        assert_eq!(as_percent(1.0), 100);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a higher score never lands in a lower band
        #[test]
        fn test_level_is_monotone(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(CredibilityLevel::from_score(lo) <= CredibilityLevel::from_score(hi));
        }

        /// Property: percentages stay within 0..=100
        #[test]
        fn test_percent_in_range(score in -1.0f64..2.0) {
            prop_assert!(as_percent(score) <= 100);
        }
    }
}
