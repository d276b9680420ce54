use crate::llm::Logprobs;

/// Confidence reported when the backend supplied no token log-probabilities.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Confidence thresholds used for reporting
pub mod thresholds {
    /// Below this: the value is a guess at best. Found values under it are logged.
    pub const LOW: f64 = 0.50;

    /// Below this: plausible but worth a second look.
    pub const MODERATE: f64 = 0.70;

    /// At or above this: the model was near-certain of every token.
    pub const HIGH: f64 = 0.85;
}

/// Coarse bucket for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    Low,
    Moderate,
    High,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= thresholds::HIGH {
            Self::High
        } else if score >= thresholds::MODERATE {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derive a [0, 1] confidence from per-token log-probabilities.
///
/// Mean linear probability across tokens, clamped. Missing or empty token
/// data yields `NEUTRAL_CONFIDENCE`. NaN log-probabilities are skipped;
/// if nothing usable remains the neutral value is returned.
pub fn confidence_from_logprobs(logprobs: Option<&Logprobs>) -> f64 {
    let tokens = logprobs.map(Logprobs::tokens).unwrap_or_default();

    let (sum, count) = tokens
        .iter()
        .filter(|t| !t.logprob.is_nan())
        .fold((0.0_f64, 0_usize), |(sum, count), t| {
            (sum + t.logprob.exp(), count + 1)
        });

    if count == 0 {
        return NEUTRAL_CONFIDENCE;
    }

    // exp() of a non-NaN is in [0, inf], so the mean is never NaN.
    (sum / count as f64).clamp(0.0, 1.0)
}
