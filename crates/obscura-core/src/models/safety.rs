use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Ordinal severity level reported by the classifier for one category.
///
/// Discriminant order is the severity order, so the derived `Ord` ranks
/// `Unknown < VeryUnlikely < .. < VeryLikely`. Wire values the classifier
/// adds later decode as `Unknown` rather than failing the response.
/// `Unknown` is declared last because `#[serde(other)]` requires it, but
/// its discriminant keeps it the lowest severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Likelihood {
    VeryUnlikely = 1,
    Unlikely = 2,
    Possible = 3,
    Likely = 4,
    VeryLikely = 5,
    #[default]
    #[serde(other)]
    Unknown = 0,
}

impl Display for Likelihood {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Likelihood::Unknown => write!(f, "UNKNOWN"),
            Likelihood::VeryUnlikely => write!(f, "VERY_UNLIKELY"),
            Likelihood::Unlikely => write!(f, "UNLIKELY"),
            Likelihood::Possible => write!(f, "POSSIBLE"),
            Likelihood::Likely => write!(f, "LIKELY"),
            Likelihood::VeryLikely => write!(f, "VERY_LIKELY"),
        }
    }
}

/// Safe-search annotation for one image, as returned by the classifier.
///
/// Only `adult` and `violence` drive the blur decision; the other
/// categories ride along because the service reports them. Produced per
/// request, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyAnnotation {
    #[serde(default)]
    pub adult: Likelihood,
    #[serde(default)]
    pub spoof: Likelihood,
    #[serde(default)]
    pub medical: Likelihood,
    #[serde(default)]
    pub violence: Likelihood,
    #[serde(default)]
    pub racy: Likelihood,
}

impl SafetyAnnotation {
    /// Decision rule for blurring: adult or violent content at the top
    /// severity level only.
    pub fn is_offensive(&self) -> bool {
        self.adult == Likelihood::VeryLikely || self.violence == Likelihood::VeryLikely
    }
}
