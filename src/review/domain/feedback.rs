//! Human feedback values and the overall score they produce.

use super::{ReviewDomainError, ReviewScore};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Thumbs-up or thumbs-down verdict from the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    /// Positive verdict.
    Up,
    /// Negative verdict.
    Down,
}

impl Sentiment {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl TryFrom<&str> for Sentiment {
    type Error = ReviewDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ReviewDomainError::UnknownSentiment(value.to_owned())),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dignity, honesty and integrity scores, each within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDhiScores")]
pub struct DhiScores {
    dignity: u8,
    honesty: u8,
    integrity: u8,
}

#[derive(Deserialize)]
struct RawDhiScores {
    dignity: i64,
    honesty: i64,
    integrity: i64,
}

impl TryFrom<RawDhiScores> for DhiScores {
    type Error = ReviewDomainError;

    fn try_from(raw: RawDhiScores) -> Result<Self, Self::Error> {
        Self::new(raw.dignity, raw.honesty, raw.integrity)
    }
}

impl DhiScores {
    /// Lowest permitted score for each dimension.
    pub const MIN: u8 = 1;
    /// Highest permitted score for each dimension.
    pub const MAX: u8 = 10;

    /// Creates validated DHI scores.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::DhiScoreOutOfRange`] naming the first
    /// dimension outside `1..=10`.
    pub fn new(dignity: i64, honesty: i64, integrity: i64) -> Result<Self, ReviewDomainError> {
        Ok(Self {
            dignity: bounded("dignity", dignity)?,
            honesty: bounded("honesty", honesty)?,
            integrity: bounded("integrity", integrity)?,
        })
    }

    /// Returns the dignity score.
    #[must_use]
    pub const fn dignity(self) -> u8 {
        self.dignity
    }

    /// Returns the honesty score.
    #[must_use]
    pub const fn honesty(self) -> u8 {
        self.honesty
    }

    /// Returns the integrity score.
    #[must_use]
    pub const fn integrity(self) -> u8 {
        self.integrity
    }
}

fn bounded(dimension: &'static str, value: i64) -> Result<u8, ReviewDomainError> {
    u8::try_from(value)
        .ok()
        .filter(|score| (DhiScores::MIN..=DhiScores::MAX).contains(score))
        .ok_or(ReviewDomainError::DhiScoreOutOfRange {
            dimension,
            value,
            min: DhiScores::MIN,
            max: DhiScores::MAX,
        })
}

/// Unweighted mean of the technical score and the three DHI scores.
///
/// Held in exact hundredths: the mean of four integers always has at most
/// two decimal places, so no rounding is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverallScore(u32);

impl OverallScore {
    /// Averages the model score with the admin's DHI scores.
    #[must_use]
    pub fn from_components(model_score: ReviewScore, dhi: DhiScores) -> Self {
        let sum = u32::from(model_score.value())
            + u32::from(dhi.dignity())
            + u32::from(dhi.honesty())
            + u32::from(dhi.integrity());
        // sum / 4 expressed in hundredths.
        Self(sum * 25)
    }

    /// Rebuilds a score from its persisted hundredths.
    #[must_use]
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Returns the score in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// Returns the score as a decimal number.
    #[expect(
        clippy::float_arithmetic,
        reason = "transport representation of an exact hundredths value"
    )]
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Serialize for OverallScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl fmt::Display for OverallScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// Feedback submitted by an admin for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminFeedback {
    sentiment: Sentiment,
    dhi_scores: DhiScores,
}

impl AdminFeedback {
    /// Creates admin feedback from validated parts.
    #[must_use]
    pub const fn new(sentiment: Sentiment, dhi_scores: DhiScores) -> Self {
        Self {
            sentiment,
            dhi_scores,
        }
    }

    /// Returns the verdict.
    #[must_use]
    pub const fn sentiment(self) -> Sentiment {
        self.sentiment
    }

    /// Returns the DHI scores.
    #[must_use]
    pub const fn dhi_scores(self) -> DhiScores {
        self.dhi_scores
    }
}

/// Feedback as stored on a review, including the derived overall score.
///
/// Keeping the DHI scores and the overall score in one value means one
/// cannot be present without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordedFeedback {
    #[serde(rename = "feedback_sentiment")]
    sentiment: Sentiment,
    dhi_scores: DhiScores,
    overall_score: OverallScore,
}

impl RecordedFeedback {
    /// Scores admin feedback against the model's technical score.
    #[must_use]
    pub fn score(feedback: AdminFeedback, model_score: ReviewScore) -> Self {
        Self {
            sentiment: feedback.sentiment(),
            dhi_scores: feedback.dhi_scores(),
            overall_score: OverallScore::from_components(model_score, feedback.dhi_scores()),
        }
    }

    /// Rebuilds recorded feedback from persisted parts.
    #[must_use]
    pub const fn from_persisted(
        sentiment: Sentiment,
        dhi_scores: DhiScores,
        overall_score: OverallScore,
    ) -> Self {
        Self {
            sentiment,
            dhi_scores,
            overall_score,
        }
    }

    /// Returns the verdict.
    #[must_use]
    pub const fn sentiment(self) -> Sentiment {
        self.sentiment
    }

    /// Returns the DHI scores.
    #[must_use]
    pub const fn dhi_scores(self) -> DhiScores {
        self.dhi_scores
    }

    /// Returns the overall score.
    #[must_use]
    pub const fn overall_score(self) -> OverallScore {
        self.overall_score
    }
}
