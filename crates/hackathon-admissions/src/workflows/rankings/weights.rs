use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, Gender};

/// Lowest multiplier the organizer controls allow.
pub const MIN_WEIGHT: f64 = 0.0;
/// Highest multiplier the organizer controls allow.
pub const MAX_WEIGHT: f64 = 2.0;

/// Multipliers applied to the criterion averages, plus the gender bias multiplier.
///
/// `gender == 1.0` is neutral. Values above one favor applicants reporting `Male`,
/// values below one favor everyone else, symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub originality: f64,
    pub technicality: f64,
    pub passion: f64,
    pub gender: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            originality: 1.0,
            technicality: 1.0,
            passion: 1.0,
            gender: 1.0,
        }
    }
}

impl ScoringWeights {
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("originality", self.originality),
            ("technicality", self.technicality),
            ("passion", self.passion),
            ("gender", self.gender),
        ]
    }

    /// Clamp every multiplier into `[MIN_WEIGHT, MAX_WEIGHT]`.
    pub fn clamped(self) -> Self {
        Self {
            originality: self.originality.clamp(MIN_WEIGHT, MAX_WEIGHT),
            technicality: self.technicality.clamp(MIN_WEIGHT, MAX_WEIGHT),
            passion: self.passion.clamp(MIN_WEIGHT, MAX_WEIGHT),
            gender: self.gender.clamp(MIN_WEIGHT, MAX_WEIGHT),
        }
    }

    fn gender_factor(&self, gender: Option<Gender>) -> f64 {
        match gender {
            Some(Gender::Male) => self.gender,
            _ => 2.0 - self.gender,
        }
    }
}

/// Composite score for one applicant.
pub fn compute_weighted_score(applicant: &ApplicantRecord, weights: &ScoringWeights) -> f64 {
    let criteria = applicant.avg_originality * weights.originality
        + applicant.avg_technicality * weights.technicality
        + applicant.avg_passion * weights.passion;

    criteria * weights.gender_factor(applicant.gender)
}
