use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantId, ApplicantRecord};

/// One reviewer's ratings for one applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewScore {
    pub applicant_id: ApplicantId,
    pub reviewer_id: String,
    pub originality: f64,
    pub technicality: f64,
    pub passion: f64,
    pub completed: bool,
    #[serde(default)]
    pub referral: bool,
}

/// Per-applicant criterion averages over completed reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReviewAverages {
    pub originality: f64,
    pub technicality: f64,
    pub passion: f64,
    pub completed_reviews: usize,
    pub referral: bool,
}

#[derive(Default)]
struct Totals {
    originality: f64,
    technicality: f64,
    passion: f64,
    completed: usize,
    referral: bool,
}

/// Average completed reviews per applicant.
///
/// Incomplete reviews do not contribute ratings, but a referral counts even when the
/// review carrying it was never completed.
pub fn average_reviews(reviews: &[ReviewScore]) -> BTreeMap<ApplicantId, ReviewAverages> {
    let mut totals: BTreeMap<ApplicantId, Totals> = BTreeMap::new();

    for review in reviews {
        let entry = totals.entry(review.applicant_id.clone()).or_default();
        entry.referral |= review.referral;
        if review.completed {
            entry.originality += review.originality;
            entry.technicality += review.technicality;
            entry.passion += review.passion;
            entry.completed += 1;
        }
    }

    totals
        .into_iter()
        .map(|(id, totals)| {
            let averages = if totals.completed == 0 {
                ReviewAverages {
                    referral: totals.referral,
                    ..ReviewAverages::default()
                }
            } else {
                let count = totals.completed as f64;
                ReviewAverages {
                    originality: totals.originality / count,
                    technicality: totals.technicality / count,
                    passion: totals.passion / count,
                    completed_reviews: totals.completed,
                    referral: totals.referral,
                }
            };
            (id, averages)
        })
        .collect()
}

impl ApplicantRecord {
    pub fn with_review_averages(mut self, averages: &ReviewAverages) -> Self {
        self.avg_originality = averages.originality;
        self.avg_technicality = averages.technicality;
        self.avg_passion = averages.passion;
        self.referral = averages.referral;
        self
    }
}

/// Overwrite roster averages with ones recomputed from `reviews`. Applicants nobody
/// reviewed keep the averages they arrived with.
pub fn apply_reviews(
    roster: Vec<ApplicantRecord>,
    reviews: &[ReviewScore],
) -> Vec<ApplicantRecord> {
    let averages = average_reviews(reviews);
    roster
        .into_iter()
        .map(|record| match averages.get(&record.id) {
            Some(averages) => record.with_review_averages(averages),
            None => record,
        })
        .collect()
}
