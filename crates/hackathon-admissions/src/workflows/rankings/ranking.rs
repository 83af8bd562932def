use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, RankedApplicant};
use super::weights::{compute_weighted_score, ScoringWeights};

/// Ordering knobs layered on top of the composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPolicy {
    /// List referred applicants ahead of everyone else, score order within each group.
    #[serde(default)]
    pub referrals_first: bool,
}

/// Rank applicants by composite score, highest first. Ties keep input order.
pub fn rank_applicants(
    applicants: &[ApplicantRecord],
    weights: &ScoringWeights,
) -> Vec<RankedApplicant> {
    rank_applicants_with(applicants, weights, RankingPolicy::default())
}

pub fn rank_applicants_with(
    applicants: &[ApplicantRecord],
    weights: &ScoringWeights,
    policy: RankingPolicy,
) -> Vec<RankedApplicant> {
    let mut ranked: Vec<RankedApplicant> = applicants
        .iter()
        .map(|record| RankedApplicant {
            composite_score: compute_weighted_score(record, weights),
            record: record.clone(),
            rank: 0,
            quota_status: None,
        })
        .collect();

    // `sort_by` is stable, which is what keeps ties in input order.
    ranked.sort_by(|a, b| {
        let referral = if policy.referrals_first {
            b.record.referral.cmp(&a.record.referral)
        } else {
            Ordering::Equal
        };
        referral.then_with(|| descending_score(a.composite_score, b.composite_score))
    });

    for (index, applicant) in ranked.iter_mut().enumerate() {
        applicant.rank = index + 1;
    }

    ranked
}

/// Descending comparison that sends NaN scores to the back.
fn descending_score(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
