use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{QuotaStatus, RankedApplicant};
use super::quotas::SchoolQuotas;

/// How leftover seats are handed out after the primary pass.
///
/// Only applicants rejected for `quota_exceeded` are promotion candidates, and their
/// school is full by definition, so [`PromotionPolicy::FillFromQuotaRejects`] can book a
/// school above its cap. [`quota_overruns`] reports when that happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPolicy {
    /// Fill remaining seats from quota rejects in rank order without re-checking caps.
    #[default]
    FillFromQuotaRejects,
    /// Skip any promotion that would push a school past its cap.
    RespectQuota,
}

/// Partition of a ranked list into admitted and rejected applicants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationResult {
    /// Accepted and promoted applicants, rank order.
    pub accepted: Vec<RankedApplicant>,
    /// `quota_exceeded` and `no_space` applicants, rank order.
    pub rejected: Vec<RankedApplicant>,
    /// Admitted applicants per school bucket.
    pub school_counts: BTreeMap<String, usize>,
}

impl AllocationResult {
    pub fn promoted_count(&self) -> usize {
        self.accepted
            .iter()
            .filter(|applicant| applicant.quota_status == Some(QuotaStatus::Promoted))
            .count()
    }

    pub fn count_with(&self, status: QuotaStatus) -> usize {
        self.accepted
            .iter()
            .chain(self.rejected.iter())
            .filter(|applicant| applicant.quota_status == Some(status))
            .count()
    }

    /// Every applicant with its status, back in rank order.
    pub fn annotated(&self) -> Vec<RankedApplicant> {
        let mut all: Vec<RankedApplicant> = self
            .accepted
            .iter()
            .chain(self.rejected.iter())
            .cloned()
            .collect();
        all.sort_by_key(|applicant| applicant.rank);
        all
    }
}

/// School admitted above its configured cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaOverrun {
    pub school: String,
    pub cap: usize,
    pub admitted: usize,
}

pub fn allocate_with_quotas(
    ranked: Vec<RankedApplicant>,
    quotas: &SchoolQuotas,
    target_size: usize,
) -> AllocationResult {
    allocate_with_policy(ranked, quotas, target_size, PromotionPolicy::default())
}

/// Single pass in list order, then a promotion pass over quota rejects.
///
/// `ranked` is expected in rank order, as produced by `rank_applicants`.
pub fn allocate_with_policy(
    ranked: Vec<RankedApplicant>,
    quotas: &SchoolQuotas,
    target_size: usize,
    policy: PromotionPolicy,
) -> AllocationResult {
    let mut statuses = Vec::with_capacity(ranked.len());
    let mut running: BTreeMap<String, usize> = BTreeMap::new();
    let mut seated = 0usize;

    for applicant in &ranked {
        let school = applicant.school_bucket();
        let booked = running.get(school).copied().unwrap_or(0);
        let under_quota = quotas
            .limit_for(school)
            .map(|cap| booked < cap)
            .unwrap_or(true);

        let status = if !under_quota {
            QuotaStatus::QuotaExceeded
        } else if seated >= target_size {
            QuotaStatus::NoSpace
        } else {
            seated += 1;
            *running.entry(school.to_string()).or_insert(0) += 1;
            QuotaStatus::Accepted
        };
        statuses.push(status);
    }

    for (index, applicant) in ranked.iter().enumerate() {
        if seated >= target_size {
            break;
        }
        if statuses[index] != QuotaStatus::QuotaExceeded {
            continue;
        }

        let school = applicant.school_bucket();
        if policy == PromotionPolicy::RespectQuota {
            let booked = running.get(school).copied().unwrap_or(0);
            if quotas.limit_for(school).is_some_and(|cap| booked >= cap) {
                continue;
            }
        }

        statuses[index] = QuotaStatus::Promoted;
        seated += 1;
        *running.entry(school.to_string()).or_insert(0) += 1;
    }

    let mut result = AllocationResult {
        accepted: Vec::with_capacity(seated),
        rejected: Vec::with_capacity(ranked.len().saturating_sub(seated)),
        school_counts: running,
    };

    for (mut applicant, status) in ranked.into_iter().zip(statuses) {
        applicant.quota_status = Some(status);
        if status.is_admitted() {
            result.accepted.push(applicant);
        } else {
            result.rejected.push(applicant);
        }
    }

    result
}

/// Schools whose admitted count exceeds their cap.
pub fn quota_overruns(result: &AllocationResult, quotas: &SchoolQuotas) -> Vec<QuotaOverrun> {
    quotas
        .limited()
        .filter_map(|(school, cap)| {
            let admitted = result.school_counts.get(school).copied().unwrap_or(0);
            (admitted > cap).then(|| QuotaOverrun {
                school: school.to_string(),
                cap,
                admitted,
            })
        })
        .collect()
}
