use serde::{Deserialize, Serialize};

use super::allocation::{
    allocate_with_policy, quota_overruns, AllocationResult, PromotionPolicy, QuotaOverrun,
};
use super::domain::{ApplicantRecord, QuotaStatus, RankedApplicant};
use super::quotas::SchoolQuotas;
use super::ranking::{rank_applicants_with, RankingPolicy};
use super::stats::{distribution_stats, DistributionStats};
use super::weights::ScoringWeights;
use crate::config::DEFAULT_TARGET_SIZE;

/// Applied configuration the board computes against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingParameters {
    pub weights: ScoringWeights,
    #[serde(default)]
    pub quotas: SchoolQuotas,
    pub target_size: usize,
    #[serde(default)]
    pub ranking: RankingPolicy,
    #[serde(default)]
    pub promotion: PromotionPolicy,
}

impl Default for RankingParameters {
    fn default() -> Self {
        Self::with_target_size(DEFAULT_TARGET_SIZE)
    }
}

impl RankingParameters {
    pub fn with_target_size(target_size: usize) -> Self {
        Self {
            weights: ScoringWeights::default(),
            quotas: SchoolQuotas::default(),
            target_size,
            ranking: RankingPolicy::default(),
            promotion: PromotionPolicy::default(),
        }
    }

    /// Start an editable copy. Edits have no effect until committed.
    pub fn draft(&self) -> ParameterDraft {
        ParameterDraft {
            weights: self.weights,
            quotas: self.quotas.clone(),
            target_size: self.target_size,
            ranking: self.ranking,
            promotion: self.promotion,
        }
    }

    pub fn rank(&self, roster: &[ApplicantRecord]) -> Vec<RankedApplicant> {
        rank_applicants_with(roster, &self.weights, self.ranking)
    }

    pub fn allocate(&self, roster: &[ApplicantRecord]) -> AllocationResult {
        allocate_with_policy(
            self.rank(roster),
            &self.quotas,
            self.target_size,
            self.promotion,
        )
    }
}

/// Pending edits to [`RankingParameters`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDraft {
    pub weights: ScoringWeights,
    #[serde(default)]
    pub quotas: SchoolQuotas,
    pub target_size: usize,
    #[serde(default)]
    pub ranking: RankingPolicy,
    #[serde(default)]
    pub promotion: PromotionPolicy,
}

impl ParameterDraft {
    pub fn set_weights(&mut self, weights: ScoringWeights) -> &mut Self {
        self.weights = weights;
        self
    }

    pub fn set_quota(&mut self, school: impl Into<String>, cap: usize) -> &mut Self {
        self.quotas.set(school, cap);
        self
    }

    pub fn clear_quota(&mut self, school: &str) -> &mut Self {
        self.quotas.remove(school);
        self
    }

    pub fn set_target_size(&mut self, target_size: usize) -> &mut Self {
        self.target_size = target_size;
        self
    }

    pub fn set_ranking_policy(&mut self, ranking: RankingPolicy) -> &mut Self {
        self.ranking = ranking;
        self
    }

    pub fn set_promotion_policy(&mut self, promotion: PromotionPolicy) -> &mut Self {
        self.promotion = promotion;
        self
    }

    /// Validate the draft into applied parameters. Weights are clamped into `[0, 2]`.
    pub fn commit(self) -> Result<RankingParameters, ParameterError> {
        for (field, value) in self.weights.fields() {
            if !value.is_finite() {
                return Err(ParameterError::NonFiniteWeight { field });
            }
        }

        Ok(RankingParameters {
            weights: self.weights.clamped(),
            quotas: self.quotas,
            target_size: self.target_size,
            ranking: self.ranking,
            promotion: self.promotion,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("{field} weight must be a finite number")]
    NonFiniteWeight { field: &'static str },
}

/// Unannotated roster plus the parameters currently applied to it.
///
/// Every snapshot is computed from scratch; nothing from a previous computation is kept.
#[derive(Debug, Clone)]
pub struct AdmissionsBoard {
    roster: Vec<ApplicantRecord>,
    applied: RankingParameters,
}

impl AdmissionsBoard {
    pub fn new(roster: Vec<ApplicantRecord>, applied: RankingParameters) -> Self {
        Self { roster, applied }
    }

    pub fn roster(&self) -> &[ApplicantRecord] {
        &self.roster
    }

    pub fn applied(&self) -> &RankingParameters {
        &self.applied
    }

    pub fn stage(&self) -> ParameterDraft {
        self.applied.draft()
    }

    /// Swap in the draft's parameters, returning the ones they replaced.
    pub fn commit(&mut self, draft: ParameterDraft) -> Result<RankingParameters, ParameterError> {
        let next = draft.commit()?;
        Ok(std::mem::replace(&mut self.applied, next))
    }

    pub fn replace_roster(&mut self, roster: Vec<ApplicantRecord>) {
        self.roster = roster;
    }

    pub fn snapshot(&self, stats_window: usize) -> AdmissionsSnapshot {
        AdmissionsSnapshot::compute(&self.roster, &self.applied, stats_window)
    }
}

/// Counts shown above the rankings table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllocationCounts {
    pub applicants: usize,
    pub accepted: usize,
    pub promoted: usize,
    pub quota_exceeded: usize,
    pub no_space: usize,
}

/// Result of one full recomputation over the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissionsSnapshot {
    pub parameters: RankingParameters,
    pub counts: AllocationCounts,
    pub allocation: AllocationResult,
    pub overruns: Vec<QuotaOverrun>,
    pub stats: DistributionStats,
}

impl AdmissionsSnapshot {
    pub fn compute(
        roster: &[ApplicantRecord],
        parameters: &RankingParameters,
        stats_window: usize,
    ) -> Self {
        let allocation = parameters.allocate(roster);
        let overruns = quota_overruns(&allocation, &parameters.quotas);
        let ranked = allocation.annotated();
        let stats = distribution_stats(&ranked, stats_window);

        let counts = AllocationCounts {
            applicants: roster.len(),
            accepted: allocation.count_with(QuotaStatus::Accepted),
            promoted: allocation.count_with(QuotaStatus::Promoted),
            quota_exceeded: allocation.count_with(QuotaStatus::QuotaExceeded),
            no_space: allocation.count_with(QuotaStatus::NoSpace),
        };

        Self {
            parameters: parameters.clone(),
            counts,
            allocation,
            overruns,
            stats,
        }
    }

    /// All applicants with their status, rank order.
    pub fn ranked(&self) -> Vec<RankedApplicant> {
        self.allocation.annotated()
    }
}
