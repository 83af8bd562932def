//! Applicant ranking and admission allocation for the organizer rankings board.
//!
//! Reviewed applicants are scored with configurable weights, ranked, and partitioned into
//! accepted, promoted, and rejected sets under per-school quotas and a target class size.
//! Everything below `service` is pure and recomputed from scratch on every request.

pub mod allocation;
pub mod domain;
pub mod export;
pub mod parameters;
pub mod quotas;
pub mod ranking;
pub mod repository;
pub mod reviews;
pub mod router;
pub mod search;
pub mod service;
pub mod stats;
pub mod weights;

#[cfg(test)]
mod tests;

pub use allocation::{
    allocate_with_policy, allocate_with_quotas, quota_overruns, AllocationResult,
    PromotionPolicy, QuotaOverrun,
};
pub use domain::{
    ApplicantId, ApplicantRecord, Gender, QuotaStatus, RankedApplicant, UNKNOWN_SCHOOL,
};
pub use export::{accepted_emails, write_ranked_csv, ACCEPTED_EMAILS_FILENAME};
pub use parameters::{
    AdmissionsBoard, AdmissionsSnapshot, AllocationCounts, ParameterDraft, ParameterError,
    RankingParameters,
};
pub use quotas::SchoolQuotas;
pub use ranking::{rank_applicants, rank_applicants_with, RankingPolicy};
pub use repository::{ApplicantRepository, RepositoryError};
pub use reviews::{apply_reviews, average_reviews, ReviewAverages, ReviewScore};
pub use router::{rankings_router, RankingsView};
pub use search::filter_applicants;
pub use service::{RankingsService, RankingsServiceError};
pub use stats::{distribution_stats, DistributionStats, GenderShare, SchoolShare};
pub use weights::{compute_weighted_score, ScoringWeights, MAX_WEIGHT, MIN_WEIGHT};
