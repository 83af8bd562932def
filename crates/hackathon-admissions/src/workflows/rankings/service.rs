use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use super::domain::ApplicantRecord;
use super::export::accepted_emails;
use super::parameters::{AdmissionsSnapshot, ParameterDraft, ParameterError, RankingParameters};
use super::repository::{ApplicantRepository, RepositoryError};
use super::stats::{distribution_stats, DistributionStats};

/// Service composing the applicant repository with the applied ranking parameters.
pub struct RankingsService<R> {
    repository: Arc<R>,
    applied: RwLock<RankingParameters>,
    stats_window: usize,
}

impl<R> RankingsService<R>
where
    R: ApplicantRepository + 'static,
{
    pub fn new(repository: Arc<R>, parameters: RankingParameters, stats_window: usize) -> Self {
        Self {
            repository,
            applied: RwLock::new(parameters),
            stats_window,
        }
    }

    pub fn stats_window(&self) -> usize {
        self.stats_window
    }

    pub fn parameters(&self) -> Result<RankingParameters, RankingsServiceError> {
        let guard = self
            .applied
            .read()
            .map_err(|_| RankingsServiceError::StatePoisoned)?;
        Ok(guard.clone())
    }

    /// Editable copy of the applied parameters.
    pub fn stage(&self) -> Result<ParameterDraft, RankingsServiceError> {
        Ok(self.parameters()?.draft())
    }

    /// Validate and apply a draft. Returns the parameters now in effect.
    pub fn commit(&self, draft: ParameterDraft) -> Result<RankingParameters, RankingsServiceError> {
        let next = draft.commit()?;
        let mut guard = self
            .applied
            .write()
            .map_err(|_| RankingsServiceError::StatePoisoned)?;
        *guard = next.clone();

        info!(
            target_size = next.target_size,
            quotas = next.quotas.len(),
            referrals_first = next.ranking.referrals_first,
            promotion = ?next.promotion,
            "ranking parameters committed"
        );
        Ok(next)
    }

    /// Recompute rankings over the full roster with the applied parameters.
    pub fn snapshot(&self) -> Result<AdmissionsSnapshot, RankingsServiceError> {
        let roster = self.repository.all_for_rankings()?;
        let parameters = self.parameters()?;
        Ok(self.compute(&roster, &parameters))
    }

    /// Rank an inline roster with a draft, leaving applied parameters untouched.
    pub fn preview(
        &self,
        roster: &[ApplicantRecord],
        draft: ParameterDraft,
    ) -> Result<AdmissionsSnapshot, RankingsServiceError> {
        let parameters = draft.commit()?;
        Ok(self.compute(roster, &parameters))
    }

    pub fn stats(&self, window: Option<usize>) -> Result<DistributionStats, RankingsServiceError> {
        let snapshot = self.snapshot()?;
        let window = window.unwrap_or(self.stats_window);
        Ok(distribution_stats(&snapshot.ranked(), window))
    }

    pub fn accepted_emails(&self) -> Result<String, RankingsServiceError> {
        let snapshot = self.snapshot()?;
        Ok(accepted_emails(&snapshot.allocation))
    }

    pub fn import_roster(&self, roster: Vec<ApplicantRecord>) -> Result<usize, RankingsServiceError> {
        let count = roster.len();
        self.repository.replace_all(roster)?;
        info!(applicants = count, "applicant roster replaced");
        Ok(count)
    }

    fn compute(
        &self,
        roster: &[ApplicantRecord],
        parameters: &RankingParameters,
    ) -> AdmissionsSnapshot {
        let snapshot = AdmissionsSnapshot::compute(roster, parameters, self.stats_window);

        debug!(
            applicants = snapshot.counts.applicants,
            accepted = snapshot.counts.accepted,
            promoted = snapshot.counts.promoted,
            rejected = snapshot.allocation.rejected.len(),
            "rankings recomputed"
        );
        for overrun in &snapshot.overruns {
            warn!(
                school = %overrun.school,
                cap = overrun.cap,
                admitted = overrun.admitted,
                "promotion pass booked school above its quota"
            );
        }

        snapshot
    }
}

/// Error raised by the rankings service.
#[derive(Debug, thiserror::Error)]
pub enum RankingsServiceError {
    #[error(transparent)]
    Parameters(#[from] ParameterError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("ranking parameters lock poisoned")]
    StatePoisoned,
}
