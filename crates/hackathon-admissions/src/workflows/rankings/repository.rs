use super::domain::ApplicantRecord;

/// Source of reviewed applicants so the service can be exercised without a database.
pub trait ApplicantRepository: Send + Sync {
    /// Every applicant eligible for ranking, in a stable order.
    fn all_for_rankings(&self) -> Result<Vec<ApplicantRecord>, RepositoryError>;
    fn replace_all(&self, roster: Vec<ApplicantRecord>) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
