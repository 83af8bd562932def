use hackathon_admissions::workflows::rankings::{
    ApplicantRecord, ApplicantRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicantRepository {
    records: Arc<Mutex<Vec<ApplicantRecord>>>,
}

impl InMemoryApplicantRepository {
    pub(crate) fn seeded(records: Vec<ApplicantRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl ApplicantRepository for InMemoryApplicantRepository {
    fn all_for_rankings(&self) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("roster mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn replace_all(&self, roster: Vec<ApplicantRecord>) -> Result<(), RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("roster mutex poisoned".to_string()))?;
        *guard = roster;
        Ok(())
    }
}
