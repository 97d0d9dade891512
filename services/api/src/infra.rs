use metrics_exporter_prometheus::PrometheusHandle;
use recruit_ai::workflows::screening::{
    CandidateRecord, CandidateRepository, EmailAddress, RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Candidate store keyed by normalized email. The single mutex makes the
/// existence check and the insert one atomic step, so concurrent creates for
/// the same email resolve to one success and one `Conflict`.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    records: Arc<Mutex<HashMap<EmailAddress, CandidateRecord>>>,
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn create(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.identity.email) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.identity.email.clone(), record.clone());
        Ok(record)
    }

    fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(email).cloned())
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.identity.email) {
            guard.insert(record.identity.email.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}
