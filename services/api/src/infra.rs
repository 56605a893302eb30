use major_match::quiz::{
    CatalogRepository, CatalogSnapshot, MajorTestAnswerSet, PersonalityResult, RepositoryError,
    ResultRepository, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog held in memory; readers share the current snapshot until a bulk load swaps it.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalogRepository {
    snapshot: Arc<RwLock<Arc<CatalogSnapshot>>>,
}

impl InMemoryCatalogRepository {
    pub(crate) fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, RepositoryError> {
        let guard = self
            .snapshot
            .read()
            .map_err(|_| RepositoryError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn update<F>(&self, change: F) -> Result<Arc<CatalogSnapshot>, RepositoryError>
    where
        F: FnOnce(&mut CatalogSnapshot),
    {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| RepositoryError::Unavailable("catalog lock poisoned".to_string()))?;
        let mut next = guard.as_ref().clone();
        change(&mut next);
        let next = Arc::new(next);
        *guard = next.clone();
        Ok(next)
    }
}

/// Append-only submission history keyed by user.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    personality: Arc<Mutex<HashMap<UserId, Vec<PersonalityResult>>>>,
    major_answers: Arc<Mutex<HashMap<UserId, Vec<MajorTestAnswerSet>>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("result store lock poisoned".to_string())
}

impl ResultRepository for InMemoryResultRepository {
    fn append_personality(&self, result: PersonalityResult) -> Result<(), RepositoryError> {
        let mut guard = self.personality.lock().map_err(poisoned)?;
        guard.entry(result.user_id.clone()).or_default().push(result);
        Ok(())
    }

    fn latest_personality(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityResult>, RepositoryError> {
        let guard = self.personality.lock().map_err(poisoned)?;
        Ok(guard
            .get(user_id)
            .and_then(|history| history.iter().max_by_key(|result| result.created_at))
            .cloned())
    }

    fn append_major_answers(&self, answers: MajorTestAnswerSet) -> Result<(), RepositoryError> {
        let mut guard = self.major_answers.lock().map_err(poisoned)?;
        guard
            .entry(answers.user_id.clone())
            .or_default()
            .push(answers);
        Ok(())
    }

    fn latest_major_answers(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MajorTestAnswerSet>, RepositoryError> {
        let guard = self.major_answers.lock().map_err(poisoned)?;
        Ok(guard
            .get(user_id)
            .and_then(|history| history.iter().max_by_key(|answers| answers.created_at))
            .cloned())
    }
}
