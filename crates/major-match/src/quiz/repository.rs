use std::sync::Arc;

use super::domain::{MajorTestAnswerSet, PersonalityResult, UserId};
use super::snapshot::CatalogSnapshot;

/// Read/update access to the question, mapping and major tables.
///
/// Implementations own caching; the scoring core only ever sees a loaded snapshot.
pub trait CatalogRepository: Send + Sync {
    fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, RepositoryError>;

    /// Apply `change` to a copy of the current snapshot and publish the result.
    ///
    /// The read, the change and the swap happen while the writer lock is held, so
    /// concurrent updates never overwrite each other.
    fn update<F>(&self, change: F) -> Result<Arc<CatalogSnapshot>, RepositoryError>
    where
        F: FnOnce(&mut CatalogSnapshot);
}

/// Append-only history of quiz submissions.
pub trait ResultRepository: Send + Sync {
    fn append_personality(&self, result: PersonalityResult) -> Result<(), RepositoryError>;
    fn latest_personality(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityResult>, RepositoryError>;
    fn append_major_answers(&self, answers: MajorTestAnswerSet) -> Result<(), RepositoryError>;
    fn latest_major_answers(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MajorTestAnswerSet>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
