//! Personality classification and major matching.
//!
//! The scoring core (`personality`, `scoring`, `context`) is pure and works on a loaded
//! [`CatalogSnapshot`]; the service and router wrap it with repositories and HTTP.

pub mod context;
pub mod domain;
pub mod personality;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use context::{
    AiContext, AiContextPayload, AnsweredQuestion, MajorBreakdown, TraitContribution,
};
pub use domain::{
    AnswerSheet, Dimension, Language, LikertChoice, Major, MajorQuestion, MajorTestAnswerSet,
    PersonalityAnswer, PersonalityProfile, PersonalityQuestion, PersonalityResult,
    PersonalityType, ScoringMapping, UserId,
};
pub use personality::classify_personality;
pub use repository::{CatalogRepository, RepositoryError, ResultRepository};
pub use router::quiz_router;
pub use scoring::{
    score_majors, MajorRecommendation, ScoringCatalog, ScoringConfig, ScoringEngine,
    ScoringError, ScoringInput, MBTI_CATEGORY,
};
pub use service::{QuizService, QuizServiceError};
pub use snapshot::{CatalogBulkLoad, CatalogCounts, CatalogSnapshot};
