mod config;
pub(crate) mod index;
mod ranking;
pub(crate) mod tally;

pub use config::ScoringConfig;
pub(crate) use ranking::{ranked, recommend};

use serde::{Deserialize, Serialize};

use super::context::{self, AiContext};
use super::domain::{
    AnswerSheet, Language, Major, MajorQuestion, MajorTestAnswerSet, PersonalityType,
    ScoringMapping,
};
use super::snapshot::CatalogSnapshot;

/// Mapping category that personality letters are looked up under.
pub const MBTI_CATEGORY: &str = "MBTI";

/// Read-only tables the engine scores against.
#[derive(Debug, Clone, Copy)]
pub struct ScoringCatalog<'a> {
    pub questions: &'a [MajorQuestion],
    pub mappings: &'a [ScoringMapping],
    pub majors: &'a [Major],
}

impl<'a> ScoringCatalog<'a> {
    pub fn from_snapshot(snapshot: &'a CatalogSnapshot, language: Language) -> Self {
        Self {
            questions: snapshot.major_questions(language),
            mappings: &snapshot.mappings,
            majors: &snapshot.majors,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ScoringError> {
        if self.mappings.is_empty() {
            return Err(ScoringError::EmptyMappingTable);
        }
        if self.majors.is_empty() {
            return Err(ScoringError::EmptyMajorRoster);
        }
        Ok(())
    }
}

/// One user's answers plus the catalog they are scored against.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub answers: &'a AnswerSheet,
    pub catalog: ScoringCatalog<'a>,
    pub personality: Option<&'a PersonalityType>,
}

/// Ranked major with its rescaled match percentage and display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorRecommendation {
    pub major_name: String,
    pub match_percent: u8,
    pub score: f64,
    pub description: String,
    pub avg_salary: String,
    pub job_outlook: String,
    pub work_environment: String,
}

impl MajorRecommendation {
    pub(crate) fn new(major: &Major, score: f64, match_percent: u8) -> Self {
        Self {
            major_name: major.name.clone(),
            match_percent,
            score,
            description: major.description.clone(),
            avg_salary: major.avg_salary.clone(),
            job_outlook: major.job_outlook.clone(),
            work_environment: major.work_environment.clone(),
        }
    }
}

/// Catalog problems that make scoring meaningless. Distinct from "nothing matched".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring mappings have not been loaded")]
    EmptyMappingTable,
    #[error("major roster has not been loaded")]
    EmptyMajorRoster,
}

/// Stateless engine turning major-test answers into ranked recommendations.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        input: &ScoringInput<'_>,
    ) -> Result<Vec<MajorRecommendation>, ScoringError> {
        input.catalog.validate()?;

        let tally = tally::tally_scores(input, &self.config, |_| {});
        Ok(recommend(
            input.catalog.majors,
            &tally,
            self.config.max_recommendations,
        ))
    }

    /// Builds the explanation payload handed to the chat assistant.
    ///
    /// A user without a major-test answer set gets [`AiContext::NoData`].
    pub fn explain(
        &self,
        answer_set: Option<&MajorTestAnswerSet>,
        catalog: ScoringCatalog<'_>,
        personality: Option<&PersonalityType>,
        narrative: Option<&str>,
    ) -> Result<AiContext, ScoringError> {
        let Some(answer_set) = answer_set else {
            return Ok(AiContext::NoData);
        };
        catalog.validate()?;

        let input = ScoringInput {
            answers: &answer_set.raw_answers,
            catalog,
            personality,
        };
        Ok(context::build_context(
            &self.config,
            &input,
            answer_set.created_at,
            narrative,
        ))
    }
}

/// Scores with the default configuration.
pub fn score_majors(input: &ScoringInput<'_>) -> Result<Vec<MajorRecommendation>, ScoringError> {
    ScoringEngine::default().score(input)
}
