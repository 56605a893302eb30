use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::context::AiContext;
use super::domain::{
    AnswerSheet, Language, MajorQuestion, MajorTestAnswerSet, PersonalityAnswer,
    PersonalityQuestion, PersonalityResult, UserId,
};
use super::personality::classify_personality;
use super::repository::{CatalogRepository, RepositoryError, ResultRepository};
use super::scoring::{
    MajorRecommendation, ScoringCatalog, ScoringConfig, ScoringEngine, ScoringError,
    ScoringInput,
};
use super::snapshot::{CatalogBulkLoad, CatalogCounts};

/// Service composing the catalog, submission history, and scoring engine.
pub struct QuizService<C, R> {
    catalog: Arc<C>,
    results: Arc<R>,
    engine: Arc<ScoringEngine>,
    default_language: Language,
}

impl<C, R> QuizService<C, R>
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    pub fn new(catalog: Arc<C>, results: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            catalog,
            results,
            engine: Arc::new(ScoringEngine::new(config)),
            default_language: Language::default(),
        }
    }

    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Language used when a request does not name one.
    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn personality_questions(
        &self,
        language: Language,
    ) -> Result<Vec<PersonalityQuestion>, QuizServiceError> {
        let snapshot = self.catalog.snapshot()?;
        Ok(snapshot.personality_questions(language).to_vec())
    }

    pub fn major_questions(
        &self,
        language: Language,
    ) -> Result<Vec<MajorQuestion>, QuizServiceError> {
        let snapshot = self.catalog.snapshot()?;
        Ok(snapshot.major_questions(language).to_vec())
    }

    /// Classify a personality test and append it to the user's history.
    pub fn submit_personality(
        &self,
        user_id: UserId,
        language: Language,
        answers: Vec<PersonalityAnswer>,
    ) -> Result<PersonalityResult, QuizServiceError> {
        let snapshot = self.catalog.snapshot()?;
        let personality_type =
            classify_personality(&answers, snapshot.personality_questions(language), language);

        let result = PersonalityResult {
            user_id,
            personality_type,
            raw_answers: answers,
            created_at: Utc::now(),
        };
        self.results.append_personality(result.clone())?;

        info!(
            user_id = %result.user_id.0,
            personality_type = %result.personality_type,
            answers = result.raw_answers.len(),
            "personality test classified"
        );
        Ok(result)
    }

    pub fn submit_major_test(
        &self,
        user_id: UserId,
        answers: AnswerSheet,
    ) -> Result<MajorTestAnswerSet, QuizServiceError> {
        let answer_set = MajorTestAnswerSet {
            user_id,
            raw_answers: answers,
            created_at: Utc::now(),
        };
        self.results.append_major_answers(answer_set.clone())?;

        info!(
            user_id = %answer_set.user_id.0,
            answers = answer_set.raw_answers.len(),
            "major test recorded"
        );
        Ok(answer_set)
    }

    /// Rank majors for the user's latest major test, blended with their latest personality.
    pub fn recommendations(
        &self,
        user_id: &UserId,
        language: Language,
    ) -> Result<Vec<MajorRecommendation>, QuizServiceError> {
        let answer_set = self
            .results
            .latest_major_answers(user_id)?
            .ok_or(QuizServiceError::NoMajorTestAnswers)?;
        let personality = self.results.latest_personality(user_id)?;
        let snapshot = self.catalog.snapshot()?;

        let input = ScoringInput {
            answers: &answer_set.raw_answers,
            catalog: ScoringCatalog::from_snapshot(&snapshot, language),
            personality: personality.as_ref().map(|result| &result.personality_type),
        };
        let recommendations = self.engine.score(&input).inspect_err(|err| {
            warn!(user_id = %user_id.0, error = %err, "scoring catalog incomplete");
        })?;

        info!(
            user_id = %user_id.0,
            %language,
            top = recommendations.first().map(|entry| entry.major_name.as_str()),
            "recommendations computed"
        );
        Ok(recommendations)
    }

    /// Explanation payload for the chat assistant; `NoData` before the first major test.
    pub fn ai_context(
        &self,
        user_id: &UserId,
        language: Language,
    ) -> Result<AiContext, QuizServiceError> {
        let answer_set = self.results.latest_major_answers(user_id)?;
        let personality = self.results.latest_personality(user_id)?;
        let personality_type = personality.as_ref().map(|result| &result.personality_type);
        let snapshot = self.catalog.snapshot()?;

        let narrative = personality_type
            .and_then(|personality| snapshot.profile(personality.core(), language))
            .map(|profile| profile.narrative.as_str());

        let context = self.engine.explain(
            answer_set.as_ref(),
            ScoringCatalog::from_snapshot(&snapshot, language),
            personality_type,
            narrative,
        )?;
        Ok(context)
    }

    /// Replace catalog tables in one swap and report the resulting row counts.
    pub fn bulk_load(&self, load: CatalogBulkLoad) -> Result<CatalogCounts, QuizServiceError> {
        let snapshot = self.catalog.update(|snapshot| load.apply(snapshot))?;

        let counts = snapshot.counts();
        if counts.dead_mappings > 0 {
            warn!(
                dead_mappings = counts.dead_mappings,
                "scoring mappings reference trait values no question produces"
            );
        }

        info!(
            major_questions = counts.major_questions,
            personality_questions = counts.personality_questions,
            mappings = counts.mappings,
            majors = counts.majors,
            profiles = counts.profiles,
            "catalog bulk load applied"
        );
        Ok(counts)
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error("no major test answers recorded for this user")]
    NoMajorTestAnswers,
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
