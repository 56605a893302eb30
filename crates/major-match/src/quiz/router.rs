use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerSheet, Language, PersonalityAnswer, UserId};
use super::repository::{CatalogRepository, ResultRepository};
use super::service::{QuizService, QuizServiceError};
use super::snapshot::CatalogBulkLoad;

/// Optional `?language=` selector shared by the read endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct LanguageQuery {
    #[serde(default)]
    pub(crate) language: Option<Language>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersonalitySubmission {
    pub(crate) user_id: UserId,
    #[serde(default)]
    pub(crate) language: Option<Language>,
    pub(crate) answers: Vec<PersonalityAnswer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MajorTestSubmission {
    pub(crate) user_id: UserId,
    pub(crate) answers: AnswerSheet,
}

/// Router builder exposing the quiz, recommendation, and catalog admin endpoints.
pub fn quiz_router<C, R>(service: Arc<QuizService<C, R>>) -> Router
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/quiz/personality/questions",
            get(personality_questions_handler::<C, R>),
        )
        .route("/api/v1/quiz/personality", post(personality_handler::<C, R>))
        .route(
            "/api/v1/quiz/majors/questions",
            get(major_questions_handler::<C, R>),
        )
        .route("/api/v1/quiz/majors", post(major_test_handler::<C, R>))
        .route(
            "/api/v1/quiz/users/:user_id/recommendations",
            get(recommendations_handler::<C, R>),
        )
        .route(
            "/api/v1/quiz/users/:user_id/ai-context",
            get(ai_context_handler::<C, R>),
        )
        .route("/api/v1/admin/catalog", put(bulk_load_handler::<C, R>))
        .with_state(service)
}

pub(crate) async fn personality_questions_handler<C, R>(
    State(service): State<Arc<QuizService<C, R>>>,
    Query(query): Query<LanguageQuery>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    let language = query.language.unwrap_or(service.default_language());
    match service.personality_questions(language) {
        Ok(questions) => (StatusCode::OK, axum::Json(questions)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn major_questions_handler<C, R>(
    State(service): State<Arc<QuizService<C, R>>>,
    Query(query): Query<LanguageQuery>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    let language = query.language.unwrap_or(service.default_language());
    match service.major_questions(language) {
        Ok(questions) => (StatusCode::OK, axum::Json(questions)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn personality_handler<C, R>(
    State(service): State<Arc<QuizService<C, R>>>,
    axum::Json(submission): axum::Json<PersonalitySubmission>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    let PersonalitySubmission {
        user_id,
        language,
        answers,
    } = submission;

    let language = language.unwrap_or(service.default_language());
    match service.submit_personality(user_id, language, answers) {
        Ok(result) => (StatusCode::CREATED, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn major_test_handler<C, R>(
    State(service): State<Arc<QuizService<C, R>>>,
    axum::Json(submission): axum::Json<MajorTestSubmission>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.submit_major_test(submission.user_id, submission.answers) {
        Ok(answer_set) => (StatusCode::CREATED, axum::Json(answer_set)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler<C, R>(
    State(service): State<Arc<QuizService<C, R>>>,
    Path(user_id): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    let user_id = UserId(user_id);
    let language = query.language.unwrap_or(service.default_language());
    match service.recommendations(&user_id, language) {
        Ok(recommendations) => {
            let payload = json!({
                "userId": user_id.0,
                "recommendations": recommendations,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ai_context_handler<C, R>(
    State(service): State<Arc<QuizService<C, R>>>,
    Path(user_id): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    let language = query.language.unwrap_or(service.default_language());
    match service.ai_context(&UserId(user_id), language) {
        Ok(context) => (StatusCode::OK, axum::Json(context)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn bulk_load_handler<C, R>(
    State(service): State<Arc<QuizService<C, R>>>,
    axum::Json(load): axum::Json<CatalogBulkLoad>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: ResultRepository + 'static,
{
    match service.bulk_load(load) {
        Ok(counts) => (StatusCode::OK, axum::Json(counts)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: QuizServiceError) -> Response {
    let status = match &error {
        QuizServiceError::NoMajorTestAnswers => StatusCode::NOT_FOUND,
        QuizServiceError::Scoring(_) => StatusCode::SERVICE_UNAVAILABLE,
        QuizServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = match &error {
        QuizServiceError::Scoring(reason) => json!({
            "error": "results not available yet",
            "reason": reason.to_string(),
        }),
        other => json!({ "error": other.to_string() }),
    };
    (status, axum::Json(payload)).into_response()
}
