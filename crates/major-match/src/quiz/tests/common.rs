use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::quiz::domain::{
    AnswerSheet, Dimension, Language, Major, MajorQuestion, MajorTestAnswerSet,
    PersonalityAnswer, PersonalityProfile, PersonalityQuestion, PersonalityResult,
    ScoringMapping, UserId,
};
use crate::quiz::repository::{CatalogRepository, RepositoryError, ResultRepository};
use crate::quiz::snapshot::CatalogSnapshot;
use crate::quiz::{quiz_router, QuizService, ScoringConfig};

pub(super) fn major_question(
    id: u32,
    category: &str,
    topic: Option<&str>,
    text: &str,
) -> MajorQuestion {
    MajorQuestion {
        id,
        category: category.to_string(),
        topic: topic.map(str::to_string),
        text: text.to_string(),
        language: Language::En,
    }
}

pub(super) fn mapping(
    category: &str,
    option_value: &str,
    major_name: &str,
    weight: f64,
) -> ScoringMapping {
    ScoringMapping {
        category: category.to_string(),
        option_value: option_value.to_string(),
        major_name: major_name.to_string(),
        weight,
    }
}

pub(super) fn major(name: &str) -> Major {
    Major {
        name: name.to_string(),
        description: format!("Study of {name}"),
        avg_salary: "$70,000".to_string(),
        job_outlook: "Growing".to_string(),
        work_environment: "Campus and industry".to_string(),
    }
}

pub(super) fn major_questions() -> Vec<MajorQuestion> {
    vec![
        major_question(1, "RIASEC", Some("I"), "I enjoy solving puzzles"),
        major_question(2, "RIASEC", Some("I"), "I like running lab experiments"),
        major_question(3, "RIASEC", Some("A"), "I enjoy painting and drawing"),
        major_question(4, "Academic", Some("Math"), "Mathematics is my strongest subject"),
        major_question(5, "Academic", Some("Biology"), "I enjoy biology classes"),
        major_question(6, "Values", None, "Helping people matters most to me"),
    ]
}

pub(super) fn mappings() -> Vec<ScoringMapping> {
    vec![
        mapping("RIASEC", "I", "Computer Science", 2.0),
        mapping("RIASEC", "I", "Physics", 1.5),
        mapping("RIASEC", "A", "Fine Arts", 2.0),
        mapping("RIASEC", "A", "Architecture", 1.0),
        mapping("Academic", "Math", "Computer Science", 1.0),
        mapping("Academic", "Math", "Physics", 2.0),
        mapping("Academic", "Math", "Architecture", 1.0),
        mapping("Academic", "Biology", "Medicine", 2.0),
        mapping("Values", "Values", "Medicine", 1.0),
        mapping("MBTI", "N", "Fine Arts", 1.0),
        mapping("MBTI", "T", "Computer Science", 1.0),
        mapping("MBTI", "F", "Medicine", 1.0),
        mapping("MBTI", "I", "Physics", 0.5),
    ]
}

pub(super) fn majors() -> Vec<Major> {
    vec![
        major("Computer Science"),
        major("Physics"),
        major("Fine Arts"),
        major("Architecture"),
        major("Medicine"),
    ]
}

pub(super) fn personality_questions(language: Language) -> Vec<PersonalityQuestion> {
    [
        (1, Dimension::IE, 'E'),
        (2, Dimension::SN, 'N'),
        (3, Dimension::TF, 'T'),
        (4, Dimension::JP, 'J'),
        (5, Dimension::AT, 'A'),
    ]
    .into_iter()
    .map(|(id, dimension, direction)| PersonalityQuestion {
        id,
        dimension,
        direction,
        text: format!("personality question {id}"),
        language,
    })
    .collect()
}

/// Answers that classify as `INTJ-T` against [`personality_questions`].
pub(super) fn intj_answers() -> Vec<PersonalityAnswer> {
    [(1, 1), (2, 5), (3, 4), (4, 5), (5, 2)]
        .into_iter()
        .map(|(question_id, value)| PersonalityAnswer { question_id, value })
        .collect()
}

pub(super) fn profiles() -> Vec<PersonalityProfile> {
    vec![
        PersonalityProfile {
            type_code: "INTJ".to_string(),
            language: Language::En,
            title: "Architect".to_string(),
            narrative: "Strategic and independent. ".repeat(40),
        },
        PersonalityProfile {
            type_code: "ENFP".to_string(),
            language: Language::En,
            title: "Campaigner".to_string(),
            narrative: "Curious and warm.".to_string(),
        },
    ]
}

pub(super) fn snapshot() -> CatalogSnapshot {
    let mut major_questions = BTreeMap::new();
    major_questions.insert(Language::En, self::major_questions());

    let mut personality_questions = BTreeMap::new();
    personality_questions.insert(Language::En, self::personality_questions(Language::En));
    personality_questions.insert(Language::Ar, self::personality_questions(Language::Ar));

    CatalogSnapshot {
        major_questions,
        personality_questions,
        mappings: mappings(),
        majors: majors(),
        profiles: profiles(),
    }
}

/// Without a personality blend: Physics 6.25, Computer Science 5.0, Architecture 1.0,
/// Medicine 0.0 and Fine Arts -2.0.
pub(super) fn answer_sheet() -> AnswerSheet {
    [
        ("1", "Strongly Agree"),
        ("2", "agree"),
        ("3", "disagree"),
        ("4", "strongly agree"),
        ("6", "neutral"),
    ]
    .into_iter()
    .map(|(id, label)| (id.to_string(), label.to_string()))
    .collect()
}

pub(super) fn user(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn build_service() -> (
    QuizService<MemoryCatalog, MemoryResults>,
    Arc<MemoryCatalog>,
    Arc<MemoryResults>,
) {
    let catalog = Arc::new(MemoryCatalog::with_snapshot(snapshot()));
    let results = Arc::new(MemoryResults::default());
    let service = QuizService::new(catalog.clone(), results.clone(), ScoringConfig::default());
    (service, catalog, results)
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    snapshot: Mutex<Arc<CatalogSnapshot>>,
}

impl MemoryCatalog {
    pub(super) fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Arc::new(snapshot)),
        }
    }
}

impl CatalogRepository for MemoryCatalog {
    fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, RepositoryError> {
        Ok(self.snapshot.lock().expect("catalog mutex poisoned").clone())
    }

    fn update<F>(&self, change: F) -> Result<Arc<CatalogSnapshot>, RepositoryError>
    where
        F: FnOnce(&mut CatalogSnapshot),
    {
        let mut guard = self.snapshot.lock().expect("catalog mutex poisoned");
        let mut next = guard.as_ref().clone();
        change(&mut next);
        *guard = Arc::new(next);
        Ok(guard.clone())
    }
}

#[derive(Default)]
pub(super) struct MemoryResults {
    personality: Mutex<Vec<PersonalityResult>>,
    major_answers: Mutex<Vec<MajorTestAnswerSet>>,
}

impl MemoryResults {
    pub(super) fn personality_count(&self) -> usize {
        self.personality.lock().expect("results mutex poisoned").len()
    }
}

impl ResultRepository for MemoryResults {
    fn append_personality(&self, result: PersonalityResult) -> Result<(), RepositoryError> {
        self.personality
            .lock()
            .expect("results mutex poisoned")
            .push(result);
        Ok(())
    }

    fn latest_personality(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PersonalityResult>, RepositoryError> {
        let guard = self.personality.lock().expect("results mutex poisoned");
        Ok(guard
            .iter()
            .filter(|result| &result.user_id == user_id)
            .max_by_key(|result| result.created_at)
            .cloned())
    }

    fn append_major_answers(&self, answers: MajorTestAnswerSet) -> Result<(), RepositoryError> {
        self.major_answers
            .lock()
            .expect("results mutex poisoned")
            .push(answers);
        Ok(())
    }

    fn latest_major_answers(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MajorTestAnswerSet>, RepositoryError> {
        let guard = self.major_answers.lock().expect("results mutex poisoned");
        Ok(guard
            .iter()
            .filter(|answers| &answers.user_id == user_id)
            .max_by_key(|answers| answers.created_at)
            .cloned())
    }
}

pub(super) struct UnavailableResults;

impl ResultRepository for UnavailableResults {
    fn append_personality(&self, _result: PersonalityResult) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_personality(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<PersonalityResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn append_major_answers(&self, _answers: MajorTestAnswerSet) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_major_answers(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<MajorTestAnswerSet>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn quiz_router_with_service(
    service: QuizService<MemoryCatalog, MemoryResults>,
) -> axum::Router {
    quiz_router(Arc::new(service))
}
