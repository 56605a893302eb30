//! End-to-end coverage for the personality and major-matching workflow.
//!
//! Scenarios load a catalog through the admin endpoint, take both tests as a student would,
//! and read recommendations back through the public service facade and HTTP router.

mod common {
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};

    use major_match::quiz::{
        CatalogRepository, CatalogSnapshot, MajorTestAnswerSet, PersonalityResult, QuizService,
        RepositoryError, ResultRepository, ScoringConfig, UserId,
    };

    /// Admin payload for a three-major catalog.
    pub(super) fn catalog_load() -> Value {
        json!({
            "majorQuestions": [
                { "id": 1, "category": "RIASEC", "topic": "R", "text": "I like fixing engines" },
                { "id": 2, "category": "RIASEC", "topic": "S", "text": "I like helping people" },
                { "id": 3, "category": "Academic", "topic": "Chemistry", "text": "Chemistry is fun" },
            ],
            "personalityQuestions": [
                { "id": 1, "dimension": "IE", "direction": "I", "text": "Quiet evenings recharge me" },
                { "id": 2, "dimension": "SN", "direction": "S", "text": "I trust concrete facts" },
                { "id": 3, "dimension": "TF", "direction": "F", "text": "Harmony guides my choices" },
                { "id": 4, "dimension": "JP", "direction": "P", "text": "I keep plans open" },
                { "id": 5, "dimension": "AT", "direction": "T", "text": "I second-guess myself" },
            ],
            "mappings": [
                { "category": "RIASEC", "optionValue": "R", "majorName": "Mechanical Engineering", "weight": 2.0 },
                { "category": "RIASEC", "optionValue": "S", "majorName": "Nursing", "weight": 2.0 },
                { "category": "RIASEC", "optionValue": "S", "majorName": "Psychology", "weight": 1.0 },
                { "category": "Academic", "optionValue": "Chemistry", "majorName": "Nursing", "weight": 1.0 },
                { "category": "Academic", "optionValue": "Chemistry", "majorName": "mechanical engineering", "weight": 1.0 },
                { "category": "MBTI", "optionValue": "S", "majorName": "Mechanical Engineering", "weight": 1.0 },
                { "category": "MBTI", "optionValue": "F", "majorName": "Nursing", "weight": 1.0 },
                { "category": "MBTI", "optionValue": "F", "majorName": "Psychology", "weight": 1.0 },
                { "category": "MBTI", "optionValue": "E", "majorName": "Psychology", "weight": 1.0 },
            ],
            "majors": [
                { "name": "Mechanical Engineering", "avgSalary": "$85,000", "jobOutlook": "Stable" },
                { "name": "Nursing", "avgSalary": "$77,000", "jobOutlook": "Growing" },
                { "name": "Psychology", "avgSalary": "$60,000", "jobOutlook": "Growing" },
            ],
            "profiles": [
                {
                    "typeCode": "ESFJ",
                    "title": "Consul",
                    "narrative": "Attentive and people-focused, thriving in supportive roles."
                },
            ],
        })
    }

    /// Answers that classify as `ESFJ-T`.
    pub(super) fn personality_submission(user_id: &str) -> Value {
        json!({
            "userId": user_id,
            "answers": [
                { "questionId": 1, "value": 1 },
                { "questionId": 2, "value": 4 },
                { "questionId": 3, "value": 5 },
                { "questionId": 4, "value": 2 },
                { "questionId": 5, "value": 5 },
            ],
        })
    }

    pub(super) fn major_submission(user_id: &str) -> Value {
        json!({
            "userId": user_id,
            "answers": { "1": "Agree", "2": "Strongly Agree", "3": "Disagree" },
        })
    }

    #[derive(Default)]
    pub(super) struct MemoryCatalog {
        snapshot: Mutex<Arc<CatalogSnapshot>>,
    }

    impl CatalogRepository for MemoryCatalog {
        fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, RepositoryError> {
            Ok(self.snapshot.lock().expect("catalog lock").clone())
        }

        fn update<F>(&self, change: F) -> Result<Arc<CatalogSnapshot>, RepositoryError>
        where
            F: FnOnce(&mut CatalogSnapshot),
        {
            let mut guard = self.snapshot.lock().expect("catalog lock");
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

    impl ResultRepository for MemoryResults {
        fn append_personality(&self, result: PersonalityResult) -> Result<(), RepositoryError> {
            self.personality.lock().expect("results lock").push(result);
            Ok(())
        }

        fn latest_personality(
            &self,
            user_id: &UserId,
        ) -> Result<Option<PersonalityResult>, RepositoryError> {
            let guard = self.personality.lock().expect("results lock");
            Ok(guard
                .iter()
                .rev()
                .find(|result| &result.user_id == user_id)
                .cloned())
        }

        fn append_major_answers(
            &self,
            answers: MajorTestAnswerSet,
        ) -> Result<(), RepositoryError> {
            self.major_answers.lock().expect("results lock").push(answers);
            Ok(())
        }

        fn latest_major_answers(
            &self,
            user_id: &UserId,
        ) -> Result<Option<MajorTestAnswerSet>, RepositoryError> {
            let guard = self.major_answers.lock().expect("results lock");
            Ok(guard
                .iter()
                .rev()
                .find(|answers| &answers.user_id == user_id)
                .cloned())
        }
    }

    pub(super) fn build_service() -> Arc<QuizService<MemoryCatalog, MemoryResults>> {
        Arc::new(QuizService::new(
            Arc::new(MemoryCatalog::default()),
            Arc::new(MemoryResults::default()),
            ScoringConfig::default(),
        ))
    }
}

mod classification {
    use major_match::quiz::{
        classify_personality, Dimension, Language, PersonalityAnswer, PersonalityQuestion,
    };

    fn question(id: u32, dimension: Dimension, direction: char) -> PersonalityQuestion {
        PersonalityQuestion {
            id,
            dimension,
            direction,
            text: format!("question {id}"),
            language: Language::En,
        }
    }

    #[test]
    fn turbulent_direction_agreement_marks_identity_turbulent() {
        let questions = vec![question(1, Dimension::AT, 'T')];
        let answers = [PersonalityAnswer {
            question_id: 1,
            value: 4,
        }];

        let personality = classify_personality(&answers, &questions, Language::En);

        assert_eq!(personality.as_str(), "ENFP-T");
    }

    #[test]
    fn thinking_disagreement_on_identity_axis_counts_as_feeling() {
        // T disagreement resolves to F, which the identity axis does not track.
        let questions = vec![question(1, Dimension::AT, 'T')];
        let answers = [PersonalityAnswer {
            question_id: 1,
            value: 1,
        }];

        let personality = classify_personality(&answers, &questions, Language::En);

        assert_eq!(personality.as_str(), "ENFP-A");
    }

    #[test]
    fn unknown_direction_letters_are_ignored() {
        let questions = vec![question(1, Dimension::IE, 'X'), question(2, Dimension::SN, 'S')];
        let answers = [
            PersonalityAnswer {
                question_id: 1,
                value: 1,
            },
            PersonalityAnswer {
                question_id: 2,
                value: 5,
            },
        ];

        let personality = classify_personality(&answers, &questions, Language::En);

        assert_eq!(personality.as_str(), "ESFP-A");
    }
}

mod workflow {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use major_match::quiz::{quiz_router, Language, QuizServiceError, UserId};

    async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload = serde_json::from_slice(&body).expect("json");
        (status, payload)
    }

    fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(payload).expect("serialize payload"),
            ))
            .expect("request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn student_journey_produces_explained_recommendations() {
        let service = build_service();
        let router = quiz_router(service.clone());

        let (status, counts) =
            send(&router, json_request("PUT", "/api/v1/admin/catalog", &catalog_load())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(counts["mappings"], 9);
        assert_eq!(counts["deadMappings"], 0);

        let (status, questions) = send(&router, get("/api/v1/quiz/majors/questions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(questions.as_array().map(Vec::len), Some(3));

        let (status, personality) = send(
            &router,
            json_request(
                "POST",
                "/api/v1/quiz/personality",
                &personality_submission("student-7"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(personality["type"], "ESFJ-T");

        let (status, _) = send(
            &router,
            json_request("POST", "/api/v1/quiz/majors", &major_submission("student-7")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, payload) =
            send(&router, get("/api/v1/quiz/users/student-7/recommendations")).await;
        assert_eq!(status, StatusCode::OK);
        let ranked: Vec<(&str, u64)> = payload["recommendations"]
            .as_array()
            .expect("recommendations")
            .iter()
            .map(|entry| {
                (
                    entry["majorName"].as_str().unwrap_or_default(),
                    entry["matchPercent"].as_u64().unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Nursing", 100),
                ("Psychology", 86),
                ("Mechanical Engineering", 43)
            ]
        );
        assert_eq!(payload["recommendations"][0]["avgSalary"], "$77,000");

        let (status, context) = send(&router, get("/api/v1/quiz/users/student-7/ai-context")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(context["status"], "ready");
        assert_eq!(context["personalityType"], "ESFJ-T");
        assert_eq!(
            context["personalitySummary"],
            "Attentive and people-focused, thriving in supportive roles."
        );
        assert_eq!(
            context["breakdown"][0]["summary"],
            "driven by RIASEC S (+4.00), MBTI F (+0.50)"
        );

        let direct = service
            .recommendations(&UserId("student-7".to_string()), Language::En)
            .expect("service agrees with router");
        assert_eq!(direct[0].major_name, "Nursing");
    }

    #[tokio::test]
    async fn recommendations_wait_for_catalog_and_answers() {
        let service = build_service();
        let router = quiz_router(service.clone());

        let (status, _) =
            send(&router, get("/api/v1/quiz/users/student-8/recommendations")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(
            &router,
            json_request("POST", "/api/v1/quiz/majors", &major_submission("student-8")),
        )
        .await;
        let (status, payload) =
            send(&router, get("/api/v1/quiz/users/student-8/recommendations")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload["error"], "results not available yet");

        let error = service
            .recommendations(&UserId("student-8".to_string()), Language::En)
            .expect_err("catalog still empty");
        assert!(matches!(error, QuizServiceError::Scoring(_)));

        let (status, _) =
            send(&router, json_request("PUT", "/api/v1/admin/catalog", &catalog_load())).await;
        assert_eq!(status, StatusCode::OK);
        let (status, payload) =
            send(&router, get("/api/v1/quiz/users/student-8/recommendations")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["recommendations"][0]["majorName"], "Nursing");
    }
}
