use crate::infra::{InMemoryCatalogRepository, InMemoryResultRepository};
use chrono::SecondsFormat;
use clap::Args;
use major_match::error::AppError;
use major_match::quiz::{
    AiContext, AnswerSheet, CatalogSnapshot, Dimension, Language, LikertChoice, Major,
    MajorQuestion, PersonalityAnswer, PersonalityProfile, PersonalityQuestion, QuizService,
    ScoringConfig, ScoringMapping, UserId,
};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Language the scripted student takes both tests in
    #[arg(long, default_value = "en")]
    pub(crate) language: Language,
    /// Identifier recorded against the scripted submissions
    #[arg(long, default_value = "demo-student")]
    pub(crate) user_id: String,
    /// Print the AI context payload as JSON after the summary
    #[arg(long)]
    pub(crate) show_context: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        language,
        user_id,
        show_context,
    } = args;
    let user_id = UserId(user_id);

    let service = QuizService::new(
        Arc::new(InMemoryCatalogRepository::with_snapshot(demo_catalog())),
        Arc::new(InMemoryResultRepository::default()),
        ScoringConfig::default(),
    )
    .with_default_language(language);

    println!("Major matching demo ({language})");

    let questions = service.personality_questions(language)?;
    let result = service.submit_personality(
        user_id.clone(),
        language,
        scripted_personality_answers(&questions),
    )?;
    println!(
        "- Personality test: {} answers -> {} (recorded {})",
        result.raw_answers.len(),
        result.personality_type,
        result.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let major_questions = service.major_questions(language)?;
    let answer_set =
        service.submit_major_test(user_id.clone(), scripted_major_answers(&major_questions))?;
    println!(
        "- Major test: {} answers recorded",
        answer_set.raw_answers.len()
    );

    println!("\nTop recommendations");
    for (rank, recommendation) in service
        .recommendations(&user_id, language)?
        .iter()
        .enumerate()
    {
        println!(
            "  {}. {} ({}% match, score {:.2}) | salary {} | outlook {}",
            rank + 1,
            recommendation.major_name,
            recommendation.match_percent,
            recommendation.score,
            recommendation.avg_salary,
            recommendation.job_outlook
        );
    }

    let context = service.ai_context(&user_id, language)?;
    if let Some(payload) = context.payload() {
        println!("\nWhy these majors");
        for entry in payload.breakdown.iter().take(3) {
            println!("  - {}: {}", entry.major_name, entry.summary);
        }
        if let Some(summary) = &payload.personality_summary {
            println!("\nPersonality narrative: {summary}");
        }
    }

    if show_context {
        print_context(&context);
    }

    Ok(())
}

fn print_context(context: &AiContext) {
    match serde_json::to_string_pretty(context) {
        Ok(json) => println!("\nAI context payload:\n{json}"),
        Err(err) => println!("\nAI context payload unavailable: {err}"),
    }
}

/// Leans introverted, intuitive, thinking and judging, with a steady identity.
fn scripted_personality_answers(questions: &[PersonalityQuestion]) -> Vec<PersonalityAnswer> {
    questions
        .iter()
        .map(|question| {
            let agrees = match question.dimension {
                Dimension::AT => question.direction == 'A',
                _ => matches!(question.direction, 'I' | 'N' | 'T' | 'J'),
            };
            let value = match (agrees, question.dimension) {
                (true, Dimension::AT) => 4,
                (true, _) => 5,
                (false, _) => 2,
            };
            PersonalityAnswer {
                question_id: question.id,
                value,
            }
        })
        .collect()
}

fn scripted_major_answers(questions: &[MajorQuestion]) -> AnswerSheet {
    questions
        .iter()
        .map(|question| {
            let choice = match question.trait_value() {
                "I" | "Math" => LikertChoice::StronglyAgree,
                "R" | "Physics" => LikertChoice::Agree,
                "A" | "S" => LikertChoice::Disagree,
                "E" => LikertChoice::StronglyDisagree,
                _ => LikertChoice::Neutral,
            };
            (question.id.to_string(), choice.label().to_string())
        })
        .collect()
}

/// Small bilingual catalog used by `demo` and `serve --demo-catalog`.
pub(crate) fn demo_catalog() -> CatalogSnapshot {
    let major_rows: [(u32, &str, Option<&str>, &str, &str); 10] = [
        (
            1,
            "RIASEC",
            Some("R"),
            "I enjoy building or repairing things",
            "أستمتع ببناء الأشياء أو إصلاحها",
        ),
        (
            2,
            "RIASEC",
            Some("I"),
            "I like investigating how things work",
            "أحب استكشاف كيفية عمل الأشياء",
        ),
        (3, "RIASEC", Some("A"), "I enjoy creative expression", "أستمتع بالتعبير الإبداعي"),
        (
            4,
            "RIASEC",
            Some("S"),
            "I like helping and teaching others",
            "أحب مساعدة الآخرين وتعليمهم",
        ),
        (
            5,
            "RIASEC",
            Some("E"),
            "I enjoy leading and persuading people",
            "أستمتع بقيادة الناس وإقناعهم",
        ),
        (6, "RIASEC", Some("C"), "I like organised, detailed work", "أحب العمل المنظم والدقيق"),
        (
            7,
            "Academic",
            Some("Math"),
            "Mathematics is my strongest subject",
            "الرياضيات أقوى مادة لدي",
        ),
        (8, "Academic", Some("Physics"), "I enjoy physics classes", "أستمتع بدروس الفيزياء"),
        (9, "Academic", Some("Biology"), "I enjoy biology classes", "أستمتع بدروس الأحياء"),
        (
            10,
            "Values",
            None,
            "Earning potential matters most to me",
            "الدخل المرتفع هو الأهم بالنسبة لي",
        ),
    ];

    let mut major_questions = BTreeMap::new();
    for language in [Language::En, Language::Ar] {
        let rows = major_rows
            .iter()
            .map(|(id, category, topic, english, arabic)| MajorQuestion {
                id: *id,
                category: category.to_string(),
                topic: topic.map(str::to_string),
                text: match language {
                    Language::En => english.to_string(),
                    Language::Ar => arabic.to_string(),
                },
                language,
            })
            .collect();
        major_questions.insert(language, rows);
    }

    let personality_rows: [(u32, Dimension, char, &str, &str); 10] = [
        (
            1,
            Dimension::IE,
            'E',
            "I feel energised after social events",
            "أشعر بالحيوية بعد المناسبات الاجتماعية",
        ),
        (
            2,
            Dimension::IE,
            'I',
            "I prefer a quiet evening to a party",
            "أفضل أمسية هادئة على الحفلة",
        ),
        (
            3,
            Dimension::SN,
            'N',
            "I think about future possibilities",
            "أفكر في الاحتمالات المستقبلية",
        ),
        (4, Dimension::SN, 'S', "I trust practical experience", "أثق بالخبرة العملية"),
        (5, Dimension::TF, 'T', "Logic guides my decisions", "المنطق يوجه قراراتي"),
        (
            6,
            Dimension::TF,
            'F',
            "I weigh how choices affect people",
            "أراعي أثر القرارات على الناس",
        ),
        (7, Dimension::JP, 'J', "I like to plan ahead", "أحب التخطيط المسبق"),
        (8, Dimension::JP, 'P', "I keep my options open", "أبقي خياراتي مفتوحة"),
        (9, Dimension::AT, 'A', "I stay calm under pressure", "أبقى هادئا تحت الضغط"),
        (10, Dimension::AT, 'T', "I often doubt my decisions", "كثيرا ما أشك في قراراتي"),
    ];

    let mut personality_questions = BTreeMap::new();
    for language in [Language::En, Language::Ar] {
        let rows = personality_rows
            .iter()
            .map(|(id, dimension, direction, english, arabic)| PersonalityQuestion {
                id: *id,
                dimension: *dimension,
                direction: *direction,
                text: match language {
                    Language::En => english.to_string(),
                    Language::Ar => arabic.to_string(),
                },
                language,
            })
            .collect();
        personality_questions.insert(language, rows);
    }

    let mapping_rows: [(&str, &str, &str, f64); 24] = [
        ("RIASEC", "R", "Mechanical Engineering", 2.0),
        ("RIASEC", "R", "Architecture", 1.0),
        ("RIASEC", "I", "Computer Science", 2.0),
        ("RIASEC", "I", "Medicine", 1.5),
        ("RIASEC", "A", "Graphic Design", 2.0),
        ("RIASEC", "A", "Architecture", 1.5),
        ("RIASEC", "S", "Psychology", 2.0),
        ("RIASEC", "S", "Medicine", 1.0),
        ("RIASEC", "E", "Business Administration", 2.0),
        ("RIASEC", "C", "Accounting", 2.0),
        ("RIASEC", "C", "Computer Science", 0.5),
        ("Academic", "Math", "Computer Science", 1.5),
        ("Academic", "Math", "Accounting", 1.0),
        ("Academic", "Physics", "Mechanical Engineering", 2.0),
        ("Academic", "Biology", "Medicine", 2.0),
        ("Values", "Values", "Business Administration", 1.0),
        ("Values", "Values", "Medicine", 0.5),
        ("MBTI", "I", "Computer Science", 1.0),
        ("MBTI", "E", "Business Administration", 1.0),
        ("MBTI", "N", "Graphic Design", 1.0),
        ("MBTI", "S", "Accounting", 1.0),
        ("MBTI", "T", "Mechanical Engineering", 1.0),
        ("MBTI", "F", "Psychology", 1.0),
        ("MBTI", "J", "Architecture", 0.5),
    ];
    let mappings = mapping_rows
        .iter()
        .map(|(category, option_value, major_name, weight)| ScoringMapping {
            category: category.to_string(),
            option_value: option_value.to_string(),
            major_name: major_name.to_string(),
            weight: *weight,
        })
        .collect();

    let roster_rows: [(&str, &str, &str, &str, &str); 8] = [
        (
            "Computer Science",
            "Software, algorithms and computing systems",
            "$95,000",
            "Much faster than average",
            "Offices and remote teams",
        ),
        (
            "Mechanical Engineering",
            "Design and analysis of machines",
            "$88,000",
            "Average",
            "Plants, labs and offices",
        ),
        (
            "Medicine",
            "Diagnosis and treatment of illness",
            "$180,000",
            "Faster than average",
            "Hospitals and clinics",
        ),
        (
            "Graphic Design",
            "Visual communication and branding",
            "$55,000",
            "Slower than average",
            "Studios and agencies",
        ),
        (
            "Psychology",
            "Study of behaviour and mental processes",
            "$65,000",
            "Average",
            "Clinics, schools and research",
        ),
        (
            "Business Administration",
            "Management, finance and strategy",
            "$75,000",
            "Faster than average",
            "Corporate offices",
        ),
        (
            "Accounting",
            "Financial reporting and auditing",
            "$70,000",
            "Average",
            "Firms and finance departments",
        ),
        (
            "Architecture",
            "Design of buildings and spaces",
            "$80,000",
            "Average",
            "Studios and construction sites",
        ),
    ];
    let majors = roster_rows
        .iter()
        .map(
            |(name, description, avg_salary, job_outlook, work_environment)| Major {
                name: name.to_string(),
                description: description.to_string(),
                avg_salary: avg_salary.to_string(),
                job_outlook: job_outlook.to_string(),
                work_environment: work_environment.to_string(),
            },
        )
        .collect();

    let profile_rows: [(&str, Language, &str, &str); 4] = [
        (
            "INTJ",
            Language::En,
            "Architect",
            "Strategic, independent thinkers who like to turn ideas into long-range plans.",
        ),
        (
            "INTJ",
            Language::Ar,
            "المعماري",
            "مفكرون استراتيجيون مستقلون يحبون تحويل الأفكار إلى خطط بعيدة المدى.",
        ),
        (
            "ENFP",
            Language::En,
            "Campaigner",
            "Curious, warm and energetic, drawn to people and new possibilities.",
        ),
        (
            "ISTJ",
            Language::En,
            "Logistician",
            "Practical and dependable, at home with structure and clear standards.",
        ),
    ];
    let profiles = profile_rows
        .iter()
        .map(|(type_code, language, title, narrative)| PersonalityProfile {
            type_code: type_code.to_string(),
            language: *language,
            title: title.to_string(),
            narrative: narrative.to_string(),
        })
        .collect();

    CatalogSnapshot {
        major_questions,
        personality_questions,
        mappings,
        majors,
        profiles,
    }
}
