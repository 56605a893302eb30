use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for quiz takers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Catalog language. Questions and narratives are stored once per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}', expected 'en' or 'ar'")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            _ => Err(UnsupportedLanguage(value.to_string())),
        }
    }
}

/// Major-test question. Unique by `(id, language)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorQuestion {
    pub id: u32,
    pub category: String,
    #[serde(default)]
    pub topic: Option<String>,
    pub text: String,
    #[serde(default)]
    pub language: Language,
}

impl MajorQuestion {
    /// Trait value the question feeds: its topic, or its category when the topic is blank.
    pub fn trait_value(&self) -> &str {
        match self.topic.as_deref().map(str::trim) {
            Some(topic) if !topic.is_empty() => topic,
            _ => &self.category,
        }
    }
}

/// Weighted edge between a trait value and a major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringMapping {
    pub category: String,
    pub option_value: String,
    pub major_name: String,
    pub weight: f64,
}

/// Major metadata. `name` is the join key for [`ScoringMapping::major_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Major {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avg_salary: String,
    #[serde(default)]
    pub job_outlook: String,
    #[serde(default)]
    pub work_environment: String,
}

/// Axis a personality question measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    IE,
    SN,
    TF,
    JP,
    AT,
}

/// MBTI-style personality question. `direction` is the pole an agreeing answer supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityQuestion {
    pub id: u32,
    pub dimension: Dimension,
    pub direction: char,
    pub text: String,
    #[serde(default)]
    pub language: Language,
}

/// Likert answer to a personality question; 3 is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityAnswer {
    pub question_id: u32,
    pub value: i32,
}

/// Narrative describing a four-letter type, used to ground AI conversations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityProfile {
    pub type_code: String,
    #[serde(default)]
    pub language: Language,
    pub title: String,
    pub narrative: String,
}

/// Computed personality type such as `ENFP-A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalityType(pub String);

impl PersonalityType {
    /// Four-letter portion with the identity suffix dropped.
    pub fn core(&self) -> &str {
        self.0.split('-').next().unwrap_or_default().trim()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only record of a classified personality test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityResult {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub personality_type: PersonalityType,
    pub raw_answers: Vec<PersonalityAnswer>,
    pub created_at: DateTime<Utc>,
}

/// Answers to the major test keyed by question id as submitted by the client.
pub type AnswerSheet = BTreeMap<String, String>;

/// Append-only record of a submitted major test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorTestAnswerSet {
    pub user_id: UserId,
    pub raw_answers: AnswerSheet,
    pub created_at: DateTime<Utc>,
}

/// The five canonical agreement labels accepted on the major test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikertChoice {
    StronglyAgree,
    Agree,
    Neutral,
    Disagree,
    StronglyDisagree,
}

impl LikertChoice {
    /// Parses a free-text label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "strongly agree" => Some(Self::StronglyAgree),
            "agree" => Some(Self::Agree),
            "neutral" => Some(Self::Neutral),
            "disagree" => Some(Self::Disagree),
            "strongly disagree" => Some(Self::StronglyDisagree),
            _ => None,
        }
    }

    pub fn weight(&self) -> i8 {
        match self {
            Self::StronglyAgree => 2,
            Self::Agree => 1,
            Self::Neutral => 0,
            Self::Disagree => -1,
            Self::StronglyDisagree => -2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StronglyAgree => "strongly agree",
            Self::Agree => "agree",
            Self::Neutral => "neutral",
            Self::Disagree => "disagree",
            Self::StronglyDisagree => "strongly disagree",
        }
    }
}

/// Signed weight for a submitted label; unrecognized labels carry no signal.
pub fn choice_weight(label: &str) -> i8 {
    LikertChoice::parse(label)
        .map(|choice| choice.weight())
        .unwrap_or(0)
}
