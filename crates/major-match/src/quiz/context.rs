//! Explanation payload for the chat assistant.
//!
//! The builder replays the scoring tally while recording which trait values moved each
//! major, so the assistant can cite concrete answers instead of just the final ranking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{choice_weight, PersonalityType};
use super::scoring::index::question_id;
use super::scoring::tally::{tally_scores, Impact};
use super::scoring::{ranked, recommend, MajorRecommendation, ScoringConfig, ScoringInput};

/// Result of an AI-context request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AiContext {
    /// The user has not taken the major test yet.
    NoData,
    Ready(Box<AiContextPayload>),
}

impl AiContext {
    pub fn payload(&self) -> Option<&AiContextPayload> {
        match self {
            AiContext::NoData => None,
            AiContext::Ready(payload) => Some(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiContextPayload {
    pub personality_type: Option<PersonalityType>,
    pub personality_summary: Option<String>,
    pub answered_at: DateTime<Utc>,
    pub answers: Vec<AnsweredQuestion>,
    pub recommendations: Vec<MajorRecommendation>,
    pub breakdown: Vec<MajorBreakdown>,
}

/// Raw answer resolved against the catalog. Unknown ids keep `None` metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question_id: String,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub question_text: Option<String>,
    pub answer: String,
    pub weight: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorBreakdown {
    pub major_name: String,
    pub score: f64,
    pub summary: String,
    pub contributions: Vec<TraitContribution>,
}

/// Net signed impact of one `(category, topic)` trait value on a major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitContribution {
    pub category: String,
    pub topic: String,
    pub impact: f64,
}

#[derive(Default)]
struct ContributionLedger {
    // keyed by lowercase major name
    by_major: HashMap<String, Vec<TraitContribution>>,
}

impl ContributionLedger {
    fn record(&mut self, impact: &Impact<'_>) {
        let entries = self
            .by_major
            .entry(impact.major_name.to_lowercase())
            .or_default();

        let existing = entries.iter_mut().find(|entry| {
            entry.category.eq_ignore_ascii_case(impact.category)
                && entry.topic.to_lowercase() == impact.topic.to_lowercase()
        });
        match existing {
            Some(entry) => entry.impact += impact.value,
            None => entries.push(TraitContribution {
                category: impact.category.to_string(),
                topic: impact.topic.to_string(),
                impact: impact.value,
            }),
        }
    }

    fn take(&mut self, major_name: &str, limit: usize) -> Option<Vec<TraitContribution>> {
        let mut contributions = self.by_major.remove(&major_name.to_lowercase())?;
        contributions.sort_by(|left, right| right.impact.abs().total_cmp(&left.impact.abs()));
        contributions.truncate(limit);
        Some(contributions)
    }
}

pub(crate) fn build_context(
    config: &ScoringConfig,
    input: &ScoringInput<'_>,
    answered_at: DateTime<Utc>,
    narrative: Option<&str>,
) -> AiContext {
    let mut ledger = ContributionLedger::default();
    let tally = tally_scores(input, config, |impact| ledger.record(impact));

    let recommendations = recommend(input.catalog.majors, &tally, config.max_recommendations);

    let breakdown = ranked(input.catalog.majors, &tally)
        .into_iter()
        .filter_map(|(major, score)| {
            let contributions = ledger.take(&major.name, config.max_contributions)?;
            Some(MajorBreakdown {
                major_name: major.name.clone(),
                score,
                summary: reason_summary(&contributions),
                contributions,
            })
        })
        .collect();

    AiContext::Ready(Box::new(AiContextPayload {
        personality_type: input.personality.cloned(),
        personality_summary: narrative.map(|text| snippet(text, config.narrative_snippet_chars)),
        answered_at,
        answers: answered_questions(input),
        recommendations,
        breakdown,
    }))
}

fn answered_questions(input: &ScoringInput<'_>) -> Vec<AnsweredQuestion> {
    let mut answers: Vec<AnsweredQuestion> = input
        .answers
        .iter()
        .map(|(raw_id, answer)| {
            let question = question_id(raw_id).and_then(|id| {
                input
                    .catalog
                    .questions
                    .iter()
                    .find(|question| question.id == id)
            });
            AnsweredQuestion {
                question_id: raw_id.clone(),
                category: question.map(|q| q.category.clone()),
                topic: question.map(|q| q.trait_value().to_string()),
                question_text: question.map(|q| q.text.clone()),
                answer: answer.clone(),
                weight: choice_weight(answer),
            }
        })
        .collect();

    answers.sort_by_key(|answer| {
        (
            question_id(&answer.question_id).unwrap_or(u32::MAX),
            answer.question_id.clone(),
        )
    });
    answers
}

/// One-line explanation naming the strongest positive drivers of a major.
fn reason_summary(contributions: &[TraitContribution]) -> String {
    let drivers: Vec<String> = contributions
        .iter()
        .filter(|contribution| contribution.impact > 0.0)
        .take(3)
        .map(describe)
        .collect();

    if !drivers.is_empty() {
        return format!("driven by {}", drivers.join(", "));
    }

    match contributions.first() {
        Some(strongest) => format!("no positive drivers; held back by {}", describe(strongest)),
        None => "no contributing answers".to_string(),
    }
}

fn describe(contribution: &TraitContribution) -> String {
    format!(
        "{} {} ({:+.2})",
        contribution.category, contribution.topic, contribution.impact
    )
}

fn snippet(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}
