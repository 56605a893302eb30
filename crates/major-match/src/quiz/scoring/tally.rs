use std::collections::HashMap;

use super::super::domain::choice_weight;
use super::config::ScoringConfig;
use super::index::{MappingIndex, QuestionIndex};
use super::{ScoringInput, MBTI_CATEGORY};

/// Running score per major, keyed by lowercase major name.
pub(crate) type Tally = HashMap<String, f64>;

/// Single signed contribution from one trait value to one major.
pub(crate) struct Impact<'a> {
    pub major_name: &'a str,
    pub category: &'a str,
    pub topic: &'a str,
    pub value: f64,
}

/// Accumulates answer and personality signal into per-major scores, reporting each
/// contribution to `record` as it is applied.
pub(crate) fn tally_scores<F>(
    input: &ScoringInput<'_>,
    config: &ScoringConfig,
    mut record: F,
) -> Tally
where
    F: FnMut(&Impact<'_>),
{
    let questions = QuestionIndex::build(input.catalog.questions);
    let mappings = MappingIndex::build(input.catalog.mappings);
    let mut tally = Tally::new();

    for (question_id, label) in input.answers {
        let weight = choice_weight(label);
        if weight == 0 {
            continue;
        }
        let Some((question, group_size)) = questions.get(question_id) else {
            continue;
        };

        let normalized_weight = f64::from(weight) / group_size as f64;
        let topic = question.trait_value();
        for row in mappings.lookup(&question.category, topic) {
            let value = row.weight * normalized_weight;
            *tally.entry(row.major_name.to_lowercase()).or_insert(0.0) += value;
            record(&Impact {
                major_name: &row.major_name,
                category: &question.category,
                topic,
                value,
            });
        }
    }

    if let Some(personality) = input.personality {
        let mut buffer = [0u8; 4];
        for letter in personality.core().chars().take(4) {
            let letter: &str = letter.encode_utf8(&mut buffer);
            for row in mappings.lookup(MBTI_CATEGORY, letter) {
                let value = row.weight * config.personality_blend;
                *tally.entry(row.major_name.to_lowercase()).or_insert(0.0) += value;
                record(&Impact {
                    major_name: &row.major_name,
                    category: MBTI_CATEGORY,
                    topic: letter,
                    value,
                });
            }
        }
    }

    tally
}
