use std::collections::HashMap;

use super::super::domain::{MajorQuestion, ScoringMapping};

/// Mapping rows keyed by lowercase `(category, optionValue)`, built once per scoring call.
pub(crate) struct MappingIndex<'a> {
    by_key: HashMap<(String, String), Vec<&'a ScoringMapping>>,
    by_option: HashMap<String, Vec<&'a ScoringMapping>>,
}

impl<'a> MappingIndex<'a> {
    pub(crate) fn build(mappings: &'a [ScoringMapping]) -> Self {
        let mut by_key: HashMap<(String, String), Vec<&'a ScoringMapping>> = HashMap::new();
        let mut by_option: HashMap<String, Vec<&'a ScoringMapping>> = HashMap::new();

        for mapping in mappings {
            let option = mapping.option_value.trim().to_lowercase();
            by_key
                .entry((mapping.category.trim().to_lowercase(), option.clone()))
                .or_default()
                .push(mapping);
            by_option.entry(option).or_default().push(mapping);
        }

        Self { by_key, by_option }
    }

    /// Rows matching `option_value`, filtered by `category` unless the category is blank.
    pub(crate) fn lookup(&self, category: &str, option_value: &str) -> &[&'a ScoringMapping] {
        let option = option_value.trim().to_lowercase();
        let category = category.trim();

        let rows = if category.is_empty() {
            self.by_option.get(&option)
        } else {
            self.by_key.get(&(category.to_lowercase(), option))
        };
        rows.map(Vec::as_slice).unwrap_or_default()
    }
}

/// Major questions by id, each paired with the size of its `(category, trait value)` group.
pub(crate) struct QuestionIndex<'a> {
    by_id: HashMap<u32, (&'a MajorQuestion, usize)>,
}

impl<'a> QuestionIndex<'a> {
    pub(crate) fn build(questions: &'a [MajorQuestion]) -> Self {
        let group_key = |question: &MajorQuestion| {
            (
                question.category.trim().to_lowercase(),
                question.trait_value().trim().to_lowercase(),
            )
        };

        let mut group_sizes: HashMap<(String, String), usize> = HashMap::new();
        for question in questions {
            *group_sizes.entry(group_key(question)).or_insert(0) += 1;
        }

        let mut by_id = HashMap::new();
        for question in questions {
            let size = group_sizes.get(&group_key(question)).copied().unwrap_or(1);
            by_id.entry(question.id).or_insert((question, size));
        }

        Self { by_id }
    }

    /// Resolves a submitted answer key. Keys that are not canonical ids are unknown.
    pub(crate) fn get(&self, raw_id: &str) -> Option<(&'a MajorQuestion, usize)> {
        let id = question_id(raw_id)?;
        self.by_id.get(&id).copied()
    }
}

/// Parses an answer key written exactly as the question id prints, so `"01"`, `" 1"`
/// and `"+1"` never alias question 1.
pub(crate) fn question_id(raw_id: &str) -> Option<u32> {
    let id = raw_id.parse::<u32>().ok()?;
    (id.to_string() == raw_id).then_some(id)
}
