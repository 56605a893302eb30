use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::domain::{
    Language, Major, MajorQuestion, PersonalityProfile, PersonalityQuestion, ScoringMapping,
};
use super::scoring::MBTI_CATEGORY;

/// Fully loaded, immutable view of every table the scoring core reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub major_questions: BTreeMap<Language, Vec<MajorQuestion>>,
    #[serde(default)]
    pub personality_questions: BTreeMap<Language, Vec<PersonalityQuestion>>,
    #[serde(default)]
    pub mappings: Vec<ScoringMapping>,
    #[serde(default)]
    pub majors: Vec<Major>,
    #[serde(default)]
    pub profiles: Vec<PersonalityProfile>,
}

impl CatalogSnapshot {
    pub fn major_questions(&self, language: Language) -> &[MajorQuestion] {
        self.major_questions
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn personality_questions(&self, language: Language) -> &[PersonalityQuestion] {
        self.personality_questions
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Narrative for a type's four-letter core, falling back to English.
    pub fn profile(&self, type_code: &str, language: Language) -> Option<&PersonalityProfile> {
        let lookup = |language: Language| {
            self.profiles.iter().find(|profile| {
                profile.language == language && profile.type_code.eq_ignore_ascii_case(type_code)
            })
        };
        lookup(language).or_else(|| lookup(Language::En))
    }

    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            major_questions: self.major_questions.values().map(Vec::len).sum(),
            personality_questions: self.personality_questions.values().map(Vec::len).sum(),
            mappings: self.mappings.len(),
            majors: self.majors.len(),
            profiles: self.profiles.len(),
            dead_mappings: self.dead_mappings().len(),
        }
    }

    /// Mapping rows whose `(category, optionValue)` no question or MBTI letter can produce.
    pub fn dead_mappings(&self) -> Vec<&ScoringMapping> {
        let mut live: HashSet<(String, String)> = HashSet::new();
        for question in self.major_questions.values().flatten() {
            live.insert((
                question.category.to_lowercase(),
                question.trait_value().to_lowercase(),
            ));
        }
        for letter in ["i", "e", "s", "n", "t", "f", "j", "p", "a"] {
            live.insert((MBTI_CATEGORY.to_lowercase(), letter.to_string()));
        }

        self.mappings
            .iter()
            .filter(|mapping| {
                !live.contains(&(
                    mapping.category.to_lowercase(),
                    mapping.option_value.to_lowercase(),
                ))
            })
            .collect()
    }
}

/// Administrative replacement of catalog tables. Absent sections are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBulkLoad {
    #[serde(default)]
    pub major_questions: Option<Vec<MajorQuestion>>,
    #[serde(default)]
    pub personality_questions: Option<Vec<PersonalityQuestion>>,
    #[serde(default)]
    pub mappings: Option<Vec<ScoringMapping>>,
    #[serde(default)]
    pub majors: Option<Vec<Major>>,
    #[serde(default)]
    pub profiles: Option<Vec<PersonalityProfile>>,
}

/// Row counts of the snapshot after a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCounts {
    pub major_questions: usize,
    pub personality_questions: usize,
    pub mappings: usize,
    pub majors: usize,
    pub profiles: usize,
    pub dead_mappings: usize,
}

impl CatalogBulkLoad {
    /// Applies the supplied sections to `snapshot`. Question sections replace only the
    /// languages they contain.
    pub fn apply(self, snapshot: &mut CatalogSnapshot) {
        if let Some(questions) = self.major_questions {
            for (language, questions) in group_by_language(questions, |q| q.language) {
                snapshot.major_questions.insert(language, questions);
            }
        }
        if let Some(questions) = self.personality_questions {
            for (language, questions) in group_by_language(questions, |q| q.language) {
                snapshot.personality_questions.insert(language, questions);
            }
        }
        if let Some(mappings) = self.mappings {
            snapshot.mappings = mappings;
        }
        if let Some(majors) = self.majors {
            snapshot.majors = majors;
        }
        if let Some(profiles) = self.profiles {
            snapshot.profiles = profiles;
        }
    }
}

fn group_by_language<T>(
    rows: Vec<T>,
    language: impl Fn(&T) -> Language,
) -> BTreeMap<Language, Vec<T>> {
    let mut grouped: BTreeMap<Language, Vec<T>> = BTreeMap::new();
    for row in rows {
        grouped.entry(language(&row)).or_default().push(row);
    }
    grouped
}
