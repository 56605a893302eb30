use serde::{Deserialize, Serialize};

/// Fixed constants governing how answers turn into recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Multiplier applied to personality-letter mappings relative to direct answers.
    pub personality_blend: f64,
    pub max_recommendations: usize,
    /// Contributions kept per major in the AI context breakdown.
    pub max_contributions: usize,
    pub narrative_snippet_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            personality_blend: 0.5,
            max_recommendations: 3,
            max_contributions: 8,
            narrative_snippet_chars: 700,
        }
    }
}
