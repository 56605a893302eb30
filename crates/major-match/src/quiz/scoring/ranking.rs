use super::super::domain::Major;
use super::tally::Tally;
use super::MajorRecommendation;

/// Every roster major with its tally, highest first. Equal tallies keep roster order.
pub(crate) fn ranked<'a>(majors: &'a [Major], tally: &Tally) -> Vec<(&'a Major, f64)> {
    let mut ranked: Vec<(&Major, f64)> = majors
        .iter()
        .map(|major| {
            let score = tally
                .get(&major.name.to_lowercase())
                .copied()
                .unwrap_or(0.0);
            (major, score)
        })
        .collect();
    ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
    ranked
}

/// Picks the top `limit` majors and rescales them against the leader.
///
/// Positive scores are preferred; when nothing scored above zero the full ranking is used
/// so the caller still gets an answer. The leader's score is clamped to at least 1 before
/// dividing.
pub(crate) fn recommend(
    majors: &[Major],
    tally: &Tally,
    limit: usize,
) -> Vec<MajorRecommendation> {
    let ranked = ranked(majors, tally);
    let positive: Vec<(&Major, f64)> = ranked
        .iter()
        .copied()
        .filter(|(_, score)| *score > 0.0)
        .collect();
    let pool = if positive.is_empty() { ranked } else { positive };

    let top: Vec<(&Major, f64)> = pool.into_iter().take(limit).collect();
    let max_score = top.first().map(|(_, score)| *score).unwrap_or(0.0).max(1.0);

    top.into_iter()
        .map(|(major, score)| {
            MajorRecommendation::new(major, score, match_percent(score, max_score))
        })
        .collect()
}

fn match_percent(score: f64, max_score: f64) -> u8 {
    ((score / max_score).max(0.0) * 100.0).round().clamp(0.0, 100.0) as u8
}
