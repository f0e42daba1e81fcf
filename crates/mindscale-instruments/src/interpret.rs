use tracing::error;

use crate::scoring::{ScaleDefinition, ScoreBand, ScoringRules};

/// Map a raw score to its severity band.
///
/// Scores produced by [`crate::scoring::score`] against the same instrument
/// always land inside the table. Anything outside `[min_score, max_score]`
/// means the caller scored against the wrong instrument or recorded invalid
/// values; it is clamped to the nearest end band and logged at error level.
pub fn classify(score: i32, definition: &ScaleDefinition) -> &ScoreBand {
    classify_with(score, &definition.scoring, &definition.id)
}

pub(crate) fn classify_with<'a>(score: i32, rules: &'a ScoringRules, scale_id: &str) -> &'a ScoreBand {
    if let Some(band) = rules.band_for(score) {
        return band;
    }

    let (lowest, highest) = rules.end_bands();
    let clamped = if score < rules.min_score() {
        lowest
    } else {
        highest
    };
    error!(
        scale_id,
        score,
        min_score = rules.min_score(),
        max_score = rules.max_score(),
        clamped_to = ?clamped.level,
        "score outside instrument range; clamped"
    );
    clamped
}
