use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{RegistryError, ResponseError};
use crate::responses::Responses;

/// Display language for labels. Every builtin string carries English plus
/// one localized rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Locale {
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

fn localized<'a>(locale: Locale, base: &'a str, localized: Option<&'a str>) -> &'a str {
    match (locale, localized) {
        (Locale::Zh, Some(text)) => text,
        _ => base,
    }
}

/// One selectable answer. `value` is what gets scored; list position carries
/// no meaning (reverse-scored items list the same labels with descending
/// values).
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ScaleOption {
    pub value: i32,
    pub label: String,
    pub label_localized: Option<String>,
}

impl ScaleOption {
    pub fn label_for(&self, locale: Locale) -> &str {
        localized(locale, &self.label, self.label_localized.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ScaleQuestion {
    pub id: String,
    pub text: String,
    pub text_localized: Option<String>,
    pub options: Vec<ScaleOption>,
    pub is_safety_question: bool,
    /// Minimum value that trips the safety branch. Defaults to 1.
    pub safety_threshold: Option<i32>,
    /// Sub-dimension this item contributes to, for instruments that declare
    /// dimensions.
    pub dimension: Option<String>,
}

impl ScaleQuestion {
    pub fn text_for(&self, locale: Locale) -> &str {
        localized(locale, &self.text, self.text_localized.as_deref())
    }

    pub fn option(&self, value: i32) -> Option<&ScaleOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// `Some` when `value` is not one of this question's options. `owner`
    /// names the instrument in the message.
    pub fn check_value(&self, owner: &str, value: i32) -> Option<ResponseError> {
        if self.option(value).is_some() {
            return None;
        }
        let allowed: Vec<i32> = self.options.iter().map(|o| o.value).collect();
        Some(ResponseError {
            question_id: self.id.clone(),
            value,
            message: format!(
                "{owner}: answer {value} to '{}' is not one of {allowed:?}",
                self.id
            ),
            allowed,
        })
    }

    pub fn min_value(&self) -> i32 {
        self.options.iter().map(|o| o.value).min().unwrap_or(0)
    }

    pub fn max_value(&self) -> i32 {
        self.options.iter().map(|o| o.value).max().unwrap_or(0)
    }

    /// The value at or above which this item trips the safety branch, or
    /// `None` for ordinary items.
    pub fn effective_safety_threshold(&self) -> Option<i32> {
        self.is_safety_question
            .then(|| self.safety_threshold.unwrap_or(1))
    }

    /// Mark this item as safety-critical.
    pub fn safety(mut self, threshold: Option<i32>) -> Self {
        self.is_safety_question = true;
        self.safety_threshold = threshold;
        self
    }

    pub fn in_dimension(mut self, dimension: &str) -> Self {
        self.dimension = Some(dimension.to_string());
        self
    }
}

/// An abbreviated screen drawn from an instrument's own questions.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ShortForm {
    /// Short-form code (e.g., "gad2").
    pub id: String,
    pub name: String,
    pub question_ids: Vec<String>,
    /// Short-form score at or above which the full form is administered.
    pub trigger_threshold: i32,
}

/// A named sub-dimension (e.g., physical vs. mental fatigue).
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct Dimension {
    pub id: String,
    pub name: String,
    pub name_localized: Option<String>,
}

/// Fixed clinical severity vocabulary shared by every band table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SeverityLevel {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ScoreBand {
    pub min_score: i32,
    pub max_score: i32,
    pub level: SeverityLevel,
    pub label: String,
    pub label_localized: Option<String>,
}

impl ScoreBand {
    pub fn contains(&self, score: i32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }

    pub fn label_for(&self, locale: Locale) -> &str {
        localized(locale, &self.label, self.label_localized.as_deref())
    }
}

/// Score range plus its band table.
///
/// Only constructible through [`ScoringRules::new`], which rejects any table
/// that does not partition `[min_score, max_score]` exactly. Holding a
/// `ScoringRules` therefore means classification cannot fall through.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ScoringRules {
    min_score: i32,
    max_score: i32,
    bands: Vec<ScoreBand>,
}

impl ScoringRules {
    pub fn new(
        scale_id: &str,
        min_score: i32,
        max_score: i32,
        bands: Vec<ScoreBand>,
    ) -> Result<Self, RegistryError> {
        let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
            return Err(RegistryError::EmptyBands {
                scale_id: scale_id.to_string(),
            });
        };

        for band in &bands {
            if band.min_score > band.max_score {
                return Err(RegistryError::InvertedBand {
                    scale_id: scale_id.to_string(),
                    min: band.min_score,
                    max: band.max_score,
                });
            }
        }

        for pair in bands.windows(2) {
            if pair[1].min_score != pair[0].max_score + 1 {
                return Err(RegistryError::BandsNotContiguous {
                    scale_id: scale_id.to_string(),
                    previous_max: pair[0].max_score,
                    next_min: pair[1].min_score,
                });
            }
        }

        if first.min_score != min_score || last.max_score != max_score {
            return Err(RegistryError::BandCoverage {
                scale_id: scale_id.to_string(),
                declared_min: min_score,
                declared_max: max_score,
                covered_min: first.min_score,
                covered_max: last.max_score,
            });
        }

        Ok(Self {
            min_score,
            max_score,
            bands,
        })
    }

    pub fn min_score(&self) -> i32 {
        self.min_score
    }

    pub fn max_score(&self) -> i32 {
        self.max_score
    }

    pub fn bands(&self) -> &[ScoreBand] {
        &self.bands
    }

    /// Exact lookup, `None` outside `[min_score, max_score]`.
    pub fn band_for(&self, score: i32) -> Option<&ScoreBand> {
        self.bands.iter().find(|b| b.contains(score))
    }

    /// Lowest and highest bands. The constructor guarantees at least one.
    pub(crate) fn end_bands(&self) -> (&ScoreBand, &ScoreBand) {
        (&self.bands[0], &self.bands[self.bands.len() - 1])
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ScaleDefinition {
    /// Globally unique instrument code. Revisions get a new id.
    pub id: String,
    pub name: String,
    pub name_localized: Option<String>,
    pub description: Option<String>,
    pub questions: Vec<ScaleQuestion>,
    pub short_form: Option<ShortForm>,
    /// Empty for single-dimension instruments.
    pub dimensions: Vec<Dimension>,
    pub scoring: ScoringRules,
}

impl ScaleDefinition {
    pub fn name_for(&self, locale: Locale) -> &str {
        localized(locale, &self.name, self.name_localized.as_deref())
    }

    pub fn question(&self, question_id: &str) -> Option<&ScaleQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn question_ids(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.id.clone()).collect()
    }

    pub fn safety_questions(&self) -> impl Iterator<Item = &ScaleQuestion> {
        self.questions.iter().filter(|q| q.is_safety_question)
    }

    /// How many of this instrument's questions have an answer.
    pub fn progress(&self, responses: &Responses) -> Progress {
        let answered = self
            .questions
            .iter()
            .filter(|q| responses.contains(&q.id))
            .count();
        Progress {
            answered,
            total: self.questions.len(),
        }
    }

    /// Report answers whose value is not one of the question's options.
    ///
    /// Informational only: scoring still sums whatever was recorded.
    pub fn validate_responses(&self, responses: &Responses) -> Vec<ResponseError> {
        responses
            .iter()
            .filter_map(|(question_id, value)| {
                self.question(question_id)?.check_value(&self.name, value)
            })
            .collect()
    }

    /// Check every structural invariant not already enforced by
    /// [`ScoringRules::new`].
    pub fn validate(&self) -> Result<(), RegistryError> {
        let scale_id = || self.id.clone();

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(RegistryError::DuplicateQuestion {
                    scale_id: scale_id(),
                    question_id: question.id.clone(),
                });
            }
            if question.options.is_empty() {
                return Err(RegistryError::NoOptions {
                    scale_id: scale_id(),
                    question_id: question.id.clone(),
                });
            }
            let mut values = HashSet::new();
            for option in &question.options {
                if !values.insert(option.value) {
                    return Err(RegistryError::DuplicateOptionValue {
                        scale_id: scale_id(),
                        question_id: question.id.clone(),
                        value: option.value,
                    });
                }
            }
            if let Some(threshold) = question.effective_safety_threshold() {
                let (min_value, max_value) = (question.min_value(), question.max_value());
                if threshold <= min_value || threshold > max_value {
                    return Err(RegistryError::SafetyThreshold {
                        scale_id: scale_id(),
                        question_id: question.id.clone(),
                        threshold,
                        min_value,
                        max_value,
                    });
                }
            }
        }

        let computed_min: i32 = self.questions.iter().map(ScaleQuestion::min_value).sum();
        let computed_max: i32 = self.questions.iter().map(ScaleQuestion::max_value).sum();
        if computed_min != self.scoring.min_score || computed_max != self.scoring.max_score {
            return Err(RegistryError::ScoreRangeMismatch {
                scale_id: scale_id(),
                declared_min: self.scoring.min_score,
                declared_max: self.scoring.max_score,
                computed_min,
                computed_max,
            });
        }

        if let Some(short_form) = &self.short_form {
            let mut last_index = None;
            let mut reachable = 0;
            for question_id in &short_form.question_ids {
                let Some(index) = self.questions.iter().position(|q| &q.id == question_id) else {
                    return Err(RegistryError::UnknownShortFormQuestion {
                        scale_id: scale_id(),
                        question_id: question_id.clone(),
                    });
                };
                if last_index.is_some_and(|last| index <= last) {
                    return Err(RegistryError::ShortFormOrder {
                        scale_id: scale_id(),
                    });
                }
                last_index = Some(index);
                reachable += self.questions[index].max_value();
            }
            if short_form.trigger_threshold > reachable {
                return Err(RegistryError::ShortFormThreshold {
                    scale_id: scale_id(),
                    threshold: short_form.trigger_threshold,
                    max: reachable,
                });
            }
        }

        for question in &self.questions {
            match (&question.dimension, self.dimensions.is_empty()) {
                (Some(dimension), _) if !self.dimensions.iter().any(|d| &d.id == dimension) => {
                    return Err(RegistryError::UnknownDimension {
                        scale_id: scale_id(),
                        question_id: question.id.clone(),
                        dimension: dimension.clone(),
                    });
                }
                (None, false) => {
                    return Err(RegistryError::MissingDimension {
                        scale_id: scale_id(),
                        question_id: question.id.clone(),
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.answered >= self.total
    }
}

/// Which questions a raw score sums over.
#[derive(Debug, Clone, Copy)]
pub enum ScoreScope<'a> {
    /// Every question of the instrument.
    Scale(&'a ScaleDefinition),
    /// Only the short-form subset.
    ShortForm(&'a ShortForm),
    /// An explicit id list.
    Questions(&'a [String]),
}

/// Raw score: the sum of recorded values for every question in scope.
/// Missing answers count as 0; answers outside the scope are ignored.
/// Sums saturate at the `i32` bounds.
pub fn score(responses: &Responses, scope: ScoreScope<'_>) -> i32 {
    match scope {
        ScoreScope::Scale(definition) => definition
            .questions
            .iter()
            .map(|q| responses.value_or_zero(&q.id))
            .fold(0, i32::saturating_add),
        ScoreScope::ShortForm(short_form) => sum_ids(responses, &short_form.question_ids),
        ScoreScope::Questions(ids) => sum_ids(responses, ids),
    }
}

fn sum_ids(responses: &Responses, ids: &[String]) -> i32 {
    ids.iter()
        .map(|id| responses.value_or_zero(id))
        .fold(0, i32::saturating_add)
}

/// Per-dimension sums plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Subscores {
    pub dimensions: BTreeMap<String, i32>,
    pub total: i32,
}

/// Split an instrument's score by dimension in a single pass. `None` for
/// instruments that declare no dimensions.
pub fn subscores(definition: &ScaleDefinition, responses: &Responses) -> Option<Subscores> {
    if definition.dimensions.is_empty() {
        return None;
    }

    let mut dimensions: BTreeMap<String, i32> = definition
        .dimensions
        .iter()
        .map(|d| (d.id.clone(), 0))
        .collect();
    let mut total: i32 = 0;

    for question in &definition.questions {
        let value = responses.value_or_zero(&question.id);
        total = total.saturating_add(value);
        if let Some(dimension) = &question.dimension
            && let Some(sum) = dimensions.get_mut(dimension)
        {
            *sum = sum.saturating_add(value);
        }
    }

    Some(Subscores { dimensions, total })
}
