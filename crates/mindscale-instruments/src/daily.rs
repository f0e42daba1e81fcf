//! Daily check-in composite.
//!
//! The check-in reuses the GAD-2 items and adds three single-item signals:
//! sleep duration, sleep quality and stress. Sleep duration is stored as an
//! ordinal option code whose order follows how often each answer is picked,
//! not how many hours were slept, so it must pass through
//! [`DailyCheckIn::decode_sleep_duration`] before it can be aggregated.

use std::fmt;

use serde::Serialize;
use tracing::warn;
use ts_rs::TS;

use crate::error::RegistryError;
use crate::interpret::classify_with;
use crate::responses::Responses;
use crate::scoring::{Locale, ScaleQuestion, ScoreBand, ScoringRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DailyCategory {
    Anxiety,
    Sleep,
    Stress,
}

/// Severity contribution of a decoded sleep-duration answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SleepConcern {
    Optimal,
    Mild,
    Severe,
}

impl SleepConcern {
    pub fn score(self) -> i32 {
        match self {
            SleepConcern::Optimal => 0,
            SleepConcern::Mild => 1,
            SleepConcern::Severe => 2,
        }
    }
}

/// Hours slept for severe-concern answers must fall below this.
pub const SHORT_SLEEP_HOURS: u8 = 5;

/// One row of the sleep-duration decoder: stored option value → hour
/// interval `[min_hours, max_hours)` and its concern level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SleepRange {
    pub value: i32,
    pub min_hours: u8,
    pub max_hours: u8,
    pub concern: SleepConcern,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum DailyItemKind {
    /// One of the anxiety short-form items.
    AnxietyScreen,
    SleepDuration { ranges: Vec<SleepRange> },
    SleepQuality,
    Stress,
}

/// Fieldless mirror of [`DailyItemKind`], used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyRole {
    AnxietyScreen,
    SleepDuration,
    SleepQuality,
    Stress,
}

impl DailyRole {
    pub fn as_str(self) -> &'static str {
        match self {
            DailyRole::AnxietyScreen => "anxiety_screen",
            DailyRole::SleepDuration => "sleep_duration",
            DailyRole::SleepQuality => "sleep_quality",
            DailyRole::Stress => "stress",
        }
    }
}

impl DailyItemKind {
    pub fn role(&self) -> DailyRole {
        match self {
            DailyItemKind::AnxietyScreen => DailyRole::AnxietyScreen,
            DailyItemKind::SleepDuration { .. } => DailyRole::SleepDuration,
            DailyItemKind::SleepQuality => DailyRole::SleepQuality,
            DailyItemKind::Stress => DailyRole::Stress,
        }
    }

    pub fn category(&self) -> DailyCategory {
        match self.role() {
            DailyRole::AnxietyScreen => DailyCategory::Anxiety,
            DailyRole::SleepDuration | DailyRole::SleepQuality => DailyCategory::Sleep,
            DailyRole::Stress => DailyCategory::Stress,
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DailyQuestion {
    pub question: ScaleQuestion,
    pub kind: DailyItemKind,
}

/// Reference definition of the daily check-in set.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DailyCheckIn {
    pub id: String,
    pub name: String,
    pub name_localized: Option<String>,
    pub questions: Vec<DailyQuestion>,
    /// Instrument the anxiety items are borrowed from.
    pub anxiety_scale_id: String,
    /// Display name of the anxiety screen (e.g., "GAD-2").
    pub anxiety_screen_name: String,
    /// Copied from the anxiety instrument's short form.
    pub anxiety_threshold: i32,
    /// Bands over the decoded index.
    pub index_scoring: ScoringRules,
}

/// Per-signal breakdown of one check-in, shared by both composite variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DailyComponents {
    pub anxiety: i32,
    pub sleep_duration_raw: i32,
    /// `None` when sleep duration is unanswered or not a known option.
    pub sleep_concern: Option<SleepConcern>,
    pub sleep_quality: i32,
    pub stress: i32,
}

impl DailyComponents {
    /// Decoded composite: sleep duration contributes its concern score.
    pub fn index(&self) -> i32 {
        [
            self.anxiety,
            self.sleep_concern.map_or(0, SleepConcern::score),
            self.sleep_quality,
            self.stress,
        ]
        .into_iter()
        .fold(0, i32::saturating_add)
    }

    /// Coarse composite: every stored value summed verbatim.
    pub fn raw_score(&self) -> i32 {
        [
            self.anxiety,
            self.sleep_duration_raw,
            self.sleep_quality,
            self.stress,
        ]
        .into_iter()
        .fold(0, i32::saturating_add)
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DailyScore {
    pub index: i32,
    pub raw_score: i32,
    pub band: ScoreBand,
    pub components: DailyComponents,
}

/// One independent daily trip-wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "flag", rename_all = "snake_case")]
#[ts(export)]
pub enum RedFlag {
    AnxietyScreen {
        screen: String,
        score: i32,
        threshold: i32,
    },
    ShortSleep,
    MaximumStress,
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedFlag::AnxietyScreen {
                screen,
                score,
                threshold,
            } => write!(f, "{screen} score {score} >= {threshold}"),
            RedFlag::ShortSleep => write!(f, "Sleep < {SHORT_SLEEP_HOURS}h"),
            RedFlag::MaximumStress => write!(f, "Stress at maximum level"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RedFlagReport {
    pub has_red_flag: bool,
    pub reasons: Vec<String>,
    pub flags: Vec<RedFlag>,
}

impl From<Vec<RedFlag>> for RedFlagReport {
    fn from(flags: Vec<RedFlag>) -> Self {
        let reasons: Vec<String> = flags.iter().map(ToString::to_string).collect();
        Self {
            has_red_flag: !reasons.is_empty(),
            reasons,
            flags,
        }
    }
}

impl DailyCheckIn {
    pub fn name_for(&self, locale: Locale) -> &str {
        match (locale, self.name_localized.as_deref()) {
            (Locale::Zh, Some(name)) => name,
            _ => &self.name,
        }
    }

    fn items(&self, role: DailyRole) -> impl Iterator<Item = &DailyQuestion> {
        self.questions.iter().filter(move |q| q.kind.role() == role)
    }

    fn single(&self, role: DailyRole) -> Option<&DailyQuestion> {
        self.items(role).next()
    }

    fn sleep_ranges(&self) -> &[SleepRange] {
        match self.single(DailyRole::SleepDuration).map(|q| &q.kind) {
            Some(DailyItemKind::SleepDuration { ranges }) => ranges,
            _ => &[],
        }
    }

    fn value_of(&self, role: DailyRole, responses: &Responses) -> i32 {
        self.single(role)
            .map_or(0, |q| responses.value_or_zero(&q.question.id))
    }

    /// Look up the hour range and concern level for a stored sleep-duration
    /// value.
    pub fn decode_sleep_duration(&self, value: i32) -> Option<&SleepRange> {
        self.sleep_ranges().iter().find(|r| r.value == value)
    }

    /// Anxiety short-form score over the check-in's anxiety items.
    pub fn anxiety_score(&self, responses: &Responses) -> i32 {
        self.items(DailyRole::AnxietyScreen)
            .map(|q| responses.value_or_zero(&q.question.id))
            .fold(0, i32::saturating_add)
    }

    /// Decode every signal once. Both composites derive from this.
    pub fn components(&self, responses: &Responses) -> DailyComponents {
        let sleep_question = self.single(DailyRole::SleepDuration);
        let sleep_recorded = sleep_question.and_then(|q| responses.get(&q.question.id));
        let sleep_concern = sleep_recorded.and_then(|value| {
            let decoded = self.decode_sleep_duration(value).map(|r| r.concern);
            if decoded.is_none() {
                warn!(value, "sleep duration value has no decoder entry; counted as no concern");
            }
            decoded
        });

        DailyComponents {
            anxiety: self.anxiety_score(responses),
            sleep_duration_raw: sleep_recorded.unwrap_or(0),
            sleep_concern,
            sleep_quality: self.value_of(DailyRole::SleepQuality, responses),
            stress: self.value_of(DailyRole::Stress, responses),
        }
    }

    /// Decoded composite index, `[0, 12]` for valid option values.
    pub fn index(&self, responses: &Responses) -> i32 {
        self.components(responses).index()
    }

    /// Verbatim sum of stored values, `[0, 15]` for valid option values.
    pub fn raw_score(&self, responses: &Responses) -> i32 {
        self.components(responses).raw_score()
    }

    pub fn score(&self, responses: &Responses) -> DailyScore {
        let components = self.components(responses);
        let index = components.index();
        DailyScore {
            index,
            raw_score: components.raw_score(),
            band: classify_with(index, &self.index_scoring, &self.id).clone(),
            components,
        }
    }

    /// Evaluate every trip-wire independently.
    pub fn red_flags(&self, responses: &Responses) -> RedFlagReport {
        let components = self.components(responses);
        let mut flags = Vec::new();

        if components.anxiety >= self.anxiety_threshold {
            flags.push(RedFlag::AnxietyScreen {
                screen: self.anxiety_screen_name.clone(),
                score: components.anxiety,
                threshold: self.anxiety_threshold,
            });
        }

        if components.sleep_concern == Some(SleepConcern::Severe) {
            flags.push(RedFlag::ShortSleep);
        }

        if let Some(stress) = self.single(DailyRole::Stress)
            && responses.get(&stress.question.id) == Some(stress.question.max_value())
        {
            flags.push(RedFlag::MaximumStress);
        }

        RedFlagReport::from(flags)
    }

    /// Structural checks run when the registry is built.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for role in [DailyRole::SleepDuration, DailyRole::SleepQuality, DailyRole::Stress] {
            let found = self.items(role).count();
            if found != 1 {
                return Err(RegistryError::DailyItemCount {
                    kind: role.as_str(),
                    found,
                });
            }
        }
        if self.items(DailyRole::AnxietyScreen).count() == 0 {
            return Err(RegistryError::MissingAnxietyItems);
        }

        let mut seen = std::collections::HashSet::new();
        for item in &self.questions {
            if !seen.insert(item.question.id.as_str()) {
                return Err(RegistryError::DuplicateQuestion {
                    scale_id: self.id.clone(),
                    question_id: item.question.id.clone(),
                });
            }
        }

        let ranges = self.sleep_ranges();
        if let Some(sleep) = self.single(DailyRole::SleepDuration) {
            for option in &sleep.question.options {
                if !ranges.iter().any(|r| r.value == option.value) {
                    return Err(RegistryError::SleepTableMissing {
                        value: option.value,
                    });
                }
            }
            for range in ranges {
                if sleep.question.option(range.value).is_none() {
                    return Err(RegistryError::SleepTableExtra { value: range.value });
                }
            }
        }
        for range in ranges {
            let below_short = range.max_hours <= SHORT_SLEEP_HOURS;
            let consistent = range.min_hours < range.max_hours
                && below_short == (range.concern == SleepConcern::Severe);
            if !consistent {
                return Err(RegistryError::SleepConcernInconsistent { value: range.value });
            }
        }

        let (min_index, max_index) = self.index_bounds();
        if min_index != self.index_scoring.min_score() || max_index != self.index_scoring.max_score()
        {
            return Err(RegistryError::ScoreRangeMismatch {
                scale_id: self.id.clone(),
                declared_min: self.index_scoring.min_score(),
                declared_max: self.index_scoring.max_score(),
                computed_min: min_index,
                computed_max: max_index,
            });
        }

        Ok(())
    }

    /// Smallest and largest decoded index reachable from valid options.
    pub fn index_bounds(&self) -> (i32, i32) {
        self.bounds(|item| match &item.kind {
            DailyItemKind::SleepDuration { ranges } => (
                ranges.iter().map(|r| r.concern.score()).min().unwrap_or(0),
                ranges.iter().map(|r| r.concern.score()).max().unwrap_or(0),
            ),
            _ => (item.question.min_value(), item.question.max_value()),
        })
    }

    /// Smallest and largest verbatim sum reachable from valid options.
    pub fn raw_bounds(&self) -> (i32, i32) {
        self.bounds(|item| (item.question.min_value(), item.question.max_value()))
    }

    fn bounds(&self, per_item: impl Fn(&DailyQuestion) -> (i32, i32)) -> (i32, i32) {
        self.questions
            .iter()
            .map(per_item)
            .fold((0, 0), |(lo, hi), (min, max)| (lo + min, hi + max))
    }
}
