use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Integrity failures in compiled-in reference data.
///
/// Raised while the registry is being built; a registry that returned one of
/// these must never be used for scoring.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown instrument: {0}")]
    UnknownScale(String),

    #[error("duplicate instrument id: {0}")]
    DuplicateScale(String),

    #[error("{scale_id}: duplicate question id '{question_id}'")]
    DuplicateQuestion {
        scale_id: String,
        question_id: String,
    },

    #[error("{scale_id}: question '{question_id}' has no options")]
    NoOptions {
        scale_id: String,
        question_id: String,
    },

    #[error("{scale_id}: question '{question_id}' repeats option value {value}")]
    DuplicateOptionValue {
        scale_id: String,
        question_id: String,
        value: i32,
    },

    #[error("{scale_id}: band table is empty")]
    EmptyBands { scale_id: String },

    #[error("{scale_id}: band [{min}, {max}] is inverted")]
    InvertedBand {
        scale_id: String,
        min: i32,
        max: i32,
    },

    #[error("{scale_id}: band starting at {next_min} does not follow band ending at {previous_max}")]
    BandsNotContiguous {
        scale_id: String,
        previous_max: i32,
        next_min: i32,
    },

    #[error(
        "{scale_id}: bands cover [{covered_min}, {covered_max}] but declared range is [{declared_min}, {declared_max}]"
    )]
    BandCoverage {
        scale_id: String,
        declared_min: i32,
        declared_max: i32,
        covered_min: i32,
        covered_max: i32,
    },

    #[error(
        "{scale_id}: declared score range [{declared_min}, {declared_max}] does not match option values [{computed_min}, {computed_max}]"
    )]
    ScoreRangeMismatch {
        scale_id: String,
        declared_min: i32,
        declared_max: i32,
        computed_min: i32,
        computed_max: i32,
    },

    #[error("{scale_id}: short form references unknown question '{question_id}'")]
    UnknownShortFormQuestion {
        scale_id: String,
        question_id: String,
    },

    #[error("{scale_id}: short form questions are not in instrument order")]
    ShortFormOrder { scale_id: String },

    #[error("{scale_id}: short form threshold {threshold} is unreachable (max {max})")]
    ShortFormThreshold {
        scale_id: String,
        threshold: i32,
        max: i32,
    },

    #[error("{scale_id}: question '{question_id}' references unknown dimension '{dimension}'")]
    UnknownDimension {
        scale_id: String,
        question_id: String,
        dimension: String,
    },

    #[error("{scale_id}: question '{question_id}' has no dimension")]
    MissingDimension {
        scale_id: String,
        question_id: String,
    },

    #[error(
        "{scale_id}: safety threshold {threshold} on '{question_id}' must lie in ({min_value}, {max_value}]"
    )]
    SafetyThreshold {
        scale_id: String,
        question_id: String,
        threshold: i32,
        min_value: i32,
        max_value: i32,
    },

    #[error("daily check-in: expected exactly one {kind} item, found {found}")]
    DailyItemCount { kind: &'static str, found: usize },

    #[error("daily check-in: no anxiety screen items")]
    MissingAnxietyItems,

    #[error("daily check-in: sleep duration value {value} has no hour range")]
    SleepTableMissing { value: i32 },

    #[error("daily check-in: sleep duration table entry {value} matches no option")]
    SleepTableExtra { value: i32 },

    #[error("daily check-in: sleep range for value {value} is inconsistent with its concern level")]
    SleepConcernInconsistent { value: i32 },
}

/// An answer whose value is not one of its question's option values.
#[derive(Debug, Clone, Serialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ResponseError {
    pub question_id: String,
    pub value: i32,
    pub allowed: Vec<i32>,
    pub message: String,
}
