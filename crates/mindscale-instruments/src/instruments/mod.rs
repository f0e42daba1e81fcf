//! Builtin reference data. Wording and cutoffs follow the published
//! instruments; Chinese renderings follow the commonly used Simplified
//! Chinese versions.

pub mod chalder;
pub mod daily;
pub mod gad7;
pub mod isi;
pub mod phq9;
pub mod pss10;

use crate::scoring::{ScaleOption, ScaleQuestion, ScoreBand, SeverityLevel};

/// Zip `(english, chinese)` labels with their scored values, keeping the
/// listed order.
pub(crate) fn options(labels: &[(&str, &str)], values: &[i32]) -> Vec<ScaleOption> {
    labels
        .iter()
        .zip(values)
        .map(|((label, zh), value)| ScaleOption {
            value: *value,
            label: label.to_string(),
            label_localized: Some(zh.to_string()),
        })
        .collect()
}

pub(crate) fn question(id: &str, text: &str, zh: &str, options: Vec<ScaleOption>) -> ScaleQuestion {
    ScaleQuestion {
        id: id.to_string(),
        text: text.to_string(),
        text_localized: Some(zh.to_string()),
        options,
        is_safety_question: false,
        safety_threshold: None,
        dimension: None,
    }
}

pub(crate) fn band(min: i32, max: i32, level: SeverityLevel, label: &str, zh: &str) -> ScoreBand {
    ScoreBand {
        min_score: min,
        max_score: max,
        level,
        label: label.to_string(),
        label_localized: Some(zh.to_string()),
    }
}

/// Two-week frequency anchors shared by GAD-7 and PHQ-9.
pub(crate) const FREQUENCY: [(&str, &str); 4] = [
    ("Not at all", "完全不会"),
    ("Several days", "好几天"),
    ("More than half the days", "一半以上的天数"),
    ("Nearly every day", "几乎每天"),
];
