use crate::daily::{DailyCheckIn, DailyItemKind, DailyQuestion, SleepConcern, SleepRange};
use crate::error::RegistryError;
use crate::scoring::{ScaleDefinition, ScoringRules, SeverityLevel};

use super::{band, options, question};

pub const SLEEP_DURATION_ID: &str = "daily_sleep_duration";
pub const SLEEP_QUALITY_ID: &str = "daily_sleep_quality";
pub const STRESS_ID: &str = "daily_stress_level";

/// Sleep-duration options in display order (most commonly picked first).
/// Stored values are ordinal concern codes, not hours.
const SLEEP_DURATION: [(&str, &str, i32); 6] = [
    ("7–8 hours", "7–8 小时", 0),
    ("6–7 hours", "6–7 小时", 1),
    ("5–6 hours", "5–6 小时", 4),
    ("More than 8 hours", "超过 8 小时", 2),
    ("4–5 hours", "4–5 小时", 3),
    ("Less than 4 hours", "少于 4 小时", 5),
];

const SLEEP_RANGES: [SleepRange; 6] = [
    SleepRange { value: 0, min_hours: 7, max_hours: 8, concern: SleepConcern::Optimal },
    SleepRange { value: 1, min_hours: 6, max_hours: 7, concern: SleepConcern::Optimal },
    SleepRange { value: 2, min_hours: 8, max_hours: 24, concern: SleepConcern::Mild },
    SleepRange { value: 3, min_hours: 4, max_hours: 5, concern: SleepConcern::Severe },
    SleepRange { value: 4, min_hours: 5, max_hours: 6, concern: SleepConcern::Mild },
    SleepRange { value: 5, min_hours: 0, max_hours: 4, concern: SleepConcern::Severe },
];

/// Build the daily check-in around an anxiety instrument's short form.
pub fn check_in(anxiety: &ScaleDefinition) -> Result<DailyCheckIn, RegistryError> {
    let short_form = anxiety
        .short_form
        .as_ref()
        .ok_or(RegistryError::MissingAnxietyItems)?;

    let mut questions = Vec::new();
    for question_id in &short_form.question_ids {
        let item = anxiety.question(question_id).ok_or_else(|| {
            RegistryError::UnknownShortFormQuestion {
                scale_id: anxiety.id.clone(),
                question_id: question_id.clone(),
            }
        })?;
        questions.push(DailyQuestion {
            question: item.clone(),
            kind: DailyItemKind::AnxietyScreen,
        });
    }

    let (labels, values): (Vec<(&str, &str)>, Vec<i32>) = SLEEP_DURATION
        .iter()
        .map(|(label, zh, value)| ((*label, *zh), *value))
        .unzip();
    questions.push(DailyQuestion {
        question: question(
            SLEEP_DURATION_ID,
            "How many hours did you sleep last night?",
            "你昨晚睡了多少小时？",
            options(&labels, &values),
        ),
        kind: DailyItemKind::SleepDuration {
            ranges: SLEEP_RANGES.to_vec(),
        },
    });

    questions.push(DailyQuestion {
        question: question(
            SLEEP_QUALITY_ID,
            "How would you rate the quality of last night's sleep?",
            "你如何评价昨晚的睡眠质量？",
            options(&[("Good", "好"), ("Fair", "一般"), ("Poor", "差")], &[0, 1, 2]),
        ),
        kind: DailyItemKind::SleepQuality,
    });

    questions.push(DailyQuestion {
        question: question(
            STRESS_ID,
            "How stressed do you feel today?",
            "你今天感觉压力有多大？",
            options(&[("Low", "低"), ("Moderate", "中等"), ("High", "高")], &[0, 1, 2]),
        ),
        kind: DailyItemKind::Stress,
    });

    let id = "daily";
    let index_scoring = ScoringRules::new(
        id,
        0,
        12,
        vec![
            band(0, 3, SeverityLevel::Minimal, "Steady day", "状态平稳"),
            band(4, 6, SeverityLevel::Mild, "Some strain", "略有压力"),
            band(7, 9, SeverityLevel::Moderate, "Strained day", "压力较大"),
            band(10, 12, SeverityLevel::Severe, "High strain", "压力很大"),
        ],
    )?;

    Ok(DailyCheckIn {
        id: id.to_string(),
        name: "Daily check-in".to_string(),
        name_localized: Some("每日签到".to_string()),
        questions,
        anxiety_scale_id: anxiety.id.clone(),
        anxiety_screen_name: short_form.name.clone(),
        anxiety_threshold: short_form.trigger_threshold,
        index_scoring,
    })
}
