use crate::Instrument;
use crate::error::RegistryError;
use crate::scoring::{ScaleDefinition, ScoringRules, SeverityLevel, ShortForm};

use super::{band, options, question};

/// PSS-10: Perceived Stress Scale, 10-item version.
/// Items rated 0–4 over the last month; items 4, 5, 7 and 8 are positively
/// worded and reverse-scored. Total 0–40.
/// Short form PSS-4 (items 2, 4, 5, 10; 0–16) escalates at 8.
pub struct Pss10;

const FREQUENCY: [(&str, &str); 5] = [
    ("Never", "从不"),
    ("Almost never", "几乎从不"),
    ("Sometimes", "有时"),
    ("Fairly often", "相当频繁"),
    ("Very often", "非常频繁"),
];

const FORWARD: [i32; 5] = [0, 1, 2, 3, 4];
const REVERSED: [i32; 5] = [4, 3, 2, 1, 0];

/// `(id, english, chinese, reverse_scored)`
const ITEMS: [(&str, &str, &str, bool); 10] = [
    (
        "pss_q1",
        "In the last month, how often have you been upset because of something that happened unexpectedly?",
        "在过去一个月里，你有多常因为意外发生的事情而感到心烦意乱？",
        false,
    ),
    (
        "pss_q2",
        "In the last month, how often have you felt that you were unable to control the important things in your life?",
        "在过去一个月里，你有多常感到无法控制生活中重要的事情？",
        false,
    ),
    (
        "pss_q3",
        "In the last month, how often have you felt nervous and stressed?",
        "在过去一个月里，你有多常感到紧张和有压力？",
        false,
    ),
    (
        "pss_q4",
        "In the last month, how often have you felt confident about your ability to handle your personal problems?",
        "在过去一个月里，你有多常对自己处理个人问题的能力感到有信心？",
        true,
    ),
    (
        "pss_q5",
        "In the last month, how often have you felt that things were going your way?",
        "在过去一个月里，你有多常感到事情按照你的意愿发展？",
        true,
    ),
    (
        "pss_q6",
        "In the last month, how often have you found that you could not cope with all the things that you had to do?",
        "在过去一个月里，你有多常发现自己无法应付所有必须做的事情？",
        false,
    ),
    (
        "pss_q7",
        "In the last month, how often have you been able to control irritations in your life?",
        "在过去一个月里，你有多常能够控制生活中令人烦躁的事情？",
        true,
    ),
    (
        "pss_q8",
        "In the last month, how often have you felt that you were on top of things?",
        "在过去一个月里，你有多常觉得一切尽在掌握？",
        true,
    ),
    (
        "pss_q9",
        "In the last month, how often have you been angered because of things that happened that were outside of your control?",
        "在过去一个月里，你有多常因为无法控制的事情而生气？",
        false,
    ),
    (
        "pss_q10",
        "In the last month, how often have you felt difficulties were piling up so high that you could not overcome them?",
        "在过去一个月里，你有多常感到困难堆积如山，无法克服？",
        false,
    ),
];

impl Instrument for Pss10 {
    fn id(&self) -> &str {
        "pss10"
    }

    fn definition(&self) -> Result<ScaleDefinition, RegistryError> {
        let questions = ITEMS
            .iter()
            .map(|(id, text, zh, reversed)| {
                let values = if *reversed { &REVERSED } else { &FORWARD };
                question(id, text, zh, options(&FREQUENCY, values))
            })
            .collect();

        let scoring = ScoringRules::new(
            self.id(),
            0,
            40,
            vec![
                band(0, 13, SeverityLevel::Minimal, "Low perceived stress", "低压力"),
                band(14, 26, SeverityLevel::Moderate, "Moderate perceived stress", "中等压力"),
                band(27, 40, SeverityLevel::Severe, "High perceived stress", "高压力"),
            ],
        )?;

        Ok(ScaleDefinition {
            id: self.id().to_string(),
            name: "PSS-10".to_string(),
            name_localized: Some("知觉压力量表（PSS-10）".to_string()),
            description: Some(
                "The questions ask about your feelings and thoughts during the last month."
                    .to_string(),
            ),
            questions,
            short_form: Some(ShortForm {
                id: "pss4".to_string(),
                name: "PSS-4".to_string(),
                question_ids: ["pss_q2", "pss_q4", "pss_q5", "pss_q10"]
                    .iter()
                    .map(|id| id.to_string())
                    .collect(),
                trigger_threshold: 8,
            }),
            dimensions: Vec::new(),
            scoring,
        })
    }
}
