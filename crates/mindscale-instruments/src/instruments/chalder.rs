use crate::Instrument;
use crate::error::RegistryError;
use crate::scoring::{Dimension, ScaleDefinition, ScoringRules, SeverityLevel};

use super::{band, options, question};

/// Chalder Fatigue Scale (CFQ-11), Likert scoring.
/// 11 items rated 0–3 against the respondent's usual state. Total 0–33,
/// split into physical (items 1–7, 0–21) and mental (items 8–11, 0–12)
/// fatigue. The instrument has no published severity cutoffs for Likert
/// scoring; the bands below place "no more than usual" on every item (11)
/// at the top of the minimal band.
pub struct ChalderFatigue;

const COMPARED_TO_USUAL: [(&str, &str); 4] = [
    ("Less than usual", "比平时少"),
    ("No more than usual", "不比平时多"),
    ("More than usual", "比平时多"),
    ("Much more than usual", "比平时多得多"),
];

const MEMORY: [(&str, &str); 4] = [
    ("Better than usual", "比平时好"),
    ("No worse than usual", "不比平时差"),
    ("Worse than usual", "比平时差"),
    ("Much worse than usual", "比平时差得多"),
];

const PHYSICAL: [(&str, &str, &str); 7] = [
    ("cfq_q1", "Do you have problems with tiredness?", "你有疲倦的问题吗？"),
    ("cfq_q2", "Do you need to rest more?", "你需要更多休息吗？"),
    ("cfq_q3", "Do you feel sleepy or drowsy?", "你感到困倦或昏昏欲睡吗？"),
    ("cfq_q4", "Do you have problems starting things?", "你开始做事情有困难吗？"),
    ("cfq_q5", "Do you lack energy?", "你缺乏精力吗？"),
    ("cfq_q6", "Do you have less strength in your muscles?", "你的肌肉力量变小了吗？"),
    ("cfq_q7", "Do you feel weak?", "你感到虚弱吗？"),
];

const MENTAL: [(&str, &str, &str); 3] = [
    ("cfq_q8", "Do you have difficulty concentrating?", "你难以集中注意力吗？"),
    ("cfq_q9", "Do you make slips of the tongue when speaking?", "你说话时会口误吗？"),
    (
        "cfq_q10",
        "Do you find it more difficult to find the right word?",
        "你觉得更难找到合适的词吗？",
    ),
];

const VALUES: [i32; 4] = [0, 1, 2, 3];

impl Instrument for ChalderFatigue {
    fn id(&self) -> &str {
        "cfq11"
    }

    fn definition(&self) -> Result<ScaleDefinition, RegistryError> {
        let mut questions: Vec<_> = PHYSICAL
            .iter()
            .map(|(id, text, zh)| {
                question(id, text, zh, options(&COMPARED_TO_USUAL, &VALUES)).in_dimension("physical")
            })
            .collect();
        questions.extend(MENTAL.iter().map(|(id, text, zh)| {
            question(id, text, zh, options(&COMPARED_TO_USUAL, &VALUES)).in_dimension("mental")
        }));
        questions.push(
            question("cfq_q11", "How is your memory?", "你的记忆力如何？", options(&MEMORY, &VALUES))
                .in_dimension("mental"),
        );

        let scoring = ScoringRules::new(
            self.id(),
            0,
            33,
            vec![
                band(0, 11, SeverityLevel::Minimal, "No more fatigue than usual", "无明显疲劳"),
                band(12, 17, SeverityLevel::Mild, "Mild fatigue", "轻度疲劳"),
                band(18, 24, SeverityLevel::Moderate, "Moderate fatigue", "中度疲劳"),
                band(25, 33, SeverityLevel::Severe, "Severe fatigue", "重度疲劳"),
            ],
        )?;

        Ok(ScaleDefinition {
            id: self.id().to_string(),
            name: "Chalder Fatigue Scale".to_string(),
            name_localized: Some("Chalder 疲劳量表".to_string()),
            description: Some(
                "Compared with when you last felt well, over the past month:".to_string(),
            ),
            questions,
            short_form: None,
            dimensions: vec![
                Dimension {
                    id: "physical".to_string(),
                    name: "Physical fatigue".to_string(),
                    name_localized: Some("躯体疲劳".to_string()),
                },
                Dimension {
                    id: "mental".to_string(),
                    name: "Mental fatigue".to_string(),
                    name_localized: Some("精神疲劳".to_string()),
                },
            ],
            scoring,
        })
    }
}
