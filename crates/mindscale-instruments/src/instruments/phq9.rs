use crate::Instrument;
use crate::error::RegistryError;
use crate::scoring::{ScaleDefinition, ScoringRules, SeverityLevel, ShortForm};

use super::{FREQUENCY, band, options, question};

/// PHQ-9: Patient Health Questionnaire, depression module.
/// Items rated 0–3 over the last two weeks. Total 0–27.
/// Item 9 (self-harm ideation) is safety-critical: any non-zero answer
/// activates the safety branch. Short form PHQ-2 escalates at 3.
pub struct Phq9;

pub const SAFETY_QUESTION_ID: &str = "phq9_q9";

const ITEMS: [(&str, &str, &str); 9] = [
    ("phq9_q1", "Little interest or pleasure in doing things", "做事时提不起劲或没有兴趣"),
    ("phq9_q2", "Feeling down, depressed, or hopeless", "感到心情低落、沮丧或绝望"),
    (
        "phq9_q3",
        "Trouble falling or staying asleep, or sleeping too much",
        "入睡困难、睡不安稳或睡眠过多",
    ),
    ("phq9_q4", "Feeling tired or having little energy", "感觉疲倦或没有活力"),
    ("phq9_q5", "Poor appetite or overeating", "食欲不振或吃太多"),
    (
        "phq9_q6",
        "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
        "觉得自己很糟，或觉得自己很失败，或让自己或家人失望",
    ),
    (
        "phq9_q7",
        "Trouble concentrating on things, such as reading the newspaper or watching television",
        "对事物专注有困难，例如阅读报纸或看电视时",
    ),
    (
        "phq9_q8",
        "Moving or speaking so slowly that other people could have noticed, or the opposite: being so fidgety or restless that you have been moving around a lot more than usual",
        "动作或说话速度缓慢到别人已经察觉，或正好相反，烦躁或坐立不安、动来动去的情况更胜于平常",
    ),
    (
        SAFETY_QUESTION_ID,
        "Thoughts that you would be better off dead, or of hurting yourself in some way",
        "有不如死掉或用某种方式伤害自己的念头",
    ),
];

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn definition(&self) -> Result<ScaleDefinition, RegistryError> {
        let questions = ITEMS
            .iter()
            .map(|(id, text, zh)| {
                let item = question(id, text, zh, options(&FREQUENCY, &[0, 1, 2, 3]));
                if *id == SAFETY_QUESTION_ID {
                    item.safety(None)
                } else {
                    item
                }
            })
            .collect();

        let scoring = ScoringRules::new(
            self.id(),
            0,
            27,
            vec![
                band(0, 4, SeverityLevel::Minimal, "Minimal depression", "极轻微抑郁"),
                band(5, 9, SeverityLevel::Mild, "Mild depression", "轻度抑郁"),
                band(10, 14, SeverityLevel::Moderate, "Moderate depression", "中度抑郁"),
                band(
                    15,
                    19,
                    SeverityLevel::ModeratelySevere,
                    "Moderately severe depression",
                    "中重度抑郁",
                ),
                band(20, 27, SeverityLevel::Severe, "Severe depression", "重度抑郁"),
            ],
        )?;

        Ok(ScaleDefinition {
            id: self.id().to_string(),
            name: "PHQ-9".to_string(),
            name_localized: Some("患者健康问卷（PHQ-9）".to_string()),
            description: Some(
                "Over the last 2 weeks, how often have you been bothered by any of the following problems?"
                    .to_string(),
            ),
            questions,
            short_form: Some(ShortForm {
                id: "phq2".to_string(),
                name: "PHQ-2".to_string(),
                question_ids: vec!["phq9_q1".to_string(), "phq9_q2".to_string()],
                trigger_threshold: 3,
            }),
            dimensions: Vec::new(),
            scoring,
        })
    }
}
