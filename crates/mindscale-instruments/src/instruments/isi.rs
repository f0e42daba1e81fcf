use crate::Instrument;
use crate::error::RegistryError;
use crate::scoring::{ScaleDefinition, ScoringRules, SeverityLevel, ShortForm};

use super::{band, options, question};

/// ISI: Insomnia Severity Index.
/// 7 items rated 0–4 over the last two weeks. Total 0–28.
/// Short form ISI-3 (items 4, 5, 7; 0–12) escalates at 7.
pub struct Isi;

const SEVERITY: [(&str, &str); 5] = [
    ("None", "无"),
    ("Mild", "轻度"),
    ("Moderate", "中度"),
    ("Severe", "重度"),
    ("Very severe", "极重度"),
];

const SATISFACTION: [(&str, &str); 5] = [
    ("Very satisfied", "非常满意"),
    ("Satisfied", "满意"),
    ("Moderately satisfied", "一般"),
    ("Dissatisfied", "不满意"),
    ("Very dissatisfied", "非常不满意"),
];

const NOTICEABLE: [(&str, &str); 5] = [
    ("Not at all noticeable", "完全没有"),
    ("A little", "一点"),
    ("Somewhat", "有些"),
    ("Much", "较多"),
    ("Very much noticeable", "非常明显"),
];

const WORRIED: [(&str, &str); 5] = [
    ("Not at all worried", "完全没有"),
    ("A little", "一点"),
    ("Somewhat", "有些"),
    ("Much", "较多"),
    ("Very much worried", "非常苦恼"),
];

const INTERFERING: [(&str, &str); 5] = [
    ("Not at all interfering", "完全没有"),
    ("A little", "一点"),
    ("Somewhat", "有些"),
    ("Much", "较多"),
    ("Very much interfering", "非常严重"),
];

const VALUES: [i32; 5] = [0, 1, 2, 3, 4];

impl Instrument for Isi {
    fn id(&self) -> &str {
        "isi"
    }

    fn definition(&self) -> Result<ScaleDefinition, RegistryError> {
        let questions = vec![
            question(
                "isi_q1",
                "Difficulty falling asleep",
                "入睡困难",
                options(&SEVERITY, &VALUES),
            ),
            question(
                "isi_q2",
                "Difficulty staying asleep",
                "难以维持睡眠",
                options(&SEVERITY, &VALUES),
            ),
            question(
                "isi_q3",
                "Problems waking up too early",
                "早醒问题",
                options(&SEVERITY, &VALUES),
            ),
            question(
                "isi_q4",
                "How satisfied or dissatisfied are you with your current sleep pattern?",
                "你对目前的睡眠模式满意吗？",
                options(&SATISFACTION, &VALUES),
            ),
            question(
                "isi_q5",
                "How noticeable to others do you think your sleep problem is in terms of impairing the quality of your life?",
                "你认为你的睡眠问题对生活质量的影响在别人看来有多明显？",
                options(&NOTICEABLE, &VALUES),
            ),
            question(
                "isi_q6",
                "How worried or distressed are you about your current sleep problem?",
                "你对目前的睡眠问题有多担心或苦恼？",
                options(&WORRIED, &VALUES),
            ),
            question(
                "isi_q7",
                "To what extent do you consider your sleep problem to interfere with your daily functioning currently?",
                "你认为你的睡眠问题在多大程度上影响了你目前的日常功能？",
                options(&INTERFERING, &VALUES),
            ),
        ];

        let scoring = ScoringRules::new(
            self.id(),
            0,
            28,
            vec![
                band(
                    0,
                    7,
                    SeverityLevel::Minimal,
                    "No clinically significant insomnia",
                    "无临床意义的失眠",
                ),
                band(8, 14, SeverityLevel::Mild, "Subthreshold insomnia", "亚临床失眠"),
                band(
                    15,
                    21,
                    SeverityLevel::Moderate,
                    "Clinical insomnia (moderate severity)",
                    "临床失眠（中度）",
                ),
                band(22, 28, SeverityLevel::Severe, "Clinical insomnia (severe)", "临床失眠（重度）"),
            ],
        )?;

        Ok(ScaleDefinition {
            id: self.id().to_string(),
            name: "ISI".to_string(),
            name_localized: Some("失眠严重程度指数（ISI）".to_string()),
            description: Some(
                "Rate the current (i.e., last 2 weeks) severity of your insomnia problems."
                    .to_string(),
            ),
            questions,
            short_form: Some(ShortForm {
                id: "isi3".to_string(),
                name: "ISI-3".to_string(),
                question_ids: vec![
                    "isi_q4".to_string(),
                    "isi_q5".to_string(),
                    "isi_q7".to_string(),
                ],
                trigger_threshold: 7,
            }),
            dimensions: Vec::new(),
            scoring,
        })
    }
}
