use crate::Instrument;
use crate::error::RegistryError;
use crate::scoring::{ScaleDefinition, ScoringRules, SeverityLevel, ShortForm};

use super::{FREQUENCY, band, options, question};

/// GAD-7: Generalized Anxiety Disorder 7-item scale.
/// Items rated 0–3 over the last two weeks. Total 0–21.
/// Short form GAD-2 (items 1–2, 0–6) escalates at 3.
pub struct Gad7;

const ITEMS: [(&str, &str, &str); 7] = [
    ("gad7_q1", "Feeling nervous, anxious, or on edge", "感觉紧张、焦虑或急切"),
    ("gad7_q2", "Not being able to stop or control worrying", "不能够停止或控制担忧"),
    ("gad7_q3", "Worrying too much about different things", "对各种各样的事情担忧过多"),
    ("gad7_q4", "Trouble relaxing", "很难放松下来"),
    ("gad7_q5", "Being so restless that it is hard to sit still", "由于不安而无法静坐"),
    ("gad7_q6", "Becoming easily annoyed or irritable", "变得容易烦恼或急躁"),
    (
        "gad7_q7",
        "Feeling afraid, as if something awful might happen",
        "感到似乎将有可怕的事情发生而害怕",
    ),
];

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "gad7"
    }

    fn definition(&self) -> Result<ScaleDefinition, RegistryError> {
        let questions = ITEMS
            .iter()
            .map(|(id, text, zh)| question(id, text, zh, options(&FREQUENCY, &[0, 1, 2, 3])))
            .collect();

        let scoring = ScoringRules::new(
            self.id(),
            0,
            21,
            vec![
                band(0, 4, SeverityLevel::Minimal, "Minimal anxiety", "极轻微焦虑"),
                band(5, 9, SeverityLevel::Mild, "Mild anxiety", "轻度焦虑"),
                band(10, 14, SeverityLevel::Moderate, "Moderate anxiety", "中度焦虑"),
                band(15, 21, SeverityLevel::Severe, "Severe anxiety", "重度焦虑"),
            ],
        )?;

        Ok(ScaleDefinition {
            id: self.id().to_string(),
            name: "GAD-7".to_string(),
            name_localized: Some("广泛性焦虑量表（GAD-7）".to_string()),
            description: Some(
                "Over the last 2 weeks, how often have you been bothered by the following problems?"
                    .to_string(),
            ),
            questions,
            short_form: Some(ShortForm {
                id: "gad2".to_string(),
                name: "GAD-2".to_string(),
                question_ids: vec!["gad7_q1".to_string(), "gad7_q2".to_string()],
                trigger_threshold: 3,
            }),
            dimensions: Vec::new(),
            scoring,
        })
    }
}
