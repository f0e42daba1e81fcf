use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Where an answer was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerSource {
    /// A standalone instrument administration (short or full form).
    Assessment,
    /// The mandatory daily check-in set.
    DailyCheckIn,
    /// An item asked inline by the conversational layer.
    Conversation,
}

/// One persisted answer. The engine produces these; storing them is the
/// caller's job.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerRecord {
    pub user_id: Uuid,
    pub scale_id: String,
    pub question_id: String,
    pub answer_value: i32,
    pub source: AnswerSource,
    pub created_at: jiff::Timestamp,
}
