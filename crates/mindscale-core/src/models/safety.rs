use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Record of a safety-branch activation, written once per session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SafetyEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub scale_id: String,
    pub question_id: String,
    pub answer_value: i32,
    pub threshold: i32,
    pub created_at: jiff::Timestamp,
}

impl SafetyEvent {
    pub fn new(
        user_id: Uuid,
        scale_id: impl Into<String>,
        question_id: impl Into<String>,
        answer_value: i32,
        threshold: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            scale_id: scale_id.into(),
            question_id: question_id.into(),
            answer_value,
            threshold,
            created_at: jiff::Timestamp::now(),
        }
    }
}
