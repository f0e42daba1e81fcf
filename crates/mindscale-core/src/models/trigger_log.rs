use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// Audit record of a short-form escalation decision.
///
/// Written by the caller after every short form, whether or not the full
/// form was triggered. `triggered_full_scale` is `None` when the screen
/// stayed below its threshold.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleTriggerLog {
    pub user_id: Uuid,
    pub short_scale: String,
    pub short_score: i32,
    pub triggered_full_scale: Option<String>,
    pub trigger_reason: String,
    /// Share of short-form items actually answered, in [0, 1].
    pub confidence: f64,
    pub created_at: jiff::Timestamp,
}

impl ScaleTriggerLog {
    pub fn new(
        user_id: Uuid,
        short_scale: impl Into<String>,
        short_score: i32,
        triggered_full_scale: Option<String>,
        trigger_reason: impl Into<String>,
        confidence: f64,
    ) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(CoreError::InvalidConfidence(confidence));
        }
        let trigger_reason = trigger_reason.into();
        if trigger_reason.trim().is_empty() {
            return Err(CoreError::MissingField("trigger_reason".to_string()));
        }
        Ok(Self {
            user_id,
            short_scale: short_scale.into(),
            short_score,
            triggered_full_scale,
            trigger_reason,
            confidence,
            created_at: jiff::Timestamp::now(),
        })
    }

    pub fn escalated(&self) -> bool {
        self.triggered_full_scale.is_some()
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}
