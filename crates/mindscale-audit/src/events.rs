use mindscale_core::models::safety::SafetyEvent;
use mindscale_core::models::trigger_log::ScaleTriggerLog;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AuditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditLevel {
    Routine,
    /// Needs human follow-up (safety disclosures).
    Attention,
}

/// A structured audit event for an assessment decision.
///
/// The full record rides along in `details` so a log pipeline can rebuild
/// the persisted row even if the primary write failed.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_id: Uuid,
    pub level: AuditLevel,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_id: Uuid,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_id,
            level: AuditLevel::Routine,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_level(mut self, level: AuditLevel) -> Self {
        self.level = level;
        self
    }

    /// Audit a short-form decision, escalated or not.
    pub fn short_form(log: &ScaleTriggerLog) -> Result<Self, AuditError> {
        let action = if log.escalated() {
            "short_form.escalated"
        } else {
            "short_form.cleared"
        };
        Ok(Self::new(action, "scale", log.short_scale.clone(), log.user_id)
            .with_details(serde_json::to_value(log)?))
    }

    /// Audit a safety-branch activation.
    pub fn safety(event: &SafetyEvent) -> Result<Self, AuditError> {
        Ok(Self::new(
            "safety.triggered",
            "question",
            event.question_id.clone(),
            event.user_id,
        )
        .with_level(AuditLevel::Attention)
        .with_details(serde_json::to_value(event)?))
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        match self.level {
            AuditLevel::Routine => info!(
                audit.action = %self.action,
                audit.resource_type = %self.resource_type,
                audit.resource_id = %self.resource_id,
                audit.user_id = %self.user_id,
                audit.details = ?self.details,
                "audit event"
            ),
            AuditLevel::Attention => warn!(
                audit.action = %self.action,
                audit.resource_type = %self.resource_type,
                audit.resource_id = %self.resource_id,
                audit.user_id = %self.user_id,
                audit.details = ?self.details,
                "audit event requires follow-up"
            ),
        }
    }
}
