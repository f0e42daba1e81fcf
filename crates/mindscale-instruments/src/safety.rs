use mindscale_core::models::safety::SafetyEvent;
use serde::Serialize;
use tracing::warn;
use ts_rs::TS;
use uuid::Uuid;

use crate::responses::Responses;
use crate::scoring::ScaleDefinition;

/// Result of checking a single answer against the safety rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SafetyCheck {
    pub triggered: bool,
    /// Threshold that applied, `None` when the question is not
    /// safety-critical (or not part of the instrument).
    pub threshold: Option<i32>,
}

/// Stateless check of one answer. Unknown question ids never trigger.
pub fn check_safety(question_id: &str, value: i32, definition: &ScaleDefinition) -> SafetyCheck {
    let threshold = definition
        .question(question_id)
        .and_then(|q| q.effective_safety_threshold());
    SafetyCheck {
        triggered: threshold.is_some_and(|t| value >= t),
        threshold,
    }
}

/// Payload handed to the caller when the safety branch activates. Crisis
/// resources are looked up by the caller from its own configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SafetyTrigger {
    pub scale_id: String,
    pub question_id: String,
    pub value: i32,
    pub threshold: i32,
}

impl SafetyTrigger {
    pub fn to_event(&self, user_id: Uuid) -> SafetyEvent {
        SafetyEvent::new(
            user_id,
            self.scale_id.clone(),
            self.question_id.clone(),
            self.value,
            self.threshold,
        )
    }
}

/// One-way safety latch for a session.
///
/// `Normal` moves to `Triggered` at most once and never moves back: a
/// disclosure stays handled even if the answer is later changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum SafetyState {
    #[default]
    Normal,
    Triggered(SafetyTrigger),
}

impl SafetyState {
    /// Feed one newly recorded answer through the latch. Returns the trigger
    /// payload only on the transition into `Triggered`.
    pub fn observe(
        &mut self,
        definition: &ScaleDefinition,
        question_id: &str,
        value: i32,
    ) -> Option<&SafetyTrigger> {
        if let SafetyState::Triggered(_) = self {
            return None;
        }

        let check = check_safety(question_id, value, definition);
        let threshold = check.threshold.filter(|_| check.triggered)?;

        warn!(
            scale_id = %definition.id,
            question_id,
            value,
            threshold,
            "safety question tripped"
        );
        *self = SafetyState::Triggered(SafetyTrigger {
            scale_id: definition.id.clone(),
            question_id: question_id.to_string(),
            value,
            threshold,
        });
        self.trigger()
    }

    /// Evaluate a whole accumulator snapshot, safety items in instrument
    /// order.
    pub fn scan(definition: &ScaleDefinition, responses: &Responses) -> SafetyState {
        let mut state = SafetyState::Normal;
        for question in definition.safety_questions() {
            if let Some(value) = responses.get(&question.id) {
                state.observe(definition, &question.id, value);
            }
        }
        state
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self, SafetyState::Triggered(_))
    }

    pub fn trigger(&self) -> Option<&SafetyTrigger> {
        match self {
            SafetyState::Normal => None,
            SafetyState::Triggered(trigger) => Some(trigger),
        }
    }
}
