use mindscale_core::error::CoreError;
use mindscale_core::models::trigger_log::ScaleTriggerLog;
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::responses::Responses;
use crate::scoring::{ScaleDefinition, ScoreScope, ShortForm, score};

/// `true` when a short-form score meets or exceeds its trigger threshold.
pub fn should_escalate(short_score: i32, short_form: &ShortForm) -> bool {
    short_score >= short_form.trigger_threshold
}

/// Outcome of one short-form screen, with enough context to write a
/// [`ScaleTriggerLog`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct EscalationDecision {
    pub scale_id: String,
    pub scale_name: String,
    pub short_form_id: String,
    pub short_form_name: String,
    pub short_score: i32,
    pub trigger_threshold: i32,
    pub answered: usize,
    pub total: usize,
    pub escalate: bool,
}

impl EscalationDecision {
    /// Share of short-form items that were answered. Unanswered items score
    /// 0, so a partial screen can only under-report.
    pub fn confidence(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.answered as f64 / self.total as f64
    }

    pub fn reason(&self) -> String {
        if self.escalate {
            format!(
                "{} score {} >= {}: administer {}",
                self.short_form_name, self.short_score, self.trigger_threshold, self.scale_name
            )
        } else {
            format!(
                "{} score {} < {}",
                self.short_form_name, self.short_score, self.trigger_threshold
            )
        }
    }

    pub fn to_trigger_log(&self, user_id: Uuid) -> Result<ScaleTriggerLog, CoreError> {
        ScaleTriggerLog::new(
            user_id,
            self.short_form_id.clone(),
            self.short_score,
            self.escalate.then(|| self.scale_id.clone()),
            self.reason(),
            self.confidence(),
        )
    }
}

/// Score an instrument's short form and decide on escalation. `None` when
/// the instrument has no short form.
pub fn evaluate_short_form(
    definition: &ScaleDefinition,
    responses: &Responses,
) -> Option<EscalationDecision> {
    let short_form = definition.short_form.as_ref()?;
    let short_score = score(responses, ScoreScope::ShortForm(short_form));
    let answered = short_form
        .question_ids
        .iter()
        .filter(|id| responses.contains(id))
        .count();

    let decision = EscalationDecision {
        scale_id: definition.id.clone(),
        scale_name: definition.name.clone(),
        short_form_id: short_form.id.clone(),
        short_form_name: short_form.name.clone(),
        short_score,
        trigger_threshold: short_form.trigger_threshold,
        answered,
        total: short_form.question_ids.len(),
        escalate: should_escalate(short_score, short_form),
    };

    debug!(
        scale_id = %decision.scale_id,
        short_form = %decision.short_form_id,
        short_score,
        threshold = decision.trigger_threshold,
        escalate = decision.escalate,
        "short form evaluated"
    );

    Some(decision)
}
