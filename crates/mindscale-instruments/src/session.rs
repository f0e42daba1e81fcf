//! One administration of one instrument.
//!
//! The session owns its accumulator and safety latch. Every answer goes
//! through the safety check before anything else looks at it; once the
//! latch trips, the session stops offering questions and reports the
//! trigger to every later answer.

use mindscale_core::models::answer::{AnswerRecord, AnswerSource};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ResponseError;
use crate::escalation::{EscalationDecision, evaluate_short_form};
use crate::interpret::classify;
use crate::responses::Responses;
use crate::safety::{SafetyState, SafetyTrigger};
use crate::scoring::{
    Progress, ScaleDefinition, ScaleQuestion, ScoreBand, ScoreScope, Subscores, score, subscores,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AdministrationMode {
    ShortForm,
    FullForm,
}

/// What the caller must do after recording an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Continue the normal sequence.
    Recorded { running_score: i32 },
    /// This answer tripped the safety latch. Route to the safety branch
    /// before doing anything else.
    SafetyTriggered(SafetyTrigger),
    /// The latch tripped earlier; the answer was kept but the normal
    /// sequence stays suspended.
    SafetyActive,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct AssessmentOutcome {
    pub scale_id: String,
    pub mode: AdministrationMode,
    pub score: i32,
    /// Only for full-form administrations; band tables describe the full
    /// instrument range.
    pub band: Option<ScoreBand>,
    pub subscores: Option<Subscores>,
    /// Only for short-form administrations.
    pub escalation: Option<EscalationDecision>,
    pub safety: SafetyState,
    pub progress: Progress,
}

#[derive(Debug, Clone)]
pub struct AssessmentSession<'r> {
    definition: &'r ScaleDefinition,
    mode: AdministrationMode,
    responses: Responses,
    safety: SafetyState,
}

impl<'r> AssessmentSession<'r> {
    /// Start a session. Asking for the short form of an instrument that has
    /// none falls back to the full form.
    pub fn new(definition: &'r ScaleDefinition, mode: AdministrationMode) -> Self {
        let mode = match (mode, &definition.short_form) {
            (AdministrationMode::ShortForm, None) => AdministrationMode::FullForm,
            (mode, _) => mode,
        };
        Self {
            definition,
            mode,
            responses: Responses::new(),
            safety: SafetyState::Normal,
        }
    }

    pub fn definition(&self) -> &'r ScaleDefinition {
        self.definition
    }

    pub fn mode(&self) -> AdministrationMode {
        self.mode
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    pub fn safety(&self) -> &SafetyState {
        &self.safety
    }

    fn in_scope(&self) -> Vec<&'r ScaleQuestion> {
        match (self.mode, &self.definition.short_form) {
            (AdministrationMode::ShortForm, Some(short_form)) => short_form
                .question_ids
                .iter()
                .filter_map(|id| self.definition.question(id))
                .collect(),
            _ => self.definition.questions.iter().collect(),
        }
    }

    /// Next unanswered question in declared order, or `None` when the
    /// current form is complete or the safety branch is active.
    pub fn next_question(&self) -> Option<&'r ScaleQuestion> {
        if self.safety.is_triggered() {
            return None;
        }
        self.in_scope()
            .into_iter()
            .find(|q| !self.responses.contains(&q.id))
    }

    /// Record an answer. Ids outside the instrument are kept and ignored by
    /// scoring.
    ///
    /// The safety latch sees every answer first. A value that is not one of
    /// a known question's options is rejected and not recorded, but if it
    /// meets a safety threshold the latch has already tripped; check
    /// [`AssessmentSession::safety`] after an error.
    pub fn answer(
        &mut self,
        question_id: &str,
        value: i32,
    ) -> Result<AnswerOutcome, ResponseError> {
        let tripped = self
            .safety
            .observe(self.definition, question_id, value)
            .cloned();

        if let Some(err) = self
            .definition
            .question(question_id)
            .and_then(|q| q.check_value(&self.definition.name, value))
        {
            return Err(err);
        }

        self.responses.insert(question_id, value);

        if let Some(trigger) = tripped {
            return Ok(AnswerOutcome::SafetyTriggered(trigger));
        }
        if self.safety.is_triggered() {
            return Ok(AnswerOutcome::SafetyActive);
        }

        Ok(AnswerOutcome::Recorded {
            running_score: self.running_score(),
        })
    }

    /// Score over the current form, counting unanswered items as 0.
    pub fn running_score(&self) -> i32 {
        match (self.mode, &self.definition.short_form) {
            (AdministrationMode::ShortForm, Some(short_form)) => {
                score(&self.responses, ScoreScope::ShortForm(short_form))
            }
            _ => score(&self.responses, ScoreScope::Scale(self.definition)),
        }
    }

    pub fn escalation(&self) -> Option<EscalationDecision> {
        match self.mode {
            AdministrationMode::ShortForm => evaluate_short_form(self.definition, &self.responses),
            AdministrationMode::FullForm => None,
        }
    }

    /// Switch a short-form session to the full form when its screen met the
    /// threshold. Answers already given carry over. Returns whether the
    /// switch happened.
    pub fn escalate(&mut self) -> bool {
        if self.safety.is_triggered() {
            return false;
        }
        let Some(decision) = self.escalation() else {
            return false;
        };
        if decision.escalate {
            debug!(scale_id = %self.definition.id, "escalating to full form");
            self.mode = AdministrationMode::FullForm;
        }
        decision.escalate
    }

    pub fn outcome(&self) -> AssessmentOutcome {
        let full = self.mode == AdministrationMode::FullForm;
        let raw = self.running_score();
        AssessmentOutcome {
            scale_id: self.definition.id.clone(),
            mode: self.mode,
            score: raw,
            band: full.then(|| classify(raw, self.definition).clone()),
            subscores: full
                .then(|| subscores(self.definition, &self.responses))
                .flatten(),
            escalation: self.escalation(),
            safety: self.safety.clone(),
            progress: self.definition.progress(&self.responses),
        }
    }

    /// Persistence records for every answer, instrument items first in
    /// declared order, then any extra ids the caller recorded.
    pub fn answer_records(
        &self,
        user_id: Uuid,
        source: AnswerSource,
        created_at: jiff::Timestamp,
    ) -> Vec<AnswerRecord> {
        let record = |question_id: &str, answer_value: i32| AnswerRecord {
            user_id,
            scale_id: self.definition.id.clone(),
            question_id: question_id.to_string(),
            answer_value,
            source,
            created_at,
        };

        let known = self
            .definition
            .questions
            .iter()
            .filter_map(|q| self.responses.get(&q.id).map(|v| record(&q.id, v)));
        let extra = self
            .responses
            .iter()
            .filter(|(id, _)| self.definition.question(id).is_none())
            .map(|(id, v)| record(id, v));

        known.chain(extra).collect()
    }
}
