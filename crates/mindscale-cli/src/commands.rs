use std::path::Path;

use eyre::{Result, WrapErr};
use mindscale_audit::events::AuditEvent;
use mindscale_core::models::answer::{AnswerRecord, AnswerSource};
use mindscale_core::models::safety::SafetyEvent;
use mindscale_core::models::trigger_log::ScaleTriggerLog;
use mindscale_instruments::daily::{DailyScore, RedFlagReport};
use mindscale_instruments::error::ResponseError;
use mindscale_instruments::escalation::{EscalationDecision, evaluate_short_form};
use mindscale_instruments::registry::Registry;
use mindscale_instruments::responses::Responses;
use mindscale_instruments::scoring::{Locale, ScaleDefinition};
use mindscale_instruments::session::{
    AdministrationMode, AnswerOutcome, AssessmentOutcome, AssessmentSession,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{self, CrisisResource, MindscaleConfig};

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    outcome: AssessmentOutcome,
    trigger_log: Option<ScaleTriggerLog>,
    safety_event: Option<SafetyEvent>,
    crisis_resources: Vec<&'a CrisisResource>,
    rejected: Vec<ResponseError>,
    records: Vec<AnswerRecord>,
}

#[derive(Debug, Serialize)]
struct DailyReport {
    score: DailyScore,
    red_flags: RedFlagReport,
    screen: Option<EscalationDecision>,
    trigger_log: Option<ScaleTriggerLog>,
    rejected: Vec<ResponseError>,
    records: Vec<AnswerRecord>,
}

pub fn list(registry: &Registry, locale: Locale) -> Result<()> {
    for scale in registry.scales() {
        let short = scale
            .short_form
            .as_ref()
            .map(|sf| format!("{} ({} items)", sf.id, sf.question_ids.len()))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<32} items={:<3} range={}-{:<4} short={}",
            scale.id,
            scale.name_for(locale),
            scale.questions.len(),
            scale.scoring.min_score(),
            scale.scoring.max_score(),
            short
        );
    }
    let daily = registry.daily();
    println!(
        "{:<8} {:<32} items={}",
        daily.id,
        daily.name_for(locale),
        daily.questions.len()
    );
    Ok(())
}

pub fn show(registry: &Registry, scale: &str, locale: Locale) -> Result<()> {
    let definition = registry.require(scale)?;
    println!("{} ({})", definition.name_for(locale), definition.id);
    if let Some(description) = &definition.description {
        println!("{description}");
    }
    println!();

    for (n, question) in definition.questions.iter().enumerate() {
        let marker = if question.is_safety_question { " [safety]" } else { "" };
        println!("{}. {}{}", n + 1, question.text_for(locale), marker);
        for option in &question.options {
            println!("     {} = {}", option.value, option.label_for(locale));
        }
    }

    println!();
    for band in definition.scoring.bands() {
        println!("  {:>3}-{:<3} {}", band.min_score, band.max_score, band.label_for(locale));
    }
    if let Some(short_form) = &definition.short_form {
        println!(
            "\nshort form {}: {} (escalate at >= {})",
            short_form.id,
            short_form.question_ids.join(", "),
            short_form.trigger_threshold
        );
    }
    Ok(())
}

/// Replay a response file through a session the way a client would: short
/// form first when asked, escalation decision, then the rest of the
/// instrument. Every safety item is fed to the session regardless of the
/// escalation outcome.
pub fn score(
    registry: &Registry,
    settings: &MindscaleConfig,
    scale: &str,
    responses_path: &Path,
    short: bool,
    user: Option<&str>,
) -> Result<()> {
    let definition = registry.require(scale)?;
    let user_id = resolve_user(user)?;
    let responses = read_responses(responses_path)?;

    // Asking for "gad2" means the short form even without --short.
    let short = short || definition.id != scale;
    let mode = if short {
        AdministrationMode::ShortForm
    } else {
        AdministrationMode::FullForm
    };
    let mut session = AssessmentSession::new(definition, mode);

    let mut rejected = Vec::new();
    let mut safety_event = None;

    if session.mode() == AdministrationMode::ShortForm
        && let Some(short_form) = &definition.short_form
    {
        for question_id in &short_form.question_ids {
            feed(
                &mut session,
                &responses,
                question_id,
                user_id,
                &mut rejected,
                &mut safety_event,
            )?;
        }
    }

    let trigger_log = match session.escalation() {
        Some(decision) => {
            let log = decision.to_trigger_log(user_id)?;
            AuditEvent::short_form(&log)?.emit();
            session.escalate();
            Some(log)
        }
        None => None,
    };

    for question_id in remaining(definition, &session) {
        feed(
            &mut session,
            &responses,
            &question_id,
            user_id,
            &mut rejected,
            &mut safety_event,
        )?;
    }
    for (question_id, value) in responses.iter() {
        if definition.question(question_id).is_none() {
            warn!(question_id, value, "answer does not belong to {}", definition.id);
        }
    }

    let outcome = session.outcome();
    info!(
        scale_id = %outcome.scale_id,
        score = outcome.score,
        answered = outcome.progress.answered,
        total = outcome.progress.total,
        "assessment scored"
    );

    let crisis_resources = if outcome.safety.is_triggered() {
        settings.crisis_resources_for_region()
    } else {
        Vec::new()
    };

    let report = ScoreReport {
        records: session.answer_records(user_id, AnswerSource::Assessment, jiff::Timestamp::now()),
        outcome,
        trigger_log,
        safety_event,
        crisis_resources,
        rejected,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Instrument items the session has not seen yet, in declared order.
fn remaining(definition: &ScaleDefinition, session: &AssessmentSession<'_>) -> Vec<String> {
    definition
        .questions
        .iter()
        .filter(|q| !session.responses().contains(&q.id))
        .map(|q| q.id.clone())
        .collect()
}

fn feed(
    session: &mut AssessmentSession<'_>,
    responses: &Responses,
    question_id: &str,
    user_id: Uuid,
    rejected: &mut Vec<ResponseError>,
    safety_event: &mut Option<SafetyEvent>,
) -> Result<()> {
    let Some(value) = responses.get(question_id) else {
        return Ok(());
    };
    let was_triggered = session.safety().is_triggered();
    match session.answer(question_id, value) {
        Ok(AnswerOutcome::SafetyTriggered(trigger)) => {
            let event = trigger.to_event(user_id);
            AuditEvent::safety(&event)?.emit();
            *safety_event = Some(event);
        }
        Ok(AnswerOutcome::Recorded { .. } | AnswerOutcome::SafetyActive) => {}
        Err(err) => {
            warn!(question_id, value, "{err}");
            rejected.push(err);
            // A rejected value can still trip the latch.
            if !was_triggered && let Some(trigger) = session.safety().trigger() {
                let event = trigger.to_event(user_id);
                AuditEvent::safety(&event)?.emit();
                *safety_event = Some(event);
            }
        }
    }
    Ok(())
}

pub fn daily(registry: &Registry, responses_path: &Path, user: Option<&str>) -> Result<()> {
    let check_in = registry.daily();
    let user_id = resolve_user(user)?;
    let responses = read_responses(responses_path)?;

    let mut rejected = Vec::new();
    let mut accepted = Responses::new();
    for item in &check_in.questions {
        let question = &item.question;
        let Some(value) = responses.get(&question.id) else {
            continue;
        };
        match question.check_value(&check_in.name, value) {
            Some(err) => rejected.push(err),
            None => {
                accepted.insert(question.id.clone(), value);
            }
        }
    }

    let score = check_in.score(&accepted);
    let red_flags = check_in.red_flags(&accepted);
    if red_flags.has_red_flag {
        warn!(reasons = ?red_flags.reasons, "daily check-in raised red flags");
    }

    let anxiety = registry.require(&check_in.anxiety_scale_id)?;
    let screen = evaluate_short_form(anxiety, &accepted);
    let trigger_log = match &screen {
        Some(decision) => {
            let log = decision.to_trigger_log(user_id)?;
            AuditEvent::short_form(&log)?.emit();
            Some(log)
        }
        None => None,
    };

    let now = jiff::Timestamp::now();
    let records = check_in
        .questions
        .iter()
        .filter_map(|item| {
            accepted.get(&item.question.id).map(|value| AnswerRecord {
                user_id,
                scale_id: check_in.id.clone(),
                question_id: item.question.id.clone(),
                answer_value: value,
                source: AnswerSource::DailyCheckIn,
                created_at: now,
            })
        })
        .collect();

    info!(index = score.index, band = %score.band.label, "daily check-in scored");

    let report = DailyReport {
        score,
        red_flags,
        screen,
        trigger_log,
        rejected,
        records,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn show_config(path: &Path, settings: &MindscaleConfig) -> Result<()> {
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        info!(path = %path.display(), "config already exists; leaving it alone");
        return Ok(());
    }
    config::save_config(path, &MindscaleConfig::default())
}

fn resolve_user(user: Option<&str>) -> Result<Uuid> {
    match user {
        Some(raw) => Ok(mindscale_core::parse_user_id(raw)?),
        None => Ok(Uuid::new_v4()),
    }
}

fn read_responses(path: &Path) -> Result<Responses> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read responses at {}", path.display()))?;
    serde_json::from_str(&contents).wrap_err_with(|| {
        format!(
            "responses at {} are not a JSON object of integers",
            path.display()
        )
    })
}
