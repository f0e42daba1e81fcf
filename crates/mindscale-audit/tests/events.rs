use std::io::Write;
use std::sync::{Arc, Mutex};

use mindscale_audit::events::{AuditEvent, AuditLevel};
use mindscale_core::models::safety::SafetyEvent;
use mindscale_core::models::trigger_log::ScaleTriggerLog;
use uuid::Uuid;

#[test]
fn escalated_short_form_event() {
    let user = Uuid::new_v4();
    let log = ScaleTriggerLog::new(
        user,
        "pss4",
        9,
        Some("pss10".to_string()),
        "PSS-4 score 9 >= 8: administer PSS-10",
        1.0,
    )
    .unwrap();

    let event = AuditEvent::short_form(&log).unwrap();
    assert_eq!(event.action, "short_form.escalated");
    assert_eq!(event.resource_id, "pss4");
    assert_eq!(event.level, AuditLevel::Routine);
    assert_eq!(event.details.unwrap()["triggered_full_scale"], "pss10");
}

#[test]
fn cleared_short_form_event() {
    let log = ScaleTriggerLog::new(Uuid::new_v4(), "gad2", 1, None, "GAD-2 score 1 < 3", 1.0).unwrap();
    assert_eq!(AuditEvent::short_form(&log).unwrap().action, "short_form.cleared");
}

#[test]
fn safety_event_needs_attention() {
    let user = Uuid::new_v4();
    let event = AuditEvent::safety(&SafetyEvent::new(user, "phq9", "phq9_q9", 1, 1)).unwrap();
    assert_eq!(event.level, AuditLevel::Attention);
    assert_eq!(event.resource_type, "question");
    assert_eq!(event.user_id, user);

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["level"], "attention");
    assert_eq!(json["details"]["answer_value"], 1);
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn emitted_event_carries_its_record() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let event = AuditEvent::safety(&SafetyEvent::new(Uuid::new_v4(), "phq9", "phq9_q9", 2, 1))
        .unwrap();
    tracing::subscriber::with_default(subscriber, || event.emit());

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("audit.details"));
    assert!(output.contains("answer_value"));
    assert!(output.contains("phq9_q9"));
}
