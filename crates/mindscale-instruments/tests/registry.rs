use mindscale_instruments::all_instruments;
use mindscale_instruments::error::RegistryError;
use mindscale_instruments::instruments::daily::check_in;
use mindscale_instruments::registry::Registry;
use mindscale_instruments::scoring::{ScoreBand, ScoringRules, SeverityLevel};

fn band(min: i32, max: i32) -> ScoreBand {
    ScoreBand {
        min_score: min,
        max_score: max,
        level: SeverityLevel::Mild,
        label: format!("{min}-{max}"),
        label_localized: None,
    }
}

#[test]
fn builtin_registry_loads() {
    let registry = Registry::builtin().unwrap();
    let ids: Vec<_> = registry.scales().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["gad7", "phq9", "isi", "pss10", "cfq11"]);
    assert_eq!(registry.daily().id, "daily");
}

#[test]
fn every_score_in_range_matches_exactly_one_band() {
    let registry = Registry::builtin().unwrap();
    let tables = registry
        .scales()
        .iter()
        .map(|s| (s.id.as_str(), &s.scoring))
        .chain(std::iter::once(("daily", &registry.daily().index_scoring)));

    for (id, rules) in tables {
        for score in rules.min_score()..=rules.max_score() {
            let matching = rules.bands().iter().filter(|b| b.contains(score)).count();
            assert_eq!(matching, 1, "{id}: score {score} matched {matching} bands");
        }
    }
}

#[test]
fn short_form_questions_exist_in_order() {
    let registry = Registry::builtin().unwrap();
    for scale in registry.scales() {
        let Some(short_form) = &scale.short_form else {
            continue;
        };
        let positions: Vec<usize> = short_form
            .question_ids
            .iter()
            .map(|id| scale.questions.iter().position(|q| &q.id == id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", scale.id);
    }
}

#[test]
fn resolve_accepts_short_form_codes() {
    let registry = Registry::builtin().unwrap();
    assert_eq!(registry.resolve("gad2").unwrap().id, "gad7");
    assert_eq!(registry.resolve("pss4").unwrap().id, "pss10");
    assert!(matches!(
        registry.require("bdi2"),
        Err(RegistryError::UnknownScale(id)) if id == "bdi2"
    ));
}

#[test]
fn scoring_rules_reject_gap() {
    let result = ScoringRules::new("t", 0, 10, vec![band(0, 4), band(6, 10)]);
    assert!(matches!(
        result,
        Err(RegistryError::BandsNotContiguous { previous_max: 4, next_min: 6, .. })
    ));
}

#[test]
fn scoring_rules_reject_overlap() {
    let result = ScoringRules::new("t", 0, 10, vec![band(0, 5), band(5, 10)]);
    assert!(matches!(result, Err(RegistryError::BandsNotContiguous { .. })));
}

#[test]
fn scoring_rules_reject_partial_coverage() {
    let result = ScoringRules::new("t", 0, 10, vec![band(0, 4), band(5, 9)]);
    assert!(matches!(
        result,
        Err(RegistryError::BandCoverage { covered_max: 9, declared_max: 10, .. })
    ));
}

#[test]
fn scoring_rules_reject_empty_and_inverted() {
    assert!(matches!(
        ScoringRules::new("t", 0, 10, Vec::new()),
        Err(RegistryError::EmptyBands { .. })
    ));
    assert!(matches!(
        ScoringRules::new("t", 0, 10, vec![band(0, 4), band(5, 3)]),
        Err(RegistryError::InvertedBand { .. })
    ));
}

fn gad7() -> mindscale_instruments::scoring::ScaleDefinition {
    all_instruments()
        .into_iter()
        .find(|i| i.id() == "gad7")
        .unwrap()
        .definition()
        .unwrap()
}

#[test]
fn registry_rejects_unknown_short_form_question() {
    let mut scale = gad7();
    let daily = check_in(&scale).unwrap();
    if let Some(short_form) = scale.short_form.as_mut() {
        short_form.question_ids.push("gad7_q99".to_string());
    }
    assert!(matches!(
        Registry::new(vec![scale], daily),
        Err(RegistryError::UnknownShortFormQuestion { question_id, .. }) if question_id == "gad7_q99"
    ));
}

#[test]
fn registry_rejects_reordered_short_form() {
    let mut scale = gad7();
    let daily = check_in(&scale).unwrap();
    if let Some(short_form) = scale.short_form.as_mut() {
        short_form.question_ids.reverse();
    }
    assert!(matches!(
        Registry::new(vec![scale], daily),
        Err(RegistryError::ShortFormOrder { .. })
    ));
}

#[test]
fn registry_rejects_unreachable_threshold() {
    let mut scale = gad7();
    let daily = check_in(&scale).unwrap();
    if let Some(short_form) = scale.short_form.as_mut() {
        short_form.trigger_threshold = 7;
    }
    assert!(matches!(
        Registry::new(vec![scale], daily),
        Err(RegistryError::ShortFormThreshold { threshold: 7, max: 6, .. })
    ));
}

#[test]
fn registry_rejects_duplicate_ids() {
    let scale = gad7();
    let daily = check_in(&scale).unwrap();
    assert!(matches!(
        Registry::new(vec![scale.clone(), scale], daily),
        Err(RegistryError::DuplicateScale(id)) if id == "gad7"
    ));

    let mut scale = gad7();
    let daily = check_in(&scale).unwrap();
    scale.questions[1].id = "gad7_q1".to_string();
    assert!(matches!(
        Registry::new(vec![scale], daily),
        Err(RegistryError::DuplicateQuestion { .. })
    ));
}

#[test]
fn registry_rejects_range_not_matching_options() {
    let mut scale = gad7();
    let daily = check_in(&scale).unwrap();
    scale.questions.pop();
    assert!(matches!(
        Registry::new(vec![scale], daily),
        Err(RegistryError::ScoreRangeMismatch { computed_max: 18, declared_max: 21, .. })
    ));
}

#[test]
fn registry_rejects_unreachable_safety_threshold() {
    let mut scale = gad7();
    let daily = check_in(&scale).unwrap();
    scale.questions[6] = scale.questions[6].clone().safety(Some(4));
    assert!(matches!(
        Registry::new(vec![scale], daily),
        Err(RegistryError::SafetyThreshold { threshold: 4, max_value: 3, .. })
    ));
}

#[test]
fn registry_rejects_dimension_mismatch() {
    let mut scale = gad7();
    let daily = check_in(&scale).unwrap();
    scale.questions[0] = scale.questions[0].clone().in_dimension("somatic");
    assert!(matches!(
        Registry::new(vec![scale], daily),
        Err(RegistryError::UnknownDimension { dimension, .. }) if dimension == "somatic"
    ));
}

#[test]
fn registry_rejects_sleep_table_gap() {
    let scale = gad7();
    let mut daily = check_in(&scale).unwrap();
    for item in &mut daily.questions {
        if let mindscale_instruments::daily::DailyItemKind::SleepDuration { ranges } = &mut item.kind {
            ranges.retain(|r| r.value != 4);
        }
    }
    assert!(matches!(
        Registry::new(vec![scale], daily),
        Err(RegistryError::SleepTableMissing { value: 4 })
    ));
}
