use mindscale_instruments::daily::{DailyCategory, RedFlag, SleepConcern};
use mindscale_instruments::instruments::daily::{SLEEP_DURATION_ID, SLEEP_QUALITY_ID, STRESS_ID};
use mindscale_instruments::registry::Registry;
use mindscale_instruments::responses::Responses;
use mindscale_instruments::scoring::SeverityLevel;

fn check_in(q1: i32, q2: i32, duration: i32, quality: i32, stress: i32) -> Responses {
    Responses::new()
        .with("gad7_q1", q1)
        .with("gad7_q2", q2)
        .with(SLEEP_DURATION_ID, duration)
        .with(SLEEP_QUALITY_ID, quality)
        .with(STRESS_ID, stress)
}

#[test]
fn sleep_decoder_groups_values_by_concern() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();
    let concern = |v| daily.decode_sleep_duration(v).map(|r| r.concern);

    assert_eq!(concern(0), Some(SleepConcern::Optimal));
    assert_eq!(concern(1), Some(SleepConcern::Optimal));
    assert_eq!(concern(2), Some(SleepConcern::Mild));
    assert_eq!(concern(4), Some(SleepConcern::Mild));
    assert_eq!(concern(3), Some(SleepConcern::Severe));
    assert_eq!(concern(5), Some(SleepConcern::Severe));
    assert_eq!(concern(6), None);
}

#[test]
fn sleep_decoder_is_not_monotonic_in_hours() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();
    let oversleep = daily.decode_sleep_duration(2).unwrap();
    let five_to_six = daily.decode_sleep_duration(4).unwrap();
    assert!(oversleep.min_hours > five_to_six.max_hours);
    assert_eq!(daily.decode_sleep_duration(0).unwrap().min_hours, 7);
}

#[test]
fn optimal_sleep_is_seven_to_eight_hours() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();
    let optimal = daily.decode_sleep_duration(0).unwrap();
    let oversleep = daily.decode_sleep_duration(2).unwrap();
    assert_eq!((optimal.min_hours, optimal.max_hours), (7, 8));
    assert_eq!(oversleep.min_hours, optimal.max_hours);
}

#[test]
fn short_sleep_with_high_stress_scenario() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();
    let responses = check_in(0, 0, 5, 2, 2);

    assert_eq!(daily.index(&responses), 6);
    assert_eq!(daily.raw_score(&responses), 9);

    let report = daily.red_flags(&responses);
    assert!(report.has_red_flag);
    assert_eq!(report.flags, vec![RedFlag::ShortSleep, RedFlag::MaximumStress]);
    assert_eq!(report.reasons, vec!["Sleep < 5h", "Stress at maximum level"]);
}

#[test]
fn bounds_hold_for_every_valid_combination() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();
    let options = |id: &str| -> Vec<i32> {
        daily
            .questions
            .iter()
            .find(|q| q.question.id == id)
            .unwrap()
            .question
            .options
            .iter()
            .map(|o| o.value)
            .collect()
    };

    let (mut lowest, mut highest) = (i32::MAX, i32::MIN);
    let (mut raw_lowest, mut raw_highest) = (i32::MAX, i32::MIN);
    for q1 in options("gad7_q1") {
        for q2 in options("gad7_q2") {
            for duration in options(SLEEP_DURATION_ID) {
                for quality in options(SLEEP_QUALITY_ID) {
                    for stress in options(STRESS_ID) {
                        let responses = check_in(q1, q2, duration, quality, stress);
                        let index = daily.index(&responses);
                        let raw = daily.raw_score(&responses);
                        assert!((0..=12).contains(&index));
                        assert!((0..=15).contains(&raw));
                        lowest = lowest.min(index);
                        highest = highest.max(index);
                        raw_lowest = raw_lowest.min(raw);
                        raw_highest = raw_highest.max(raw);
                    }
                }
            }
        }
    }
    assert_eq!((lowest, highest), (0, 12));
    assert_eq!((raw_lowest, raw_highest), (0, 15));
    assert_eq!(daily.index_bounds(), (0, 12));
    assert_eq!(daily.raw_bounds(), (0, 15));
}

#[test]
fn each_trip_wire_fires_alone() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();

    let stress_only = Responses::new().with(STRESS_ID, 2);
    let report = daily.red_flags(&stress_only);
    assert!(report.has_red_flag);
    assert_eq!(report.flags, vec![RedFlag::MaximumStress]);

    let sleep_only = Responses::new().with(SLEEP_DURATION_ID, 3);
    assert_eq!(daily.red_flags(&sleep_only).flags, vec![RedFlag::ShortSleep]);

    let anxiety_only = Responses::new().with("gad7_q1", 3);
    let report = daily.red_flags(&anxiety_only);
    assert_eq!(report.reasons, vec!["GAD-2 score 3 >= 3"]);
}

#[test]
fn no_trip_wire_means_no_flag() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();

    let report = daily.red_flags(&Responses::new());
    assert!(!report.has_red_flag);
    assert!(report.reasons.is_empty());

    let calm = check_in(1, 1, 4, 2, 1);
    let report = daily.red_flags(&calm);
    assert!(!report.has_red_flag);
    assert!(report.reasons.is_empty());
}

#[test]
fn all_trip_wires_together() {
    let registry = Registry::builtin().unwrap();
    let report = registry.daily().red_flags(&check_in(3, 3, 3, 0, 2));
    assert_eq!(report.reasons.len(), 3);
}

#[test]
fn score_carries_band_and_components() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();
    let result = daily.score(&check_in(2, 1, 2, 1, 1));
    assert_eq!(result.components.anxiety, 3);
    assert_eq!(result.components.sleep_concern, Some(SleepConcern::Mild));
    assert_eq!(result.index, 6);
    assert_eq!(result.raw_score, 7);
    assert_eq!(result.band.level, SeverityLevel::Mild);
}

#[test]
fn undecodable_sleep_value_adds_nothing_to_index() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();
    let responses = Responses::new().with(SLEEP_DURATION_ID, 9);
    assert_eq!(daily.index(&responses), 0);
    assert_eq!(daily.raw_score(&responses), 9);
}

#[test]
fn items_are_tagged_by_category() {
    let registry = Registry::builtin().unwrap();
    let categories: Vec<_> = registry
        .daily()
        .questions
        .iter()
        .map(|q| q.kind.category())
        .collect();
    assert_eq!(
        categories,
        vec![
            DailyCategory::Anxiety,
            DailyCategory::Anxiety,
            DailyCategory::Sleep,
            DailyCategory::Sleep,
            DailyCategory::Stress,
        ]
    );
}

#[test]
fn oversized_values_saturate_instead_of_overflowing() {
    let registry = Registry::builtin().unwrap();
    let daily = registry.daily();
    let responses = check_in(i32::MAX, i32::MAX, 0, i32::MAX, 0);
    assert_eq!(daily.index(&responses), i32::MAX);
    assert_eq!(daily.raw_score(&responses), i32::MAX);
}
