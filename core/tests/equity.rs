//! Equity gap tests.

use sentinel_core::{
    equity::{equity_gap, gender_gap, generate_equity_data, segment_gaps, AnalysisSegment},
    error::SentinelError,
};

#[test]
fn black_patients_wait_twelve_days_longer() {
    let data = generate_equity_data();
    let gap = equity_gap(&data, AnalysisSegment::Race, "Black", "White").unwrap();
    assert_eq!(gap.baseline_days, 152);
    assert_eq!(gap.group_days, 164);
    assert_eq!(gap.gap_days, 12);
    assert_eq!(gap.percent_gap, 7.9);
}

#[test]
fn hispanic_patients_wait_six_days_longer() {
    let data = generate_equity_data();
    let gap = equity_gap(&data, AnalysisSegment::Race, "Hispanic", "White").unwrap();
    assert_eq!(gap.gap_days, 6);
    assert_eq!(gap.percent_gap, 3.9);
}

#[test]
fn gender_compares_male_against_female() {
    let data = generate_equity_data();
    let gap = gender_gap(&data).unwrap();
    assert_eq!(gap.group, "Male");
    assert_eq!(gap.baseline, "Female");
    assert_eq!(gap.gap_days, gap.group_days - gap.baseline_days);
}

#[test]
fn race_gaps_exclude_the_baseline() {
    let data = generate_equity_data();
    let gaps = segment_gaps(&data, AnalysisSegment::Race, "White").unwrap();
    assert!(!gaps.is_empty());
    assert!(gaps.iter().all(|g| g.group != "White" && g.baseline == "White"));
    assert_eq!(gaps.len(), data[&AnalysisSegment::Race].len() - 1);

    let gender = segment_gaps(&data, AnalysisSegment::Gender, "White").unwrap();
    assert_eq!(gender.len(), 1);
}

#[test]
fn unknown_group_is_rejected() {
    let data = generate_equity_data();
    let err = equity_gap(&data, AnalysisSegment::Race, "Martian", "White").unwrap_err();
    assert!(matches!(err, SentinelError::UnknownGroup { .. }));

    let err = segment_gaps(&data, AnalysisSegment::Race, "Nobody").unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn segment_keys_parse() {
    assert_eq!("Race".parse::<AnalysisSegment>().unwrap(), AnalysisSegment::Race);
    assert_eq!("gender".parse::<AnalysisSegment>().unwrap(), AnalysisSegment::Gender);
    assert!(matches!(
        "Income".parse::<AnalysisSegment>(),
        Err(SentinelError::UnknownSegment { .. })
    ));
}

#[test]
fn generation_is_idempotent() {
    assert_eq!(generate_equity_data(), generate_equity_data());
}

#[test]
fn zero_day_baseline_is_degenerate() {
    let mut data = generate_equity_data();
    data.get_mut(&AnalysisSegment::Race)
        .unwrap()
        .insert("Unrecorded".to_string(), 0);

    let err = equity_gap(&data, AnalysisSegment::Race, "Black", "Unrecorded").unwrap_err();
    assert!(matches!(err, SentinelError::DegenerateSample { .. }), "got {err:?}");
    assert!(err.is_invalid_input());

    // A zero-day comparison group is still a valid gap.
    let gap = equity_gap(&data, AnalysisSegment::Race, "Unrecorded", "White").unwrap();
    assert_eq!(gap.gap_days, -152);
    assert_eq!(gap.percent_gap, -100.0);
}
