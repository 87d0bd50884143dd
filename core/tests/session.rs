//! Session command handling and snapshot recomputation.

use sentinel_core::{
    archetype::ArchetypeId,
    command::DashboardCommand,
    config::DashboardConfig,
    equity::AnalysisSegment,
    error::SentinelError,
    session::Session,
};

fn session() -> Session {
    let _ = env_logger::builder().is_test(true).try_init();
    Session::new(DashboardConfig::default_test())
}

#[test]
fn new_session_starts_from_config_defaults() {
    let s = session();
    assert_eq!(s.archetype(), ArchetypeId::Diabetes);
    assert_eq!(s.segment(), AnalysisSegment::Race);
    assert_eq!(s.levers().len(), 3);
    assert_eq!(s.lever_percent("early_screening"), Some(20.0));
}

#[test]
fn snapshot_reflects_default_inputs() {
    let mut s = session();
    let snap = s.snapshot().unwrap();

    assert_eq!(snap.session_id, s.id);
    assert_eq!(snap.archetype.id, ArchetypeId::Diabetes);
    assert_eq!(snap.radar.values.len(), 4);
    assert_eq!(snap.patient_id, "2008116375");
    assert_eq!(snap.shadow_cost_usd, 2_090.0);
    assert_eq!(snap.latency.days, 167);
    assert_eq!(snap.scatter_count, 200);
    assert_eq!(snap.scatter.len(), 200);
    assert!(snap.regression.r_squared < 0.05);

    let [start, end] = snap.trend_line;
    assert_eq!(start.dei_score, 0.0);
    assert_eq!(end.dei_score, 3.0);
    assert!((start.total_cost_usd - snap.regression.intercept).abs() < 1e-9);
    assert!((end.total_cost_usd - snap.regression.predict(3.0)).abs() < 1e-9);

    let black = snap.equity_gaps.iter().find(|g| g.group == "Black").unwrap();
    assert_eq!(black.gap_days, 12);

    // 10000 · (3926·0.20 + 3624·0.15 + 10737·0.10)
    let expected = 10_000.0 * (3_926.0 * 0.20 + 3_624.0 * 0.15 + 10_737.0 * 0.10);
    assert!((snap.projected_savings_usd - expected).abs() < 1e-6);
    let addressable = 10_000.0 * (3_624.0 + 3_926.0 + 10_737.0);
    assert!((snap.addressable_waste_usd - addressable).abs() < 1e-6);
}

#[test]
fn selecting_archetype_and_segment_changes_snapshot() {
    let mut s = session();
    s.apply(&DashboardCommand::SelectArchetype { archetype: ArchetypeId::LungCancer }).unwrap();
    s.apply(&DashboardCommand::SelectSegment { segment: AnalysisSegment::Gender }).unwrap();

    let snap = s.snapshot().unwrap();
    assert_eq!(snap.archetype.name, "Lung Cancer");
    assert_eq!(snap.segment, AnalysisSegment::Gender);
    assert_eq!(snap.equity_gaps.len(), 1);
    assert_eq!(snap.equity_gaps[0].group, "Male");
}

#[test]
fn setting_a_lever_updates_savings_linearly() {
    let mut s = session();
    let before = s.snapshot().unwrap().projected_savings_usd;

    s.apply(&DashboardCommand::SetLever { lever_id: "rapid_diagnostics".into(), percent: 20.0 })
        .unwrap();
    let after = s.snapshot().unwrap().projected_savings_usd;

    // Lever moved 10% → 20% on the Lung Cancer gap.
    let delta = 10_000.0 * 10_737.0 * 0.10;
    assert!((after - before - delta).abs() < 1e-6);
}

#[test]
fn rejected_commands_leave_session_unchanged() {
    let mut s = session();
    let before = s.snapshot().unwrap();

    let err = s
        .apply(&DashboardCommand::SetLever { lever_id: "early_screening".into(), percent: 120.0 })
        .unwrap_err();
    assert!(matches!(err, SentinelError::PercentOutOfRange { .. }));

    let err = s
        .apply(&DashboardCommand::SetLever { lever_id: "teleportation".into(), percent: 50.0 })
        .unwrap_err();
    assert!(matches!(err, SentinelError::UnknownLever { .. }));

    let err = s
        .apply(&DashboardCommand::SetLever { lever_id: "early_screening".into(), percent: f64::NAN })
        .unwrap_err();
    assert!(matches!(err, SentinelError::NonFinite { .. }));

    assert_eq!(s.snapshot().unwrap(), before);
}

#[test]
fn reset_restores_default_levers() {
    let mut s = session();
    s.apply(&DashboardCommand::SetLever { lever_id: "early_screening".into(), percent: 0.0 }).unwrap();
    assert_eq!(s.lever_percent("early_screening"), Some(0.0));

    s.apply(&DashboardCommand::ResetLevers).unwrap();
    assert_eq!(s.lever_percent("early_screening"), Some(20.0));
}

#[test]
fn commands_round_trip_through_json_tags() {
    let json = r#"{"cmd":"set_lever","lever_id":"care_coordination","percent":35}"#;
    let cmd: DashboardCommand = serde_json::from_str(json).unwrap();
    assert_eq!(
        cmd,
        DashboardCommand::SetLever { lever_id: "care_coordination".into(), percent: 35.0 }
    );

    let json = r#"{"cmd":"select_archetype","archetype":"heart_failure"}"#;
    let cmd: DashboardCommand = serde_json::from_str(json).unwrap();
    assert_eq!(cmd.name(), "select_archetype");
}

#[test]
fn snapshot_serializes_to_json() {
    let mut s = session();
    let json = s.snapshot().unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["timeline"][0]["date"], "2008-01-15");
    assert_eq!(value["timeline"][0]["category"], "GP");
    assert_eq!(value["equity_gaps"][0]["segment"], "race");
}
