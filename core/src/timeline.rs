//! Patient journey forensics: the fixed care timeline of one synthetic
//! patient, and the shadow-cost and latency figures derived from it.
//!
//! RULE: exactly one event (the terminal diagnosis) is non-shadow.
//! Every event before it is pre-diagnosis waste.

use crate::{
    error::{SentinelError, SentinelResult},
    types::{Days, Usd},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const CASE_STUDY_PATIENT_ID: &str = "2008116375";

/// Rendered width of a single event on a Gantt-style timeline.
pub const EVENT_BAR_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventCategory {
    #[serde(rename = "GP")]
    Gp,
    Specialist,
    #[serde(rename = "ER")]
    Er,
    Inpatient,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    pub date:        NaiveDate,
    pub description: String,
    pub cost_usd:    Usd,
    pub is_shadow:   bool,
    pub category:    EventCategory,
}

fn event(
    (y, m, d): (i32, u32, u32),
    description: &str,
    cost_usd: Usd,
    is_shadow: bool,
    category: EventCategory,
) -> TimelineEvent {
    TimelineEvent {
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        description: description.to_string(),
        cost_usd,
        is_shadow,
        category,
    }
}

/// The fixed six-event case study, sorted by date ascending.
pub fn generate_patient_timeline() -> Vec<TimelineEvent> {
    use EventCategory::*;
    let mut events = vec![
        event((2008, 1, 15), "GP Visit - General Fatigue", 150.0, true, Gp),
        event((2008, 2, 20), "GP Visit - Vision Blur", 150.0, true, Gp),
        event((2008, 3, 10), "Optometrist Referral", 300.0, true, Specialist),
        event((2008, 4, 5), "ER Visit - Fainting", 1_200.0, true, Er),
        event((2008, 5, 12), "Endocrinologist Consult", 290.0, true, Specialist),
        event((2008, 6, 30), "Inpatient Admission - Diabetes Diagnosis", 15_000.0, false, Inpatient),
    ];
    events.sort_by_key(|e| e.date);
    events
}

/// Accumulated spend before the diagnosis.
pub fn shadow_cost(events: &[TimelineEvent]) -> Usd {
    events.iter().filter(|e| e.is_shadow).map(|e| e.cost_usd).sum()
}

/// Days between the earliest and latest event. Zero for an empty timeline.
pub fn latency_days(events: &[TimelineEvent]) -> Days {
    let first = events.iter().map(|e| e.date).min();
    let last = events.iter().map(|e| e.date).max();
    match (first, last) {
        (Some(first), Some(last)) => (last - first).num_days(),
        _ => 0,
    }
}

/// The single non-shadow event.
pub fn diagnosis_event(events: &[TimelineEvent]) -> Option<&TimelineEvent> {
    events.iter().find(|e| !e.is_shadow)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BarStatus {
    Shadow,
    Diagnosis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineBar {
    pub label:    String,
    pub start:    NaiveDate,
    pub end:      NaiveDate,
    pub cost_usd: Usd,
    pub category: EventCategory,
    pub status:   BarStatus,
}

pub fn timeline_bars(events: &[TimelineEvent]) -> Vec<TimelineBar> {
    events
        .iter()
        .map(|e| TimelineBar {
            label:    e.description.clone(),
            start:    e.date,
            end:      e.date + Duration::days(EVENT_BAR_DAYS),
            cost_usd: e.cost_usd,
            category: e.category,
            status:   if e.is_shadow { BarStatus::Shadow } else { BarStatus::Diagnosis },
        })
        .collect()
}

/// Where the latency annotation sits: first event to last event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatencySpan {
    pub start:    NaiveDate,
    pub end:      NaiveDate,
    pub midpoint: NaiveDate,
    pub days:     Days,
}

pub fn latency_span(events: &[TimelineEvent]) -> SentinelResult<LatencySpan> {
    let (Some(start), Some(end)) = (
        events.iter().map(|e| e.date).min(),
        events.iter().map(|e| e.date).max(),
    ) else {
        return Err(SentinelError::DegenerateSample {
            reason: "timeline has no events".into(),
        });
    };
    let days = (end - start).num_days();
    Ok(LatencySpan {
        start,
        end,
        midpoint: start + Duration::days(days / 2),
        days,
    })
}
