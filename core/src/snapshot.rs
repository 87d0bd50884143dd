//! Snapshot serialization: everything one render needs, as plain values.
//!
//! A snapshot is recomputed from the session's input state on every
//! request. It is never stored.

use crate::{
    archetype::{DiseaseArchetype, RadarSeries},
    equity::{AnalysisSegment, EquityGap},
    savings::PolicyLever,
    scatter::{RegressionFit, ScatterSample},
    timeline::{LatencySpan, TimelineBar, TimelineEvent},
    types::{SessionId, Usd},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub session_id:                SessionId,

    // Strategic view
    pub archetype:                 DiseaseArchetype,
    pub radar:                     RadarSeries,

    // Patient journey
    pub patient_id:                String,
    pub timeline:                  Vec<TimelineEvent>,
    pub timeline_bars:             Vec<TimelineBar>,
    pub shadow_cost_usd:           Usd,
    pub latency:                   LatencySpan,

    // Equity
    pub segment:                   AnalysisSegment,
    pub equity_gaps:               Vec<EquityGap>,

    // Efficiency scatter
    pub scatter:                   Vec<ScatterSample>,
    pub scatter_count:             usize,
    pub regression:                RegressionFit,
    /// Fitted line endpoints at dei_score 0 and dei_max.
    pub trend_line:                [ScatterSample; 2],

    // ROI simulator
    pub levers:                    Vec<PolicyLever>,
    pub cohort_size_per_archetype: u64,
    pub projected_savings_usd:     Usd,
    pub addressable_waste_usd:     Usd,
}

impl DashboardSnapshot {
    pub fn to_json(&self) -> crate::error::SentinelResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
