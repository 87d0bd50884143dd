//! Demographic equity: mean days-to-diagnosis by group, and the gaps
//! between a group and its comparison group.
//!
//! Race compares every group against a designated baseline.
//! Gender compares Male against Female directly.

use crate::{
    error::{SentinelError, SentinelResult},
    types::{round1, Days},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RACE_BASELINE: &str = "White";
pub const GENDER_GROUP: &str = "Male";
pub const GENDER_REFERENCE: &str = "Female";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSegment {
    #[default]
    Race,
    Gender,
}

impl AnalysisSegment {
    pub const ALL: [AnalysisSegment; 2] = [Self::Race, Self::Gender];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Race   => "race",
            Self::Gender => "gender",
        }
    }
}

impl fmt::Display for AnalysisSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Race   => f.write_str("Race"),
            Self::Gender => f.write_str("Gender"),
        }
    }
}

impl FromStr for AnalysisSegment {
    type Err = SentinelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|seg| seg.key() == key)
            .ok_or_else(|| SentinelError::UnknownSegment { name: s.to_string() })
    }
}

/// Group name → mean days to diagnosis.
pub type GroupLatency = BTreeMap<String, Days>;

/// Segment → group table.
pub type EquityData = BTreeMap<AnalysisSegment, GroupLatency>;

pub fn generate_equity_data() -> EquityData {
    let race: GroupLatency = [("White", 152), ("Black", 164), ("Hispanic", 158), ("Asian", 150)]
        .into_iter()
        .map(|(g, d)| (g.to_string(), d))
        .collect();
    let gender: GroupLatency = [("Female", 161), ("Male", 155)]
        .into_iter()
        .map(|(g, d)| (g.to_string(), d))
        .collect();
    [(AnalysisSegment::Race, race), (AnalysisSegment::Gender, gender)].into()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquityGap {
    pub segment:       AnalysisSegment,
    pub group:         String,
    pub baseline:      String,
    pub group_days:    Days,
    pub baseline_days: Days,
    pub gap_days:      Days,
    /// gap_days / baseline_days × 100, rounded to one decimal.
    pub percent_gap:   f64,
}

fn days_for(data: &EquityData, segment: AnalysisSegment, group: &str) -> SentinelResult<Days> {
    data.get(&segment)
        .and_then(|groups| groups.get(group))
        .copied()
        .ok_or_else(|| SentinelError::UnknownGroup {
            segment: segment.to_string(),
            group: group.to_string(),
        })
}

/// Gap of `group` relative to `baseline` within one segment.
pub fn equity_gap(
    data: &EquityData,
    segment: AnalysisSegment,
    group: &str,
    baseline: &str,
) -> SentinelResult<EquityGap> {
    let group_days = days_for(data, segment, group)?;
    let baseline_days = days_for(data, segment, baseline)?;
    if baseline_days == 0 {
        return Err(SentinelError::DegenerateSample {
            reason: format!("baseline '{baseline}' has zero days to diagnosis"),
        });
    }
    let gap_days = group_days - baseline_days;
    let percent_gap = round1(gap_days as f64 / baseline_days as f64 * 100.0);
    Ok(EquityGap {
        segment,
        group: group.to_string(),
        baseline: baseline.to_string(),
        group_days,
        baseline_days,
        gap_days,
        percent_gap,
    })
}

/// Male − Female.
pub fn gender_gap(data: &EquityData) -> SentinelResult<EquityGap> {
    equity_gap(data, AnalysisSegment::Gender, GENDER_GROUP, GENDER_REFERENCE)
}

/// Every comparison the dashboard shows for a segment, ordered by group name.
pub fn segment_gaps(
    data: &EquityData,
    segment: AnalysisSegment,
    race_baseline: &str,
) -> SentinelResult<Vec<EquityGap>> {
    match segment {
        AnalysisSegment::Race => {
            let groups = data.get(&segment).ok_or_else(|| SentinelError::UnknownSegment {
                name: segment.to_string(),
            })?;
            // Surface a misconfigured baseline even when it is the only group.
            days_for(data, segment, race_baseline)?;
            groups
                .keys()
                .filter(|g| g.as_str() != race_baseline)
                .map(|g| equity_gap(data, segment, g, race_baseline))
                .collect()
        }
        AnalysisSegment::Gender => Ok(vec![gender_gap(data)?]),
    }
}
