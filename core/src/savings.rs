//! Financial impact simulator: projected savings from policy levers.
//!
//! savings = Σ cohort · gap_i · percent_i / 100
//!
//! Inputs outside their valid range are rejected, never clamped.

use crate::{
    archetype::{find_archetype, ArchetypeId, DiseaseArchetype},
    error::{SentinelError, SentinelResult},
    types::{LeverId, Percent, Usd},
};
use serde::{Deserialize, Serialize};

/// One term of the savings sum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LeverInput {
    pub gap_usd: Usd,
    pub percent: Percent,
}

/// A user-adjustable lever bound to one archetype's efficiency gap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyLever {
    pub lever_id:  LeverId,
    pub label:     String,
    pub archetype: ArchetypeId,
    pub percent:   Percent,
}

impl PolicyLever {
    pub fn to_input(&self, catalog: &[DiseaseArchetype]) -> SentinelResult<LeverInput> {
        let archetype = find_archetype(catalog, self.archetype)?;
        Ok(LeverInput {
            gap_usd: archetype.per_patient_efficiency_gap_usd,
            percent: self.percent,
        })
    }
}

/// Check that `percent` is finite and within [0, 100].
pub fn validate_percent(lever: &str, percent: Percent) -> SentinelResult<()> {
    if !percent.is_finite() {
        return Err(SentinelError::NonFinite { field: format!("lever '{lever}' percent") });
    }
    if !(0.0..=100.0).contains(&percent) {
        return Err(SentinelError::PercentOutOfRange {
            lever: lever.to_string(),
            percent,
        });
    }
    Ok(())
}

fn validate_gap(index: usize, gap_usd: Usd) -> SentinelResult<()> {
    if !gap_usd.is_finite() {
        return Err(SentinelError::NonFinite { field: format!("lever #{index} gap") });
    }
    if gap_usd < 0.0 {
        return Err(SentinelError::NegativeGap {
            field: format!("lever #{index}"),
            value: gap_usd,
        });
    }
    Ok(())
}

pub fn compute_projected_savings(
    levers: &[LeverInput],
    cohort_size_per_archetype: u64,
) -> SentinelResult<Usd> {
    let cohort = cohort_size_per_archetype as f64;
    let mut savings = 0.0;
    for (i, lever) in levers.iter().enumerate() {
        validate_gap(i, lever.gap_usd)?;
        validate_percent(&format!("#{i}"), lever.percent)?;
        savings += cohort * lever.gap_usd * (lever.percent / 100.0);
    }
    Ok(savings)
}

/// Savings with every lever at 100%: the whole addressable gap.
pub fn addressable_waste(levers: &[LeverInput], cohort_size_per_archetype: u64) -> SentinelResult<Usd> {
    let full: Vec<LeverInput> = levers
        .iter()
        .map(|l| LeverInput { gap_usd: l.gap_usd, percent: 100.0 })
        .collect();
    compute_projected_savings(&full, cohort_size_per_archetype)
}

/// Resolve named levers against the catalog and compute savings.
pub fn projected_savings_for(
    levers: &[PolicyLever],
    catalog: &[DiseaseArchetype],
    cohort_size_per_archetype: u64,
) -> SentinelResult<Usd> {
    for lever in levers {
        validate_percent(&lever.lever_id, lever.percent)?;
    }
    let inputs = levers
        .iter()
        .map(|l| l.to_input(catalog))
        .collect::<SentinelResult<Vec<_>>>()?;
    compute_projected_savings(&inputs, cohort_size_per_archetype)
}
