//! Disease archetypes: the fixed catalog of inefficiency profiles.
//!
//! Scores are normalized to [0, 1]. Dollar figures are fixture
//! literals carried over from the published analysis; they are not
//! recomputed from any model.

use crate::{
    error::{SentinelError, SentinelResult},
    types::Usd,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeId {
    HeartFailure,
    #[default]
    Diabetes,
    LungCancer,
}

impl ArchetypeId {
    pub const ALL: [ArchetypeId; 3] = [Self::HeartFailure, Self::Diabetes, Self::LungCancer];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HeartFailure => "Heart Failure",
            Self::Diabetes     => "Diabetes",
            Self::LungCancer   => "Lung Cancer",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::HeartFailure => "heart_failure",
            Self::Diabetes     => "diabetes",
            Self::LungCancer   => "lung_cancer",
        }
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts "Heart Failure", "heart_failure", "HEART-FAILURE" and so on.
impl FromStr for ArchetypeId {
    type Err = SentinelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|id| id.key() == key)
            .ok_or_else(|| SentinelError::UnknownArchetype { name: s.to_string() })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseArchetype {
    pub id:                             ArchetypeId,
    pub name:                           String,
    pub waste_score:                    f64,
    pub latency_score:                  f64,
    pub fragmentation_score:            f64,
    pub per_patient_efficiency_gap_usd: Usd,
    /// Headline waste figure shown next to the archetype selector.
    pub projected_waste_per_patient_usd: Usd,
}

impl DiseaseArchetype {
    fn fixture(
        id: ArchetypeId,
        scores: (f64, f64, f64),
        gap: Usd,
        projected_waste: Usd,
    ) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            waste_score: scores.0,
            latency_score: scores.1,
            fragmentation_score: scores.2,
            per_patient_efficiency_gap_usd: gap,
            projected_waste_per_patient_usd: projected_waste,
        }
    }

    pub fn scores(&self) -> [f64; 3] {
        [self.waste_score, self.latency_score, self.fragmentation_score]
    }
}

/// The fixed catalog, ordered Heart Failure, Diabetes, Lung Cancer.
pub fn generate_disease_archetypes() -> Vec<DiseaseArchetype> {
    vec![
        DiseaseArchetype::fixture(ArchetypeId::HeartFailure, (0.9, 0.4, 0.5), 3_624.0, 8_450.0),
        DiseaseArchetype::fixture(ArchetypeId::Diabetes,     (0.3, 0.9, 0.3), 3_926.0, 4_736.0),
        DiseaseArchetype::fixture(ArchetypeId::LungCancer,   (0.6, 0.5, 0.9), 10_737.0, 12_300.0),
    ]
}

/// Look up one archetype in a catalog.
pub fn find_archetype(catalog: &[DiseaseArchetype], id: ArchetypeId) -> SentinelResult<&DiseaseArchetype> {
    catalog
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| SentinelError::UnknownArchetype { name: id.key().to_string() })
}

pub const RADAR_CATEGORIES: [&str; 3] = [
    "Waste (Cost)",
    "Latency (Time)",
    "Fragmentation (Complexity)",
];

/// Closed polygon for a radar chart: the first point is repeated at the end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RadarSeries {
    pub name:       String,
    pub categories: Vec<String>,
    pub values:     Vec<f64>,
}

pub fn radar_series(archetype: &DiseaseArchetype) -> RadarSeries {
    let mut categories: Vec<String> = RADAR_CATEGORIES.iter().map(|c| c.to_string()).collect();
    let mut values = archetype.scores().to_vec();
    categories.push(categories[0].clone());
    values.push(values[0]);
    RadarSeries {
        name: archetype.name.clone(),
        categories,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names_and_keys() {
        assert_eq!("Heart Failure".parse::<ArchetypeId>().unwrap(), ArchetypeId::HeartFailure);
        assert_eq!("lung_cancer".parse::<ArchetypeId>().unwrap(), ArchetypeId::LungCancer);
        assert_eq!(" DIABETES ".parse::<ArchetypeId>().unwrap(), ArchetypeId::Diabetes);
    }

    #[test]
    fn rejects_unknown_archetype() {
        let err = "Asthma".parse::<ArchetypeId>().unwrap_err();
        assert!(matches!(err, SentinelError::UnknownArchetype { ref name } if name == "Asthma"));
        assert!(err.is_invalid_input());
    }
}
