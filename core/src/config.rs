use crate::{
    archetype::ArchetypeId,
    equity::{generate_equity_data, AnalysisSegment, DEFAULT_RACE_BASELINE},
    savings::{validate_percent, PolicyLever},
    scatter::ScatterParams,
    types::{LeverId, Percent},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeverConfig {
    pub lever_id:        LeverId,
    pub label:           String,
    pub archetype:       ArchetypeId,
    pub default_percent: Percent,
}

impl LeverConfig {
    pub fn to_lever(&self) -> PolicyLever {
        PolicyLever {
            lever_id:  self.lever_id.clone(),
            label:     self.label.clone(),
            archetype: self.archetype,
            percent:   self.default_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    pub cohort_size_per_archetype: u64,
    pub race_baseline:             String,
    #[serde(default)]
    pub default_archetype:         ArchetypeId,
    #[serde(default)]
    pub default_segment:           AnalysisSegment,
    #[serde(default)]
    pub scatter:                   ScatterParams,
    pub levers:                    Vec<LeverConfig>,
}

impl DashboardConfig {
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/dashboard/dashboard_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::debug!(
            "config: loaded {path} ({} levers, cohort={})",
            config.levers.len(),
            config.cohort_size_per_archetype
        );
        Ok(config)
    }

    /// Reject configs a session could never start from.
    pub fn validate(&self) -> anyhow::Result<()> {
        for lever in &self.levers {
            validate_percent(&lever.lever_id, lever.default_percent)?;
        }
        for (i, lever) in self.levers.iter().enumerate() {
            if self.levers[..i].iter().any(|l| l.lever_id == lever.lever_id) {
                anyhow::bail!("Duplicate lever id '{}'", lever.lever_id);
            }
        }
        let equity = generate_equity_data();
        let race_known = equity
            .get(&AnalysisSegment::Race)
            .is_some_and(|groups| groups.contains_key(&self.race_baseline));
        if !race_known {
            anyhow::bail!("race_baseline '{}' is not a Race group", self.race_baseline);
        }

        let scatter = &self.scatter;
        if scatter.n < 2 {
            anyhow::bail!("scatter.n must be at least 2, got {}", scatter.n);
        }
        if !scatter.dei_max.is_finite() || scatter.dei_max <= 0.0 {
            anyhow::bail!("scatter.dei_max must be finite and > 0, got {}", scatter.dei_max);
        }
        if !scatter.noise_sd.is_finite() || scatter.noise_sd < 0.0 {
            anyhow::bail!("scatter.noise_sd must be finite and >= 0, got {}", scatter.noise_sd);
        }
        if !scatter.base_cost.is_finite() || !scatter.dei_cost_slope.is_finite() {
            anyhow::bail!("scatter cost parameters must be finite");
        }
        Ok(())
    }

    pub fn default_levers(&self) -> Vec<PolicyLever> {
        self.levers.iter().map(LeverConfig::to_lever).collect()
    }

    /// The shipped configuration, built in code for tests.
    pub fn default_test() -> Self {
        Self {
            cohort_size_per_archetype: 10_000,
            race_baseline: DEFAULT_RACE_BASELINE.into(),
            default_archetype: ArchetypeId::Diabetes,
            default_segment: AnalysisSegment::Race,
            scatter: ScatterParams::default(),
            levers: vec![
                LeverConfig {
                    lever_id: "early_screening".into(),
                    label: "Early Screening Adoption".into(),
                    archetype: ArchetypeId::Diabetes,
                    default_percent: 20.0,
                },
                LeverConfig {
                    lever_id: "care_coordination".into(),
                    label: "Care Coordination Program".into(),
                    archetype: ArchetypeId::HeartFailure,
                    default_percent: 15.0,
                },
                LeverConfig {
                    lever_id: "rapid_diagnostics".into(),
                    label: "Rapid Diagnostic Pathway".into(),
                    archetype: ArchetypeId::LungCancer,
                    default_percent: 10.0,
                },
            ],
        }
    }
}
