//! The metrics provider: the single entry point the rendering layer
//! calls into. Every accessor is a pure function of the config and its
//! arguments; the optional cache only avoids regenerating fixtures.

use crate::{
    archetype::{find_archetype, generate_disease_archetypes, radar_series, ArchetypeId, DiseaseArchetype, RadarSeries},
    cache::MetricsCache,
    config::DashboardConfig,
    equity::{generate_equity_data, segment_gaps, AnalysisSegment, EquityData, EquityGap},
    error::SentinelResult,
    savings::{addressable_waste, projected_savings_for, LeverInput, PolicyLever},
    scatter::{fit_linear_regression, RegressionFit, ScatterSample},
    timeline::{self, generate_patient_timeline, LatencySpan, TimelineBar, TimelineEvent},
    types::{Days, Usd},
};

pub struct MetricsProvider {
    config: DashboardConfig,
    cache:  Option<MetricsCache>,
}

impl MetricsProvider {
    /// A provider that regenerates every dataset on each call.
    pub fn new(config: DashboardConfig) -> Self {
        Self { config, cache: None }
    }

    /// A provider that memoizes generator outputs for its own lifetime.
    pub fn with_cache(config: DashboardConfig) -> Self {
        Self { config, cache: Some(MetricsCache::new()) }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&MetricsCache> {
        self.cache.as_ref()
    }

    // ── Archetypes ─────────────────────────────────────────────

    pub fn archetypes(&mut self) -> Vec<DiseaseArchetype> {
        match self.cache.as_mut() {
            Some(cache) => cache.archetypes().to_vec(),
            None => generate_disease_archetypes(),
        }
    }

    pub fn archetype(&mut self, id: ArchetypeId) -> SentinelResult<DiseaseArchetype> {
        let catalog = self.archetypes();
        find_archetype(&catalog, id).cloned()
    }

    pub fn radar(&mut self, id: ArchetypeId) -> SentinelResult<RadarSeries> {
        Ok(radar_series(&self.archetype(id)?))
    }

    // ── Timeline ───────────────────────────────────────────────

    pub fn timeline(&mut self) -> Vec<TimelineEvent> {
        match self.cache.as_mut() {
            Some(cache) => cache.timeline().to_vec(),
            None => generate_patient_timeline(),
        }
    }

    pub fn shadow_cost(&mut self) -> Usd {
        timeline::shadow_cost(&self.timeline())
    }

    pub fn latency_days(&mut self) -> Days {
        timeline::latency_days(&self.timeline())
    }

    pub fn latency_span(&mut self) -> SentinelResult<LatencySpan> {
        timeline::latency_span(&self.timeline())
    }

    pub fn timeline_bars(&mut self) -> Vec<TimelineBar> {
        timeline::timeline_bars(&self.timeline())
    }

    // ── Equity ─────────────────────────────────────────────────

    pub fn equity(&mut self) -> EquityData {
        match self.cache.as_mut() {
            Some(cache) => cache.equity().clone(),
            None => generate_equity_data(),
        }
    }

    pub fn equity_gaps(&mut self, segment: AnalysisSegment) -> SentinelResult<Vec<EquityGap>> {
        let data = self.equity();
        segment_gaps(&data, segment, &self.config.race_baseline)
    }

    // ── Scatter ────────────────────────────────────────────────

    pub fn scatter(&mut self) -> Vec<ScatterSample> {
        let params = &self.config.scatter;
        match self.cache.as_mut() {
            Some(cache) => cache.scatter(params).to_vec(),
            None => params.generate(),
        }
    }

    pub fn regression(&mut self) -> SentinelResult<RegressionFit> {
        fit_linear_regression(&self.scatter())
    }

    // ── Financial impact ───────────────────────────────────────

    pub fn projected_savings(&mut self, levers: &[PolicyLever]) -> SentinelResult<Usd> {
        let catalog = self.archetypes();
        projected_savings_for(levers, &catalog, self.config.cohort_size_per_archetype)
    }

    pub fn addressable_waste(&mut self, levers: &[PolicyLever]) -> SentinelResult<Usd> {
        let catalog = self.archetypes();
        let inputs = levers
            .iter()
            .map(|l| l.to_input(&catalog))
            .collect::<SentinelResult<Vec<LeverInput>>>()?;
        addressable_waste(&inputs, self.config.cohort_size_per_archetype)
    }
}
