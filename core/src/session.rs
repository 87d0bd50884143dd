//! One interactive dashboard session.
//!
//! RULES:
//!   - The session owns the only mutable state: the current input snapshot
//!     (selected archetype, analysis segment, lever percentages).
//!   - Commands are validated before anything is changed. A rejected
//!     command leaves the session exactly as it was.
//!   - Derived values are recomputed on request by snapshot(). Nothing is
//!     recomputed implicitly when an input changes.
//!   - Sessions share nothing. Each owns its provider and cache.

use crate::{
    archetype::ArchetypeId,
    command::DashboardCommand,
    config::DashboardConfig,
    equity::AnalysisSegment,
    error::{SentinelError, SentinelResult},
    provider::MetricsProvider,
    savings::{validate_percent, PolicyLever},
    snapshot::DashboardSnapshot,
    timeline::CASE_STUDY_PATIENT_ID,
    types::{Percent, SessionId},
};
use uuid::Uuid;

pub struct Session {
    pub id:       SessionId,
    archetype:    ArchetypeId,
    segment:      AnalysisSegment,
    levers:       Vec<PolicyLever>,
    provider:     MetricsProvider,
}

impl Session {
    pub fn new(config: DashboardConfig) -> Self {
        let id = Uuid::new_v4();
        let session = Self {
            id,
            archetype: config.default_archetype,
            segment:   config.default_segment,
            levers:    config.default_levers(),
            provider:  MetricsProvider::with_cache(config),
        };
        log::info!(
            "session {id}: started (archetype={}, segment={}, levers={})",
            session.archetype,
            session.segment,
            session.levers.len()
        );
        session
    }

    pub fn archetype(&self) -> ArchetypeId {
        self.archetype
    }

    pub fn segment(&self) -> AnalysisSegment {
        self.segment
    }

    pub fn levers(&self) -> &[PolicyLever] {
        &self.levers
    }

    pub fn lever_percent(&self, lever_id: &str) -> Option<Percent> {
        self.levers.iter().find(|l| l.lever_id == lever_id).map(|l| l.percent)
    }

    pub fn provider(&self) -> &MetricsProvider {
        &self.provider
    }

    /// Validate and apply one user interaction.
    pub fn apply(&mut self, command: &DashboardCommand) -> SentinelResult<()> {
        let result = self.apply_inner(command);
        match &result {
            Ok(()) => log::info!("session {}: applied {}", self.id, command.name()),
            Err(e) => log::warn!("session {}: rejected {}: {e}", self.id, command.name()),
        }
        result
    }

    fn apply_inner(&mut self, command: &DashboardCommand) -> SentinelResult<()> {
        match command {
            DashboardCommand::SelectArchetype { archetype } => {
                self.archetype = *archetype;
            }
            DashboardCommand::SelectSegment { segment } => {
                self.segment = *segment;
            }
            DashboardCommand::SetLever { lever_id, percent } => {
                validate_percent(lever_id, *percent)?;
                let lever = self
                    .levers
                    .iter_mut()
                    .find(|l| &l.lever_id == lever_id)
                    .ok_or_else(|| SentinelError::UnknownLever { lever_id: lever_id.clone() })?;
                lever.percent = *percent;
            }
            DashboardCommand::ResetLevers => {
                self.levers = self.provider.config().default_levers();
            }
        }
        Ok(())
    }

    /// Recompute every derived value from the current input state.
    pub fn snapshot(&mut self) -> SentinelResult<DashboardSnapshot> {
        let p = &mut self.provider;

        let archetype = p.archetype(self.archetype)?;
        let radar = p.radar(self.archetype)?;
        let timeline = p.timeline();
        let timeline_bars = p.timeline_bars();
        let shadow_cost_usd = p.shadow_cost();
        let latency = p.latency_span()?;
        let equity_gaps = p.equity_gaps(self.segment)?;
        let scatter = p.scatter();
        let regression = p.regression()?;
        let trend_line = regression.trend_line(p.config().scatter.dei_max);
        let projected_savings_usd = p.projected_savings(&self.levers)?;
        let addressable_waste_usd = p.addressable_waste(&self.levers)?;

        log::debug!(
            "session {}: snapshot archetype={} savings={projected_savings_usd:.0}",
            self.id,
            self.archetype
        );

        Ok(DashboardSnapshot {
            session_id: self.id,
            archetype,
            radar,
            patient_id: CASE_STUDY_PATIENT_ID.to_string(),
            timeline,
            timeline_bars,
            shadow_cost_usd,
            latency,
            segment: self.segment,
            equity_gaps,
            scatter_count: scatter.len(),
            scatter,
            regression,
            trend_line,
            levers: self.levers.clone(),
            cohort_size_per_archetype: p.config().cohort_size_per_archetype,
            projected_savings_usd,
            addressable_waste_usd,
        })
    }
}
