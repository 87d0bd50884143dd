//! Explicit memoization of generator outputs.
//!
//! RULE: the cache is owned by whoever calls the generators. There is no
//! process-wide cache, so two sessions never observe each other's state.
//! Cache key = (generator identity, parameters).

use crate::{
    archetype::{generate_disease_archetypes, DiseaseArchetype},
    equity::{generate_equity_data, EquityData},
    scatter::{ScatterKey, ScatterParams, ScatterSample},
    timeline::{generate_patient_timeline, TimelineEvent},
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Archetypes,
    Timeline,
    Equity,
    Scatter,
}

#[derive(Debug, Default)]
pub struct MetricsCache {
    archetypes: Option<Vec<DiseaseArchetype>>,
    timeline:   Option<Vec<TimelineEvent>>,
    equity:     Option<EquityData>,
    scatter:    HashMap<ScatterKey, Vec<ScatterSample>>,
    hits:       u64,
    misses:     u64,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, generator: Generator, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        log::debug!(
            "cache: {generator:?} {}",
            if hit { "hit" } else { "miss" }
        );
    }

    pub fn archetypes(&mut self) -> &[DiseaseArchetype] {
        let hit = self.archetypes.is_some();
        self.record(Generator::Archetypes, hit);
        self.archetypes.get_or_insert_with(generate_disease_archetypes)
    }

    pub fn timeline(&mut self) -> &[TimelineEvent] {
        let hit = self.timeline.is_some();
        self.record(Generator::Timeline, hit);
        self.timeline.get_or_insert_with(generate_patient_timeline)
    }

    pub fn equity(&mut self) -> &EquityData {
        let hit = self.equity.is_some();
        self.record(Generator::Equity, hit);
        self.equity.get_or_insert_with(generate_equity_data)
    }

    pub fn scatter(&mut self, params: &ScatterParams) -> &[ScatterSample] {
        let key = params.cache_key();
        let hit = self.scatter.contains_key(&key);
        self.record(Generator::Scatter, hit);
        self.scatter.entry(key).or_insert_with(|| params.generate())
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every cached value. Counters are kept.
    pub fn clear(&mut self) {
        self.archetypes = None;
        self.timeline = None;
        self.equity = None;
        self.scatter.clear();
    }
}
