use serde::{Deserialize, Serialize};
use crate::{
    archetype::ArchetypeId,
    equity::AnalysisSegment,
    types::{LeverId, Percent},
};

/// All user interactions a rendering layer can send to a session.
/// Variants are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DashboardCommand {
    // ── Strategic view ────────────────────────────
    SelectArchetype { archetype: ArchetypeId },

    // ── Equity view ───────────────────────────────
    SelectSegment { segment: AnalysisSegment },

    // ── ROI simulator ─────────────────────────────
    SetLever {
        lever_id: LeverId,
        percent:  Percent,
    },
    ResetLevers,
}

impl DashboardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectArchetype { .. } => "select_archetype",
            Self::SelectSegment { .. }   => "select_segment",
            Self::SetLever { .. }        => "set_lever",
            Self::ResetLevers            => "reset_levers",
        }
    }
}
