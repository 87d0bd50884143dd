use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentinelError {
    #[error("Lever '{lever}' percent {percent} outside [0, 100]")]
    PercentOutOfRange { lever: String, percent: f64 },

    #[error("Non-finite value for {field}")]
    NonFinite { field: String },

    #[error("Negative efficiency gap for {field}: {value}")]
    NegativeGap { field: String, value: f64 },

    #[error("Unknown archetype '{name}'")]
    UnknownArchetype { name: String },

    #[error("Unknown analysis segment '{name}'")]
    UnknownSegment { name: String },

    #[error("Unknown group '{group}' in segment {segment}")]
    UnknownGroup { segment: String, group: String },

    #[error("Unknown lever '{lever_id}'")]
    UnknownLever { lever_id: String },

    #[error("Cannot fit regression: {reason}")]
    DegenerateSample { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SentinelError {
    /// True for errors caused by caller input. These are surfaced to the
    /// user as-is; everything else is an internal failure.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::Serialization(_) | Self::Other(_))
    }
}

pub type SentinelResult<T> = Result<T, SentinelError>;
