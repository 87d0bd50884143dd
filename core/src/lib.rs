//! DEI Sentinel metrics provider.
//!
//! Static and synthetic healthcare-claims datasets plus the handful of
//! figures a dashboard derives from them.

pub mod archetype;
pub mod cache;
pub mod command;
pub mod config;
pub mod equity;
pub mod error;
pub mod provider;
pub mod rng;
pub mod savings;
pub mod scatter;
pub mod session;
pub mod snapshot;
pub mod timeline;
pub mod types;
