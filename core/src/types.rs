//! Shared primitive types used across the provider.

/// An amount in US dollars.
pub type Usd = f64;

/// A whole number of calendar days.
pub type Days = i64;

/// A lever setting in percent, valid range [0, 100].
pub type Percent = f64;

/// Stable identifier of a policy lever, e.g. "early_screening".
pub type LeverId = String;

/// Identifier of one interactive session.
pub type SessionId = uuid::Uuid;

/// Round to one decimal place, the precision percentages are reported at.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
