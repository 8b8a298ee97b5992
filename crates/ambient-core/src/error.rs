//! Error types for field configuration.

use thiserror::Error;

/// Errors produced while building or validating a [`crate::FieldConfig`].
///
/// None of these reach the page; the front-end logs them and falls back to
/// defaults or renders nothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A color string was not `#rgb` or `#rrggbb`.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A numeric attribute could not be parsed.
    #[error("invalid value for '{key}': {value}")]
    InvalidNumber { key: String, value: String },

    /// The motion mode name is not one of `fall` or `scroll`.
    #[error("unknown motion mode: {0}")]
    UnknownMode(String),

    /// A generator range was empty, inverted, non-finite or outside its domain.
    #[error("invalid range for {name}: {start}..{end}")]
    InvalidRange { name: &'static str, start: f32, end: f32 },

    /// A fall tuning multiplier was negative or non-finite.
    #[error("invalid tuning for {name}: {value}")]
    InvalidTuning { name: &'static str, value: f32 },
}
