// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `Tactile` library.
//!
//! Only configuration errors are fatal: a control that fails to build never
//! becomes interactive. Everything that can go wrong while a gesture is in
//! flight is an [`InputError`], which callers log and drop.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The control configuration was rejected at construction.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A value or domain failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A pointer sample could not be mapped.
    #[error("input error: {0}")]
    Input(#[from] InputError),
}

/// Construction-time configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The required entity identifier is absent or blank.
    #[error("please define an entity")]
    MissingEntity,

    /// The configured bounds or step do not form a valid domain.
    #[error("invalid value domain: {0}")]
    InvalidDomain(#[from] ValueError),

    /// A raw card configuration could not be decoded.
    #[error("invalid card configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A NaN or infinite number was supplied.
    #[error("{field} must be finite, got {actual}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The value that was provided.
        actual: f64,
    },

    /// The lower bound is not strictly below the upper bound.
    #[error("min {min} must be below max {max}")]
    EmptyRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// The quantization step is zero or negative.
    #[error("step {0} must be positive")]
    NonPositiveStep(f64),

    /// A bound lies outside what the target service accepts.
    #[error("{field} {actual} is outside [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The value that was provided.
        actual: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },

    /// The target service only accepts whole numbers.
    #[error("{field} {actual} must be a whole number")]
    NotWhole {
        /// Name of the offending field.
        field: &'static str,
        /// The value that was provided.
        actual: f64,
    },
}

/// Per-sample gesture failures.
///
/// These never abort an interaction; the offending sample is dropped and the
/// previous candidate value is kept.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InputError {
    /// The sample carried a NaN or infinite coordinate.
    #[error("pointer sample has a non-finite coordinate")]
    NonFinite,

    /// The sample sits exactly on the rotation center, so it has no angle.
    #[error("pointer sample coincides with the rotation center")]
    DegenerateVector,

    /// The control has no measurable extent along the gesture axis.
    #[error("control bounds are empty")]
    EmptyBounds,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entity_display() {
        assert_eq!(
            ConfigError::MissingEntity.to_string(),
            "please define an entity"
        );
    }

    #[test]
    fn value_error_display() {
        let err = ValueError::EmptyRange {
            min: 32.0,
            max: 16.0,
        };
        assert_eq!(err.to_string(), "min 32 must be below max 16");
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::MissingEntity.into();
        assert!(matches!(err, Error::Config(ConfigError::MissingEntity)));
    }

    #[test]
    fn config_error_wraps_value_error() {
        let err: ConfigError = ValueError::NonPositiveStep(0.0).into();
        assert_eq!(
            err.to_string(),
            "invalid value domain: step 0 must be positive"
        );
    }

    #[test]
    fn out_of_range_display() {
        let err = ValueError::OutOfRange {
            field: "max",
            actual: 200.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "max 200 is outside [0, 100]");
    }

    #[test]
    fn input_error_display() {
        assert_eq!(
            InputError::DegenerateVector.to_string(),
            "pointer sample coincides with the rotation center"
        );
    }
}
