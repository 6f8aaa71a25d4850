// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! Runtime paths (pointer events, frame ticks, queries) never fail; inconsistent
//! input there is ignored. Only configuration can be rejected, and it is
//! rejected at the call site rather than silently repaired.

use thiserror::Error;

/// A rejected configuration value.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A scale level was zero or negative.
    #[error("scale level must be positive, got {0}")]
    NonPositiveScale(f64),
    /// A scale level was NaN or infinite.
    #[error("scale level must be finite, got {0}")]
    NonFiniteScale(f64),
    /// The levels do not satisfy `minimum <= medium <= maximum`.
    #[error("scale levels must satisfy minimum <= medium <= maximum, got {minimum} / {medium} / {maximum}")]
    UnorderedScaleLevels {
        /// Requested minimum level.
        minimum: f64,
        /// Requested medium level.
        medium: f64,
        /// Requested maximum level.
        maximum: f64,
    },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::ConfigError;

    #[test]
    fn messages_name_the_offending_values() {
        let err = ConfigError::UnorderedScaleLevels {
            minimum: 2.0,
            medium: 1.0,
            maximum: 3.0,
        };
        assert_eq!(
            err.to_string(),
            "scale levels must satisfy minimum <= medium <= maximum, got 2 / 1 / 3"
        );
        assert_eq!(
            ConfigError::NonPositiveScale(-1.0).to_string(),
            "scale level must be positive, got -1"
        );
    }
}
