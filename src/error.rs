//! Error types for cast validation, authority notifications and configuration.

use std::path::PathBuf;

/// Why a cast attempt was refused locally.
///
/// These are UI affordances, not protocol violations: a rejected cast leaves
/// the engine untouched and never reaches the authority.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CastRejected {
    #[error("no fishing rod equipped")]
    NoRod,
    #[error("a fishing session is already active")]
    SessionActive,
    #[error("target is {distance:.0} units away (range {range:.0})")]
    OutOfRange { distance: f64, range: f64 },
    #[error("target ({x:.0}, {y:.0}) is not water")]
    NotWater { x: f64, y: f64 },
}

/// Failure reported by a [`crate::authority::FishingAuthority`] call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    #[error("authority unavailable: {0}")]
    Unavailable(String),
    #[error("authority rejected the command: {0}")]
    Rejected(String),
}

/// Errors raised while loading or validating [`crate::config::FishingConstants`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("could not determine config directory")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_rejected_messages() {
        let err = CastRejected::OutOfRange {
            distance: 712.4,
            range: 600.0,
        };
        assert_eq!(err.to_string(), "target is 712 units away (range 600)");
        assert_eq!(
            CastRejected::NotWater { x: 10.0, y: 20.0 }.to_string(),
            "target (10, 20) is not water"
        );
    }

    #[test]
    fn test_config_invalid_message() {
        let err = ConfigError::Invalid {
            field: "cast_range",
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for `cast_range`: must be positive");
    }
}
