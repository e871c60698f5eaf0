//! Error type for the application layer.
//!
//! Curve lookups never fail with an error; a miss is `None`. Everything that
//! touches files, configuration or the haptic player reports through
//! [`Error`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by asset loading, configuration and haptic playback.
#[derive(Debug, Error)]
pub enum Error {
    /// A file outside the asset directory could not be read or written
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An asset could not be read or copied
    #[error("asset '{name}' could not be loaded: {source}")]
    Asset {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Asset names are plain file names, never paths
    #[error("invalid asset name: '{0}'")]
    InvalidAssetName(String),

    /// Configuration JSON was malformed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A curve was configured with more samples than the table allows
    #[error("curve sample count {count} exceeds the maximum of {max}")]
    SampleCount { count: usize, max: usize },

    /// The player was used before `initialize` or after `shutdown`
    #[error("haptic player is not initialized")]
    NotInitialized,

    /// Loop parameters were sent while nothing was playing
    #[error("no haptic effect is playing, loop parameters cannot be updated")]
    NoActiveLoop,

    /// A prebaked effect id outside the player's range
    #[error("prebaked effect {id} is outside {min}..={max}")]
    UnknownPrebaked { id: u32, min: u32, max: u32 },
}

/// Result alias used throughout the application layer.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::UnknownPrebaked {
            id: 99,
            min: 1,
            max: 20,
        };
        assert_eq!(err.to_string(), "prebaked effect 99 is outside 1..=20");

        let err = Error::InvalidAssetName("../secret".to_string());
        assert_eq!(err.to_string(), "invalid asset name: '../secret'");

        let err = Error::SampleCount {
            count: 200_000,
            max: 100_000,
        };
        assert_eq!(
            err.to_string(),
            "curve sample count 200000 exceeds the maximum of 100000"
        );
    }

    #[test]
    fn test_config_error_from_serde() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
