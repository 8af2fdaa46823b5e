//! Error types for the brawl crates.
//!
//! The simulation step itself never fails; these cover the edges around it
//! (snapshot bytes and engine configuration).

use thiserror::Error;

use crate::version::SchemaVersion;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum BrawlError {
    /// Snapshot errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// World snapshot encode/decode errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Input shorter than the header
    #[error("snapshot truncated: {len} bytes")]
    Truncated {
        /// Number of bytes received
        len: usize,
    },

    /// Header does not start with the snapshot magic
    #[error("bad snapshot magic: {found:?}")]
    BadMagic {
        /// The bytes found instead
        found: [u8; 4],
    },

    /// Written by an incompatible schema
    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version this build reads
        expected: SchemaVersion,
        /// Version found in the header
        actual: SchemaVersion,
    },

    /// Body serialization failed
    #[error("snapshot encode failed: {0}")]
    Encode(String),

    /// Body deserialization failed
    #[error("snapshot decode failed: {0}")]
    Decode(String),
}

/// Result type alias for brawl operations.
pub type BrawlResult<T> = Result<T, BrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_error_converts() {
        let err: BrawlError = SnapshotError::Truncated { len: 3 }.into();
        assert!(matches!(err, BrawlError::Snapshot(_)));
        assert_eq!(err.to_string(), "Snapshot error: snapshot truncated: 3 bytes");
    }

    #[test]
    fn test_version_mismatch_message() {
        let err = SnapshotError::VersionMismatch {
            expected: SchemaVersion::new(1, 0, 0),
            actual: SchemaVersion::new(2, 1, 0),
        };
        assert_eq!(
            err.to_string(),
            "Schema version mismatch: expected 1.0.0, got 2.1.0"
        );
    }
}
