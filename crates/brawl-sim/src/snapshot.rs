//! Binary world snapshots.
//!
//! Layout: 4 magic bytes, the schema version as three little-endian `u16`s,
//! then the bincode-encoded [`World`]. The RNG state is part of the world,
//! so a restored snapshot continues exactly as the original would have.

use brawl_common::{MagicBytes, SchemaVersion, SnapshotError};
use tracing::debug;

use crate::world::World;

const HEADER_LEN: usize = 4 + SchemaVersion::ENCODED_LEN;

impl World {
    /// Encodes the whole world.
    pub fn encode_snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        let body = bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
        bytes.extend_from_slice(&MagicBytes::SNAPSHOT.0);
        bytes.extend_from_slice(&SchemaVersion::WORLD_SNAPSHOT.to_le_bytes());
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Restores a world from [`World::encode_snapshot`] output.
    pub fn decode_snapshot(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < HEADER_LEN {
            return Err(SnapshotError::Truncated { len: bytes.len() });
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        if magic != MagicBytes::SNAPSHOT.0 {
            return Err(SnapshotError::BadMagic { found: magic });
        }

        let mut version = [0u8; SchemaVersion::ENCODED_LEN];
        version.copy_from_slice(&bytes[4..HEADER_LEN]);
        let actual = SchemaVersion::from_le_bytes(version);
        let expected = SchemaVersion::WORLD_SNAPSHOT;
        if !expected.can_read(&actual) {
            return Err(SnapshotError::VersionMismatch { expected, actual });
        }

        let world: Self = bincode::deserialize(&bytes[HEADER_LEN..])
            .map_err(|e| SnapshotError::Decode(e.to_string()))?;
        debug!(
            "Restored {} at tick {} from a v{} snapshot ({} bytes)",
            world.level(),
            world.tick(),
            actual,
            bytes.len()
        );
        Ok(world)
    }
}
