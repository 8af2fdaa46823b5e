//! # Brawl Common
//!
//! Common types shared by the brawler simulation and its engine driver.
//!
//! This crate provides foundational types used across all brawl crates:
//! - Entity ids and the per-session id allocator
//! - Facing direction and walkable-lane bounds
//! - Snapshot schema versions and magic bytes
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::version::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_clamp() {
        let lane = LaneBounds::PLAYER;
        let clamped = lane.clamp(glam::Vec2::new(-50.0, 900.0));

        assert_eq!(clamped, glam::Vec2::new(30.0, FLOOR_MAX));
    }

    #[test]
    fn test_session_ids_restart() {
        let mut ids = IdAllocator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(first, second);

        let mut next_session = IdAllocator::new();
        assert_eq!(next_session.next_id(), first);
    }

    #[test]
    fn test_version_compatibility() {
        let v1 = SchemaVersion::new(1, 0, 0);
        let v2 = SchemaVersion::new(1, 1, 0);
        let v3 = SchemaVersion::new(2, 0, 0);

        // v2 can read v1 data (newer version reading older data)
        assert!(v2.is_compatible_with(&v1));
        // Different major versions are incompatible
        assert!(!v1.is_compatible_with(&v3));
    }
}
