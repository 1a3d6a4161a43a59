//! Strongly-typed identifiers for simulation entities.
//!
//! Newtype wrappers prevent accidental mixing of body ids with
//! vertex indices, and `PairKey` gives collision pairs a stable,
//! order-independent identity across frames.

use serde::{Deserialize, Serialize};

/// Stable, unique identifier for a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    /// Returns the raw id as `u32`.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for BodyId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

/// Order-independent key identifying a pair of bodies.
///
/// Used by the world loop to match this frame's arbiter against last
/// frame's for impulse carryover. The same key is produced no matter
/// which body is passed first, since a later frame may reorder the
/// reference/incident roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey(pub u64);

impl PairKey {
    /// Builds the key from two body ids, smaller id in the high bits.
    pub fn new(a: BodyId, b: BodyId) -> Self {
        let (lo, hi) = if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) };
        Self(((lo as u64) << 32) | hi as u64)
    }
}
