/// Culling strategies.
///
/// A Culler determines which volumes of a CullingSet are visible from a
/// frustum. Implementations range from brute-force (keep everything) to a
/// per-volume frustum test.

use crate::camera::Frustum;
use crate::camera_trace;
use super::culling_set::{CullingSet, VolumeKey};

const SOURCE: &str = "frustum_camera::culling";

/// Output of one culling pass.
///
/// Ephemeral: rebuilt every frame, indexes into the CullingSet it was
/// produced from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilitySet {
    visible: Vec<VolumeKey>,
    tested: usize,
}

impl VisibilitySet {
    pub fn new(visible: Vec<VolumeKey>, tested: usize) -> Self {
        Self { visible, tested }
    }

    /// Visible keys, in CullingSet iteration order.
    pub fn visible(&self) -> &[VolumeKey] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Number of volumes considered by the pass.
    pub fn tested_count(&self) -> usize {
        self.tested
    }

    pub fn culled_count(&self) -> usize {
        self.tested - self.visible.len()
    }

    pub fn is_visible(&self, key: VolumeKey) -> bool {
        self.visible.contains(&key)
    }
}

/// Strategy for determining visible volumes.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to keep state across frames.
pub trait Culler: Send + Sync {
    fn cull(&mut self, frustum: &Frustum, set: &CullingSet) -> VisibilitySet;
}

/// Brute-force culler — every volume is visible (no actual culling).
///
/// Baseline for comparison, and what a demo uses with culling toggled off.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Culler for BruteForceCuller {
    fn cull(&mut self, _frustum: &Frustum, set: &CullingSet) -> VisibilitySet {
        VisibilitySet::new(set.keys().collect(), set.len())
    }
}

/// Frustum culler — tests each volume with [`Frustum::is_visible`].
///
/// O(n) over the set; false positives near frustum edges are possible for
/// boxes and spheres, false negatives are not.
#[derive(Debug, Default)]
pub struct FrustumCuller;

impl FrustumCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Culler for FrustumCuller {
    fn cull(&mut self, frustum: &Frustum, set: &CullingSet) -> VisibilitySet {
        let visible: Vec<VolumeKey> = set
            .iter()
            .filter_map(|(key, volume)| frustum.is_visible(volume).then_some(key))
            .collect();

        let result = VisibilitySet::new(visible, set.len());
        camera_trace!(SOURCE, "frustum cull: {} visible, {} culled of {}",
            result.visible_count(), result.culled_count(), result.tested_count());
        result
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
