/// CullingSet — the bounding volumes a culler tests against a frustum.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys, so callers can
/// keep a `VolumeKey` next to whatever object the volume stands for.

use slotmap::{new_key_type, SlotMap};
use crate::math::{BoundingVolume, Ray};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a bounding volume within a CullingSet.
    ///
    /// Keys remain valid even after other volumes are removed.
    pub struct VolumeKey;
}

/// Nearest volume hit by a picking ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub key: VolumeKey,
    /// Distance along the ray to the entry point (0 when the origin is inside)
    pub t: f32,
}

#[derive(Debug, Clone, Default)]
pub struct CullingSet {
    volumes: SlotMap<VolumeKey, BoundingVolume>,
}

impl CullingSet {
    pub fn new() -> Self {
        Self { volumes: SlotMap::with_key() }
    }

    /// Add a volume and return its key.
    pub fn insert(&mut self, volume: impl Into<BoundingVolume>) -> VolumeKey {
        self.volumes.insert(volume.into())
    }

    /// Remove a volume. Returns it if the key was valid.
    pub fn remove(&mut self, key: VolumeKey) -> Option<BoundingVolume> {
        self.volumes.remove(key)
    }

    pub fn get(&self, key: VolumeKey) -> Option<&BoundingVolume> {
        self.volumes.get(key)
    }

    /// Replace the volume stored under `key`.
    ///
    /// Returns false if the key is no longer valid.
    pub fn set(&mut self, key: VolumeKey, volume: impl Into<BoundingVolume>) -> bool {
        match self.volumes.get_mut(key) {
            Some(slot) => {
                *slot = volume.into();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VolumeKey, &BoundingVolume)> + '_ {
        self.volumes.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = VolumeKey> + '_ {
        self.volumes.keys()
    }

    pub fn clear(&mut self) {
        self.volumes.clear();
    }

    /// Closest box or sphere crossed by `ray`.
    ///
    /// Points have no extent and are never picked. Volumes entirely behind
    /// the ray origin are ignored.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        self.volumes
            .iter()
            .filter_map(|(key, volume)| {
                let hit = match volume {
                    BoundingVolume::Point(_) => None,
                    BoundingVolume::Sphere(sphere) => ray.intersect_sphere(sphere),
                    BoundingVolume::Box(aabb) => ray.intersect_aabb(aabb),
                };
                hit.map(|h| PickHit { key, t: h.entry() })
            })
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }
}

#[cfg(test)]
#[path = "culling_set_tests.rs"]
mod tests;
