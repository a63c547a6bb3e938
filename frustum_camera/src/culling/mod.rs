//! Culling — bounding-volume sets, visibility passes and picking.

mod culler;
mod culling_set;

pub use culler::{Culler, BruteForceCuller, FrustumCuller, VisibilitySet};
pub use culling_set::{CullingSet, VolumeKey, PickHit};
