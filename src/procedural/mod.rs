//! Procedural content: the curve deformation and the riders that follow it.

pub mod deformer;
pub mod spawner;

pub use deformer::{DeformParams, HandleRule, breathing_scalar, deform, deform_in_place, handle_rule};
pub use spawner::{RiderHandles, RiderSpec, SpawnParams, populate_riders, rider_clip, spawn_riders};
