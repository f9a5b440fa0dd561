//! Core shared types: math re-exports and bounding volumes.

pub use glam::{Vec3, vec3};

pub mod bounds;

pub use bounds::Aabb;
