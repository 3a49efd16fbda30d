//! Physics simulation module
//!
//! Kinematic контроллер (gravity + ground probe) и граница с physics
//! backend host engine (`CollisionWorld`).

pub mod movement;
pub mod world;

// Re-export основных типов
pub use movement::{kinematic_body, KinematicController, PROBE_LIFT};
pub use world::{CollisionWorld, FlatGround, PhysicsWorld};
