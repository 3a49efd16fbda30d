//! Enemy Manager module
//!
//! - spawn: annulus spawn policy
//! - manager: EnemyManager resource (коллекция, throttle, victory latch)
//! - systems: tick_enemies (AI), check_victory (win condition)

use bevy::prelude::*;

pub mod manager;
pub mod spawn;
pub mod systems;


pub use manager::{goblin_bundle, EdgeTrigger, EnemyManager, FrameThrottle};
pub use spawn::{annulus_point, spawn_count, spawn_points};
pub use systems::{check_victory, clip_for_state, tick_enemies};

/// Enemies Plugin
///
/// tick_enemies — ArenaSet::Enemies (после locomotion игрока, позиция игрока
/// этого кадра). check_victory — ArenaSet::Outcome (после damage resolution).
pub struct EnemiesPlugin;

impl Plugin for EnemiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, tick_enemies.in_set(crate::ArenaSet::Enemies))
            .add_systems(
                Update,
                check_victory
                    .in_set(crate::ArenaSet::Outcome)
                    .before(crate::outcome::record_outcome),
            );
    }
}
