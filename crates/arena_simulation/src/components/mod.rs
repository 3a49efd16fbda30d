//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: гоблины и здоровье (Goblin, Health, Dead)
//! - player: player control (Player, PlayerCombat)

pub mod actor;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use player::*;
