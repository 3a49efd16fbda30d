//! AI decision-making module
//!
//! Goblin FSM: Idle / Search / Follow / Attack, переходы только от
//! дистанции до игрока. Чистая логика без ECS систем — тикает её
//! `enemies::tick_enemies` (throttled).

pub mod components;

// Re-export основных типов
pub use components::{
    classify, facing_yaw, next_state, steer, GoblinBrain, GoblinState, Thought, Thresholds,
    MOVE_EPSILON,
};
