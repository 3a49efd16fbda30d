//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health, AttackCooldown
//! - Combat rules: block, мёртвые не бьют, смерть ровно один раз
//! - Events: AttackLanded → DamageDealt / EntityDied
//!
//! Кто бьёт:
//! - Гоблины: `enemies::tick_enemies` (Attack cadence + contact damage)
//! - Игрок: `player_melee` (топор, rising edge attack флага)

use bevy::prelude::*;

pub mod attacker;
pub mod damage;
pub mod player_attack;

// Re-export основных типов
pub use attacker::AttackCooldown;
pub use damage::{apply_damage, handle_deaths, AttackLanded, DamageDealt, EntityDied};
pub use player_attack::{in_swing_arc, player_melee};

/// Combat Plugin
///
/// Порядок выполнения (в кадре):
/// 1. player_melee — ArenaSet::Player (после locomotion)
/// 2. apply_damage — ArenaSet::Damage, все AttackLanded этого кадра
/// 3. handle_deaths — Dead marker, freeze, PlayerDefeated
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<AttackLanded>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            Update,
            player_melee
                .in_set(crate::ArenaSet::Player)
                .after(crate::player::drive_player),
        );

        app.add_systems(
            Update,
            (apply_damage, handle_deaths)
                .chain() // Последовательное выполнение
                .in_set(crate::ArenaSet::Damage),
        );
    }
}
