//! Player control components
//!
//! Отмечает entity которым управляет игрок через input (в отличие от AI).

use bevy::prelude::*;

use crate::combat::AttackCooldown;

/// Marker component для player-controlled entity
///
/// # Архитектурная заметка
/// - Enemy systems используют `Without<Player>` filter
/// - Input/locomotion systems используют `With<Player>` filter
/// - В single-player режиме ровно один entity имеет этот компонент
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(crate::components::Health)]
pub struct Player;

/// Боевое состояние игрока
#[derive(Component, Debug, Clone)]
pub struct PlayerCombat {
    /// Урон одного удара топором
    pub damage: u32,

    /// Дальность удара (метры)
    pub reach: f32,

    /// Блок зажат — входящий урон игнорируется
    pub blocking: bool,

    /// Attack флаг прошлого кадра (для rising edge)
    pub was_attacking: bool,

    /// Пауза между ударами (кадры)
    pub attack_cooldown: AttackCooldown,
}

impl PlayerCombat {
    pub fn new(damage: u32, reach: f32, cooldown_frames: u32) -> Self {
        Self {
            damage,
            reach,
            blocking: false,
            was_attacking: false,
            attack_cooldown: AttackCooldown::new(cooldown_frames),
        }
    }

    /// Rising edge attack флага + cooldown готов → удар
    pub fn begin_swing(&mut self, attacking: bool) -> bool {
        let pressed = attacking && !self.was_attacking;
        self.was_attacking = attacking;
        self.attack_cooldown.cool_down();

        if pressed && self.attack_cooldown.is_ready() {
            self.attack_cooldown.trigger();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swing_needs_rising_edge() {
        let mut combat = PlayerCombat::new(20, 2.0, 1);

        assert!(combat.begin_swing(true));
        // Зажатая кнопка не даёт повторный удар
        assert!(!combat.begin_swing(true));
        assert!(!combat.begin_swing(false));
        assert!(combat.begin_swing(true));
    }

    #[test]
    fn test_swing_respects_cooldown() {
        let mut combat = PlayerCombat::new(20, 2.0, 10);

        assert!(combat.begin_swing(true));
        assert!(!combat.begin_swing(false));
        // Новое нажатие слишком рано
        assert!(!combat.begin_swing(true));

        for _ in 0..10 {
            combat.begin_swing(false);
        }
        assert!(combat.begin_swing(true));
    }
}
