//! Базовые компоненты акторов: Goblin, Health, Dead

use bevy::prelude::*;

/// Гоблин (враг) — маркер для запросов менеджера
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health)]
pub struct Goblin {
    /// Порядковый номер спавна (для логов)
    pub index: u32,
}

/// Результат применения урона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Живой, health уменьшен
    Hurt,
    /// Этот удар убил (переход в 0 — ровно один раз)
    Killed,
    /// Уже мёртв — no-op
    AlreadyDead,
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max, после 0 больше не меняется (terminal)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Уменьшить health на `amount` (floor 0)
    ///
    /// Killed возвращается только на переходе в 0, повторные вызовы после
    /// смерти — AlreadyDead без побочных эффектов.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::AlreadyDead;
        }

        self.current = self.current.saturating_sub(amount);

        if self.is_alive() {
            DamageOutcome::Hurt
        } else {
            DamageOutcome::Killed
        }
    }
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Деспавна нет — трупы остаются в коллекции менеджера.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;
