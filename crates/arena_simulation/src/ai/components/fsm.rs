//! Goblin FSM: состояния и distance-driven transitions.
//!
//! Transition — чистая функция `(state, distance, thresholds) -> state`,
//! без ECS/engine зависимостей.

use bevy::prelude::*;

/// AI FSM состояния гоблина
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum GoblinState {
    /// Idle — бродит вокруг home, игрока не чувствует
    #[default]
    Idle,

    /// Search — чувствует игрока, идёт к нему с разбросом
    Search,

    /// Follow — видит игрока, бежит прямо на него
    Follow,

    /// Attack — стоит и бьёт с фиксированным интервалом
    Attack,
}

impl GoblinState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoblinState::Idle => "Idle",
            GoblinState::Search => "Search",
            GoblinState::Follow => "Follow",
            GoblinState::Attack => "Attack",
        }
    }

    /// Разрешённые рёбра графа переходов (за один тик)
    pub fn can_transition_to(&self, next: GoblinState) -> bool {
        use GoblinState::*;

        if *self == next {
            return true;
        }

        matches!(
            (*self, next),
            (Idle, Search)
                | (Idle, Follow)
                | (Search, Idle)
                | (Search, Follow)
                | (Follow, Idle)
                | (Follow, Search)
                | (Follow, Attack)
                | (Attack, Idle)
                | (Attack, Search)
                | (Attack, Follow)
        )
    }
}

/// Пороги дистанций (метры)
///
/// Инвариант: attack_range ≤ look_distance < sens_distance
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Thresholds {
    /// Ближе — видит игрока (Follow)
    pub look_distance: f32,
    /// Ближе — чувствует игрока (Search)
    pub sens_distance: f32,
    /// Ближе — бьёт (Attack)
    pub attack_range: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            look_distance: 6.0,
            sens_distance: 20.0,
            attack_range: 1.5,
        }
    }
}

/// Дистанционная полоса без учёта истории
///
/// ≤ attack_range → Attack, ≤ look → Follow, ≤ sens → Search, иначе Idle.
pub fn classify(distance: f32, thresholds: &Thresholds) -> GoblinState {
    if distance <= thresholds.attack_range {
        GoblinState::Attack
    } else {
        classify_without_attack(distance, thresholds)
    }
}

fn classify_without_attack(distance: f32, thresholds: &Thresholds) -> GoblinState {
    if distance > thresholds.sens_distance {
        GoblinState::Idle
    } else if distance > thresholds.look_distance {
        GoblinState::Search
    } else {
        GoblinState::Follow
    }
}

/// Один шаг FSM
///
/// Idle/Search не прыгают сразу в Attack — сначала Follow.
/// Attack вне радиуса откатывается по порогам (Follow/Search/Idle).
pub fn next_state(current: GoblinState, distance: f32, thresholds: &Thresholds) -> GoblinState {
    match current {
        GoblinState::Idle | GoblinState::Search => classify_without_attack(distance, thresholds),

        GoblinState::Follow => {
            if distance > thresholds.sens_distance {
                GoblinState::Idle
            } else if distance > thresholds.look_distance {
                GoblinState::Search
            } else if distance <= thresholds.attack_range {
                GoblinState::Attack
            } else {
                GoblinState::Follow
            }
        }

        GoblinState::Attack => {
            if distance <= thresholds.attack_range {
                GoblinState::Attack
            } else {
                classify_without_attack(distance, thresholds)
            }
        }
    }
}
