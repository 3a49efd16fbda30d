//! Player input: сырые клавиши (InputMap) → оси и флаги (PlayerInput)
//!
//! Host пишет в `InputMap` на keydown/keyup (last write wins).
//! `refresh_player_input` раз в кадр, до locomotion.

use std::collections::HashMap;

use bevy::prelude::*;

/// Шаг сглаживания осей за кадр
pub const AXIS_LERP: f32 = 0.02;

/// Key identifier → нажата ли
#[derive(Resource, Debug, Clone, Default)]
pub struct InputMap {
    keys: HashMap<String, bool>,
}

impl InputMap {
    pub fn set(&mut self, key: &str, pressed: bool) {
        self.keys.insert(key.to_string(), pressed);
    }

    pub fn press(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: &str) {
        self.set(key, false);
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn release_all(&mut self) {
        self.keys.values_mut().for_each(|pressed| *pressed = false);
    }
}

/// Раскладка (по умолчанию AZERTY: z/q/s/d)
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: String,
    pub back: String,
    pub left: String,
    pub right: String,
    pub sprint: String,
    pub attack: String,
    pub block: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "z".into(),
            back: "s".into(),
            left: "q".into(),
            right: "d".into(),
            sprint: "Shift".into(),
            attack: "e".into(),
            block: "a".into(),
        }
    }
}

/// Состояние input для locomotion (обновляется раз в кадр)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Сглаженные оси [-1, 1] (для вектора движения)
    pub horizontal: f32,
    pub vertical: f32,

    /// Сырые оси {-1, 0, 1} (для поворота)
    pub horizontal_axis: f32,
    pub vertical_axis: f32,

    pub sprint: bool,
    pub attack: bool,
    pub block: bool,
}

impl PlayerInput {
    pub fn refresh(&mut self, map: &InputMap, bindings: &KeyBindings) {
        (self.vertical, self.vertical_axis) = smooth_axis(
            self.vertical,
            map.is_pressed(&bindings.forward),
            map.is_pressed(&bindings.back),
        );
        (self.horizontal, self.horizontal_axis) = smooth_axis(
            self.horizontal,
            map.is_pressed(&bindings.right),
            map.is_pressed(&bindings.left),
        );

        self.sprint = map.is_pressed(&bindings.sprint);
        self.attack = map.is_pressed(&bindings.attack);
        self.block = map.is_pressed(&bindings.block);
    }

    /// Есть ли направление движения на этом кадре
    pub fn is_moving(&self) -> bool {
        self.horizontal_axis != 0.0 || self.vertical_axis != 0.0
    }
}

/// (сглаженное, сырое). Positive приоритетнее negative, отпустили — сразу 0
fn smooth_axis(current: f32, positive: bool, negative: bool) -> (f32, f32) {
    let target = if positive {
        1.0
    } else if negative {
        -1.0
    } else {
        return (0.0, 0.0);
    };

    (current + (target - current) * AXIS_LERP, target)
}

/// Система: InputMap → PlayerInput
pub fn refresh_player_input(
    map: Res<InputMap>,
    bindings: Res<KeyBindings>,
    mut input: ResMut<PlayerInput>,
) {
    input.refresh(&map, &bindings);
}
