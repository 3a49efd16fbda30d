//! Kinematic контроллер для гоблинов/игрока
//!
//! Архитектура:
//! - Ground probe делегирован `CollisionWorld` (raycast host engine)
//! - Gravity интегрируем сами: постоянное ускорение, сброс при касании пола
//! - Итоговое смещение применяет `CollisionWorld::move_with_collision`

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Высота, с которой пускаем луч вниз (над позицией актора)
pub const PROBE_LIFT: f32 = 0.5;

/// Kinematic контроллер компонент
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicController {
    /// Ускорение гравитации (units/s²), отрицательное
    pub gravity: f32,
    /// Накопленная вертикальная скорость (смещение за шаг)
    pub fall_speed: f32,
    /// На земле ли персонаж
    pub grounded: bool,
    /// Длина луча ground probe
    pub probe_length: f32,
    /// Подъём над точкой контакта (чтобы не проваливаться)
    pub ground_offset: f32,
}

impl Default for KinematicController {
    fn default() -> Self {
        Self {
            gravity: -10.0,
            fall_speed: 0.0,
            grounded: false,
            probe_length: 2.0,
            ground_offset: 0.0,
        }
    }
}

impl KinematicController {
    pub fn new(gravity: f32, probe_length: f32, ground_offset: f32) -> Self {
        Self {
            gravity,
            probe_length,
            ground_offset,
            ..default()
        }
    }

    /// Точка старта ground probe для позиции актора
    pub fn probe_origin(position: Vec3) -> Vec3 {
        position + Vec3::Y * PROBE_LIFT
    }

    /// Применить результат ground probe
    ///
    /// Hit → ставим на пол, сбрасываем gravity. Miss → не grounded (это не
    /// ошибка), gravity продолжает накапливаться.
    /// Возвращает вертикальное смещение для этого шага.
    pub fn settle(&mut self, ground_hit: Option<Vec3>, position: &mut Vec3, delta: f32) -> Vec3 {
        match ground_hit {
            Some(contact) => {
                position.y = contact.y + self.ground_offset;
                self.fall_speed = 0.0;
                self.grounded = true;
            }
            None => {
                self.fall_speed += self.gravity * delta;
                self.grounded = false;
            }
        }

        Vec3::Y * self.fall_speed
    }
}

/// Kinematic тело для host physics backend (rapier)
///
/// Симуляция двигает Transform сама, rapier нужен host'у для коллизий с
/// геометрией арены.
pub fn kinematic_body(half_height: f32, radius: f32) -> impl Bundle {
    (
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(half_height, radius),
    )
}
