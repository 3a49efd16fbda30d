//! Player locomotion: camera-relative движение + gravity + поворот
//!
//! Тот же kinematic контракт что у гоблинов: ground probe и
//! move-with-collision делегированы `CollisionWorld`.

use bevy::prelude::*;

use super::{CameraRig, PlayerInput};
use crate::ai::steer;
use crate::assets::{clips, ClipPlayer, ModelState};
use crate::components::{Dead, Player};
use crate::config::{ArenaConfig, PlayerConfig};
use crate::physics::{KinematicController, PhysicsWorld};

/// (forward, right) камеры в горизонтальной плоскости
///
/// Right-handed: при yaw = 0 forward = +Z, right = -X.
pub fn camera_basis(camera_yaw: f32) -> (Vec3, Vec3) {
    let rotation = Quat::from_rotation_y(camera_yaw);
    (rotation * Vec3::Z, rotation * Vec3::NEG_X)
}

/// Смещение игрока за кадр
///
/// forward·vertical + right·horizontal, нормализовано и умножено на
/// normal/sprint скорость. Короче MOVE_EPSILON — ровно ноль.
pub fn compute_move_vector(
    horizontal: f32,
    vertical: f32,
    camera_yaw: f32,
    sprinting: bool,
    config: &PlayerConfig,
) -> Vec3 {
    let (forward, right) = camera_basis(camera_yaw);
    let speed = if sprinting {
        config.sprint_speed
    } else {
        config.normal_speed
    };

    steer(forward * vertical + right * horizontal, speed)
}

/// Yaw, в который поворачивается игрок при данных осях
///
/// Совпадает с направлением `compute_move_vector` для тех же осей.
pub fn target_yaw(horizontal_axis: f32, vertical_axis: f32, camera_yaw: f32) -> f32 {
    camera_yaw - horizontal_axis.atan2(vertical_axis)
}

/// Slerp к целевому yaw, доля `turn_rate × dt` (не больше 1)
pub fn turn_toward(current: Quat, yaw: f32, turn_rate: f32, delta: f32) -> Quat {
    let t = (turn_rate * delta).clamp(0.0, 1.0);
    current.slerp(Quat::from_rotation_y(yaw), t)
}

/// Клип игрока: движение приоритетнее атаки, атака приоритетнее блока
///
/// Возвращает (клип, looping).
pub fn player_clip(input: &PlayerInput) -> (&'static str, bool) {
    if input.is_moving() {
        if input.sprint {
            (clips::RUNNING, true)
        } else {
            (clips::WALK, true)
        }
    } else if input.attack {
        (clips::ATTACK, false)
    } else if input.block {
        (clips::BLOCK, false)
    } else {
        (clips::IDLE, true)
    }
}

/// Система: locomotion игрока (каждый кадр)
///
/// input → move vector + поворот → ground probe + gravity →
/// move_with_collision → анимация
pub fn drive_player(
    time: Res<Time>,
    config: Res<ArenaConfig>,
    physics: Res<PhysicsWorld>,
    input: Res<PlayerInput>,
    rig: Res<CameraRig>,
    mut players: Query<
        (&mut Transform, &mut KinematicController, &mut ClipPlayer, &ModelState),
        (With<Player>, Without<Dead>),
    >,
) {
    let Ok((mut transform, mut controller, mut clip_player, model)) = players.single_mut() else {
        return;
    };

    if !model.is_ready() {
        return;
    }

    let delta = time.delta_secs();
    let player_config = &config.player;

    let displacement = compute_move_vector(
        input.horizontal,
        input.vertical,
        rig.yaw,
        input.sprint,
        player_config,
    );

    if displacement != Vec3::ZERO {
        let yaw = target_yaw(input.horizontal_axis, input.vertical_axis, rig.yaw);
        transform.rotation = turn_toward(transform.rotation, yaw, player_config.turn_rate, delta);
    }

    let mut position = transform.translation;
    let ground_hit = physics.probe_ground(
        KinematicController::probe_origin(position),
        controller.probe_length,
    );
    let vertical = controller.settle(ground_hit, &mut position, delta);
    transform.translation = physics.move_with_collision(position, displacement + vertical);

    let (clip, looping) = player_clip(&input);
    clip_player.play(clip, looping);
}

/// Система: камера следует за игроком (после locomotion)
pub fn follow_camera(mut rig: ResMut<CameraRig>, players: Query<&Transform, With<Player>>) {
    if let Ok(transform) = players.single() {
        rig.follow(transform.translation);
    }
}
