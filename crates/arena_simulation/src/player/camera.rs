//! Camera rig: yaw камеры задаёт базис движения, focus следует за игроком

use std::f32::consts::PI;

use bevy::prelude::*;

/// Доля пути до игрока за кадр
pub const CAMERA_FOLLOW_LERP: f32 = 0.4;

/// Focus над позицией игрока
pub const CAMERA_FOCUS_HEIGHT: f32 = 2.0;

/// Корень камеры (third-person, смотрит игроку в спину)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Yaw корня (π — со спины)
    pub yaw: f32,
    /// Точка, на которую смотрит камера
    pub focus: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: PI,
            focus: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Сдвинуть focus к игроку (+ высота)
    pub fn follow(&mut self, player_position: Vec3) {
        let target = player_position + Vec3::Y * CAMERA_FOCUS_HEIGHT;
        self.focus = self.focus.lerp(target, CAMERA_FOLLOW_LERP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_converges() {
        let mut rig = CameraRig::default();
        let player = Vec3::new(10.0, 0.0, -4.0);

        rig.follow(player);
        assert!((rig.focus - Vec3::new(4.0, 0.8, -1.6)).length() < 1e-5);

        for _ in 0..60 {
            rig.follow(player);
        }
        assert!((rig.focus - Vec3::new(10.0, 2.0, -4.0)).length() < 1e-3);
    }
}
