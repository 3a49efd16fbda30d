//! Player module: input → locomotion → camera
//!
//! Порядок в кадре:
//! 1. refresh_player_input (ArenaSet::Input)
//! 2. drive_player, follow_camera (ArenaSet::Player)
//! 3. player_melee (combat, после drive_player)

use bevy::prelude::*;

pub mod camera;
pub mod input;
pub mod locomotion;

pub use camera::{CameraRig, CAMERA_FOCUS_HEIGHT, CAMERA_FOLLOW_LERP};
pub use input::{refresh_player_input, InputMap, KeyBindings, PlayerInput, AXIS_LERP};
pub use locomotion::{
    camera_basis, compute_move_vector, drive_player, follow_camera, player_clip, target_yaw,
    turn_toward,
};

use crate::assets::{ClipPlayer, ModelState, PLAYER_CLIPS, PLAYER_MODEL};
use crate::components::{Health, Player, PlayerCombat};
use crate::config::PlayerConfig;
use crate::physics::{kinematic_body, KinematicController};

/// Полный набор компонентов игрока
pub fn player_bundle(config: &PlayerConfig) -> impl Bundle {
    (
        Player,
        Health::new(config.health),
        PlayerCombat::new(config.damage, config.attack_reach, config.attack_cooldown_frames),
        KinematicController::new(config.gravity, config.probe_length, 0.0),
        Transform::from_translation(config.spawn_position()),
        ModelState::loading(PLAYER_MODEL, PLAYER_CLIPS),
        ClipPlayer::default(),
        kinematic_body(0.5, 0.4),
    )
}

/// Player Plugin
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputMap>()
            .init_resource::<KeyBindings>()
            .init_resource::<PlayerInput>()
            .init_resource::<CameraRig>()
            .add_systems(Update, refresh_player_input.in_set(crate::ArenaSet::Input))
            .add_systems(
                Update,
                (drive_player, follow_camera)
                    .chain()
                    .in_set(crate::ArenaSet::Player),
            );
    }
}
