//! Animation clips: именованный набор + null-safe проигрыватель

use std::collections::HashMap;

use bevy::prelude::*;

use super::AssetError;

pub type ClipId = usize;

/// Имена клипов в .glb
pub mod clips {
    pub const IDLE: &str = "Idle";
    pub const WALK: &str = "Walk";
    pub const RUNNING: &str = "Running";
    pub const ATTACK: &str = "Attack";
    pub const DEAD: &str = "Dead";
    pub const BLOCK: &str = "Block";
}

pub const GOBLIN_CLIPS: &[&str] = &[clips::RUNNING, clips::IDLE, clips::WALK, clips::ATTACK, clips::DEAD];
pub const PLAYER_CLIPS: &[&str] = &[clips::IDLE, clips::WALK, clips::RUNNING, clips::ATTACK, clips::BLOCK];

/// Клипы загруженной модели: имя → индекс
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationSet {
    clips: HashMap<String, ClipId>,
}

impl AnimationSet {
    /// Собрать набор из загруженных клипов
    ///
    /// Набор возвращается всегда (с тем, что нашлось). Err — если каких-то
    /// обязательных клипов нет: caller логирует и продолжает без них.
    pub fn from_clips(
        asset: &str,
        available: &[String],
        required: &[&str],
    ) -> (Self, Result<(), AssetError>) {
        let clips: HashMap<String, ClipId> = available
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|name| !clips.contains_key(**name))
            .map(|name| name.to_string())
            .collect();

        let set = Self { clips };
        if missing.is_empty() {
            (set, Ok(()))
        } else {
            (
                set,
                Err(AssetError::MissingClips {
                    asset: asset.to_string(),
                    missing,
                }),
            )
        }
    }

    pub fn get(&self, name: &str) -> Option<ClipId> {
        self.clips.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Проигрыватель клипов актора
///
/// Пока модель не загружена (или клипа нет) — `play` ничего не делает.
#[derive(Component, Debug, Clone, Default)]
pub struct ClipPlayer {
    pub set: AnimationSet,
    pub current: Option<String>,
    pub looping: bool,
}

impl ClipPlayer {
    /// Переключить клип. true — если реально переключили
    pub fn play(&mut self, name: &str, looping: bool) -> bool {
        if self.current.as_deref() == Some(name) || !self.set.contains(name) {
            return false;
        }

        self.current = Some(name.to_string());
        self.looping = looping;
        true
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
    }
}
