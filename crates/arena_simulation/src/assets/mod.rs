//! Asset loading boundary (единственная async граница)
//!
//! Архитектура:
//! - Симуляция пишет `ModelLoadRequested` / `EnvironmentLoadRequested`
//! - Host engine импортирует .glb асинхронно и отвечает `ModelLoaded` /
//!   `EnvironmentLoaded`
//! - Пока модель не Ready — актор не участвует в AI тиках
//!
//! Headless режим: `HeadlessAssetsPlugin` отвечает сразу же (тот же кадр).

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use thiserror::Error;

pub mod animation;

pub use animation::{clips, AnimationSet, ClipId, ClipPlayer, GOBLIN_CLIPS, PLAYER_CLIPS};

pub const GOBLIN_MODEL: &str = "models/goblin.glb";
pub const PLAYER_MODEL: &str = "models/player.glb";
pub const ENVIRONMENT_MODEL: &str = "models/coliseum.glb";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("{asset}: missing animation clips {missing:?}")]
    MissingClips { asset: String, missing: Vec<String> },

    #[error("failed to import {asset}: {reason}")]
    ImportFailed { asset: String, reason: String },
}

/// Результат импорта модели (handles host engine)
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    /// Root transform handle
    pub root: u64,
    /// Имена child meshes
    pub meshes: Vec<String>,
    /// Имена animation clips
    pub clips: Vec<String>,
}

/// Готовность модели актора
#[derive(Component, Debug, Clone, PartialEq)]
pub enum ModelState {
    Loading {
        asset: String,
        required_clips: &'static [&'static str],
    },
    Ready,
    /// Импорт упал — актор остаётся без модели (не ретраим)
    Failed,
}

impl ModelState {
    pub fn loading(asset: &str, required_clips: &'static [&'static str]) -> Self {
        Self::Loading {
            asset: asset.to_string(),
            required_clips,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready)
    }
}

#[derive(Event, Debug, Clone)]
pub struct ModelLoadRequested {
    pub entity: Entity,
    pub asset: String,
}

#[derive(Event, Debug, Clone)]
pub struct ModelLoaded {
    pub entity: Entity,
    pub result: Result<LoadedModel, AssetError>,
}

#[derive(Event, Debug, Clone)]
pub struct EnvironmentLoadRequested {
    pub asset: String,
}

#[derive(Event, Debug, Clone)]
pub struct EnvironmentLoaded {
    pub asset: String,
    pub result: Result<LoadedModel, AssetError>,
}

/// Арена (колизей). None — ещё грузится или импорт упал
#[derive(Resource, Debug, Clone, Default)]
pub struct Environment {
    pub model: Option<LoadedModel>,
}

/// Система: применить результаты импорта моделей
///
/// - Ok + все клипы → Ready
/// - Ok + часть клипов отсутствует → log_error, Ready (без этих анимаций)
/// - Err → log_error, Failed
pub fn apply_model_loads(
    mut loaded_events: EventReader<ModelLoaded>,
    mut models: Query<(&mut ModelState, &mut ClipPlayer)>,
) {
    for event in loaded_events.read() {
        let Ok((mut state, mut player)) = models.get_mut(event.entity) else {
            crate::log_warning(&format!("ModelLoaded for unknown entity {:?}", event.entity));
            continue;
        };

        let (asset, required_clips) = match state.as_ref() {
            ModelState::Loading { asset, required_clips } => (asset.clone(), *required_clips),
            _ => {
                crate::log_warning(&format!("ModelLoaded twice for {:?}, ignored", event.entity));
                continue;
            }
        };

        match &event.result {
            Ok(model) => {
                let (set, clip_check) = AnimationSet::from_clips(&asset, &model.clips, required_clips);
                if let Err(err) = clip_check {
                    crate::log_error(&format!("{:?}: {}", event.entity, err));
                }
                player.set = set;
                *state = ModelState::Ready;
                crate::log(&format!("📦 {:?} model ready ({} clips)", event.entity, model.clips.len()));
            }
            Err(err) => {
                crate::log_error(&format!("{:?}: {}", event.entity, err));
                *state = ModelState::Failed;
            }
        }
    }
}

/// Система: результат импорта арены
pub fn apply_environment_loads(
    mut loaded_events: EventReader<EnvironmentLoaded>,
    mut environment: ResMut<Environment>,
) {
    for event in loaded_events.read() {
        match &event.result {
            Ok(model) => {
                crate::log_info(&format!(
                    "🏟️ Environment {} loaded ({} meshes)",
                    event.asset,
                    model.meshes.len()
                ));
                environment.model = Some(model.clone());
            }
            Err(err) => {
                // Арена остаётся unset — дальше это precondition violation caller'а
                crate::log_error(&format!("Environment import failed: {}", err));
                environment.model = None;
            }
        }
    }
}

/// Assets Plugin — события + применение результатов
pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ModelLoadRequested>()
            .add_event::<ModelLoaded>()
            .add_event::<EnvironmentLoadRequested>()
            .add_event::<EnvironmentLoaded>()
            .init_resource::<Environment>()
            .add_systems(
                Update,
                (apply_environment_loads, apply_model_loads).in_set(crate::ArenaSet::Assets),
            );
    }
}

/// Каталог headless загрузчика
///
/// По умолчанию каждая модель отдаёт полный набор клипов.
/// `clip_overrides` / `failing` — для тестов деградации.
#[derive(Resource, Debug, Clone, Default)]
pub struct HeadlessCatalog {
    pub clip_overrides: HashMap<String, Vec<String>>,
    pub failing: HashSet<String>,
}

impl HeadlessCatalog {
    fn import(&self, asset: &str, handle: u64) -> Result<LoadedModel, AssetError> {
        if self.failing.contains(asset) {
            return Err(AssetError::ImportFailed {
                asset: asset.to_string(),
                reason: "headless catalog marks asset as failing".into(),
            });
        }

        let clips = match self.clip_overrides.get(asset) {
            Some(clips) => clips.clone(),
            None => default_clips(asset),
        };

        Ok(LoadedModel {
            root: handle,
            meshes: vec![asset.to_string()],
            clips,
        })
    }
}

fn default_clips(asset: &str) -> Vec<String> {
    let list: &[&str] = match asset {
        GOBLIN_MODEL => GOBLIN_CLIPS,
        PLAYER_MODEL => PLAYER_CLIPS,
        _ => &[],
    };
    list.iter().map(|name| name.to_string()).collect()
}

/// Система: headless "импорт" — отвечаем в том же кадре
pub fn answer_load_requests(
    catalog: Res<HeadlessCatalog>,
    mut model_requests: EventReader<ModelLoadRequested>,
    mut env_requests: EventReader<EnvironmentLoadRequested>,
    mut model_loaded: EventWriter<ModelLoaded>,
    mut env_loaded: EventWriter<EnvironmentLoaded>,
) {
    for request in model_requests.read() {
        model_loaded.write(ModelLoaded {
            entity: request.entity,
            result: catalog.import(&request.asset, request.entity.to_bits()),
        });
    }

    for request in env_requests.read() {
        env_loaded.write(EnvironmentLoaded {
            asset: request.asset.clone(),
            result: catalog.import(&request.asset, 0),
        });
    }
}

/// Headless заглушка host asset loader'а
pub struct HeadlessAssetsPlugin;

impl Plugin for HeadlessAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeadlessCatalog>().add_systems(
            Update,
            answer_load_requests
                .in_set(crate::ArenaSet::Assets)
                .before(apply_model_loads)
                .before(apply_environment_loads),
        );
    }
}
