//! Arena Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: гоблины (FSM по дистанции до игрока),
//! Enemy Manager (spawn + throttled AI + победа), locomotion игрока.
//!
//! HOST BOUNDARY:
//! - ECS = game state, AI, combat rules
//! - Host engine = рендер, импорт .glb, геометрия арены, клавиатура
//! - Граница: события (assets, win/lose), `PhysicsWorld` (CollisionWorld),
//!   `InputMap`

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod assets;
pub mod combat;
pub mod components;
pub mod config;
pub mod enemies;
pub mod logger;
pub mod outcome;
pub mod physics;
pub mod player;

// Re-export базовых типов для удобства
pub use ai::{classify, next_state, GoblinBrain, GoblinState, Thresholds};
pub use assets::{
    AssetError, AssetsPlugin, ClipPlayer, EnvironmentLoadRequested, HeadlessAssetsPlugin,
    ModelLoadRequested, ModelState,
};
pub use combat::{AttackCooldown, AttackLanded, CombatPlugin, DamageDealt, EntityDied};
pub use components::*;
pub use config::{ArenaConfig, ConfigError};
pub use enemies::{EnemiesPlugin, EnemyManager};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use outcome::{AllEnemiesDefeated, GameOutcome, OutcomePlugin, PlayerDefeated};
pub use physics::{CollisionWorld, FlatGround, PhysicsWorld};
pub use player::{InputMap, PlayerInput, PlayerPlugin};

/// Порядок систем внутри кадра (Update, строго последовательно)
///
/// Damage после всех атак кадра, Outcome видит health уже после damage.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaSet {
    /// Результаты импорта моделей/арены
    Assets,
    /// InputMap → PlayerInput
    Input,
    /// Locomotion + melee игрока
    Player,
    /// Throttled AI гоблинов
    Enemies,
    /// AttackLanded → Health, смерти
    Damage,
    /// Победа/поражение
    Outcome,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Asset loader не включён: host регистрирует свой (или
/// `HeadlessAssetsPlugin`).
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: ArenaConfig,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();

        app.insert_resource(DeterministicRng::new(config.simulation.seed))
            .insert_resource(EnemyManager::new(config.simulation.ai_throttle_interval))
            .insert_resource(config);

        // Host мог поставить свой physics backend до плагина
        if !app.world().contains_resource::<PhysicsWorld>() {
            app.insert_resource(PhysicsWorld::default());
        }

        app.configure_sets(
            Update,
            (
                ArenaSet::Assets,
                ArenaSet::Input,
                ArenaSet::Player,
                ArenaSet::Enemies,
                ArenaSet::Damage,
                ArenaSet::Outcome,
            )
                .chain(),
        );

        // Подсистемы
        app.add_plugins((AssetsPlugin, PlayerPlugin, CombatPlugin, EnemiesPlugin, OutcomePlugin))
            .add_systems(Startup, setup_arena);
    }
}

/// Startup: игрок, арена, гоблины вокруг игрока
pub fn setup_arena(
    mut commands: Commands,
    config: Res<ArenaConfig>,
    mut manager: ResMut<EnemyManager>,
    mut rng: ResMut<DeterministicRng>,
    mut model_requests: EventWriter<ModelLoadRequested>,
    mut environment_requests: EventWriter<EnvironmentLoadRequested>,
) {
    environment_requests.write(EnvironmentLoadRequested {
        asset: assets::ENVIRONMENT_MODEL.to_string(),
    });

    let player = commands.spawn(player::player_bundle(&config.player)).id();
    model_requests.write(ModelLoadRequested {
        entity: player,
        asset: assets::PLAYER_MODEL.to_string(),
    });

    let player_position = config.player.spawn_position();
    manager.init(&mut commands, player_position, &config, &mut rng.rng);

    log_info(&format!("⚔️ Arena ready: player at {:?}", player_position));
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (default config + seed)
pub fn create_headless_app(seed: u64) -> App {
    let mut config = ArenaConfig::default();
    config.simulation.seed = seed;
    create_headless_app_with(config)
}

/// Headless App с заданным конфигом
///
/// Время шагает ровно на 1/frame_rate_hz за `app.update()`.
pub fn create_headless_app_with(config: ArenaConfig) -> App {
    let mut app = App::new();
    init_logger();

    let frame = Duration::from_secs_f64(1.0 / f64::from(config.simulation.frame_rate_hz.max(1.0)));

    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .add_plugins((SimulationPlugin { config }, HeadlessAssetsPlugin));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
