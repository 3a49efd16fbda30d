//! EnemyManager — владеет гоблинами, throttled AI tick, victory latch
//!
//! Коллекция фиксируется в `init` и больше не меняется: мёртвые гоблины
//! остаются в ней (frozen), никто не despawn'ится.

use bevy::prelude::*;
use rand::Rng;

use super::spawn::{spawn_count, spawn_points};
use crate::ai::GoblinBrain;
use crate::assets::{ClipPlayer, ModelLoadRequested, ModelState, GOBLIN_CLIPS, GOBLIN_MODEL};
use crate::components::{Goblin, Health};
use crate::config::ArenaConfig;
use crate::physics::{kinematic_body, KinematicController};

/// Пропускает AI: `advance` возвращает true на каждом N-м вызове
///
/// За `frames` вызовов ровно floor(frames / N) раз true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct FrameThrottle {
    pub interval: u32,
    pub frames: u64,
}

impl FrameThrottle {
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
        }
    }

    pub fn advance(&mut self) -> bool {
        self.frames += 1;
        self.frames % u64::from(self.interval) == 0
    }

    /// Сколько AI тиков уже было
    pub fn ticks(&self) -> u64 {
        self.frames / u64::from(self.interval)
    }
}

/// Edge-triggered флаг: true только на переходе false → true
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    active: bool,
}

impl EdgeTrigger {
    pub fn update(&mut self, condition: bool) -> bool {
        let rising = condition && !self.active;
        self.active = condition;
        rising
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Resource, Debug, Clone)]
pub struct EnemyManager {
    /// Гоблины в порядке спавна
    pub goblins: Vec<Entity>,
    pub throttle: FrameThrottle,
    pub victory: EdgeTrigger,
    pub initialized: bool,
}

impl EnemyManager {
    pub fn new(throttle_interval: u32) -> Self {
        Self {
            goblins: Vec::new(),
            throttle: FrameThrottle::new(throttle_interval),
            victory: EdgeTrigger::default(),
            initialized: false,
        }
    }

    /// Заспавнить гоблинов вокруг игрока
    ///
    /// Количество случайное в [min_enemies, max_enemies], позиции на кольце
    /// [inner_radius, outer_radius]. Повторный вызов — no-op (коллекция
    /// фиксирована на всю сессию). Возвращает размер коллекции.
    pub fn init<R: Rng + ?Sized>(
        &mut self,
        commands: &mut Commands,
        player_position: Vec3,
        config: &ArenaConfig,
        rng: &mut R,
    ) -> usize {
        if self.initialized {
            crate::log_warning("EnemyManager::init called twice, ignored");
            return self.goblins.len();
        }

        let spawn = &config.spawn;
        let count = spawn_count(spawn.min_enemies, spawn.max_enemies, rng);
        let points = spawn_points(
            player_position,
            count as usize,
            spawn.inner_radius,
            spawn.outer_radius,
            rng,
        );

        let ai_tick_hz = config.simulation.ai_tick_hz();
        for (index, point) in points.into_iter().enumerate() {
            let entity = commands
                .spawn(goblin_bundle(index as u32, point, config, ai_tick_hz))
                .id();
            commands.send_event(ModelLoadRequested {
                entity,
                asset: GOBLIN_MODEL.to_string(),
            });
            self.goblins.push(entity);
        }

        self.initialized = true;
        crate::log_info(&format!(
            "👹 EnemyManager: spawned {} goblin(s) around {:?}",
            self.goblins.len(),
            player_position
        ));

        self.goblins.len()
    }
}

/// Полный набор компонентов гоблина
pub fn goblin_bundle(index: u32, position: Vec3, config: &ArenaConfig, ai_tick_hz: f32) -> impl Bundle {
    let goblin = &config.goblin;
    (
        Goblin { index },
        Health::new(goblin.health),
        GoblinBrain::new(position, goblin, ai_tick_hz),
        KinematicController::new(goblin.gravity, goblin.probe_length, goblin.ground_offset),
        Transform::from_translation(position),
        ModelState::loading(GOBLIN_MODEL, GOBLIN_CLIPS),
        ClipPlayer::default(),
        // Ellipsoid 0.25 × 0.5 × 0.25
        kinematic_body(0.25, 0.25),
    )
}
