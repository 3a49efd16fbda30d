//! GoblinBrain — per-actor состояние FSM + вычисление движения.
//!
//! `think` ничего не знает про ECS/engine: на вход позиции и время,
//! на выход `Thought` (смещение, поворот, удар). Применяет результат
//! система `tick_enemies` через `CollisionWorld`.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{next_state, GoblinState};
use crate::combat::AttackCooldown;
use crate::config::GoblinConfig;

/// Векторы короче — считаем нулевыми (гасим дрожание от почти-компенсирующихся входов)
pub const MOVE_EPSILON: f32 = 0.001;

/// Мозг гоблина
#[derive(Component, Debug, Clone)]
pub struct GoblinBrain {
    pub state: GoblinState,

    /// Смещение за текущий тик (normalized × speed)
    pub move_direction: Vec3,

    /// Текущая wander точка (Idle)
    pub target_position: Vec3,

    /// Точка спавна — центр wander области
    pub home: Vec3,

    /// Скорость текущего состояния (normal/sprint)
    pub speed: f32,

    /// Elapsed time (сек), после которого выбираем новую wander точку
    pub next_wander_at: f32,

    /// Cadence ударов в Attack
    pub attack_cooldown: AttackCooldown,

    /// Пауза между contact-ударами (тела касаются)
    pub contact_cooldown: AttackCooldown,

    /// Мёртв: никаких переходов/атак/анимаций
    pub frozen: bool,
}

/// Результат одного тика мозга
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thought {
    /// Горизонтальное смещение (gravity добавляет KinematicController)
    pub displacement: Vec3,

    /// Yaw "лицом к игроку"; None — игрок ровно над/под нами
    pub facing_yaw: Option<f32>,

    /// Attack cadence сработала — нанести damage игроку
    pub strike: bool,

    /// (from, to) если состояние сменилось
    pub transition: Option<(GoblinState, GoblinState)>,

    /// Дистанция до игрока в этом тике (derived, не хранится)
    pub distance: f32,
}

impl GoblinBrain {
    pub fn new(home: Vec3, config: &GoblinConfig, ai_tick_hz: f32) -> Self {
        Self {
            state: GoblinState::Idle,
            move_direction: Vec3::ZERO,
            target_position: home,
            home,
            speed: config.normal_speed,
            next_wander_at: 0.0,
            attack_cooldown: AttackCooldown::from_secs(config.attack_interval_secs, ai_tick_hz),
            contact_cooldown: AttackCooldown::from_secs(config.attack_interval_secs, ai_tick_hz),
            frozen: false,
        }
    }

    /// Один AI тик
    ///
    /// Порядок: distance → transition → cooldown bookkeeping → движение
    /// нового состояния → нормализация → поворот к игроку.
    pub fn think<R: Rng + ?Sized>(
        &mut self,
        position: Vec3,
        player_position: Vec3,
        now: f32,
        config: &GoblinConfig,
        rng: &mut R,
    ) -> Thought {
        if self.frozen {
            return Thought::default();
        }

        let thresholds = config.thresholds();
        let distance = position.distance(player_position);

        let previous = self.state;
        let state = next_state(previous, distance, &thresholds);
        let transition = (state != previous).then_some((previous, state));

        if transition.is_some() {
            if previous == GoblinState::Attack {
                self.attack_cooldown.clear();
            }
            if state == GoblinState::Attack {
                self.attack_cooldown.arm();
            }
            self.state = state;
        }

        self.contact_cooldown.cool_down();

        let mut strike = false;
        let heading = match state {
            GoblinState::Idle => {
                if now >= self.next_wander_at {
                    let extent = config.wander_extent;
                    self.target_position = self.home
                        + Vec3::new(
                            rng.gen_range(-extent..=extent),
                            0.0,
                            rng.gen_range(-extent..=extent),
                        );
                    self.next_wander_at = now + config.wander_interval_secs;
                }
                self.speed = config.normal_speed;
                self.target_position - position
            }

            GoblinState::Search => {
                let jitter = config.search_jitter;
                self.speed = config.normal_speed;
                player_position - position
                    + Vec3::new(
                        rng.gen_range(-jitter..=jitter),
                        0.0,
                        rng.gen_range(-jitter..=jitter),
                    )
            }

            GoblinState::Follow => {
                self.speed = config.sprint_speed;
                player_position - position
            }

            GoblinState::Attack => {
                // Стоим на месте, бьём по cadence если игрок всё ещё в радиусе
                strike = self.attack_cooldown.tick() && distance <= thresholds.attack_range;
                Vec3::ZERO
            }
        };

        self.move_direction = steer(heading, self.speed);

        Thought {
            displacement: self.move_direction,
            facing_yaw: facing_yaw(position, player_position),
            strike,
            transition,
            distance,
        }
    }

    /// Contact damage: true если пауза истекла (и запускает новую)
    pub fn try_contact_strike(&mut self) -> bool {
        if self.frozen || !self.contact_cooldown.is_ready() {
            return false;
        }
        self.contact_cooldown.trigger();
        true
    }

    /// Смерть: замораживаем FSM и гасим все cooldown'ы
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.move_direction = Vec3::ZERO;
        self.attack_cooldown.clear();
        self.contact_cooldown.clear();
    }
}

/// Горизонтальный heading → смещение длиной `speed` (или ровно ноль)
pub fn steer(heading: Vec3, speed: f32) -> Vec3 {
    let flat = Vec3::new(heading.x, 0.0, heading.z);
    if flat.length() < MOVE_EPSILON {
        Vec3::ZERO
    } else {
        flat.normalize() * speed
    }
}

/// Yaw, при котором локальный +Z смотрит из `from` на `to` в горизонтальной плоскости
///
/// Facing не зависит от направления движения: гоблин смотрит на игрока
/// даже когда идёт к wander точке.
pub fn facing_yaw(from: Vec3, to: Vec3) -> Option<f32> {
    let delta = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if delta.length() < MOVE_EPSILON {
        None
    } else {
        Some(delta.x.atan2(delta.z))
    }
}
