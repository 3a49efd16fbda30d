//! Сценарии гоблина: приближение игрока 30 → 10 → 4 → 1 → 25 и смерть

use arena_simulation::ai::{GoblinBrain, GoblinState};
use arena_simulation::components::{DamageOutcome, Health};
use arena_simulation::config::{ArenaConfig, GoblinConfig};
use bevy::prelude::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

struct Scenario {
    brain: GoblinBrain,
    config: GoblinConfig,
    rng: ChaCha8Rng,
    tick: u32,
    tick_hz: f32,
}

impl Scenario {
    fn new() -> Self {
        let config = ArenaConfig::default();
        let tick_hz = config.simulation.ai_tick_hz();
        let home = Vec3::new(30.0, 0.0, 0.0);

        Self {
            brain: GoblinBrain::new(home, &config.goblin, tick_hz),
            config: config.goblin,
            rng: ChaCha8Rng::seed_from_u64(42),
            tick: 0,
            tick_hz,
        }
    }

    /// Один AI тик с игроком в начале координат, гоблином на дистанции `distance`.
    /// Возвращает true если гоблин ударил.
    fn step(&mut self, distance: f32) -> bool {
        let now = self.tick as f32 / self.tick_hz;
        self.tick += 1;
        let thought = self.brain.think(
            Vec3::new(distance, 0.0, 0.0),
            Vec3::ZERO,
            now,
            &self.config,
            &mut self.rng,
        );
        thought.strike
    }
}

#[test]
fn test_approach_and_retreat() {
    let mut scenario = Scenario::new();

    scenario.step(30.0);
    assert_eq!(scenario.brain.state, GoblinState::Idle);

    scenario.step(10.0);
    assert_eq!(scenario.brain.state, GoblinState::Search);

    scenario.step(4.0);
    assert_eq!(scenario.brain.state, GoblinState::Follow);

    let struck = scenario.step(1.0);
    assert_eq!(scenario.brain.state, GoblinState::Attack);
    assert!(!struck, "no strike on the tick Attack is entered");

    // Periodic damage: 1.57s × 30Hz = 47 тиков (включая тик входа)
    let mut strikes = Vec::new();
    for tick in 1..=100 {
        if scenario.step(1.0) {
            strikes.push(tick);
        }
    }
    assert_eq!(strikes, vec![46, 93]);
    assert_eq!(scenario.brain.state, GoblinState::Attack);

    scenario.step(25.0);
    assert_eq!(scenario.brain.state, GoblinState::Idle);
    assert!(!scenario.brain.attack_cooldown.armed, "cadence cleared on leaving Attack");
}

#[test]
fn test_attack_damage_per_interval_matches_config() {
    let mut scenario = Scenario::new();
    scenario.step(4.0);
    scenario.step(1.0);

    let interval = scenario.brain.attack_cooldown.interval_ticks;
    assert_eq!(interval, 47);

    let strikes = (0..interval * 4).filter(|_| scenario.step(1.0)).count();
    assert_eq!(strikes, 4);
}

#[test]
fn test_dead_goblin_stops_attacking() {
    let mut scenario = Scenario::new();
    let mut health = Health::new(scenario.config.health);
    assert_eq!(health.current, 50);

    scenario.step(4.0);
    scenario.step(1.0);

    assert_eq!(health.take_damage(20), DamageOutcome::Hurt);
    assert_eq!(health.take_damage(20), DamageOutcome::Hurt);
    assert_eq!(health.take_damage(20), DamageOutcome::Killed);
    assert_eq!(health.current, 0);
    scenario.brain.freeze();

    // Повторный урон не повторяет смерть
    assert_eq!(health.take_damage(20), DamageOutcome::AlreadyDead);
    assert_eq!(health.current, 0);

    let strikes = (0..500).filter(|_| scenario.step(1.0)).count();
    assert_eq!(strikes, 0);
    assert_eq!(scenario.brain.state, GoblinState::Attack, "state frozen at death");
    assert!(!scenario.brain.try_contact_strike());
}
