//! Tests for GoblinBrain (movement, cadence, freeze).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::brain::{facing_yaw, steer, GoblinBrain};
    use super::super::fsm::GoblinState;
    use crate::config::GoblinConfig;

    const AI_HZ: f32 = 30.0;

    fn brain_at(position: Vec3) -> (GoblinBrain, GoblinConfig, ChaCha8Rng) {
        let config = GoblinConfig::default();
        let brain = GoblinBrain::new(position, &config, AI_HZ);
        (brain, config, ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn test_steer_scales_to_speed() {
        let step = steer(Vec3::new(3.0, 5.0, 4.0), 0.2);
        assert!((step.length() - 0.2).abs() < 1e-5, "len = {}", step.length());
        assert_eq!(step.y, 0.0);
    }

    #[test]
    fn test_steer_dead_zone_is_exact_zero() {
        assert_eq!(steer(Vec3::new(0.0005, 0.0, 0.0002), 0.2), Vec3::ZERO);
        // Вертикаль не считается движением
        assert_eq!(steer(Vec3::new(0.0, 10.0, 0.0), 0.2), Vec3::ZERO);
    }

    #[test]
    fn test_facing_yaw_points_local_z_at_target() {
        let from = Vec3::new(1.0, 0.0, 1.0);
        let to = Vec3::new(4.0, 2.0, 5.0);
        let yaw = facing_yaw(from, to).expect("horizontal offset");

        let forward = Quat::from_rotation_y(yaw) * Vec3::Z;
        let expected = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((forward - expected).length() < 1e-5, "forward = {:?}", forward);

        assert!(facing_yaw(from, from + Vec3::Y).is_none());
    }

    #[test]
    fn test_follow_sprints_straight_at_player() {
        let (mut brain, config, mut rng) = brain_at(Vec3::ZERO);
        brain.state = GoblinState::Follow;

        let thought = brain.think(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 0.0, &config, &mut rng);

        assert_eq!(brain.state, GoblinState::Follow);
        assert!((thought.displacement - Vec3::new(0.0, 0.0, config.sprint_speed)).length() < 1e-6);
        assert!(thought.transition.is_none());
    }

    #[test]
    fn test_search_moves_at_normal_speed() {
        let (mut brain, config, mut rng) = brain_at(Vec3::ZERO);

        let thought = brain.think(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.0, &config, &mut rng);

        assert_eq!(brain.state, GoblinState::Search);
        assert_eq!(thought.transition, Some((GoblinState::Idle, GoblinState::Search)));
        assert!((thought.displacement.length() - config.normal_speed).abs() < 1e-5);
        // Jitter ±2 при дистанции 10 — всё равно в сторону игрока
        assert!(thought.displacement.x > 0.0);
    }

    #[test]
    fn test_idle_wander_retargets_every_interval() {
        let home = Vec3::new(50.0, 0.0, 50.0);
        let (mut brain, config, mut rng) = brain_at(home);
        let far_player = Vec3::new(-100.0, 0.0, -100.0);

        let thought = brain.think(home, far_player, 0.0, &config, &mut rng);
        let first = brain.target_position;
        // Idle бродит с normal_speed в сторону wander точки, не к игроку
        assert_eq!(brain.state, GoblinState::Idle);
        assert!((thought.displacement.length() - config.normal_speed).abs() < 1e-5);
        assert!(thought.displacement.dot(first - home) > 0.0);
        assert!((first.x - home.x).abs() <= config.wander_extent);
        assert!((first.z - home.z).abs() <= config.wander_extent);
        assert_eq!(brain.next_wander_at, config.wander_interval_secs);

        // До истечения 5 сек цель не меняется
        brain.think(home, far_player, 4.9, &config, &mut rng);
        assert_eq!(brain.target_position, first);

        brain.think(home, far_player, 5.0, &config, &mut rng);
        assert_ne!(brain.target_position, first);
        assert_eq!(brain.next_wander_at, 10.0);
    }

    #[test]
    fn test_attack_stands_still_and_strikes_on_cadence() {
        let (mut brain, config, mut rng) = brain_at(Vec3::ZERO);
        brain.state = GoblinState::Follow;
        let player = Vec3::new(1.0, 0.0, 0.0);

        let interval = brain.attack_cooldown.interval_ticks; // 47 @ 30Hz
        let mut strikes = Vec::new();
        for tick in 1..=interval * 2 {
            let thought = brain.think(Vec3::ZERO, player, 0.0, &config, &mut rng);
            assert_eq!(thought.displacement, Vec3::ZERO);
            if thought.strike {
                strikes.push(tick);
            }
        }

        assert_eq!(brain.state, GoblinState::Attack);
        assert_eq!(strikes, vec![interval, interval * 2]);
    }

    #[test]
    fn test_leaving_attack_clears_cooldown() {
        let (mut brain, config, mut rng) = brain_at(Vec3::ZERO);
        brain.state = GoblinState::Follow;

        brain.think(Vec3::ZERO, Vec3::X, 0.0, &config, &mut rng);
        assert!(brain.attack_cooldown.armed);

        brain.think(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 0.0, &config, &mut rng);
        assert_eq!(brain.state, GoblinState::Follow);
        assert!(!brain.attack_cooldown.armed);
    }

    #[test]
    fn test_frozen_brain_is_noop() {
        let (mut brain, config, mut rng) = brain_at(Vec3::ZERO);
        brain.state = GoblinState::Follow;
        brain.think(Vec3::ZERO, Vec3::X, 0.0, &config, &mut rng);
        brain.freeze();

        for _ in 0..200 {
            let thought = brain.think(Vec3::ZERO, Vec3::X, 0.0, &config, &mut rng);
            assert!(!thought.strike);
            assert_eq!(thought.displacement, Vec3::ZERO);
        }
        assert_eq!(brain.state, GoblinState::Attack); // состояние заморожено
        assert!(!brain.try_contact_strike());
    }

    #[test]
    fn test_contact_strike_is_paced() {
        let (mut brain, config, mut rng) = brain_at(Vec3::ZERO);
        let interval = brain.contact_cooldown.interval_ticks;

        assert!(brain.try_contact_strike());
        assert!(!brain.try_contact_strike());

        for _ in 0..interval {
            brain.think(Vec3::ZERO, Vec3::new(40.0, 0.0, 0.0), 0.0, &config, &mut rng);
        }
        assert!(brain.try_contact_strike());
    }
}
