//! Enemy systems: throttled AI tick + victory check

use bevy::prelude::*;

use super::EnemyManager;
use crate::ai::{GoblinBrain, GoblinState};
use crate::assets::{clips, ClipPlayer, ModelState};
use crate::combat::AttackLanded;
use crate::components::{Goblin, Health, Player};
use crate::config::ArenaConfig;
use crate::outcome::AllEnemiesDefeated;
use crate::physics::{KinematicController, PhysicsWorld};
use crate::DeterministicRng;

/// Клип для состояния FSM
pub fn clip_for_state(state: GoblinState) -> &'static str {
    match state {
        GoblinState::Idle => clips::IDLE,
        GoblinState::Search => clips::WALK,
        GoblinState::Follow => clips::RUNNING,
        GoblinState::Attack => clips::ATTACK,
    }
}

/// Система: AI tick всех гоблинов (каждый N-й кадр)
///
/// Для каждого Ready и живого гоблина, в порядке спавна:
/// 1. Ground probe + gravity
/// 2. `think` (FSM + движение)
/// 3. move_with_collision, поворот к игроку
/// 4. Contact damage (тела касаются) + удар по Attack cadence
/// 5. Анимация состояния
pub fn tick_enemies(
    time: Res<Time>,
    config: Res<ArenaConfig>,
    physics: Res<PhysicsWorld>,
    mut manager: ResMut<EnemyManager>,
    mut rng: ResMut<DeterministicRng>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Goblin>)>,
    mut goblins: Query<
        (
            &Goblin,
            &mut Transform,
            &mut GoblinBrain,
            &mut KinematicController,
            &mut ClipPlayer,
            &ModelState,
            &Health,
        ),
        Without<Player>,
    >,
    mut attack_events: EventWriter<AttackLanded>,
) {
    if !manager.throttle.advance() {
        return;
    }

    let Ok((player, player_transform)) = players.single() else {
        return;
    };
    let player_position = player_transform.translation;

    // Gravity интегрируется за весь пропущенный интервал
    let delta = time.delta_secs() * manager.throttle.interval as f32;
    let now = time.elapsed_secs();
    let goblin_config = &config.goblin;

    for &entity in manager.goblins.iter() {
        let Ok((goblin, mut transform, mut brain, mut controller, mut clip_player, model, health)) =
            goblins.get_mut(entity)
        else {
            continue;
        };

        // Модель ещё грузится / мёртв — не участвует
        if !model.is_ready() || !health.is_alive() || brain.frozen {
            continue;
        }

        let mut position = transform.translation;
        let ground_hit = physics.probe_ground(
            KinematicController::probe_origin(position),
            controller.probe_length,
        );
        let vertical = controller.settle(ground_hit, &mut position, delta);

        let thought = brain.think(position, player_position, now, goblin_config, &mut rng.rng);

        transform.translation = physics.move_with_collision(position, thought.displacement + vertical);
        if let Some(yaw) = thought.facing_yaw {
            transform.rotation = Quat::from_rotation_y(yaw);
        }

        if let Some((from, to)) = thought.transition {
            crate::log(&format!(
                "👹 Goblin #{}: {} → {} (distance {:.2})",
                goblin.index,
                from.as_str(),
                to.as_str(),
                thought.distance
            ));
        }

        let touching = physics.bodies_touch(
            transform.translation,
            player_position,
            goblin_config.contact_radius,
        );
        if touching && brain.try_contact_strike() {
            attack_events.write(AttackLanded {
                attacker: entity,
                target: player,
                damage: goblin_config.damage,
            });
        }

        if thought.strike {
            attack_events.write(AttackLanded {
                attacker: entity,
                target: player,
                damage: goblin_config.damage,
            });
        }

        clip_player.play(clip_for_state(brain.state), true);
    }
}

/// Система: все гоблины мертвы → AllEnemiesDefeated (edge-triggered)
///
/// Запускается после damage resolution: видит health всех гоблинов после
/// этого кадра целиком. Пустая коллекция — не победа.
pub fn check_victory(
    mut manager: ResMut<EnemyManager>,
    healths: Query<&Health, With<Goblin>>,
    mut victory_events: EventWriter<AllEnemiesDefeated>,
) {
    if !manager.initialized || manager.goblins.is_empty() {
        return;
    }

    let all_dead = manager
        .goblins
        .iter()
        .all(|&entity| healths.get(entity).map_or(true, |health| !health.is_alive()));

    if manager.victory.update(all_dead) {
        victory_events.write(AllEnemiesDefeated {
            count: manager.goblins.len(),
        });
        crate::log_info(&format!("🏆 All {} goblin(s) defeated", manager.goblins.len()));
    }
}
