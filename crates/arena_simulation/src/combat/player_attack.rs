//! Player melee: удар топором по гоблинам перед игроком

use bevy::prelude::*;

use super::AttackLanded;
use crate::components::{Dead, Goblin, Health, Player, PlayerCombat};
use crate::player::PlayerInput;

/// Попадает ли удар из `origin` (смотрит в `forward`) по цели в `target`
///
/// Цель в радиусе `reach` и в передней полуплоскости (горизонтально).
pub fn in_swing_arc(origin: Vec3, forward: Vec3, target: Vec3, reach: f32) -> bool {
    let offset = Vec3::new(target.x - origin.x, 0.0, target.z - origin.z);
    if offset.length() > reach {
        return false;
    }

    let facing = Vec3::new(forward.x, 0.0, forward.z);
    offset.dot(facing) >= 0.0
}

/// Система: block флаг + swing на rising edge attack
pub fn player_melee(
    input: Res<PlayerInput>,
    mut players: Query<(Entity, &Transform, &mut PlayerCombat), (With<Player>, Without<Dead>)>,
    goblins: Query<(Entity, &Transform, &Health), (With<Goblin>, Without<Player>)>,
    mut attack_events: EventWriter<AttackLanded>,
) {
    let Ok((player, transform, mut combat)) = players.single_mut() else {
        return;
    };

    combat.blocking = input.block;

    // Во время блока не бьём (но rising edge всё равно отслеживаем)
    if !combat.begin_swing(input.attack) || combat.blocking {
        return;
    }

    let forward = transform.rotation * Vec3::Z;
    let mut hits = 0;

    for (goblin, goblin_transform, health) in goblins.iter() {
        if !health.is_alive() {
            continue;
        }
        if in_swing_arc(transform.translation, forward, goblin_transform.translation, combat.reach) {
            attack_events.write(AttackLanded {
                attacker: player,
                target: goblin,
                damage: combat.damage,
            });
            hits += 1;
        }
    }

    crate::log(&format!("🪓 Player swing: {} hit(s)", hits));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swing_arc_front_only() {
        let origin = Vec3::ZERO;
        let forward = Vec3::Z;

        assert!(in_swing_arc(origin, forward, Vec3::new(0.0, 0.0, 1.5), 2.0));
        assert!(in_swing_arc(origin, forward, Vec3::new(1.5, 0.0, 0.0), 2.0)); // сбоку (граница)
        assert!(!in_swing_arc(origin, forward, Vec3::new(0.0, 0.0, -1.0), 2.0)); // сзади
        assert!(!in_swing_arc(origin, forward, Vec3::new(0.0, 0.0, 2.5), 2.0)); // далеко
    }

    #[test]
    fn test_swing_arc_ignores_height() {
        assert!(in_swing_arc(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 3.0, 1.0), 2.0));
    }
}
