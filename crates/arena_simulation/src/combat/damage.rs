//! Damage application and death systems.

use bevy::prelude::*;

use crate::ai::GoblinBrain;
use crate::assets::{clips, ClipPlayer};
use crate::components::{DamageOutcome, Dead, Goblin, Health, Player, PlayerCombat};
use crate::outcome::PlayerDefeated;

/// Намерение нанести урон (удар гоблина / топор игрока)
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackLanded {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}

/// Урон применён
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub outcome: DamageOutcome,
}

/// Entity умер (ровно одно событие на смерть)
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Система: применить AttackLanded
///
/// - Мёртвый attacker урон не наносит (убит раньше в этом же кадре)
/// - Игрок в блоке игнорирует удар
/// - Повторный урон по мёртвому — no-op
pub fn apply_damage(
    mut attacks: EventReader<AttackLanded>,
    mut targets: Query<(&mut Health, Option<&PlayerCombat>)>,
    mut damage_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    for attack in attacks.read() {
        let attacker_alive = targets
            .get(attack.attacker)
            .map(|(health, _)| health.is_alive())
            .unwrap_or(false);
        if !attacker_alive {
            continue;
        }

        let Ok((mut health, combat)) = targets.get_mut(attack.target) else {
            continue;
        };

        if combat.is_some_and(|combat| combat.blocking) {
            crate::log(&format!("🛡️ {:?} blocked {} damage", attack.target, attack.damage));
            continue;
        }

        let outcome = health.take_damage(attack.damage);
        if outcome == DamageOutcome::AlreadyDead {
            continue;
        }

        damage_events.write(DamageDealt {
            attacker: attack.attacker,
            target: attack.target,
            damage: attack.damage,
            outcome,
        });

        crate::log(&format!(
            "⚔️ {:?} → {:?}: {} damage (hp {}/{})",
            attack.attacker, attack.target, attack.damage, health.current, health.max
        ));

        if outcome == DamageOutcome::Killed {
            died_events.write(EntityDied {
                entity: attack.target,
                killer: Some(attack.attacker),
            });
        }
    }
}

/// Система: последствия смерти
///
/// Goblin → Dead marker, мозг заморожен (cooldowns сброшены), клип Dead один раз.
/// Player → Dead marker + PlayerDefeated.
pub fn handle_deaths(
    mut commands: Commands,
    mut died_events: EventReader<EntityDied>,
    mut goblins: Query<(&Goblin, &mut GoblinBrain, Option<&mut ClipPlayer>)>,
    players: Query<(), With<Player>>,
    mut defeated_events: EventWriter<PlayerDefeated>,
) {
    for event in died_events.read() {
        if let Ok((goblin, mut brain, clip_player)) = goblins.get_mut(event.entity) {
            brain.freeze();
            if let Some(mut clip_player) = clip_player {
                clip_player.play(clips::DEAD, false);
            }
            commands.entity(event.entity).insert(Dead);
            crate::log_info(&format!("💀 Goblin #{} died", goblin.index));
        } else if players.contains(event.entity) {
            commands.entity(event.entity).insert(Dead);
            defeated_events.write(PlayerDefeated {
                player: event.entity,
            });
            crate::log_info("💀 Player died");
        }
    }
}
