//! Win/lose сигналы для host приложения
//!
//! Вместо глобальной ссылки на приложение — события. Host читает
//! `AllEnemiesDefeated` / `PlayerDefeated` (или `GameOutcome`) и
//! переключает сцену.

use bevy::prelude::*;

/// Все гоблины мертвы (один раз на переход в "все мертвы")
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllEnemiesDefeated {
    pub count: usize,
}

/// Игрок умер
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDefeated {
    pub player: Entity,
}

/// Итог сессии: первый сигнал фиксирует результат
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameOutcome {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameOutcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameOutcome::Playing)
    }
}

/// Система: зафиксировать исход
pub fn record_outcome(
    mut victory_events: EventReader<AllEnemiesDefeated>,
    mut defeat_events: EventReader<PlayerDefeated>,
    mut outcome: ResMut<GameOutcome>,
) {
    // Читаем оба reader'а целиком, чтобы события не висели в очереди
    let won = victory_events.read().count() > 0;
    let lost = defeat_events.read().count() > 0;

    if outcome.is_finished() {
        return;
    }

    // Поражение и победа в одном кадре — поражение
    if lost {
        *outcome = GameOutcome::Lost;
        crate::log_info("☠️ Game over: player defeated");
    } else if won {
        *outcome = GameOutcome::Won;
        crate::log_info("🏆 Victory!");
    }
}

pub struct OutcomePlugin;

impl Plugin for OutcomePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AllEnemiesDefeated>()
            .add_event::<PlayerDefeated>()
            .init_resource::<GameOutcome>()
            .add_systems(Update, record_outcome.in_set(crate::ArenaSet::Outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.configure_sets(Update, crate::ArenaSet::Outcome);
        app.add_plugins(OutcomePlugin);
        app
    }

    #[test]
    fn test_first_outcome_wins() {
        let mut app = app();

        app.world_mut().send_event(AllEnemiesDefeated { count: 2 });
        app.update();
        assert_eq!(*app.world().resource::<GameOutcome>(), GameOutcome::Won);

        app.world_mut().send_event(PlayerDefeated {
            player: Entity::PLACEHOLDER,
        });
        app.update();
        assert_eq!(*app.world().resource::<GameOutcome>(), GameOutcome::Won);
    }

    #[test]
    fn test_defeat_beats_simultaneous_victory() {
        let mut app = app();

        app.world_mut().send_event(AllEnemiesDefeated { count: 1 });
        app.world_mut().send_event(PlayerDefeated {
            player: Entity::PLACEHOLDER,
        });
        app.update();
        assert_eq!(*app.world().resource::<GameOutcome>(), GameOutcome::Lost);
    }
}
