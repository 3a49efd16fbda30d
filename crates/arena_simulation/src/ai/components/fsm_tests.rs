//! Tests for goblin FSM transitions.

#[cfg(test)]
mod tests {
    use super::super::fsm::{classify, next_state, GoblinState, Thresholds};

    fn thresholds() -> Thresholds {
        Thresholds::default() // look 6, sens 20, attack 1.5
    }

    #[test]
    fn test_goblin_state_default() {
        let state = GoblinState::default();
        assert!(matches!(state, GoblinState::Idle));
    }

    #[test]
    fn test_classify_bands() {
        let t = thresholds();
        assert_eq!(classify(30.0, &t), GoblinState::Idle);
        assert_eq!(classify(20.0, &t), GoblinState::Search); // граница включительно
        assert_eq!(classify(10.0, &t), GoblinState::Search);
        assert_eq!(classify(6.0, &t), GoblinState::Follow);
        assert_eq!(classify(4.0, &t), GoblinState::Follow);
        assert_eq!(classify(1.5, &t), GoblinState::Attack);
        assert_eq!(classify(0.0, &t), GoblinState::Attack);
    }

    #[test]
    fn test_idle_transitions() {
        let t = thresholds();
        assert_eq!(next_state(GoblinState::Idle, 4.0, &t), GoblinState::Follow);
        assert_eq!(next_state(GoblinState::Idle, 10.0, &t), GoblinState::Search);
        assert_eq!(next_state(GoblinState::Idle, 25.0, &t), GoblinState::Idle);
        // Idle не прыгает сразу в Attack
        assert_eq!(next_state(GoblinState::Idle, 1.0, &t), GoblinState::Follow);
    }

    #[test]
    fn test_search_transitions() {
        let t = thresholds();
        assert_eq!(next_state(GoblinState::Search, 5.0, &t), GoblinState::Follow);
        assert_eq!(next_state(GoblinState::Search, 21.0, &t), GoblinState::Idle);
        assert_eq!(next_state(GoblinState::Search, 12.0, &t), GoblinState::Search);
        assert_eq!(next_state(GoblinState::Search, 1.0, &t), GoblinState::Follow);
    }

    #[test]
    fn test_follow_transitions() {
        let t = thresholds();
        assert_eq!(next_state(GoblinState::Follow, 30.0, &t), GoblinState::Idle);
        assert_eq!(next_state(GoblinState::Follow, 8.0, &t), GoblinState::Search);
        assert_eq!(next_state(GoblinState::Follow, 1.2, &t), GoblinState::Attack);
        assert_eq!(next_state(GoblinState::Follow, 3.0, &t), GoblinState::Follow);
    }

    #[test]
    fn test_attack_falls_back_by_distance() {
        let t = thresholds();
        assert_eq!(next_state(GoblinState::Attack, 1.0, &t), GoblinState::Attack);
        assert_eq!(next_state(GoblinState::Attack, 3.0, &t), GoblinState::Follow);
        assert_eq!(next_state(GoblinState::Attack, 10.0, &t), GoblinState::Search);
        assert_eq!(next_state(GoblinState::Attack, 25.0, &t), GoblinState::Idle);
    }

    #[test]
    fn test_next_state_converges_to_classify() {
        let t = thresholds();
        let states = [
            GoblinState::Idle,
            GoblinState::Search,
            GoblinState::Follow,
            GoblinState::Attack,
        ];

        for start in states {
            for distance in [0.5, 1.5, 3.0, 6.0, 12.0, 20.0, 40.0] {
                let once = next_state(start, distance, &t);
                let twice = next_state(once, distance, &t);
                assert_eq!(
                    twice,
                    classify(distance, &t),
                    "start {:?}, distance {}",
                    start,
                    distance
                );
            }
        }
    }

    #[test]
    fn test_illegal_edges() {
        assert!(!GoblinState::Idle.can_transition_to(GoblinState::Attack));
        assert!(!GoblinState::Search.can_transition_to(GoblinState::Attack));
        assert!(GoblinState::Follow.can_transition_to(GoblinState::Attack));
        assert!(GoblinState::Attack.can_transition_to(GoblinState::Idle));
    }
}
