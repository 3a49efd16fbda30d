//! AttackCooldown — tick-counted cadence атак
//!
//! Вместо wall-clock таймера: счётчик уменьшается на 1 за каждый вызов
//! `tick` (один AI тик или один кадр игрока). Очищается при выходе из
//! Attack и при смерти — висящих callback'ов нет.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct AttackCooldown {
    /// Интервал между ударами (тики)
    pub interval_ticks: u32,

    /// Сколько тиков до следующего удара
    pub remaining: u32,

    /// Cooldown запущен (актор в фазе атаки)
    pub armed: bool,
}

impl AttackCooldown {
    pub fn new(interval_ticks: u32) -> Self {
        Self {
            interval_ticks: interval_ticks.max(1),
            remaining: 0,
            armed: false,
        }
    }

    /// Интервал в секундах → тики при частоте `tick_hz`
    pub fn from_secs(secs: f32, tick_hz: f32) -> Self {
        let ticks = (secs * tick_hz).round().max(1.0) as u32;
        Self::new(ticks)
    }

    /// Запустить: первый удар через полный интервал
    pub fn arm(&mut self) {
        self.armed = true;
        self.remaining = self.interval_ticks;
    }

    pub fn clear(&mut self) {
        self.armed = false;
        self.remaining = 0;
    }

    /// Готов ли к удару без ожидания (не запущен или отсчитал до нуля)
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Один тик. true — пора бить (и интервал перезапущен)
    pub fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.interval_ticks;
            true
        } else {
            false
        }
    }

    /// Только обратный отсчёт (для cooldown после удара, без автоповтора)
    pub fn cool_down(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Удар нанесён вне автоповтора — ждать полный интервал
    pub fn trigger(&mut self) {
        self.remaining = self.interval_ticks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secs_rounds_to_ticks() {
        // 1.57s при 30Hz AI → 47 тиков
        let cooldown = AttackCooldown::from_secs(1.57, 30.0);
        assert_eq!(cooldown.interval_ticks, 47);

        // Никогда не 0 (иначе удар каждый тик без паузы)
        let tiny = AttackCooldown::from_secs(0.001, 30.0);
        assert_eq!(tiny.interval_ticks, 1);
    }

    #[test]
    fn test_unarmed_never_fires() {
        let mut cooldown = AttackCooldown::new(3);
        for _ in 0..10 {
            assert!(!cooldown.tick());
        }
    }

    #[test]
    fn test_armed_fires_every_interval() {
        let mut cooldown = AttackCooldown::new(3);
        cooldown.arm();

        let fired: Vec<bool> = (0..9).map(|_| cooldown.tick()).collect();
        assert_eq!(
            fired,
            vec![false, false, true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn test_clear_stops_cadence() {
        let mut cooldown = AttackCooldown::new(2);
        cooldown.arm();
        assert!(!cooldown.tick());

        cooldown.clear();
        assert!(!cooldown.tick());
        assert!(!cooldown.tick());
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_trigger_and_cool_down() {
        let mut cooldown = AttackCooldown::new(2);
        assert!(cooldown.is_ready());

        cooldown.trigger();
        assert!(!cooldown.is_ready());

        cooldown.cool_down();
        cooldown.cool_down();
        assert!(cooldown.is_ready());
    }
}
