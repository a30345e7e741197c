/// ADHD focus countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    duration_seconds: u32,
    remaining_seconds: u32,
    running: bool,
}

pub const MIN_DURATION_SECONDS: u32 = 60;
pub const DEFAULT_DURATION_SECONDS: u32 = 300;

impl Default for TimerState {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_DURATION_SECONDS,
            remaining_seconds: DEFAULT_DURATION_SECONDS,
            running: false,
        }
    }
}

impl TimerState {
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Change the duration; takes effect on the next start or reset.
    pub fn set_duration_minutes(&mut self, minutes: u32) {
        self.duration_seconds = minutes.saturating_mul(60).max(MIN_DURATION_SECONDS);
    }

    pub fn start(&mut self) {
        self.remaining_seconds = self.duration_seconds;
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.duration_seconds;
    }

    /// Advance one second. Returns true when this tick finished the countdown.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            return true;
        }
        false
    }

    /// Remaining time as `m:ss`.
    pub fn format_remaining(&self) -> String {
        format!("{}:{:02}", self.remaining_seconds / 60, self.remaining_seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timer() {
        let timer = TimerState::default();
        assert_eq!(timer.duration_seconds(), 300);
        assert_eq!(timer.remaining_seconds(), 300);
        assert!(!timer.is_running());
        assert_eq!(timer.format_remaining(), "5:00");
    }

    #[test]
    fn test_duration_has_one_minute_floor() {
        let mut timer = TimerState::default();
        timer.set_duration_minutes(0);
        assert_eq!(timer.duration_seconds(), 60);
        timer.set_duration_minutes(25);
        assert_eq!(timer.duration_seconds(), 1500);
    }

    #[test]
    fn test_start_tick_pause_reset() {
        let mut timer = TimerState::default();
        timer.set_duration_minutes(1);
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 60);

        assert!(!timer.tick());
        assert_eq!(timer.format_remaining(), "0:59");

        timer.pause();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 59);

        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn test_countdown_stops_at_zero() {
        let mut timer = TimerState::default();
        timer.set_duration_minutes(1);
        timer.start();
        let finished: Vec<bool> = (0..60).map(|_| timer.tick()).collect();
        assert_eq!(finished.iter().filter(|f| **f).count(), 1);
        assert!(finished[59]);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.tick());
    }
}
