use std::time::Instant;

use melodier_core::Clock;

/// Milliseconds elapsed since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    #[test]
    fn starts_near_zero_and_never_goes_backwards() {
        let clock = SystemClock::new();
        let first = clock.now_ms();

        thread::sleep(Duration::from_millis(5));
        let second = clock.now_ms();

        assert!(first < 1_000);
        assert!(second >= first + 5);
    }
}
