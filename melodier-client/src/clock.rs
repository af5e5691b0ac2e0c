use melodier_core::Clock;
use rp_pico::hal::Timer;

/// Milliseconds since boot, read from the RP2040's 64-bit microsecond timer
#[derive(Clone, Copy)]
pub struct TimerClock {
    timer: Timer,
}

impl TimerClock {
    pub fn new(timer: Timer) -> Self {
        Self { timer }
    }
}

impl Clock for TimerClock {
    fn now_ms(&self) -> u64 {
        self.timer.get_counter().ticks() / 1_000
    }
}
