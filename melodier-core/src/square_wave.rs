//! Tick-driven square wave for a speaker on a plain GPIO pin.
//!
//! The generator knows nothing about the pin itself: the caller advances it
//! from a periodic timer and drives the pin to whatever level `tick` returns.

/// A tone request as handed to the speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub frequency_hz: u16,
    pub duration_ms: u16,
}

impl Tone {
    pub const fn new(frequency_hz: u16, duration_ms: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Number of timer ticks between two edges of the wave. Never less than
    /// one, so frequencies above the timer's Nyquist limit still toggle.
    pub const fn half_ticks(&self, tick_us: u32) -> u32 {
        if self.frequency_hz == 0 || tick_us == 0 {
            return 0;
        }

        let half_period_us = 1_000_000 / (2 * self.frequency_hz as u64);
        let ticks = half_period_us / tick_us as u64;

        if ticks == 0 {
            1
        } else {
            ticks as u32
        }
    }

    /// Number of timer ticks the tone lasts for
    pub const fn duration_ticks(&self, tick_us: u32) -> u32 {
        if tick_us == 0 {
            return 0;
        }

        (self.duration_ms as u64 * 1_000 / tick_us as u64) as u32
    }
}

/// Square wave generator advanced once per timer tick.
///
/// A tone stops by itself once its duration has been ticked through, so the
/// output keeps sounding correctly even when nobody is updating the melody.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SquareWave {
    tick_us: u32,
    current_tone: Option<Tone>,
    current_half_ticks: u32,
    current_period_tick: u32,
    remaining_ticks: u32,
    current_state: bool,
}

impl SquareWave {
    /// Creates a silent generator that will be ticked every `tick_us`
    /// microseconds
    pub const fn new(tick_us: u32) -> Self {
        Self {
            tick_us,
            current_tone: None,
            current_half_ticks: 0,
            current_period_tick: 0,
            remaining_ticks: 0,
            current_state: false,
        }
    }

    /// Starts a new tone from a low level, or goes quiet for `None` and for
    /// a zero frequency
    pub fn set_tone(&mut self, tone: Option<Tone>) {
        self.current_tone = tone.filter(|tone| tone.frequency_hz > 0);
        self.current_period_tick = 0;
        self.current_state = false;

        let (half_ticks, remaining_ticks) = match self.current_tone {
            Some(tone) => (tone.half_ticks(self.tick_us), tone.duration_ticks(self.tick_us)),
            None => (0, 0),
        };

        self.current_half_ticks = half_ticks;
        self.remaining_ticks = remaining_ticks;
    }

    /// Advances the wave by one tick and returns the level the pin should be
    /// driven to
    pub fn tick(&mut self) -> bool {
        if self.current_tone.is_none() {
            return false;
        }

        if self.remaining_ticks == 0 {
            self.current_tone = None;
            self.current_state = false;
            return false;
        }

        self.remaining_ticks -= 1;
        self.current_period_tick += 1;

        if self.current_period_tick >= self.current_half_ticks {
            self.current_state = !self.current_state;
            self.current_period_tick = 0;
        }

        self.current_state
    }

    pub fn is_sounding(&self) -> bool {
        self.current_tone.is_some()
    }

    pub fn tone(&self) -> Option<Tone> {
        self.current_tone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK_US: u32 = 20;

    /// Ticks until the wave goes quiet, collecting the levels it produced
    fn run(wave: &mut SquareWave, limit: usize) -> heapless::Vec<bool, 1024> {
        let mut levels = heapless::Vec::new();

        for _ in 0..limit {
            if !wave.is_sounding() {
                break;
            }

            levels.push(wave.tick()).expect("too many ticks");
        }

        levels
    }

    #[test]
    fn half_period_is_rounded_down_to_whole_ticks() {
        // 440 Hz: 1136 us half period, 56.8 ticks
        assert_eq!(Tone::new(440, 100).half_ticks(TICK_US), 56);
        // 1 kHz: 500 us half period, exactly 25 ticks
        assert_eq!(Tone::new(1_000, 100).half_ticks(TICK_US), 25);
    }

    #[test]
    fn very_high_pitch_still_toggles() {
        // 40 kHz has a 12 us half period, shorter than one tick
        assert_eq!(Tone::new(40_000, 10).half_ticks(TICK_US), 1);
    }

    #[test]
    fn duration_is_converted_to_ticks() {
        assert_eq!(Tone::new(440, 100).duration_ticks(TICK_US), 5_000);
        assert_eq!(Tone::new(440, 0).duration_ticks(TICK_US), 0);
        assert_eq!(Tone::new(440, 100).duration_ticks(1_000), 100);
    }

    #[test]
    fn new_wave_is_silent() {
        let mut wave = SquareWave::new(TICK_US);

        assert!(!wave.is_sounding());
        assert!(!wave.tick());
    }

    #[test]
    fn toggles_every_half_period() {
        // 1 kHz at 100 us ticks: 5 ticks per half period, 10 ms is 100 ticks
        let mut wave = SquareWave::new(100);
        wave.set_tone(Some(Tone::new(1_000, 10)));

        let levels = run(&mut wave, 200);

        assert_eq!(
            &levels[..10],
            &[false, false, false, false, true, true, true, true, true, false]
        );
        assert_eq!(levels.iter().filter(|level| **level).count(), 50);
    }

    #[test]
    fn stops_after_its_duration() {
        let mut wave = SquareWave::new(1_000);
        wave.set_tone(Some(Tone::new(100, 3)));

        for _ in 0..3 {
            wave.tick();
            assert!(wave.is_sounding());
        }

        assert!(!wave.tick());
        assert!(!wave.is_sounding());
        assert_eq!(wave.tone(), None);
    }

    #[test]
    fn zero_frequency_is_silence() {
        let mut wave = SquareWave::new(TICK_US);
        wave.set_tone(Some(Tone::new(0, 100)));

        assert!(!wave.is_sounding());
        assert!(!wave.tick());
    }

    #[test]
    fn zero_duration_sounds_nothing() {
        let mut wave = SquareWave::new(TICK_US);
        wave.set_tone(Some(Tone::new(440, 0)));

        assert!(!wave.tick());
        assert!(!wave.is_sounding());
    }

    #[test]
    fn new_tone_restarts_low() {
        let mut wave = SquareWave::new(100);
        wave.set_tone(Some(Tone::new(1_000, 10)));

        for _ in 0..5 {
            wave.tick();
        }
        assert!(wave.tick());

        wave.set_tone(Some(Tone::new(500, 10)));
        assert!(!wave.tick());
        assert_eq!(wave.tone(), Some(Tone::new(500, 10)));
    }

    #[test]
    fn silence_cuts_the_tone_short() {
        let mut wave = SquareWave::new(TICK_US);
        wave.set_tone(Some(Tone::new(440, 100)));
        wave.tick();

        wave.set_tone(None);

        assert!(!wave.is_sounding());
        assert!(!wave.tick());
    }
}
