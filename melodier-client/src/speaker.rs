use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::OutputPin;
use melodier_core::{
    square_wave::{SquareWave, Tone},
    ToneOutput,
};
use rp_pico::hal::gpio::{bank0::Gpio15, FunctionSio, Pin, PullDown, SioOutput};

use crate::TIMER_RESOLUTION_US;

pub type SpeakerPin = Pin<Gpio15, FunctionSio<SioOutput>, PullDown>;

/// Shared between the main loop, which starts and stops tones, and the timer
/// interrupt, which toggles the pin
static SPEAKER: Mutex<RefCell<Option<Speaker>>> = Mutex::new(RefCell::new(None));

/// A piezo speaker (or passive buzzer) on a single GPIO pin
pub struct Speaker {
    pin: SpeakerPin,
    wave: SquareWave,
}

impl Speaker {
    pub fn new(mut pin: SpeakerPin) -> Self {
        pin.set_low().unwrap();

        Self {
            pin,
            wave: SquareWave::new(TIMER_RESOLUTION_US as u32),
        }
    }

    #[inline]
    pub fn tick(&mut self) {
        let level = self.wave.tick();
        self.pin.set_state(level.into()).unwrap();
    }

    pub fn set_tone(&mut self, tone: Option<Tone>) {
        self.wave.set_tone(tone);

        if !self.wave.is_sounding() {
            self.pin.set_low().unwrap();
        }
    }
}

/// Advances the installed speaker by one timer tick. Called from the timer
/// interrupt.
pub fn tick() {
    critical_section::with(|cs| {
        if let Some(speaker) = SPEAKER.borrow(cs).borrow_mut().as_mut() {
            speaker.tick();
        }
    });
}

/// Handle to the interrupt-driven speaker, used as the sequencer's output
pub struct SharedSpeaker {
    _private: (),
}

impl SharedSpeaker {
    /// Moves the speaker into shared storage so the timer interrupt can drive
    /// it. Replaces any previously installed speaker.
    pub fn install(speaker: Speaker) -> Self {
        critical_section::with(|cs| {
            SPEAKER.borrow(cs).replace(Some(speaker));
        });

        Self { _private: () }
    }

    fn with_speaker(&mut self, f: impl FnOnce(&mut Speaker)) {
        critical_section::with(|cs| {
            if let Some(speaker) = SPEAKER.borrow(cs).borrow_mut().as_mut() {
                f(speaker);
            }
        });
    }
}

impl ToneOutput for SharedSpeaker {
    fn configure(&mut self) {
        self.with_speaker(|speaker| speaker.set_tone(None));
    }

    fn tone(&mut self, frequency_hz: u16, duration_ms: u16) {
        self.with_speaker(|speaker| {
            speaker.set_tone(Some(Tone::new(frequency_hz, duration_ms)))
        });
    }

    fn silence(&mut self) {
        self.with_speaker(|speaker| speaker.set_tone(None));
    }
}
