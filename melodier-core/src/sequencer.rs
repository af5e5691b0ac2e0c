use crate::{
    capability::{Clock, ToneOutput},
    macros::{debug, info, warning},
    note::Melody,
};

/// Non-blocking melody player for a single tone output.
///
/// Nothing happens on its own: the host calls [`Sequencer::update`] on every
/// pass of its main loop and the sequencer starts the next note once the one
/// before it has run for its full duration. Each call does a constant amount
/// of work and never waits.
///
/// The played melody is borrowed, so the notes must outlive the sequencer.
#[derive(Debug)]
pub struct Sequencer<'a, T, C> {
    output: T,
    clock: C,
    active: Option<Melody<'a>>,
    index: usize,
    repeats_remaining: u16,
    forever: bool,
    playing: bool,
    last_transition: Option<u64>,
}

impl<'a, T: ToneOutput, C: Clock> Sequencer<'a, T, C> {
    pub fn new(output: T, clock: C) -> Self {
        Self {
            output,
            clock,
            active: None,
            index: 0,
            repeats_remaining: 0,
            forever: false,
            playing: false,
            last_transition: None,
        }
    }

    /// Configures the output pin. Safe to call more than once.
    pub fn begin(&mut self) {
        self.output.configure();
    }

    /// Advances playback if the current note has run its course.
    ///
    /// Must be called often relative to the shortest note in the melody; the
    /// timing error of every transition is at most one call interval.
    pub fn update(&mut self) {
        if !self.playing {
            return;
        }

        let Some(melody) = self.active else {
            self.playing = false;
            return;
        };

        // The last pass ended on a previous call
        if self.repeats_remaining == 0 {
            info!("melody finished");
            self.stop();
            return;
        }

        let now = self.clock.now_ms();

        // Nothing has started since `play`, so the first note is already due
        if let Some(started_at) = self.last_transition {
            let sounding = self.index.saturating_sub(1);
            let due_after = melody
                .get(sounding)
                .map_or(0, |note| u64::from(note.duration_ms));

            if now.saturating_sub(started_at) < due_after {
                return;
            }
        }

        match melody.get(self.index) {
            Some(note) => {
                self.last_transition = Some(now);

                if note.is_rest() {
                    debug!("note {}: rest for {} ms", self.index, note.duration_ms);
                } else {
                    debug!(
                        "note {}: {} Hz for {} ms",
                        self.index,
                        note.frequency_hz,
                        note.duration_ms
                    );
                    self.output.tone(note.frequency_hz, note.duration_ms);
                }

                self.index += 1;
            }
            None => {
                self.output.silence();
                self.index = 0;

                if !self.forever {
                    self.repeats_remaining -= 1;
                }

                debug!("pass complete, {} repeats remaining", self.repeats_remaining);
            }
        }
    }

    /// Starts `melody` from its first note, discarding whatever was loaded.
    ///
    /// `repeats` is the number of full passes to play, or `0` to loop until
    /// [`Sequencer::stop`] is called. The first note sounds on the next
    /// [`Sequencer::update`].
    pub fn play(&mut self, melody: impl Into<Melody<'a>>, repeats: u16) {
        let melody = melody.into();

        info!("playing {} notes, {} repeats", melody.len(), repeats);

        self.active = Some(melody);
        self.index = 0;
        self.forever = repeats == 0;
        self.repeats_remaining = if self.forever { u16::MAX } else { repeats };
        self.last_transition = None;
        self.playing = true;
    }

    /// Plays `melody` through exactly once
    pub fn play_once(&mut self, melody: impl Into<Melody<'a>>) {
        self.play(melody, 1);
    }

    /// Stops advancing through the melody.
    ///
    /// A tone that is already sounding is left to finish on its own, and the
    /// time spent paused still counts towards the current note.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Continues a paused melody. Does nothing if no melody is loaded.
    pub fn resume(&mut self) {
        if self.active.is_none() {
            warning!("resume ignored, no melody loaded");
            return;
        }

        self.playing = true;
    }

    /// Silences the output and unloads the melody
    pub fn stop(&mut self) {
        self.output.silence();

        self.active = None;
        self.index = 0;
        self.repeats_remaining = 0;
        self.forever = false;
        self.playing = false;
        self.last_transition = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether `melody` (the same notes in memory, not an equal copy) is the
    /// one currently playing
    pub fn is_playing_melody<'b>(&self, melody: impl Into<Melody<'b>>) -> bool {
        let melody = melody.into();

        self.playing
            && self
                .active
                .is_some_and(|active| active.ptr_eq(&melody))
    }

    /// Whether a melody is loaded, playing or paused
    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    pub fn melody(&self) -> Option<Melody<'a>> {
        self.active
    }

    /// Index of the next note to start. Equal to the melody length once the
    /// last note of a pass has started.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Passes left to play, counting the current one. `None` when looping
    /// forever.
    pub fn repeats_remaining(&self) -> Option<u16> {
        (!self.forever).then_some(self.repeats_remaining)
    }

    pub fn is_forever(&self) -> bool {
        self.forever
    }

    pub fn output(&self) -> &T {
        &self.output
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Gives back the output and clock
    pub fn release(self) -> (T, C) {
        (self.output, self.clock)
    }
}
