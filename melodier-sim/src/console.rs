use melodier_core::{Clock, ToneOutput};

/// Tone output that prints to stdout instead of driving a pin
#[derive(Debug)]
pub struct ConsoleTone<C> {
    clock: C,
    verbose: bool,
    configured: bool,
    tones: usize,
    silences: usize,
    sounding_until: Option<u64>,
}

impl<C: Clock> ConsoleTone<C> {
    pub fn new(clock: C, verbose: bool) -> Self {
        Self {
            clock,
            verbose,
            configured: false,
            tones: 0,
            silences: 0,
            sounding_until: None,
        }
    }

    pub fn tones(&self) -> usize {
        self.tones
    }

    pub fn silences(&self) -> usize {
        self.silences
    }

    /// Whether a tone would still be audible right now
    pub fn is_sounding(&self) -> bool {
        self.sounding_until
            .is_some_and(|until| self.clock.now_ms() < until)
    }
}

impl<C: Clock> ToneOutput for ConsoleTone<C> {
    fn configure(&mut self) {
        if self.verbose {
            println!("[{:>6} ms] speaker pin configured", self.clock.now_ms());
        }

        self.configured = true;
    }

    fn tone(&mut self, frequency_hz: u16, duration_ms: u16) {
        let now = self.clock.now_ms();

        if !self.configured {
            eprintln!("Warning: tone emitted before the speaker pin was configured");
        }

        println!(
            "[{:>6} ms] tone {:>5} Hz for {:>4} ms",
            now, frequency_hz, duration_ms
        );

        self.tones += 1;
        self.sounding_until = Some(now + u64::from(duration_ms));
    }

    fn silence(&mut self) {
        if self.verbose {
            println!("[{:>6} ms] silence", self.clock.now_ms());
        }

        self.silences += 1;
        self.sounding_until = None;
    }
}
