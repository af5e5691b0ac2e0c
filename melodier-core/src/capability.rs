/// A source of elapsed time in milliseconds.
///
/// Readings must never go backwards during a run. Wraparound is not handled.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// A single audio output pin capable of sounding one tone at a time.
pub trait ToneOutput {
    /// Prepares the pin to be driven as a digital output
    fn configure(&mut self);

    /// Starts sounding a tone and returns immediately. The output is expected
    /// to stop on its own once `duration_ms` has passed.
    fn tone(&mut self, frequency_hz: u16, duration_ms: u16);

    /// Stops whatever is sounding on the pin
    fn silence(&mut self);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

impl<T: ToneOutput + ?Sized> ToneOutput for &mut T {
    fn configure(&mut self) {
        (**self).configure()
    }

    fn tone(&mut self, frequency_hz: u16, duration_ms: u16) {
        (**self).tone(frequency_hz, duration_ms)
    }

    fn silence(&mut self) {
        (**self).silence()
    }
}
