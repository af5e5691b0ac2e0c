use core::ptr;

/// A single step of a melody: a pitch held for a duration.
///
/// A frequency of zero is a rest. Rests still take up their full duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Pitch of the note in Hertz (0 for a rest)
    pub frequency_hz: u16,

    /// How long the note occupies before the next one starts
    pub duration_ms: u16,
}

impl Note {
    pub const fn new(frequency_hz: u16, duration_ms: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    pub const fn rest(duration_ms: u16) -> Self {
        Self::new(0, duration_ms)
    }

    pub const fn is_rest(&self) -> bool {
        self.frequency_hz == 0
    }
}

/// A borrowed view over a caller-owned sequence of notes.
///
/// Two melodies are considered the same melody only when they view the same
/// storage (see [`Melody::ptr_eq`]); notes with equal contents in different
/// arrays are different melodies.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Melody<'a> {
    notes: &'a [Note],
}

impl<'a> Melody<'a> {
    pub const fn new(notes: &'a [Note]) -> Self {
        Self { notes }
    }

    pub const fn len(&self) -> usize {
        self.notes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub const fn notes(&self) -> &'a [Note] {
        self.notes
    }

    pub fn get(&self, index: usize) -> Option<&'a Note> {
        self.notes.get(index)
    }

    /// Length of one full pass over the melody, rests included
    pub fn total_duration_ms(&self) -> u32 {
        self.notes
            .iter()
            .map(|note| u32::from(note.duration_ms))
            .sum()
    }

    /// Whether both melodies view the exact same notes in memory
    pub fn ptr_eq(&self, other: &Melody<'_>) -> bool {
        ptr::eq(self.notes, other.notes)
    }
}

impl<'a> From<&'a [Note]> for Melody<'a> {
    fn from(notes: &'a [Note]) -> Self {
        Self::new(notes)
    }
}

impl<'a, const N: usize> From<&'a [Note; N]> for Melody<'a> {
    fn from(notes: &'a [Note; N]) -> Self {
        Self::new(notes)
    }
}
