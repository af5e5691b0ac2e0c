//! A few short tunes that ship with the crate.

use crate::{note::Note, pitch::*};

/// Rising arpeggio played once on power up
pub static STARTUP: [Note; 4] = [
    Note::new(C5, 80),
    Note::new(E5, 80),
    Note::new(G5, 80),
    Note::new(C6, 160),
];

/// Two-tone alert with a gap, meant to be repeated
pub static ALARM: [Note; 3] = [
    Note::new(A5, 150),
    Note::new(E5, 150),
    Note::rest(200),
];

/// Single acknowledgement blip
pub static BEEP: [Note; 1] = [Note::new(A5, 60)];

/// C major scale up one octave
pub static SCALE: [Note; 8] = [
    Note::new(C4, 120),
    Note::new(D4, 120),
    Note::new(E4, 120),
    Note::new(F4, 120),
    Note::new(G4, 120),
    Note::new(A4, 120),
    Note::new(B4, 120),
    Note::new(C5, 240),
];

/// Twinkle Twinkle Little Star (first phrase)
pub static TWINKLE: [Note; 16] = [
    Note::new(C4, 300),
    Note::new(C4, 300),
    Note::new(G4, 300),
    Note::new(G4, 300),
    Note::new(A4, 300),
    Note::new(A4, 300),
    Note::new(G4, 600),
    Note::rest(100),
    Note::new(F4, 300),
    Note::new(F4, 300),
    Note::new(E4, 300),
    Note::new(E4, 300),
    Note::new(D4, 300),
    Note::new(D4, 300),
    Note::new(C4, 600),
    Note::rest(400),
];

/// Every built-in melody by name
pub static ALL: [(&str, &[Note]); 5] = [
    ("startup", &STARTUP),
    ("alarm", &ALARM),
    ("beep", &BEEP),
    ("scale", &SCALE),
    ("twinkle", &TWINKLE),
];

/// Looks up a built-in melody by name (case-sensitive)
pub fn find(name: &str) -> Option<&'static [Note]> {
    ALL.iter()
        .find(|(melody_name, _)| *melody_name == name)
        .map(|(_, notes)| *notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Melody;

    #[test]
    fn find_returns_the_same_storage() {
        let found = find("twinkle").unwrap();
        assert!(Melody::from(found).ptr_eq(&Melody::from(&TWINKLE)));
    }

    #[test]
    fn find_unknown_is_none() {
        assert!(find("Twinkle").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn builtin_melodies_are_not_empty() {
        for (name, notes) in ALL.iter() {
            assert!(!notes.is_empty(), "{name} is empty");
            assert!(
                notes.iter().all(|note| note.duration_ms > 0),
                "{name} has a zero-length note"
            );
        }
    }
}
