// Pitch classes, notes, and the process-wide note table.
//
// A note is derived entirely from its MIDI number: pitch class is the
// number mod 12, frequency comes from equal temperament around A4. The
// full 128-entry table is built once behind a OnceLock and shared
// read-only by every writer; nothing mutates it after construction.
//
// A4 (MIDI 69) is tuned to 432 Hz rather than the concert-standard 440,
// a deliberate quirk of the game's sound.

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Reference frequency for A4 (MIDI 69), in Hz.
pub const A4_HZ: f64 = 432.0;

const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One of the 12 chromatic pitch classes, C = 0 through B = 11.
/// Always stored reduced mod 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(value: u8) -> Self {
        PitchClass(value % 12)
    }

    /// The raw 0-11 value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Transpose by a signed number of semitones, wrapping mod 12.
    pub fn transpose(self, semitones: i8) -> Self {
        PitchClass((i16::from(self.0) + i16::from(semitones)).rem_euclid(12) as u8)
    }

    /// Note-name spelling, sharps for the black keys.
    pub fn name(self) -> &'static str {
        PITCH_NAMES[self.0 as usize]
    }
}

// Custom serde: deserialize through the mod-12 constructor so external
// input cannot carry an unreduced value (`name()` indexes by the raw 0-11).
impl<'de> Deserialize<'de> for PitchClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Ok(PitchClass::new(value))
    }
}

/// A single playable note, fully determined by its MIDI number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub midi_number: u8,
    pub pitch_class: PitchClass,
    pub frequency_hz: f64,
}

impl Note {
    fn from_midi(midi_number: u8) -> Self {
        Note {
            midi_number,
            pitch_class: PitchClass::new(midi_number % 12),
            frequency_hz: A4_HZ * 2f64.powf((f64::from(midi_number) - 69.0) / 12.0),
        }
    }

    /// Compact name with octave, e.g. "C4" for MIDI 60.
    pub fn name(self) -> String {
        format!(
            "{}{}",
            self.pitch_class.name(),
            i32::from(self.midi_number) / 12 - 1
        )
    }
}

static NOTE_TABLE: OnceLock<NoteTable> = OnceLock::new();

/// The shared note table, one entry per MIDI number 0..=127.
pub struct NoteTable {
    notes: [Note; 128],
}

impl NoteTable {
    /// Access the process-wide table, building it on first use.
    pub fn get() -> &'static NoteTable {
        NOTE_TABLE.get_or_init(|| NoteTable {
            notes: std::array::from_fn(|midi| Note::from_midi(midi as u8)),
        })
    }

    /// Look up a note by MIDI number. Total over 0..=127.
    pub fn note(&self, midi_number: u8) -> Note {
        self.notes[midi_number as usize]
    }

    /// All notes in an inclusive MIDI range, ascending.
    pub fn in_range(&self, low: u8, high: u8) -> &[Note] {
        &self.notes[low as usize..=high as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_equal_temperament() {
        let table = NoteTable::get();
        for midi in 0..=127u8 {
            let note = table.note(midi);
            assert_eq!(note.midi_number, midi);
            assert_eq!(note.pitch_class, PitchClass::new(midi % 12));
            let expected = A4_HZ * 2f64.powf((f64::from(midi) - 69.0) / 12.0);
            assert!((note.frequency_hz - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn a4_sounds_at_432() {
        let a4 = NoteTable::get().note(69);
        assert!((a4.frequency_hz - 432.0).abs() < 1e-12);
    }

    #[test]
    fn middle_c_in_432_tuning() {
        let c4 = NoteTable::get().note(60);
        assert!((c4.frequency_hz - 256.8687).abs() < 1e-3);
    }

    #[test]
    fn octaves_double_frequency() {
        let table = NoteTable::get();
        let ratio = table.note(81).frequency_hz / table.note(69).frequency_hz;
        assert!((ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn note_names() {
        let table = NoteTable::get();
        assert_eq!(table.note(60).name(), "C4");
        assert_eq!(table.note(69).name(), "A4");
        assert_eq!(table.note(66).name(), "F#4");
        assert_eq!(table.note(40).name(), "E2");
    }

    #[test]
    fn range_slice_is_inclusive() {
        let table = NoteTable::get();
        let notes = table.in_range(60, 79);
        assert_eq!(notes.len(), 20);
        assert_eq!(notes[0].midi_number, 60);
        assert_eq!(notes[19].midi_number, 79);
    }

    #[test]
    fn pitch_class_wraps() {
        assert_eq!(PitchClass::new(12), PitchClass::new(0));
        assert_eq!(PitchClass::new(11).transpose(2), PitchClass::new(1));
        assert_eq!(PitchClass::new(0).transpose(-1), PitchClass::new(11));
        assert_eq!(PitchClass::new(7).transpose(7), PitchClass::new(2));
    }

    #[test]
    fn deserialized_pitch_classes_are_reduced() {
        let pc: PitchClass = serde_json::from_str("13").unwrap();
        assert_eq!(pc, PitchClass::new(1));
        assert_eq!(pc.name(), "C#");
        let pc: PitchClass = serde_json::from_str("255").unwrap();
        assert_eq!(pc.name(), "D#");
    }

    #[test]
    fn frequencies_survive_json_round_trip() {
        let table = NoteTable::get();
        for midi in 0..=127u8 {
            let note = table.note(midi);
            let json = serde_json::to_string(&note).unwrap();
            let back: Note = serde_json::from_str(&json).unwrap();
            assert_eq!(
                back.frequency_hz.to_bits(),
                note.frequency_hz.to_bits(),
                "frequency for MIDI {midi} drifted through JSON"
            );
        }
    }
}
