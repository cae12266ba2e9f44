// Song structure shared by the writers: voices and their ranges,
// melody steps, the assembled Song, and the generation error type.
//
// A Song is immutable once assembled: four voice lines plus the key,
// mode, and degree sequence they were built from. The ear-training game
// grades a listener's answer against those fields, and the playback and
// animation layers read the lines without needing anything else from
// the generator.

use crate::pitch::{Note, PitchClass};
use crate::theory::{Mode, ScaleDegree};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Voice in SATB order. The soprano carries the quizzed melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    Soprano,
    Alto,
    Tenor,
    Bass,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Soprano, Voice::Alto, Voice::Tenor, Voice::Bass];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Admissible MIDI range, inclusive on both ends. Hard constraint:
    /// every note a writer emits lies inside.
    pub fn range(self) -> (u8, u8) {
        match self {
            Voice::Soprano => (60, 79), // C4..G5
            Voice::Alto => (55, 74),    // G3..D5
            Voice::Tenor => (48, 67),   // C3..G4
            Voice::Bass => (40, 60),    // E2..C4
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Voice::Soprano => "Soprano",
            Voice::Alto => "Alto",
            Voice::Tenor => "Tenor",
            Voice::Bass => "Bass",
        }
    }
}

/// One soprano beat: a chord tone, optionally followed by an inserted
/// non-chord tone on the back half of the beat.
///
/// Serialized untagged, so consumers see either a bare note object or a
/// two-note array, which is the shape the playback layer expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MelodyStep {
    Plain(Note),
    Embellished(Note, Note),
}

impl MelodyStep {
    /// The chord tone (the first note of an embellished pair).
    pub fn chord_tone(self) -> Note {
        match self {
            MelodyStep::Plain(note) | MelodyStep::Embellished(note, _) => note,
        }
    }

    /// The inserted non-chord tone, if any.
    pub fn ornament(self) -> Option<Note> {
        match self {
            MelodyStep::Plain(_) => None,
            MelodyStep::Embellished(_, ornament) => Some(ornament),
        }
    }
}

/// A complete generated song: four voice lines over one progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Tonic pitch class the song was generated in.
    pub key: PitchClass,
    pub mode: Mode,
    /// Degree sequence as generated. The writers walk it back to front,
    /// so the audible chord order is this sequence reversed; both ends
    /// are the tonic either way.
    pub progression: Vec<ScaleDegree>,
    pub soprano: Vec<MelodyStep>,
    pub alto: Vec<Note>,
    pub tenor: Vec<Note>,
    pub bass: Vec<Note>,
}

impl Song {
    /// Number of beats (chords) in the song.
    pub fn beats(&self) -> usize {
        self.soprano.len()
    }

    /// The plain note line for a harmony voice; `None` for the soprano,
    /// whose steps may carry ornaments.
    pub fn harmony_line(&self, voice: Voice) -> Option<&[Note]> {
        match voice {
            Voice::Soprano => None,
            Voice::Alto => Some(&self.alto),
            Voice::Tenor => Some(&self.tenor),
            Voice::Bass => Some(&self.bass),
        }
    }

    /// Compact terminal rendering: key and numerals in audible order,
    /// then one line per voice.
    pub fn summary(&self) -> String {
        let numerals: Vec<&str> = self
            .progression
            .iter()
            .rev()
            .map(|&degree| self.mode.numeral(degree))
            .collect();
        let mut out = format!("{} {}: {}\n", self.key.name(), self.mode.name(), numerals.join(" "));
        for voice in Voice::ALL {
            let cells: Vec<String> = match self.harmony_line(voice) {
                Some(notes) => notes.iter().map(|n| n.name()).collect(),
                None => self
                    .soprano
                    .iter()
                    .map(|step| match step {
                        MelodyStep::Plain(note) => note.name(),
                        MelodyStep::Embellished(note, ornament) => {
                            format!("{}+{}", note.name(), ornament.name())
                        }
                    })
                    .collect(),
            };
            out.push_str(&format!("{:>8}: {}\n", voice.name(), cells.join(" ")));
        }
        out
    }
}

/// Reasons a generation call can fail. Any failure aborts the whole
/// call; no partial song is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// A candidate filter (the melodic leap bound, or a chord-tone
    /// pitch class within a voice range) matched no note in the table.
    EmptyCandidateSet { voice: Voice, degree: ScaleDegree },
    /// The acceptance loop exhausted its retry budget without finding a
    /// progression that closes on the tonic.
    TonicNotReached { attempts: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::EmptyCandidateSet { voice, degree } => write!(
                f,
                "no admissible note for {} on scale degree {}",
                voice.name(),
                degree
            ),
            GenerateError::TonicNotReached { attempts } => write!(
                f,
                "no progression ended on the tonic after {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for GenerateError {}
