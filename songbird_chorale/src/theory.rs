// Tonal theory tables: modes, scale-degree chords, chord spelling.
//
// Each mode fixes an ordered table of diatonic triads: for every scale
// degree, the chord root's interval above the key's tonic and the triad
// quality built on that root. Major has the usual seven degrees. Minor
// has EIGHT entries because this style draws on both the leading-tone
// vii° (root a major seventh above the tonic) and the natural-minor VII
// (root a minor seventh above), distinct chords on distinct roots.
//
// `scale_pitch_classes` defines the "in key" test used by the melody
// embellisher. It is the set of chord ROOTS of the mode's table, not
// the seven-tone scale. For major the two coincide; for minor the root
// set admits both sevenths. Neighbor-tone step sizes depend on this
// exact definition, so it must not be broadened.

use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};

/// Tonal context of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Major,
    Minor,
}

/// Index into a mode's chord table. Degree 0 is always the tonic.
pub type ScaleDegree = usize;

/// The tonic degree. Progressions start here and must also end here.
pub const TONIC: ScaleDegree = 0;

/// Triad quality, fixing the intervals stacked on the chord root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
}

impl ChordQuality {
    /// Semitones from root to third.
    pub fn third(self) -> u8 {
        match self {
            ChordQuality::Major => 4,
            ChordQuality::Minor | ChordQuality::Diminished => 3,
        }
    }

    /// Semitones from root to fifth.
    pub fn fifth(self) -> u8 {
        match self {
            ChordQuality::Major | ChordQuality::Minor => 7,
            ChordQuality::Diminished => 6,
        }
    }
}

/// One entry in a mode's chord table: the triad on one scale degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeChord {
    /// Semitones from the key's tonic up to this chord's root.
    pub root_interval: u8,
    pub quality: ChordQuality,
}

static MAJOR_CHORDS: [DegreeChord; 7] = [
    DegreeChord { root_interval: 0, quality: ChordQuality::Major }, // I
    DegreeChord { root_interval: 2, quality: ChordQuality::Minor }, // ii
    DegreeChord { root_interval: 4, quality: ChordQuality::Minor }, // iii
    DegreeChord { root_interval: 5, quality: ChordQuality::Major }, // IV
    DegreeChord { root_interval: 7, quality: ChordQuality::Major }, // V
    DegreeChord { root_interval: 9, quality: ChordQuality::Minor }, // vi
    DegreeChord { root_interval: 11, quality: ChordQuality::Diminished }, // vii°
];

static MINOR_CHORDS: [DegreeChord; 8] = [
    DegreeChord { root_interval: 0, quality: ChordQuality::Minor }, // i
    DegreeChord { root_interval: 2, quality: ChordQuality::Diminished }, // ii°
    DegreeChord { root_interval: 3, quality: ChordQuality::Major }, // III
    DegreeChord { root_interval: 5, quality: ChordQuality::Minor }, // iv
    DegreeChord { root_interval: 7, quality: ChordQuality::Major }, // V
    DegreeChord { root_interval: 8, quality: ChordQuality::Major }, // VI
    DegreeChord { root_interval: 11, quality: ChordQuality::Diminished }, // vii°
    DegreeChord { root_interval: 10, quality: ChordQuality::Major }, // VII
];

const MAJOR_NUMERALS: [&str; 7] = ["I", "ii", "iii", "IV", "V", "vi", "vii°"];
const MINOR_NUMERALS: [&str; 8] = ["i", "ii°", "III", "iv", "V", "VI", "vii°", "VII"];

impl Mode {
    /// The ordered chord table for this mode, one triad per scale degree.
    pub fn chord_table(self) -> &'static [DegreeChord] {
        match self {
            Mode::Major => &MAJOR_CHORDS,
            Mode::Minor => &MINOR_CHORDS,
        }
    }

    /// Number of scale degrees in this mode's table: 7 major, 8 minor.
    pub fn degree_count(self) -> usize {
        self.chord_table().len()
    }

    /// Roman-numeral label for a scale degree.
    pub fn numeral(self, degree: ScaleDegree) -> &'static str {
        match self {
            Mode::Major => MAJOR_NUMERALS[degree],
            Mode::Minor => MINOR_NUMERALS[degree],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

/// Spell the triad on a scale degree into concrete pitch classes.
/// Index 0 is the root, 1 the third, 2 the fifth.
pub fn spell_chord(key: PitchClass, mode: Mode, degree: ScaleDegree) -> [PitchClass; 3] {
    let entry = mode.chord_table()[degree];
    let root = key.transpose(entry.root_interval as i8);
    [
        root,
        root.transpose(entry.quality.third() as i8),
        root.transpose(entry.quality.fifth() as i8),
    ]
}

/// The pitch classes treated as "in key": the chord roots of the mode's
/// table transposed to `key`. See the module comment for why this is
/// not the full scale.
pub fn scale_pitch_classes(key: PitchClass, mode: Mode) -> [bool; 12] {
    let mut in_key = [false; 12];
    for entry in mode.chord_table() {
        in_key[key.transpose(entry.root_interval as i8).value() as usize] = true;
    }
    in_key
}
