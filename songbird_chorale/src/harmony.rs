// Alto, tenor, and bass lines: nearest-neighbor voice leading onto
// fixed chord members.
//
// Each harmony voice owns one member of the triad: the bass sings
// roots, the tenor thirds, the alto fifths. Walking the progression
// from its end (the same orientation as the melody writer), each voice
// opens on a uniformly random note anywhere in its range; the opening
// note is NOT required to be a chord tone. Every later note is the
// in-range note of the required pitch class closest to the previous
// one, ties going to the lower candidate.

use crate::pitch::{Note, NoteTable, PitchClass};
use crate::song::{GenerateError, Voice};
use crate::theory::{Mode, ScaleDegree, spell_chord};
use rand::Rng;

/// The three accompaniment lines of a song, in score order.
#[derive(Debug, Clone)]
pub struct HarmonyLines {
    pub alto: Vec<Note>,
    pub tenor: Vec<Note>,
    pub bass: Vec<Note>,
}

/// Index into a spelled chord (0 root, 1 third, 2 fifth) that a harmony
/// voice draws from.
fn chord_slot(voice: Voice) -> usize {
    match voice {
        Voice::Bass => 0,
        Voice::Tenor => 1,
        Voice::Alto => 2,
        Voice::Soprano => unreachable!("the melody writer owns the soprano"),
    }
}

/// Generate all three harmony voices over one progression.
pub fn generate_harmony(
    key: PitchClass,
    mode: Mode,
    progression: &[ScaleDegree],
    rng: &mut impl Rng,
) -> Result<HarmonyLines, GenerateError> {
    Ok(HarmonyLines {
        alto: voice_line(Voice::Alto, key, mode, progression, rng)?,
        tenor: voice_line(Voice::Tenor, key, mode, progression, rng)?,
        bass: voice_line(Voice::Bass, key, mode, progression, rng)?,
    })
}

fn voice_line(
    voice: Voice,
    key: PitchClass,
    mode: Mode,
    progression: &[ScaleDegree],
    rng: &mut impl Rng,
) -> Result<Vec<Note>, GenerateError> {
    let table = NoteTable::get();
    let (low, high) = voice.range();
    let in_range = table.in_range(low, high);
    let slot = chord_slot(voice);

    let mut line: Vec<Note> = Vec::with_capacity(progression.len());
    for &degree in progression.iter().rev() {
        let prev = line.last().copied();
        let note = match prev {
            // Opening note: anywhere in range, chord membership not
            // required.
            None => in_range[rng.random_range(0..in_range.len())],
            Some(prev) => {
                let wanted = spell_chord(key, mode, degree)[slot];
                nearest_with_pitch_class(in_range, wanted, prev)
                    .ok_or(GenerateError::EmptyCandidateSet { voice, degree })?
            }
        };
        line.push(note);
    }
    Ok(line)
}

/// The in-range note with the wanted pitch class closest to `prev`.
/// Scanning bottom-up, the first minimal candidate wins, so a distance
/// tie resolves to the lower note.
fn nearest_with_pitch_class(in_range: &[Note], wanted: PitchClass, prev: Note) -> Option<Note> {
    let mut best: Option<Note> = None;
    let mut best_distance = i16::MAX;
    for &note in in_range.iter().filter(|n| n.pitch_class == wanted) {
        let distance = (i16::from(note.midi_number) - i16::from(prev.midi_number)).abs();
        if distance < best_distance {
            best = Some(note);
            best_distance = distance;
        }
    }
    best
}
