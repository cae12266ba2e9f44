// Soprano line generation: one chord tone per progression step, then an
// embellishment pass that inserts non-chord tones.
//
// The writer walks the progression in REVERSE: the last chord of the
// degree sequence supplies the opening note. Every voice writer shares
// this orientation, which keeps the four lines vertically aligned; it
// also means the leap constraint chains from the end of the progression
// back toward its start.
//
// Chord tones are drawn uniformly from the soprano range filtered to
// the sounding chord, consecutive tones at most a perfect fourth apart.
// The embellishment pass then revisits each beat: half the time it
// leaves the tone alone, otherwise it inserts a neighbor or passing
// tone whose step size (half versus whole step) follows the key's
// pitch-class set.

use crate::pitch::{Note, NoteTable, PitchClass};
use crate::song::{GenerateError, MelodyStep, Voice};
use crate::theory::{Mode, ScaleDegree, scale_pitch_classes, spell_chord};
use rand::Rng;

/// Widest allowed leap between consecutive soprano chord tones, in
/// semitones (a perfect fourth).
pub const MAX_LEAP: i16 = 5;

/// Generate the soprano line for a progression.
pub fn generate_melody(
    key: PitchClass,
    mode: Mode,
    progression: &[ScaleDegree],
    rng: &mut impl Rng,
) -> Result<Vec<MelodyStep>, GenerateError> {
    let tones = chord_tone_row(key, mode, progression, rng)?;
    Ok(embellish(&tones, key, mode, rng))
}

/// Pick one in-range chord tone per step, walking the degree sequence
/// from its end.
fn chord_tone_row(
    key: PitchClass,
    mode: Mode,
    progression: &[ScaleDegree],
    rng: &mut impl Rng,
) -> Result<Vec<Note>, GenerateError> {
    let table = NoteTable::get();
    let (low, high) = Voice::Soprano.range();
    let mut tones: Vec<Note> = Vec::with_capacity(progression.len());
    let mut last: Option<Note> = None;

    for &degree in progression.iter().rev() {
        let chord = spell_chord(key, mode, degree);
        let candidates: Vec<Note> = table
            .in_range(low, high)
            .iter()
            .copied()
            .filter(|note| chord.contains(&note.pitch_class))
            .filter(|note| match last {
                Some(prev) => {
                    (i16::from(note.midi_number) - i16::from(prev.midi_number)).abs() <= MAX_LEAP
                }
                None => true,
            })
            .collect();
        if candidates.is_empty() {
            return Err(GenerateError::EmptyCandidateSet { voice: Voice::Soprano, degree });
        }
        let choice = candidates[rng.random_range(0..candidates.len())];
        tones.push(choice);
        last = Some(choice);
    }
    Ok(tones)
}

/// Revisit each adjacent pair of chord tones and, half the time, insert
/// a non-chord tone after the first. The final tone always stays plain.
fn embellish(tones: &[Note], key: PitchClass, mode: Mode, rng: &mut impl Rng) -> Vec<MelodyStep> {
    let mut steps = Vec::with_capacity(tones.len());
    for (i, &tone) in tones.iter().enumerate() {
        let Some(&next) = tones.get(i + 1) else {
            steps.push(MelodyStep::Plain(tone));
            continue;
        };
        if rng.random_bool(0.5) {
            steps.push(MelodyStep::Plain(tone));
            continue;
        }
        let interval = (i16::from(next.midi_number) - i16::from(tone.midi_number)).abs();
        let step = match interval {
            0..=2 => {
                // Neighbor tone; up or down is a coin flip.
                if rng.random_bool(0.5) {
                    MelodyStep::Embellished(tone, diatonic_step_up(tone, key, mode))
                } else {
                    MelodyStep::Embellished(tone, diatonic_step_down(tone, key, mode))
                }
            }
            3..=4 => {
                // Passing tone toward the next chord tone.
                if next.midi_number > tone.midi_number {
                    MelodyStep::Embellished(tone, diatonic_step_up(tone, key, mode))
                } else {
                    MelodyStep::Embellished(tone, diatonic_step_down(tone, key, mode))
                }
            }
            // Too wide for a single inserted tone.
            _ => MelodyStep::Plain(tone),
        };
        steps.push(step);
    }
    steps
}

/// One melodic step above a note: a half step if the neighbor's pitch
/// class is in the key, else a whole step.
fn diatonic_step_up(note: Note, key: PitchClass, mode: Mode) -> Note {
    let in_key = scale_pitch_classes(key, mode);
    let table = NoteTable::get();
    let half = table.note(note.midi_number + 1);
    if in_key[half.pitch_class.value() as usize] {
        half
    } else {
        table.note(note.midi_number + 2)
    }
}

fn diatonic_step_down(note: Note, key: PitchClass, mode: Mode) -> Note {
    let in_key = scale_pitch_classes(key, mode);
    let table = NoteTable::get();
    let half = table.note(note.midi_number - 1);
    if in_key[half.pitch_class.value() as usize] {
        half
    } else {
        table.note(note.midi_number - 2)
    }
}
