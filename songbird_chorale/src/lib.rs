// Songbird chorale generator.
//
// Procedurally composes a short four-voice song (soprano melody plus
// alto/tenor/bass accompaniment) used as the stimulus in an
// "identify what you heard" ear-training exercise. A Markov chain over
// scale degrees proposes a chord progression that must close on the
// tonic; the melody writer picks leap-bounded chord tones for the
// soprano and decorates them with non-chord tones; the harmony writer
// leads each accompanying voice to its chord member by the nearest
// available note.
//
// Architecture:
// - pitch.rs: pitch classes, notes, the shared 128-entry note table
//   (A4 = 432 Hz)
// - theory.rs: per-mode chord tables, chord spelling, the in-key test
// - progression.rs: Markov transition matrices and degree sequences
// - song.rs: voices and ranges, melody steps, the Song record, errors
// - melody.rs: soprano chord tones plus the embellishment pass
// - harmony.rs: alto/tenor/bass nearest-neighbor voice leading
// - compose.rs: key/mode selection, tonic-acceptance loop, assembly
// - midi.rs: MIDI file output for finished songs
//
// Every random decision flows through the caller's `rand::Rng`, so a
// seeded generator reproduces a song exactly.

pub mod compose;
pub mod harmony;
pub mod melody;
pub mod midi;
pub mod pitch;
pub mod progression;
pub mod song;
pub mod theory;
