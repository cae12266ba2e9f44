// Song assembly: key and mode selection, the tonic-acceptance loop,
// and the hand-off to the melody and harmony writers.
//
// Generation is all-or-nothing. All four voices come from the same key,
// mode, and degree sequence, so any writer error aborts the call and no
// partial song escapes. The acceptance loop re-rolls whole progressions
// until one closes on the tonic; a retry budget bounds the spin, and
// exceeding it is an error rather than a hang.

use crate::harmony::generate_harmony;
use crate::melody::generate_melody;
use crate::pitch::PitchClass;
use crate::progression;
use crate::song::{GenerateError, Song};
use crate::theory::{Mode, ScaleDegree, TONIC};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tunable generation parameters. `Default` matches the shipped game:
/// random key and mode, seven chords, a retry budget that in practice
/// never runs out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongConfig {
    /// Tonic to use; `None` picks one of the 12 pitch classes uniformly.
    pub key: Option<PitchClass>,
    /// Mode to use; `None` flips a fair coin.
    pub mode: Option<Mode>,
    /// Number of chords in the progression.
    pub length: usize,
    /// Progressions to roll before giving up on a tonic ending.
    pub max_attempts: usize,
}

impl Default for SongConfig {
    fn default() -> Self {
        SongConfig { key: None, mode: None, length: 7, max_attempts: 64 }
    }
}

/// Generate a complete four-voice song.
pub fn generate_song(config: &SongConfig, rng: &mut impl Rng) -> Result<Song, GenerateError> {
    let key = config
        .key
        .unwrap_or_else(|| PitchClass::new(rng.random_range(0..12)));
    let mode = config.mode.unwrap_or_else(|| {
        if rng.random_bool(0.5) { Mode::Major } else { Mode::Minor }
    });

    let progression = accept_progression(mode, config.length, config.max_attempts, rng)?;
    let soprano = generate_melody(key, mode, &progression, rng)?;
    let harmony = generate_harmony(key, mode, &progression, rng)?;

    Ok(Song {
        key,
        mode,
        progression,
        soprano,
        alto: harmony.alto,
        tenor: harmony.tenor,
        bass: harmony.bass,
    })
}

/// Roll progressions until one ends on the tonic, within the budget.
fn accept_progression(
    mode: Mode,
    length: usize,
    max_attempts: usize,
    rng: &mut impl Rng,
) -> Result<Vec<ScaleDegree>, GenerateError> {
    for _ in 0..max_attempts {
        let degrees = progression::generate(mode, length, rng);
        if degrees.last() == Some(&TONIC) {
            return Ok(degrees);
        }
    }
    Err(GenerateError::TonicNotReached { attempts: max_attempts })
}
