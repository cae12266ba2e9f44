// Markov-chain chord progressions over scale degrees.
//
// Each mode carries a first-order transition matrix: row = current
// degree, column = next degree, entries are probabilities summing to
// 1.0 per row. The weights are fixed domain constants shaped after
// common functional harmony: predominants lean on dominants, dominants
// resolve to the tonic (with a deceptive V-vi escape), and every row
// keeps some direct-to-tonic mass so a tonic ending is always one step
// away. The assembler relies on that when it re-rolls progressions
// until one closes on the tonic.
//
// Selection walks a row accumulating mass until the running total
// exceeds a uniform draw; if rounding leaves the loop unfinished, the
// final column wins.

use crate::theory::{Mode, ScaleDegree, TONIC};
use rand::Rng;

// Rows and columns follow the chord-table order in theory.rs:
// I ii iii IV V vi vii°.
static MAJOR_TRANSITIONS: [[f64; 7]; 7] = [
    [0.10, 0.12, 0.08, 0.25, 0.25, 0.12, 0.08], // from I
    [0.10, 0.05, 0.02, 0.08, 0.55, 0.05, 0.15], // from ii
    [0.05, 0.05, 0.05, 0.30, 0.10, 0.35, 0.10], // from iii
    [0.20, 0.15, 0.02, 0.08, 0.40, 0.05, 0.10], // from IV
    [0.55, 0.02, 0.02, 0.06, 0.10, 0.20, 0.05], // from V
    [0.08, 0.30, 0.05, 0.30, 0.20, 0.05, 0.02], // from vi
    [0.60, 0.02, 0.08, 0.02, 0.15, 0.08, 0.05], // from vii°
];

// i ii° III iv V VI vii° VII.
static MINOR_TRANSITIONS: [[f64; 8]; 8] = [
    [0.08, 0.10, 0.10, 0.22, 0.22, 0.10, 0.08, 0.10], // from i
    [0.10, 0.02, 0.02, 0.06, 0.55, 0.05, 0.15, 0.05], // from ii°
    [0.05, 0.05, 0.02, 0.25, 0.08, 0.30, 0.05, 0.20], // from III
    [0.18, 0.12, 0.03, 0.05, 0.40, 0.07, 0.10, 0.05], // from iv
    [0.55, 0.02, 0.02, 0.05, 0.08, 0.20, 0.05, 0.03], // from V
    [0.08, 0.25, 0.07, 0.25, 0.20, 0.03, 0.07, 0.05], // from VI
    [0.60, 0.02, 0.05, 0.03, 0.12, 0.05, 0.03, 0.10], // from vii°
    [0.25, 0.03, 0.40, 0.05, 0.10, 0.07, 0.05, 0.05], // from VII
];

/// Probability row for `degree` in `mode`'s transition matrix.
pub fn transition_row(mode: Mode, degree: ScaleDegree) -> &'static [f64] {
    match mode {
        Mode::Major => &MAJOR_TRANSITIONS[degree],
        Mode::Minor => &MINOR_TRANSITIONS[degree],
    }
}

/// Generate a degree sequence of exactly `length`, starting on the
/// tonic. Whether it also ENDS on the tonic is up to chance; callers
/// that need a tonic close re-roll (see `compose::generate_song`).
pub fn generate(mode: Mode, length: usize, rng: &mut impl Rng) -> Vec<ScaleDegree> {
    assert!(length >= 1, "progression length must be at least 1");
    let mut degrees = Vec::with_capacity(length);
    let mut current = TONIC;
    degrees.push(current);
    for _ in 1..length {
        current = step(mode, current, rng.random::<f64>());
        degrees.push(current);
    }
    degrees
}

fn step(mode: Mode, current: ScaleDegree, draw: f64) -> ScaleDegree {
    let row = transition_row(mode, current);
    let mut cumulative = 0.0;
    for (next, &p) in row.iter().enumerate() {
        cumulative += p;
        if cumulative > draw {
            return next;
        }
    }
    row.len() - 1
}
