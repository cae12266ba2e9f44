// Songbird chorale generator CLI.
//
// Rolls a fresh four-voice song and writes it to a MIDI file, with an
// optional JSON dump of the full structure for the game's playback and
// grading layers.
//
// Usage:
//   cargo run -p songbird_chorale --bin generate -- [output.mid]
//     [--seed N] [--key NAME] [--mode major|minor] [--length N]
//     [--attempts N] [--tempo BPM] [--json PATH]

use rand::SeedableRng;
use rand::rngs::StdRng;
use songbird_chorale::compose::{SongConfig, generate_song};
use songbird_chorale::midi::write_midi;
use songbird_chorale::pitch::PitchClass;
use songbird_chorale::theory::Mode;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|arg| !arg.starts_with("--"))
        .map(|arg| arg.as_str())
        .unwrap_or("song.mid");
    let seed: Option<u64> = parse_flag(&args, "--seed");
    let tempo = parse_tempo(&args);
    let json_path: Option<String> = parse_flag(&args, "--json");

    let mut config = SongConfig::default();
    if let Some(name) = parse_flag::<String>(&args, "--key") {
        config.key = Some(parse_key(&name));
    }
    if let Some(name) = parse_flag::<String>(&args, "--mode") {
        config.mode = Some(parse_mode(&name));
    }
    if let Some(length) = parse_flag::<usize>(&args, "--length") {
        if length == 0 {
            eprintln!("--length must be at least 1. Using {}.", config.length);
        } else {
            config.length = length;
        }
    }
    if let Some(attempts) = parse_flag::<usize>(&args, "--attempts") {
        config.max_attempts = attempts;
    }

    println!("=== Songbird Chorale Generator ===");
    println!("Output: {output_path}");
    if let Some(seed) = seed {
        println!("Seed: {seed}");
    }
    println!();

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("[1/3] Generating song...");
    let song = match generate_song(&config, &mut rng) {
        Ok(song) => song,
        Err(e) => {
            eprintln!("  Generation failed: {e}");
            process::exit(1);
        }
    };
    println!("  {} beats in {} {}.", song.beats(), song.key.name(), song.mode.name());
    println!();
    print!("{}", song.summary());
    println!();

    println!("[2/3] Writing MIDI to {output_path}...");
    if let Err(e) = write_midi(&song, tempo, Path::new(output_path)) {
        eprintln!("  Error writing MIDI: {e}");
        process::exit(1);
    }

    match &json_path {
        Some(path) => {
            println!("[3/3] Writing JSON to {path}...");
            let json = match serde_json::to_string_pretty(&song) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("  Error serializing song: {e}");
                    process::exit(1);
                }
            };
            if let Err(e) = std::fs::write(path, json) {
                eprintln!("  Error writing JSON: {e}");
                process::exit(1);
            }
        }
        None => println!("[3/3] Skipping JSON (pass --json PATH to emit it)."),
    }

    println!();
    println!("Done. Play with: timidity {output_path} (or any MIDI player)");
}

/// Parse a `--flag value` pair from the raw argument list.
fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|value| value.parse().ok())
}

/// Parse `--tempo`, rejecting 0 (the MIDI tempo meta divides by BPM).
fn parse_tempo(args: &[String]) -> u16 {
    const DEFAULT_BPM: u16 = 60;
    match parse_flag::<u16>(args, "--tempo") {
        Some(0) => {
            eprintln!("--tempo must be at least 1 BPM. Using {DEFAULT_BPM}.");
            DEFAULT_BPM
        }
        Some(bpm) => bpm,
        None => DEFAULT_BPM,
    }
}

fn parse_key(name: &str) -> PitchClass {
    const SHARPS: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    const FLATS: [(&str, u8); 5] = [("Db", 1), ("Eb", 3), ("Gb", 6), ("Ab", 8), ("Bb", 10)];
    if let Some(pc) = SHARPS.iter().position(|n| name.eq_ignore_ascii_case(n)) {
        return PitchClass::new(pc as u8);
    }
    if let Some(&(_, pc)) = FLATS.iter().find(|(n, _)| name.eq_ignore_ascii_case(n)) {
        return PitchClass::new(pc);
    }
    eprintln!("Unknown key '{name}'. Using C.");
    PitchClass::new(0)
}

fn parse_mode(name: &str) -> Mode {
    match name.to_lowercase().as_str() {
        "major" => Mode::Major,
        "minor" => Mode::Minor,
        _ => {
            eprintln!("Unknown mode '{name}'. Using major.");
            Mode::Major
        }
    }
}
