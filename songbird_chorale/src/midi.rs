// MIDI output for generated songs.
//
// Writes SMF Format 1 (multi-track): one tempo track plus one track per
// voice. Each progression step lasts one quarter note; an embellished
// soprano step splits into two eighths, chord tone first, the inserted
// tone on the back half of the beat. The melody sits above the
// accompaniment in velocity so the listener can follow the line they
// are quizzed on.
//
// Uses the `midly` crate for MIDI writing.

use crate::song::{MelodyStep, Song, Voice};
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Ticks per eighth note (half a quarter note).
const TICKS_PER_EIGHTH: u32 = TICKS_PER_QUARTER as u32 / 2;

/// General MIDI program for every voice track (choir aahs).
const PROGRAM: u8 = 52;

/// The quizzed melody is louder than the accompaniment.
const MELODY_VELOCITY: u8 = 96;
const HARMONY_VELOCITY: u8 = 64;

/// Convert a Song to MIDI and write to a file.
pub fn write_midi(
    song: &Song,
    tempo_bpm: u16,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let smf = song_to_smf(song, tempo_bpm);
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a Song to an in-memory SMF.
fn song_to_smf(song: &Song, tempo_bpm: u16) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track
    let mut tempo_track: Track<'static> = Vec::new();
    let tempo_microseconds = 60_000_000 / u32::from(tempo_bpm);
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(tempo_track);

    for voice in Voice::ALL {
        smf.tracks.push(voice_track(song, voice));
    }

    smf
}

/// Build the event track for one voice.
fn voice_track(song: &Song, voice: Voice) -> Track<'static> {
    let mut track: Track<'static> = Vec::new();
    let channel = u4::new(voice.index() as u8);

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::TrackName(voice.name().as_bytes())),
    });

    // Choir aahs for a choral sound.
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange { program: u7::new(PROGRAM) },
        },
    });

    match song.harmony_line(voice) {
        Some(notes) => {
            for note in notes {
                push_note(
                    &mut track,
                    channel,
                    note.midi_number,
                    TICKS_PER_QUARTER as u32,
                    HARMONY_VELOCITY,
                );
            }
        }
        None => {
            for step in &song.soprano {
                match step {
                    MelodyStep::Plain(note) => {
                        push_note(
                            &mut track,
                            channel,
                            note.midi_number,
                            TICKS_PER_QUARTER as u32,
                            MELODY_VELOCITY,
                        );
                    }
                    MelodyStep::Embellished(tone, ornament) => {
                        push_note(
                            &mut track,
                            channel,
                            tone.midi_number,
                            TICKS_PER_EIGHTH,
                            MELODY_VELOCITY,
                        );
                        push_note(
                            &mut track,
                            channel,
                            ornament.midi_number,
                            TICKS_PER_EIGHTH,
                            MELODY_VELOCITY,
                        );
                    }
                }
            }
        }
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    track
}

/// Append a note-on/note-off pair lasting `ticks`. Notes are
/// back-to-back, so each on-event fires as the previous note ends.
fn push_note(track: &mut Track<'static>, channel: u4, key: u8, ticks: u32, velocity: u8) {
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::NoteOn { key: u7::new(key), vel: u7::new(velocity) },
        },
    });
    track.push(TrackEvent {
        delta: u28::new(ticks),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::NoteOff { key: u7::new(key), vel: u7::new(0) },
        },
    });
}
