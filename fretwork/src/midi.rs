// MIDI output for exercise sequences.
//
// `MidiScore` is the score writer: exercises are appended one after another,
// each starting on a fresh 4/4 measure and carrying its name as a marker.
// Straight exercises are written as sixteenth notes (16 per measure) and
// triplet ones as eighth-note triplets (12 per measure), so a measure is
// always 1920 ticks at 480 ticks per quarter.
//
// The file uses "guitar mode": each string gets its own MIDI channel
// (highest string on channel 0), which lets tab-aware importers put every
// note back on the string it was written for. Channel 9 is General MIDI
// percussion and is skipped, so strings 9 and up sit one channel higher and
// at most 15 strings fit.
//
// Uses the `midly` crate for writing. Output is SMF Format 1: a tempo track
// followed by one guitar track.

use crate::exercise::Feel;
use crate::tuning::{Position, Tuning};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::error::Error;
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u32 = 480;

/// Ticks per 4/4 measure.
const TICKS_PER_MEASURE: u32 = TICKS_PER_QUARTER * 4;

/// General MIDI program 25: Acoustic Guitar (steel).
const GUITAR_PROGRAM: u8 = 25;

const VELOCITY: u8 = 90;

/// Channel 9 is reserved for percussion in General MIDI.
const PERCUSSION_CHANNEL: usize = 9;

/// Most strings that fit on the 15 melodic channels.
pub const MAX_MIDI_STRINGS: usize = 15;

/// MIDI channel for a string index, stepping over the percussion channel.
fn channel_for(string: usize) -> Option<u8> {
    match string {
        s if s < PERCUSSION_CHANNEL => Some(s as u8),
        s if s < MAX_MIDI_STRINGS => Some(s as u8 + 1),
        _ => None,
    }
}

/// Destination for generated exercises.
pub trait ScoreWriter {
    type Error;

    /// Append an exercise. The name labels its first note; empty names are
    /// left unlabelled.
    fn add_exercise(&mut self, name: &str, positions: &[Position], feel: Feel) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NoteEvent {
    tick: u32,
    duration: u32,
    pitch: u8,
    channel: u8,
}

#[derive(Debug, Clone)]
pub struct MidiScore {
    pub title: String,
    pub subtitle: String,
    pub tempo_bpm: u16,
    tuning: Tuning,
    notes: Vec<NoteEvent>,
    markers: Vec<(u32, String)>,
    end_tick: u32,
}

impl MidiScore {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, tuning: Tuning) -> Self {
        MidiScore {
            title: title.into(),
            subtitle: subtitle.into(),
            tempo_bpm: 100,
            tuning,
            notes: Vec::new(),
            markers: Vec::new(),
            end_tick: 0,
        }
    }

    /// Number of measures written so far.
    pub fn measure_count(&self) -> u32 {
        self.end_tick.div_ceil(TICKS_PER_MEASURE)
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Serialize as a Standard MIDI File.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Box<dyn Error>> {
        let mut buf = Vec::new();
        self.to_smf().write(&mut buf)?;
        Ok(buf)
    }

    /// Write the score to a `.mid` file.
    pub fn write(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    fn to_smf(&self) -> Smf<'_> {
        let mut smf = Smf::new(Header::new(
            Format::Parallel,
            Timing::Metrical(u15::new(TICKS_PER_QUARTER as u16)),
        ));

        // Track 0: tempo, meter and titles
        let tempo_microseconds = 60_000_000 / self.tempo_bpm.max(1) as u32;
        let mut tempo_track: Track<'_> = vec![
            meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
            meta(MetaMessage::TimeSignature(4, 2, 24, 8)),
            meta(MetaMessage::TrackName(self.title.as_bytes())),
        ];
        if !self.subtitle.is_empty() {
            tempo_track.push(meta(MetaMessage::Text(self.subtitle.as_bytes())));
        }
        tempo_track.push(meta(MetaMessage::EndOfTrack));
        smf.tracks.push(tempo_track);

        smf.tracks.push(self.guitar_track());
        smf
    }

    fn guitar_track(&self) -> Track<'_> {
        let mut timed: Vec<(u32, TrackEventKind<'_>)> = Vec::new();

        for channel in (0..self.tuning.string_count()).filter_map(channel_for) {
            timed.push((
                0,
                TrackEventKind::Midi {
                    channel: u4::new(channel),
                    message: MidiMessage::ProgramChange {
                        program: u7::new(GUITAR_PROGRAM),
                    },
                },
            ));
        }

        let mut markers = self.markers.iter().peekable();
        for note in &self.notes {
            while let Some((_, name)) = markers.next_if(|(tick, _)| *tick <= note.tick) {
                timed.push((note.tick, TrackEventKind::Meta(MetaMessage::Marker(name.as_bytes()))));
            }
            let channel = u4::new(note.channel);
            timed.push((
                note.tick,
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn {
                        key: u7::new(note.pitch),
                        vel: u7::new(VELOCITY),
                    },
                },
            ));
            timed.push((
                note.tick + note.duration,
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff {
                        key: u7::new(note.pitch),
                        vel: u7::new(0),
                    },
                },
            ));
        }

        timed.sort_by_key(|(tick, _)| *tick);

        let mut track: Track<'_> = Vec::with_capacity(timed.len() + 1);
        let mut last_event_tick = 0;
        for (tick, kind) in timed {
            track.push(TrackEvent {
                delta: u28::new(tick - last_event_tick),
                kind,
            });
            last_event_tick = tick;
        }
        track.push(meta(MetaMessage::EndOfTrack));
        track
    }
}

impl ScoreWriter for MidiScore {
    type Error = Box<dyn Error>;

    fn add_exercise(&mut self, name: &str, positions: &[Position], feel: Feel) -> Result<(), Self::Error> {
        let start = self.measure_count() * TICKS_PER_MEASURE;
        let duration = TICKS_PER_MEASURE / feel.notes_per_measure() as u32;

        let mut notes = Vec::with_capacity(positions.len());
        for (i, &position) in positions.iter().enumerate() {
            let value = self.tuning.get_note(position)?.value();
            let pitch = u8::try_from(value)
                .ok()
                .filter(|&p| p <= 127)
                .ok_or_else(|| format!("{position} sounds outside the MIDI range"))?;
            let channel =
                channel_for(position.string).ok_or_else(|| format!("{position} has no MIDI channel"))?;
            notes.push(NoteEvent {
                tick: start + i as u32 * duration,
                duration,
                pitch,
                channel,
            });
        }

        if !name.is_empty() && !notes.is_empty() {
            self.markers.push((start, name.to_string()));
        }
        self.end_tick = start + notes.len() as u32 * duration;
        self.notes.extend(notes);
        Ok(())
    }
}

fn meta(message: MetaMessage<'_>) -> TrackEvent<'_> {
    TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(message),
    }
}
