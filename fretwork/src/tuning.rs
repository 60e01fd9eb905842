// Fretboard addressing: tunings and (string, fret) positions.
//
// A `Tuning` is written lowest string first ("E2-A2-D3-G3-B3-E4") but stored
// highest string first, so string index 0 is the high E on a guitar. This is
// the same numbering guitar tablature uses (and the MIDI writer in midi.rs
// relies on it).
//
// Frets are signed. The CAGED builder computes frets that can go negative
// before its octave correction, so nothing here clamps them.

use crate::error::TheoryError;
use crate::pitch::{AbsNote, RelNote};
use crate::scale::Scale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (string, fret) address on the fretboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// String index, 0 = highest-pitched string.
    pub string: usize,
    pub fret: i32,
}

impl Position {
    pub fn new(string: usize, fret: i32) -> Self {
        Position { string, fret }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}f{}", self.string, self.fret)
    }
}

/// What to look up a fret for: an exact pitch, or any octave of a pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FretTarget {
    Abs(AbsNote),
    Rel(RelNote),
}

impl From<AbsNote> for FretTarget {
    fn from(note: AbsNote) -> Self {
        FretTarget::Abs(note)
    }
}

impl From<RelNote> for FretTarget {
    fn from(note: RelNote) -> Self {
        FretTarget::Rel(note)
    }
}

/// Open-string pitches, highest string first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    strings: Vec<AbsNote>,
}

impl Tuning {
    /// Build from open notes listed highest string first.
    pub fn new(strings: Vec<AbsNote>) -> Self {
        Tuning { strings }
    }

    /// Standard six-string guitar tuning, E2-A2-D3-G3-B3-E4.
    pub fn standard() -> Self {
        Tuning::new([64, 59, 55, 50, 45, 40].map(AbsNote::new).to_vec())
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn open_note(&self, string: usize) -> Result<AbsNote, TheoryError> {
        self.strings
            .get(string)
            .copied()
            .ok_or(TheoryError::StringOutOfRange {
                string,
                count: self.strings.len(),
            })
    }

    /// The pitch sounding at a position.
    pub fn get_note(&self, position: Position) -> Result<AbsNote, TheoryError> {
        self.open_note(position.string)?
            .transpose(position.fret as i64)
    }

    /// The fret on `string` for a target note.
    ///
    /// An absolute target gives the plain (possibly negative) distance from
    /// the open string. A pitch class gives 0 when the open string already
    /// has it, otherwise the first fret above the nut that plays it.
    pub fn get_fret(&self, string: usize, target: impl Into<FretTarget>) -> Result<i32, TheoryError> {
        let open = self.open_note(string)?;
        let fret = match target.into() {
            FretTarget::Abs(note) => note.value() as i64 - open.value() as i64,
            FretTarget::Rel(note) if open.rel_note() == note => 0,
            FretTarget::Rel(note) => open.next_note(note)?.value() as i64 - open.value() as i64,
        };
        i32::try_from(fret).map_err(|_| TheoryError::FretOutOfRange(fret))
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, note) in self.strings.iter().rev().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{note}")?;
        }
        Ok(())
    }
}

impl FromStr for Tuning {
    type Err = TheoryError;

    /// Parse dash-separated open notes, lowest string first.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.trim().is_empty() {
            return Err(TheoryError::parse("tuning", text));
        }
        let mut strings = text
            .split('-')
            .map(str::parse)
            .collect::<Result<Vec<AbsNote>, _>>()?;
        strings.reverse();
        Ok(Tuning::new(strings))
    }
}

/// A tuning and a scale: everything the shape builder needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub tuning: Tuning,
    pub scale: Scale,
}

impl Context {
    pub fn new(tuning: Tuning, scale: Scale) -> Self {
        Context { tuning, scale }
    }
}
