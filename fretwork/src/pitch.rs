// Pitch model: pitch classes, absolute notes and scale degrees.
//
// `RelNote` is a pitch class (0 = C, chromatic, sharp spelling), `AbsNote`
// is a pitch class pinned to an octave (`value = (octave + 1) * 12 + pc`,
// so C4 = 60, the MIDI numbering), and `ScaleDegree` is a semitone distance
// from a scale root named with the usual `1 b2 2 ... 7` numerals.
//
// All three parse from text and print back to it. The grammars are:
//
//   RelNote      [A-G](#+|b+)?
//   AbsNote      [A-G](#+|b+)?-?[0-9]+
//   ScaleDegree  (#+|b+)?[1-7]
//
// Pitch classes and degrees wrap accidentals modulo 12 (`Cb` is B); absolute
// notes do not wrap, so `Cb4` is B3.
//
// `AbsNote::next_note` is what the CAGED builder in caged.rs chains to keep
// every shape strictly ascending in pitch.

use crate::error::TheoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const DEGREE_NAMES: [&str; 12] = [
    "1", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7",
];

fn letter_value(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

fn numeral_value(numeral: char) -> Option<i32> {
    match numeral {
        '1' => Some(0),
        '2' => Some(2),
        '3' => Some(4),
        '4' => Some(5),
        '5' => Some(7),
        '6' => Some(9),
        '7' => Some(11),
        _ => None,
    }
}

/// Split a leading run of `#` or `b` off `text`.
///
/// Returns the semitone offset (`##` = 2, `bbb` = -3) and the remainder.
/// Mixed runs stop at the first change, so `#b` leaves `b` in the remainder
/// for the caller to reject.
fn take_accidentals(text: &str) -> (i32, &str) {
    let Some(first) = text.chars().next() else {
        return (0, text);
    };
    let step = match first {
        '#' => 1,
        'b' => -1,
        _ => return (0, text),
    };
    let count = text.chars().take_while(|&c| c == first).count();
    (step * count as i32, &text[count..])
}

/// Split a leading `[A-G]` letter plus accidentals off `text`.
fn take_note_name(text: &str) -> Option<(i32, &str)> {
    let letter = text.chars().next()?;
    let base = letter_value(letter)?;
    let (accidentals, rest) = take_accidentals(&text[letter.len_utf8()..]);
    Some((base + accidentals, rest))
}

// ---------------------------------------------------------------------------
// RelNote
// ---------------------------------------------------------------------------

/// A pitch class, independent of octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelNote(u8);

impl RelNote {
    pub fn new(value: i32) -> Result<Self, TheoryError> {
        if (0..12).contains(&value) {
            Ok(RelNote(value as u8))
        } else {
            Err(TheoryError::PitchClassOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub(crate) fn wrapping(value: i32) -> Self {
        RelNote(value.rem_euclid(12) as u8)
    }
}

impl fmt::Display for RelNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(NOTE_NAMES[self.0 as usize])
    }
}

impl FromStr for RelNote {
    type Err = TheoryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match take_note_name(text) {
            Some((value, "")) => Ok(RelNote::wrapping(value)),
            _ => Err(TheoryError::parse("note", text)),
        }
    }
}

impl TryFrom<String> for RelNote {
    type Error = TheoryError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<RelNote> for String {
    fn from(note: RelNote) -> String {
        note.to_string()
    }
}

// ---------------------------------------------------------------------------
// AbsNote
// ---------------------------------------------------------------------------

/// A note in a specific octave. Ordered by pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AbsNote(u32);

impl AbsNote {
    pub fn new(value: u32) -> Self {
        AbsNote(value)
    }

    /// Build from a possibly negative intermediate, rejecting values below 0.
    pub fn from_signed(value: i64) -> Result<Self, TheoryError> {
        if value < 0 {
            return Err(TheoryError::NegativeNote(value));
        }
        u32::try_from(value)
            .map(AbsNote)
            .map_err(|_| TheoryError::NoteTooHigh(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn rel_note(self) -> RelNote {
        RelNote((self.0 % 12) as u8)
    }

    /// Octave number in scientific pitch notation (60 is in octave 4).
    pub fn octave(self) -> i32 {
        (self.0 / 12) as i32 - 1
    }

    /// Move by a signed number of semitones.
    pub fn transpose(self, semitones: i64) -> Result<Self, TheoryError> {
        AbsNote::from_signed(self.0 as i64 + semitones)
    }

    /// The nearest note with pitch class `target` strictly above this one.
    ///
    /// When `target` is this note's own pitch class the result is a full
    /// octave up, never `self`. Chained calls therefore always ascend.
    pub fn next_note(self, target: RelNote) -> Result<AbsNote, TheoryError> {
        let own = self.rel_note().value() as i64;
        let target = target.value() as i64;
        let step = if own < target { target - own } else { target + 12 - own };
        self.transpose(step)
    }
}

impl fmt::Display for AbsNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rel_note(), self.octave())
    }
}

impl FromStr for AbsNote {
    type Err = TheoryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || TheoryError::parse("absolute note", text);
        let (pitch, octave_text) = take_note_name(text).ok_or_else(invalid)?;
        let digits = octave_text.strip_prefix('-').unwrap_or(octave_text);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let octave: i64 = octave_text.parse().map_err(|_| invalid())?;
        let value = octave
            .checked_add(1)
            .and_then(|o| o.checked_mul(12))
            .and_then(|base| base.checked_add(pitch as i64))
            .ok_or_else(invalid)?;
        AbsNote::from_signed(value)
    }
}

impl TryFrom<String> for AbsNote {
    type Error = TheoryError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<AbsNote> for String {
    fn from(note: AbsNote) -> String {
        note.to_string()
    }
}

// ---------------------------------------------------------------------------
// ScaleDegree
// ---------------------------------------------------------------------------

/// Semitone distance (0..12) from a scale root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScaleDegree(u8);

impl ScaleDegree {
    pub fn new(value: i32) -> Result<Self, TheoryError> {
        if (0..12).contains(&value) {
            Ok(ScaleDegree(value as u8))
        } else {
            Err(TheoryError::DegreeOutOfRange(value))
        }
    }

    /// For compile-time tables; panics (at compile time) outside 0..12.
    pub(crate) const fn from_semitones(value: u8) -> Self {
        assert!(value < 12, "scale degree out of range");
        ScaleDegree(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Add half steps, wrapping around the octave (`7 + 2 = b2`).
    pub fn add_half_steps(self, half_steps: i32) -> ScaleDegree {
        ScaleDegree((self.0 as i32 + half_steps).rem_euclid(12) as u8)
    }
}

impl fmt::Display for ScaleDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(DEGREE_NAMES[self.0 as usize])
    }
}

impl FromStr for ScaleDegree {
    type Err = TheoryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (accidentals, rest) = take_accidentals(text);
        let mut chars = rest.chars();
        match (chars.next().and_then(numeral_value), chars.next()) {
            (Some(base), None) => Ok(ScaleDegree((base + accidentals).rem_euclid(12) as u8)),
            _ => Err(TheoryError::parse("scale degree", text)),
        }
    }
}

impl TryFrom<String> for ScaleDegree {
    type Error = TheoryError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<ScaleDegree> for String {
    fn from(degree: ScaleDegree) -> String {
        degree.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(text: &str) -> RelNote {
        text.parse().unwrap()
    }

    fn abs(text: &str) -> AbsNote {
        text.parse().unwrap()
    }

    #[test]
    fn test_rel_note_parsing() {
        assert_eq!(rel("C").value(), 0);
        assert_eq!(rel("D#").value(), 3);
        assert_eq!(rel("Ab").value(), 8);
        assert_eq!(rel("F##").value(), 7);
        assert_eq!(rel("Cb").value(), 11); // wraps to B
        assert_eq!(rel("B#").value(), 0); // wraps to C
    }

    #[test]
    fn test_rel_note_rejects_garbage() {
        for text in ["", "H", "c", "C#b", "Cx", "C4", " C"] {
            assert!(text.parse::<RelNote>().is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_rel_note_display_round_trip() {
        for pc in 0..12 {
            let note = RelNote::new(pc).unwrap();
            assert_eq!(note.to_string().parse::<RelNote>().unwrap(), note);
        }
    }

    #[test]
    fn test_rel_note_range() {
        assert!(RelNote::new(11).is_ok());
        assert_eq!(RelNote::new(12), Err(TheoryError::PitchClassOutOfRange(12)));
        assert_eq!(RelNote::new(-1), Err(TheoryError::PitchClassOutOfRange(-1)));
    }

    #[test]
    fn test_abs_note_parsing() {
        assert_eq!(abs("C4").value(), 60);
        assert_eq!(abs("C#4").value(), 61);
        assert_eq!(abs("Eb3").value(), 51);
        assert_eq!(abs("E2").value(), 40);
        assert_eq!(abs("C-1").value(), 0);
        assert_eq!(abs("Cb4").value(), 59); // no wrap: B3
    }

    #[test]
    fn test_abs_note_requires_octave() {
        for text in ["C", "C#", "C-", "C4x", "4", "C 4"] {
            assert!(text.parse::<AbsNote>().is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_abs_note_negative_rejected() {
        assert_eq!("C-2".parse::<AbsNote>(), Err(TheoryError::NegativeNote(-12)));
        assert_eq!("Cb-1".parse::<AbsNote>(), Err(TheoryError::NegativeNote(-1)));
    }

    #[test]
    fn test_abs_note_display() {
        assert_eq!(AbsNote::new(60).to_string(), "C4");
        assert_eq!(AbsNote::new(40).to_string(), "E2");
        assert_eq!(AbsNote::new(70).to_string(), "A#4");
        assert_eq!(AbsNote::new(0).to_string(), "C-1");
    }

    #[test]
    fn test_next_note_octave_bump_on_same_pitch_class() {
        assert_eq!(AbsNote::new(60).next_note(rel("C")), Ok(AbsNote::new(72)));
    }

    #[test]
    fn test_next_note_simple_ascent() {
        assert_eq!(AbsNote::new(60).next_note(rel("D")), Ok(AbsNote::new(62)));
        assert_eq!(AbsNote::new(60).next_note(rel("B")), Ok(AbsNote::new(71)));
    }

    #[test]
    fn test_next_note_wraps_over_octave() {
        // B3 -> next C# is C#4
        assert_eq!(abs("B3").next_note(rel("C#")), Ok(abs("C#4")));
        assert_eq!(abs("G3").next_note(rel("E")), Ok(abs("E4")));
    }

    #[test]
    fn test_next_note_at_the_top_of_the_range() {
        // C357913940 is 4294967292, four below u32::MAX.
        let top = abs("C357913940");
        assert_eq!(top.value(), 4_294_967_292);
        assert_eq!(top.next_note(rel("D")), Ok(AbsNote::new(4_294_967_294)));
        assert_eq!(
            top.next_note(rel("C")),
            Err(TheoryError::NoteTooHigh(4_294_967_304))
        );
        assert!(AbsNote::new(u32::MAX).transpose(1).is_err());
    }

    #[test]
    fn test_transpose() {
        assert_eq!(AbsNote::new(40).transpose(5), Ok(AbsNote::new(45)));
        assert_eq!(AbsNote::new(3).transpose(-4), Err(TheoryError::NegativeNote(-1)));
    }

    #[test]
    fn test_scale_degree_parsing() {
        let degree = |t: &str| t.parse::<ScaleDegree>().unwrap().value();
        assert_eq!(degree("1"), 0);
        assert_eq!(degree("b3"), 3);
        assert_eq!(degree("#4"), 6);
        assert_eq!(degree("7"), 11);
        assert_eq!(degree("bb7"), 9);
        assert_eq!(degree("b1"), 11);
    }

    #[test]
    fn test_scale_degree_rejects_garbage() {
        for text in ["", "8", "0", "b", "3b", "#b3", "13"] {
            assert!(text.parse::<ScaleDegree>().is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_scale_degree_add_half_steps() {
        let d = |t: &str| t.parse::<ScaleDegree>().unwrap();
        assert_eq!(d("b3").add_half_steps(2), d("4"));
        assert_eq!(d("5").add_half_steps(1), d("b6"));
        assert_eq!(d("7").add_half_steps(2), d("b2"));
        assert_eq!(d("1").add_half_steps(-1), d("7"));
    }

    #[test]
    fn test_scale_degree_display_and_order() {
        let names: Vec<String> = (0..12)
            .map(|v| ScaleDegree::new(v).unwrap().to_string())
            .collect();
        assert_eq!(names.join(" "), "1 b2 2 b3 3 4 b5 5 b6 6 b7 7");
        assert!(ScaleDegree::new(3).unwrap() < ScaleDegree::new(4).unwrap());
        assert_eq!(ScaleDegree::new(12), Err(TheoryError::DegreeOutOfRange(12)));
    }

    #[test]
    fn test_serde_uses_text() {
        let json = serde_json::to_string(&AbsNote::new(61)).unwrap();
        assert_eq!(json, "\"C#4\"");
        let back: AbsNote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AbsNote::new(61));
        assert!(serde_json::from_str::<RelNote>("\"H\"").is_err());
    }
}
