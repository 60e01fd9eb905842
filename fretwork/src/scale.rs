// Scales: a root pitch class plus a set of scale degrees.
//
// A `ScaleType` is parsed either from a well-known name ("aeolian",
// "minor pentatonic", ...; case-insensitive) or from an explicit dash list
// of degrees such as `1-b3-4-5-b7`. A `Scale` binds a type to a root and
// converts between notes and the degrees they play in that scale.
//
// Used by caged.rs, which walks degrees chromatically and keeps the ones
// `Scale::contains` accepts.

use crate::error::TheoryError;
use crate::pitch::{AbsNote, RelNote, ScaleDegree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named scale types and their degree lists.
pub const KNOWN_SCALE_TYPES: [(&str, &str); 9] = [
    ("minor pentatonic", "1-b3-4-5-b7"),
    ("major pentatonic", "1-2-3-5-6"),
    ("ionian", "1-2-3-4-5-6-7"),
    ("dorian", "1-2-b3-4-5-6-b7"),
    ("phrygian", "1-b2-b3-4-5-b6-b7"),
    ("lydian", "1-2-3-#4-5-6-7"),
    ("mixolydian", "1-2-3-4-5-6-b7"),
    ("aeolian", "1-2-b3-4-5-b6-b7"),
    ("locrian", "1-b2-b3-4-b5-b6-b7"),
];

/// An ordered list of scale degrees. Order is kept for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleType {
    degrees: Vec<ScaleDegree>,
}

impl ScaleType {
    pub fn new(degrees: Vec<ScaleDegree>) -> Self {
        ScaleType { degrees }
    }

    pub fn degrees(&self) -> &[ScaleDegree] {
        &self.degrees
    }

    /// Look up a well-known scale name, ignoring case.
    pub fn named(name: &str) -> Option<ScaleType> {
        let lower = name.to_lowercase();
        KNOWN_SCALE_TYPES
            .iter()
            .find(|(known, _)| *known == lower)
            .and_then(|(_, degrees)| ScaleType::from_degree_list(degrees).ok())
    }

    fn from_degree_list(text: &str) -> Result<ScaleType, TheoryError> {
        let degrees = text
            .split('-')
            .map(str::parse)
            .collect::<Result<Vec<ScaleDegree>, _>>()
            .map_err(|_| TheoryError::parse("scale type", text))?;
        Ok(ScaleType::new(degrees))
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, degree) in self.degrees.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{degree}")?;
        }
        Ok(())
    }
}

impl FromStr for ScaleType {
    type Err = TheoryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match ScaleType::named(text) {
            Some(scale_type) => Ok(scale_type),
            None => ScaleType::from_degree_list(text),
        }
    }
}

/// A root note plus the degree set of a scale type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub root: RelNote,
    pub scale_type: ScaleType,
}

impl Scale {
    pub fn new(root: RelNote, scale_type: ScaleType) -> Self {
        Scale { root, scale_type }
    }

    pub fn degrees(&self) -> &[ScaleDegree] {
        self.scale_type.degrees()
    }

    pub fn contains(&self, degree: ScaleDegree) -> bool {
        self.degrees().contains(&degree)
    }

    /// The degree a pitch class plays relative to the root.
    ///
    /// Example: C is the b3 of A.
    pub fn get_scale_degree(&self, note: RelNote) -> ScaleDegree {
        let root = self.root.value();
        let pc = note.value();
        let distance = if root <= pc { pc - root } else { pc + 12 - root };
        ScaleDegree::from_semitones(distance)
    }

    pub fn get_scale_degree_of(&self, note: AbsNote) -> ScaleDegree {
        self.get_scale_degree(note.rel_note())
    }

    /// The pitch class at a degree. Example: the 3 of A is C#.
    pub fn get_rel_note(&self, degree: ScaleDegree) -> RelNote {
        RelNote::wrapping(self.root.value() as i32 + degree.value() as i32)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.scale_type)
    }
}

impl FromStr for Scale {
    type Err = TheoryError;

    /// Parse `"<root> <type>"`, e.g. `"A major pentatonic"` or `"E Aeolian"`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts = text.split_whitespace();
        let root = parts
            .next()
            .ok_or_else(|| TheoryError::parse("scale", text))?
            .parse()?;
        let type_text = parts.collect::<Vec<_>>().join(" ");
        if type_text.is_empty() {
            return Err(TheoryError::parse("scale", text));
        }
        Ok(Scale::new(root, type_text.parse()?))
    }
}
