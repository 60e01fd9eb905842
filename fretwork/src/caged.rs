// CAGED shape construction.
//
// The CAGED system covers the neck with five overlapping scale patterns named
// after the open chord each one surrounds (C, A, G, E, D). For every pattern
// a fixed table says which stretch of scale degrees each string plays; the
// builder then:
//
// 1. walks each string's degree range chromatically, keeping the degrees the
//    scale contains;
// 2. places notes from the lowest string to the highest, the first on the
//    lowest fret playing its pitch class and every later one on the next
//    occurrence of its pitch class above the previous note (so the shape
//    ascends strictly in pitch, even across strings);
// 3. shifts the whole shape up an octave if any fret came out negative.
//
// The tables assume a six-string instrument; other string counts are
// rejected. Shapes feed exercise.rs (pattern walks) and tab.rs (rendering).

use crate::error::TheoryError;
use crate::pitch::{AbsNote, ScaleDegree};
use crate::tuning::{Context, Position, Tuning};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Highest fret a shape may use.
pub const MAX_FRET: i32 = 22;

/// Number of strings the CAGED tables describe.
pub const CAGED_STRING_COUNT: usize = 6;

const OCTAVE: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CagedPosition {
    C,
    A,
    G,
    E,
    D,
}

/// Inclusive (start, end) scale degrees walked on one string.
pub type DegreeRange = (ScaleDegree, ScaleDegree);

const fn range(start: u8, end: u8) -> DegreeRange {
    (
        ScaleDegree::from_semitones(start),
        ScaleDegree::from_semitones(end),
    )
}

// Rows are strings, highest first. Comments give the degree names.
const C_RANGES: [DegreeRange; CAGED_STRING_COUNT] = [
    range(4, 8),  // 3 .. b6
    range(11, 3), // 7 .. b3
    range(6, 10), // #4 .. b7
    range(2, 5),  // 2 .. 4
    range(9, 1),  // 6 .. b2
    range(4, 8),  // 3 .. b6
];

const A_RANGES: [DegreeRange; CAGED_STRING_COUNT] = [
    range(6, 10),
    range(2, 5),
    range(9, 1),
    range(4, 8),
    range(11, 3),
    range(6, 10),
];

const G_RANGES: [DegreeRange; CAGED_STRING_COUNT] = [
    range(9, 1),
    range(4, 8),
    range(11, 3),
    range(6, 10),
    range(2, 5),
    range(9, 1),
];

const E_RANGES: [DegreeRange; CAGED_STRING_COUNT] = [
    range(11, 3),
    range(6, 10),
    range(2, 5),
    range(9, 1),
    range(4, 8),
    range(11, 3),
];

const D_RANGES: [DegreeRange; CAGED_STRING_COUNT] = [
    range(2, 5),
    range(9, 1),
    range(4, 8),
    range(11, 3),
    range(6, 10),
    range(2, 5),
];

impl CagedPosition {
    pub const ALL: [CagedPosition; 5] = [
        CagedPosition::C,
        CagedPosition::A,
        CagedPosition::G,
        CagedPosition::E,
        CagedPosition::D,
    ];

    /// Inclusive (start, end) degree range per string, highest string first.
    pub fn degree_ranges(self) -> &'static [DegreeRange; CAGED_STRING_COUNT] {
        match self {
            CagedPosition::C => &C_RANGES,
            CagedPosition::A => &A_RANGES,
            CagedPosition::G => &G_RANGES,
            CagedPosition::E => &E_RANGES,
            CagedPosition::D => &D_RANGES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CagedPosition::C => "C",
            CagedPosition::A => "A",
            CagedPosition::G => "G",
            CagedPosition::E => "E",
            CagedPosition::D => "D",
        }
    }
}

impl fmt::Display for CagedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CagedPosition {
    type Err = TheoryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        CagedPosition::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(text))
            .ok_or_else(|| TheoryError::parse("CAGED position", text))
    }
}

/// An ordered set of positions, lowest string first and ascending in pitch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    positions: Vec<Position>,
}

impl Shape {
    pub fn new(positions: Vec<Position>) -> Self {
        Shape { positions }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    /// The same positions in the opposite order.
    pub fn reversed(&self) -> Shape {
        Shape::new(self.positions.iter().rev().copied().collect())
    }

    /// Lowest and highest fret used, or `None` for an empty shape.
    pub fn fret_span(&self) -> Option<(i32, i32)> {
        let min = self.positions.iter().map(|p| p.fret).min()?;
        let max = self.positions.iter().map(|p| p.fret).max()?;
        Some((min, max))
    }

    /// Every position transposed by `frets`.
    pub fn shifted(&self, frets: i32) -> Shape {
        Shape::new(
            self.positions
                .iter()
                .map(|p| Position::new(p.string, p.fret + frets))
                .collect(),
        )
    }

    /// The shape one octave higher, or `None` if that passes `MAX_FRET`.
    pub fn move_octave_up(&self) -> Option<Shape> {
        let moved = self.shifted(OCTAVE);
        match moved.fret_span() {
            Some((_, max)) if max > MAX_FRET => None,
            _ => Some(moved),
        }
    }

    /// Sounding pitch of each position, in shape order.
    pub fn notes(&self, tuning: &Tuning) -> Result<Vec<AbsNote>, TheoryError> {
        self.positions.iter().map(|&p| tuning.get_note(p)).collect()
    }
}

/// Scale degrees a string plays in a CAGED range, in walk order.
fn degrees_in_range(ctx: &Context, (start, end): DegreeRange) -> Vec<ScaleDegree> {
    let mut degrees = Vec::new();
    let mut current = start;
    for _ in 0..OCTAVE {
        if ctx.scale.contains(current) {
            degrees.push(current);
        }
        if current == end {
            break;
        }
        current = current.add_half_steps(1);
    }
    degrees
}

/// Build one CAGED shape for the context's tuning and scale.
pub fn build_shape(ctx: &Context, caged_position: CagedPosition) -> Result<Shape, TheoryError> {
    let string_count = ctx.tuning.string_count();
    if string_count != CAGED_STRING_COUNT {
        return Err(TheoryError::UnsupportedStringCount {
            expected: CAGED_STRING_COUNT,
            found: string_count,
        });
    }

    let ranges = caged_position.degree_ranges();
    let mut positions = Vec::new();
    let mut last_note: Option<AbsNote> = None;

    for string in (0..string_count).rev() {
        for degree in degrees_in_range(ctx, ranges[string]) {
            let rel_note = ctx.scale.get_rel_note(degree);
            let (note, fret) = match last_note {
                None => {
                    let fret = ctx.tuning.get_fret(string, rel_note)?;
                    (ctx.tuning.get_note(Position::new(string, fret))?, fret)
                }
                Some(previous) => {
                    let note = previous.next_note(rel_note)?;
                    (note, ctx.tuning.get_fret(string, note)?)
                }
            };
            positions.push(Position::new(string, fret));
            last_note = Some(note);
        }
    }

    let shape = Shape::new(positions);
    if shape.positions.iter().any(|p| p.fret < 0) {
        debug!(%caged_position, "shape dips below the nut, moving up an octave");
        return Ok(shape.shifted(OCTAVE));
    }
    Ok(shape)
}

/// All five CAGED shapes, each moved up an octave whenever that still fits.
pub fn all_caged_shapes(ctx: &Context) -> Result<Vec<(CagedPosition, Shape)>, TheoryError> {
    CagedPosition::ALL
        .into_iter()
        .map(|caged_position| {
            let shape = build_shape(ctx, caged_position)?;
            let shape = match shape.move_octave_up() {
                Some(moved) => {
                    debug!(%caged_position, "using the shape an octave higher");
                    moved
                }
                None => shape,
            };
            Ok((caged_position, shape))
        })
        .collect()
}
