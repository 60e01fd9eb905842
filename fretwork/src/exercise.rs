// Practice sequences: walking a shape with a repeating step pattern.
//
// An exercise pattern is a short list of signed index steps, e.g. `[1, 1, 1,
// -2]` ("up three, back two"). Walking a shape starts the cursor far enough
// in that the pattern's deepest dip inside a cycle stays on the shape, emits
// the position under the cursor, applies the next step, and stops as soon as
// the cursor leaves the shape.
//
// The feel (straight sixteenths or eighth-note triplets) never changes the
// walk; only the score writer in midi.rs reads it.

use crate::caged::Shape;
use crate::error::TheoryError;
use crate::tuning::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Rhythmic subdivision an exercise is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feel {
    Straight,
    Triplet,
}

impl Feel {
    /// Notes per 4/4 measure: sixteenths for straight, eighth triplets otherwise.
    pub fn notes_per_measure(self) -> usize {
        match self {
            Feel::Straight => 16,
            Feel::Triplet => 12,
        }
    }
}

impl fmt::Display for Feel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feel::Straight => f.write_str("straight"),
            Feel::Triplet => f.write_str("triplet"),
        }
    }
}

/// A named step pattern. The pattern is non-empty with a positive sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExercise")]
pub struct ExerciseDescriptor {
    pub name: String,
    pattern: Vec<i32>,
    pub feel: Feel,
}

/// Deserialized form, checked by `ExerciseDescriptor::new`.
#[derive(Deserialize)]
struct RawExercise {
    name: String,
    pattern: Vec<i32>,
    feel: Feel,
}

impl TryFrom<RawExercise> for ExerciseDescriptor {
    type Error = TheoryError;

    fn try_from(raw: RawExercise) -> Result<Self, Self::Error> {
        ExerciseDescriptor::new(raw.name, raw.pattern, raw.feel)
    }
}

impl ExerciseDescriptor {
    pub fn new(name: impl Into<String>, pattern: Vec<i32>, feel: Feel) -> Result<Self, TheoryError> {
        check_pattern(&pattern)?;
        Ok(ExerciseDescriptor {
            name: name.into(),
            pattern,
            feel,
        })
    }

    pub fn pattern(&self) -> &[i32] {
        &self.pattern
    }

    /// Walk `shape` with this exercise's pattern.
    pub fn walk(&self, shape: &Shape, reverse: bool) -> Result<Vec<Position>, TheoryError> {
        walk(shape, &self.pattern, reverse)
    }
}

fn check_pattern(pattern: &[i32]) -> Result<(), TheoryError> {
    if pattern.is_empty() {
        return Err(TheoryError::EmptyPattern);
    }
    let sum: i64 = pattern.iter().map(|&step| step as i64).sum();
    if sum <= 0 {
        return Err(TheoryError::NonPositivePatternSum(sum));
    }
    Ok(())
}

/// Index the walk starts at: minus the lowest prefix sum of the pattern,
/// taken over the empty prefix through all but the last step.
pub fn start_index(pattern: &[i32]) -> i64 {
    let mut sum = 0i64;
    let mut lowest = 0i64;
    for &step in pattern.iter().take(pattern.len().saturating_sub(1)) {
        sum += step as i64;
        lowest = lowest.min(sum);
    }
    -lowest
}

/// Walk `shape` (or its reverse) with a repeating step pattern.
///
/// Emits the position under the cursor, then moves by the next step, until
/// a step would leave the shape. Deterministic and side-effect free.
pub fn walk(shape: &Shape, pattern: &[i32], reverse: bool) -> Result<Vec<Position>, TheoryError> {
    check_pattern(pattern)?;

    let shape = if reverse { shape.reversed() } else { shape.clone() };
    let positions = shape.positions();
    let len = positions.len() as i64;
    let mut cursor = start_index(pattern);
    debug!(start = cursor, shape_len = len, "walking exercise pattern");

    let mut result = Vec::new();
    for &step in pattern.iter().cycle() {
        if !(0..len).contains(&cursor) {
            break;
        }
        result.push(positions[cursor as usize]);
        cursor += step as i64;
    }

    debug!(notes = result.len(), "exercise walk finished");
    Ok(result)
}
