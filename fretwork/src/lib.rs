// Fretwork: CAGED scale shapes and guitar practice sequences.
//
// Starting from plain music-theory text ("E Aeolian", "E2-A2-D3-G3-B3-E4"),
// the crate derives the five CAGED fretboard shapes of a scale and walks them
// with repeating step patterns to produce practice sequences, which can be
// printed as tablature or written to MIDI.
//
// Architecture (data flows down this list):
// - pitch.rs: Pitch classes, absolute notes, scale degrees, and their text forms
// - scale.rs: Scale types (named or explicit degree lists) and rooted scales
// - tuning.rs: Tunings, (string, fret) positions, fret lookup
// - caged.rs: The five CAGED shapes per tuning + scale
// - exercise.rs: Step-pattern walks over a shape
// - catalog.rs: Built-in exercise routine and default scales
// - tab.rs: ASCII shape diagrams and tablature
// - midi.rs: Score writer producing Standard MIDI Files
// - config.rs: JSON settings for the `generate` driver
// - error.rs: `TheoryError`
//
// Everything up to exercise.rs is pure and deterministic; the same inputs
// always give the same shapes and sequences.

pub mod caged;
pub mod catalog;
pub mod config;
pub mod error;
pub mod exercise;
pub mod midi;
pub mod pitch;
pub mod scale;
pub mod tab;
pub mod tuning;

pub use caged::{CagedPosition, Shape, all_caged_shapes, build_shape};
pub use error::TheoryError;
pub use exercise::{ExerciseDescriptor, Feel, walk};
pub use pitch::{AbsNote, RelNote, ScaleDegree};
pub use scale::{Scale, ScaleType};
pub use tuning::{Context, FretTarget, Position, Tuning};
