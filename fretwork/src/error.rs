// Error type shared by the theory, fretboard and exercise modules.
//
// Two families live here: text that does not match one of the note / degree /
// scale / tuning grammars, and precondition violations (values outside their
// domain, a tuning the CAGED table cannot describe, an exercise pattern that
// never advances). Nothing here is transient, so callers fail fast.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// Text did not match the grammar named by `kind`.
    #[error("invalid {kind} '{text}'")]
    Parse { kind: &'static str, text: String },

    #[error("pitch class {0} is outside 0..12")]
    PitchClassOutOfRange(i32),

    #[error("scale degree {0} is outside 0..12")]
    DegreeOutOfRange(i32),

    #[error("absolute note value {0} is negative")]
    NegativeNote(i64),

    #[error("absolute note value {0} is too high")]
    NoteTooHigh(i64),

    /// The CAGED tables only describe six-string instruments.
    #[error("CAGED shapes need a {expected}-string tuning, got {found} strings")]
    UnsupportedStringCount { expected: usize, found: usize },

    #[error("fret {0} is beyond any fretboard")]
    FretOutOfRange(i64),

    #[error("string {string} does not exist on a {count}-string tuning")]
    StringOutOfRange { string: usize, count: usize },

    #[error("exercise pattern is empty")]
    EmptyPattern,

    /// A pattern whose cycle sum is not positive would never leave its start.
    #[error("exercise pattern sums to {0}, it must be positive")]
    NonPositivePatternSum(i64),
}

impl TheoryError {
    pub(crate) fn parse(kind: &'static str, text: &str) -> Self {
        TheoryError::Parse {
            kind,
            text: text.to_string(),
        }
    }
}
