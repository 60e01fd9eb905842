// Built-in practice material for the `generate` driver.
//
// The exercise list is grouped the way a practice routine usually is:
// melodic sequences, intervals, triads and arpeggios. Interval exercises are
// generated from an interval size `s` (in shape steps, so 3rds are `s = 2`)
// in four variants. Every pattern here has a positive cycle sum.

use crate::error::TheoryError;
use crate::exercise::{ExerciseDescriptor, Feel};

/// Scales the driver picks from by default.
pub const DEFAULT_SCALES: [&str; 4] = ["E Aeolian", "A Aeolian", "G Aeolian", "D Aeolian"];

/// Tuning the driver uses by default.
pub const DEFAULT_TUNING: &str = "E2-A2-D3-G3-B3-E4";

const MELODIC_SEQUENCES: [(&str, &[i32], Feel); 7] = [
    ("Melodic Sequences: 1a", &[1, 1, 1, -2], Feel::Straight),
    ("Melodic Sequences: 1b", &[1, 1, -2, 1], Feel::Straight),
    ("Melodic Sequences: 1d", &[-2, 1, 1, 1], Feel::Straight),
    ("Melodic Sequences: 1f", &[1, 1, -1], Feel::Straight),
    ("Melodic Sequences: 1g", &[1, 1, -1], Feel::Triplet),
    ("Melodic Sequences: 1h", &[-1, -1, 3], Feel::Triplet),
    ("Melodic Sequences: 1i", &[-1, 1, 1], Feel::Triplet),
];

const TRIADS: [(&str, &[i32], Feel); 6] = [
    ("Triads: Ascending", &[2, 2, -3], Feel::Triplet),
    ("Triads: Descending", &[-2, -2, 5], Feel::Triplet),
    ("Triads: Combined", &[2, 2, 1, -2, -2, 1], Feel::Triplet),
    ("Triads: High, Low, Middle", &[-4, 2, 3], Feel::Triplet),
    ("Triads: Four Note Pattern, Low Note Doubled", &[2, 2, -4, 1], Feel::Straight),
    ("Triads: Four Note Pattern, High Note Doubled", &[-4, 2, 2, 1], Feel::Straight),
];

const ARPEGGIOS: [(&str, &[i32], Feel); 2] = [
    ("Arpeggios: Ascending", &[2, 2, 2, -5], Feel::Straight),
    ("Arpeggios: Descending", &[-2, -2, -2, 7], Feel::Straight),
];

fn from_table(table: &[(&str, &[i32], Feel)]) -> Result<Vec<ExerciseDescriptor>, TheoryError> {
    table
        .iter()
        .map(|&(name, pattern, feel)| ExerciseDescriptor::new(name, pattern.to_vec(), feel))
        .collect()
}

/// The four interval drills for an interval of `steps` shape positions.
pub fn interval_exercises(name: &str, steps: i32) -> Result<Vec<ExerciseDescriptor>, TheoryError> {
    let s = steps;
    let variants = [
        ("Normal", vec![s, -(s - 1)]),
        ("Inverted", vec![-s, s + 1]),
        ("One Up, One Down", vec![s, 1, -s, 1]),
        ("Two Up, One Down", vec![s, -(s - 1), s, 1, -s, 1]),
    ];
    variants
        .into_iter()
        .map(|(variant, pattern)| {
            ExerciseDescriptor::new(format!("{name}: {variant}"), pattern, Feel::Straight)
        })
        .collect()
}

/// Every built-in exercise, in routine order.
pub fn default_exercises() -> Result<Vec<ExerciseDescriptor>, TheoryError> {
    let mut exercises = from_table(&MELODIC_SEQUENCES)?;
    exercises.extend(interval_exercises("3rds", 2)?);
    exercises.extend(from_table(&TRIADS)?);
    exercises.extend(from_table(&ARPEGGIOS)?);
    Ok(exercises)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exercises_are_valid() {
        let exercises = default_exercises().unwrap();
        assert_eq!(exercises.len(), 7 + 4 + 6 + 2);
        for exercise in &exercises {
            assert!(exercise.pattern().iter().sum::<i32>() > 0, "{}", exercise.name);
        }
    }

    #[test]
    fn test_interval_exercises() {
        let thirds = interval_exercises("3rds", 2).unwrap();
        let names: Vec<&str> = thirds.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "3rds: Normal",
                "3rds: Inverted",
                "3rds: One Up, One Down",
                "3rds: Two Up, One Down"
            ]
        );
        assert_eq!(thirds[0].pattern(), &[2, -1]);
        assert_eq!(thirds[1].pattern(), &[-2, 3]);
        assert_eq!(thirds[3].pattern(), &[2, -1, 2, 1, -2, 1]);
    }

    #[test]
    fn test_defaults_parse() {
        assert!(DEFAULT_TUNING.parse::<crate::tuning::Tuning>().is_ok());
        for scale in DEFAULT_SCALES {
            assert!(scale.parse::<crate::scale::Scale>().is_ok());
        }
    }
}
