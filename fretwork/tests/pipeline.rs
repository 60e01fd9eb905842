// End-to-end checks: text in, shapes and exercises out.
//
// Parses the stock tuning and scales, builds every CAGED shape, walks each
// shape with every built-in exercise, and renders / writes the results. No
// files are written; MIDI output goes to an in-memory buffer.

use fretwork::caged::{MAX_FRET, all_caged_shapes, build_shape};
use fretwork::catalog::{DEFAULT_SCALES, DEFAULT_TUNING, default_exercises};
use fretwork::midi::{MidiScore, ScoreWriter};
use fretwork::tab::{render_shape, render_tab};
use fretwork::{AbsNote, CagedPosition, Context, RelNote, Scale, ScaleDegree, TheoryError, walk};

fn context(scale: &str) -> Context {
    Context::new(DEFAULT_TUNING.parse().unwrap(), scale.parse().unwrap())
}

#[test]
fn test_next_note_contract() {
    let c: RelNote = "C".parse().unwrap();
    let d: RelNote = "D".parse().unwrap();
    assert_eq!(AbsNote::new(60).next_note(c), Ok(AbsNote::new(72)));
    assert_eq!(AbsNote::new(60).next_note(d), Ok(AbsNote::new(62)));
}

#[test]
fn test_major_third_of_a_is_c_sharp() {
    let scale: Scale = "A major pentatonic".parse().unwrap();
    let third: ScaleDegree = "3".parse().unwrap();
    assert_eq!(scale.get_rel_note(third).to_string(), "C#");
}

#[test]
fn test_e_shape_of_e_aeolian_is_playable_and_ascending() {
    let ctx = context("E Aeolian");
    let shape = build_shape(&ctx, CagedPosition::E).unwrap();
    assert!(shape.positions().iter().all(|p| (0..=MAX_FRET).contains(&p.fret)));
    let notes = shape.notes(&ctx.tuning).unwrap();
    assert!(notes.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_every_default_exercise_walks_every_default_shape() {
    let exercises = default_exercises().unwrap();
    for scale in DEFAULT_SCALES {
        let ctx = context(scale);
        for (caged_position, shape) in all_caged_shapes(&ctx).unwrap() {
            for exercise in &exercises {
                let forward = exercise.walk(&shape, false).unwrap();
                let reverse = exercise.walk(&shape, true).unwrap();
                assert!(!forward.is_empty(), "{scale} {caged_position} {}", exercise.name);
                assert_eq!(forward.len(), reverse.len());
                assert!(forward.iter().all(|p| shape.contains(*p)));
            }
        }
    }
}

#[test]
fn test_rejected_pattern_never_walks() {
    let ctx = context("A Aeolian");
    let shape = build_shape(&ctx, CagedPosition::A).unwrap();
    assert_eq!(
        walk(&shape, &[1, -2], false),
        Err(TheoryError::NonPositivePatternSum(-1))
    );
}

#[test]
fn test_seven_string_tuning_is_rejected() {
    let ctx = Context::new(
        "B1-E2-A2-D3-G3-B3-E4".parse().unwrap(),
        "E aeolian".parse().unwrap(),
    );
    assert!(matches!(
        build_shape(&ctx, CagedPosition::C),
        Err(TheoryError::UnsupportedStringCount { found: 7, .. })
    ));
}

#[test]
fn test_render_and_write_an_exercise() {
    let ctx = context("G Aeolian");
    let shapes = all_caged_shapes(&ctx).unwrap();
    let (caged_position, shape) = &shapes[2];
    assert_eq!(*caged_position, CagedPosition::G);

    let exercise = &default_exercises().unwrap()[0];
    let forward = exercise.walk(shape, false).unwrap();

    let diagram = render_shape(6, shape);
    assert_eq!(diagram.lines().count(), 7);
    assert_eq!(diagram.matches('x').count(), shape.len());

    let tab = render_tab(6, &forward);
    let widths: Vec<usize> = tab.lines().map(str::len).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]));

    let mut score = MidiScore::new("Exercises", "G Aeolian - G Shape", ctx.tuning.clone());
    score.add_exercise(&exercise.name, &forward, exercise.feel).unwrap();
    assert_eq!(score.note_count(), forward.len());
    assert!(!score.to_bytes().unwrap().is_empty());
}
