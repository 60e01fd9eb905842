// ASCII rendering of shapes and exercise sequences for the console.
//
// `render_shape` draws a fretboard diagram (fret numbers across the top, one
// row per string, highest string first) with an `x` on each shape position.
// `render_tab` writes plain tablature: one line per string, each note's fret
// on its own string and dashes of equal width on the others, so the columns
// stay aligned.

use crate::caged::Shape;
use crate::tuning::Position;

/// Fretboard diagram of a shape over the frets it spans.
pub fn render_shape(string_count: usize, shape: &Shape) -> String {
    let Some((min_fret, max_fret)) = shape.fret_span() else {
        return String::new();
    };

    let mut out = String::from(" ");
    for fret in min_fret..=max_fret {
        out.push_str(&format!("{fret:>2}  "));
    }
    out.push('\n');

    for string in 0..string_count {
        out.push('|');
        for fret in min_fret..=max_fret {
            if shape.contains(Position::new(string, fret)) {
                out.push_str("-x-|");
            } else {
                out.push_str("---|");
            }
        }
        out.push('\n');
    }
    out
}

/// Tablature for a sequence of positions.
pub fn render_tab(string_count: usize, positions: &[Position]) -> String {
    let mut lines = vec![String::from("-"); string_count];

    for position in positions {
        let fret = position.fret.to_string();
        for (string, line) in lines.iter_mut().enumerate() {
            if string == position.string {
                line.push_str(&fret);
                line.push('-');
            } else {
                line.push_str(&"-".repeat(fret.len() + 1));
            }
        }
    }

    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// A section heading underlined to its own width.
pub fn header(text: &str) -> String {
    format!("{text}\n{}\n", "=".repeat(text.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shape() {
        let shape = Shape::new(vec![
            Position::new(2, 5),
            Position::new(1, 7),
            Position::new(0, 5),
        ]);
        let out = render_shape(3, &shape);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  5   6   7  ");
        assert_eq!(lines[1], "|-x-|---|---|");
        assert_eq!(lines[2], "|---|---|-x-|");
        assert_eq!(lines[3], "|-x-|---|---|");
    }

    #[test]
    fn test_render_shape_empty() {
        assert_eq!(render_shape(6, &Shape::new(Vec::new())), "");
    }

    #[test]
    fn test_render_tab_aligns_columns() {
        let positions = [Position::new(1, 3), Position::new(0, 12)];
        let out = render_tab(3, &positions);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, ["---12-", "-3----", "------"]);
    }

    #[test]
    fn test_header() {
        assert_eq!(header("E Aeolian"), "E Aeolian\n=========\n");
    }
}
