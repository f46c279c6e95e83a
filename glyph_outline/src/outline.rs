//! Base outlines for the 26 capital letters.
//!
//! Only `A` and `B` have hand-drawn shapes; `C` through `Z` share a plain
//! box outline.  Coordinates are in canvas pixels, centred on `center`,
//! with `size` the half-height of the glyph.

use serde::{Deserialize, Serialize};

/// The ordered alphabet the editor works on.
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Position of `letter` in [`ALPHABET`], if it is a capital A–Z.
pub fn letter_index(letter: char) -> Option<usize> {
    ALPHABET.iter().position(|&c| c == letter)
}

// ════════════════════════════════════════════════════════════════════════════
// Segment / OutlinePoint
// ════════════════════════════════════════════════════════════════════════════

/// How the outline reaches a point from the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Pen-up jump; starts a contour.  Never becomes a control point.
    MoveTo,
    LineTo,
    /// Quadratic curve through the handle `(hx, hy)`.
    QuadTo { hx: f32, hy: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlinePoint {
    pub x:       f32,
    pub y:       f32,
    pub segment: Segment,
}

impl OutlinePoint {
    fn new(x: f32, y: f32, segment: Segment) -> Self {
        OutlinePoint { x, y, segment }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// base_outline
// ════════════════════════════════════════════════════════════════════════════

/// The fixed outline for `letter`.  Characters outside A–Z have no outline
/// and yield an empty vector.
pub fn base_outline(letter: char, center: (f32, f32), size: f32) -> Vec<OutlinePoint> {
    let (cx, cy) = center;
    let s = size;
    let mv = |x: f32, y: f32| OutlinePoint::new(x, y, Segment::MoveTo);
    let ln = |x: f32, y: f32| OutlinePoint::new(x, y, Segment::LineTo);
    let qd = |x: f32, y: f32, hx: f32, hy: f32| {
        OutlinePoint::new(x, y, Segment::QuadTo { hx, hy })
    };

    match letter {
        'A' => vec![
            mv(cx,             cy - s),
            ln(cx - s * 0.7,   cy + s),
            ln(cx - s * 0.3,   cy + s),
            ln(cx - s * 0.2,   cy + s * 0.3),
            ln(cx + s * 0.2,   cy + s * 0.3),
            ln(cx + s * 0.3,   cy + s),
            ln(cx + s * 0.7,   cy + s),
            ln(cx,             cy - s),
        ],
        'B' => vec![
            mv(cx - s * 0.5,   cy - s),
            ln(cx - s * 0.5,   cy + s),
            ln(cx + s * 0.3,   cy + s),
            qd(cx + s * 0.5,   cy + s * 0.7,  cx + s * 0.6, cy + s * 0.8),
            qd(cx + s * 0.5,   cy + s * 0.3,  cx + s * 0.6, cy + s * 0.2),
            ln(cx + s * 0.2,   cy),
            ln(cx + s * 0.4,   cy),
            qd(cx + s * 0.5,   cy - s * 0.3,  cx + s * 0.6, cy - s * 0.2),
            qd(cx + s * 0.5,   cy - s * 0.7,  cx + s * 0.6, cy - s * 0.8),
            ln(cx + s * 0.3,   cy - s),
            ln(cx - s * 0.5,   cy - s),
        ],
        'C'..='Z' => vec![
            mv(cx - s * 0.4,   cy - s),
            ln(cx + s * 0.4,   cy - s),
            ln(cx + s * 0.4,   cy + s),
            ln(cx - s * 0.4,   cy + s),
            ln(cx - s * 0.4,   cy - s),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_index_roundtrip() {
        assert_eq!(letter_index('A'), Some(0));
        assert_eq!(letter_index('N'), Some(13));
        assert_eq!(letter_index('Z'), Some(25));
        assert_eq!(letter_index('a'), None);
    }

    #[test]
    fn a_starts_with_move_to_apex() {
        let o = base_outline('A', (400.0, 300.0), 150.0);
        assert_eq!(o.len(), 8);
        assert_eq!(o[0].segment, Segment::MoveTo);
        assert_eq!((o[0].x, o[0].y), (400.0, 150.0));
    }

    #[test]
    fn b_has_four_curves() {
        let o = base_outline('B', (400.0, 300.0), 150.0);
        let curves = o.iter()
            .filter(|p| matches!(p.segment, Segment::QuadTo { .. }))
            .count();
        assert_eq!(curves, 4);
    }

    #[test]
    fn generic_letters_are_closed_boxes() {
        for &c in &ALPHABET[2..] {
            let o = base_outline(c, (0.0, 0.0), 10.0);
            assert_eq!(o.len(), 5, "{}", c);
            assert_eq!((o[0].x, o[0].y), (o[4].x, o[4].y));
        }
    }

    #[test]
    fn unknown_letter_is_empty() {
        assert!(base_outline('?', (0.0, 0.0), 10.0).is_empty());
    }
}
