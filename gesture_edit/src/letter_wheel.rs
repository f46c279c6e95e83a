//! A 26-position ring of capital letters, selected by angle or stepped.

use std::f32::consts::TAU;

use glyph_outline::ALPHABET;

pub const LETTER_COUNT: usize = ALPHABET.len();

/// `floor(angle / 2π · 26)` wrapped into `0..26`.  Periodic in `2π`; no
/// hysteresis.
pub fn index_for_angle(angle: f32) -> usize {
    let slot = (angle / TAU * LETTER_COUNT as f32).floor() as i64;
    slot.rem_euclid(LETTER_COUNT as i64) as usize
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LetterWheel {
    current: usize,
}

impl LetterWheel {
    pub fn new() -> Self { LetterWheel::default() }

    pub fn index(&self)  -> usize { self.current }
    pub fn letter(&self) -> char  { ALPHABET[self.current] }

    /// Move to `index` (wrapped).  Returns the new index only if it changed.
    pub fn select_index(&mut self, index: usize) -> Option<usize> {
        let index = index % LETTER_COUNT;
        if index == self.current {
            return None;
        }
        self.current = index;
        Some(index)
    }

    /// Map `angle` onto the wheel.  Returns the new index only if it changed.
    pub fn select_by_angle(&mut self, angle: f32) -> Option<usize> {
        self.select_index(index_for_angle(angle))
    }

    /// Step forward, wrapping `Z` to `A`.
    pub fn next(&mut self) -> char {
        self.current = (self.current + 1) % LETTER_COUNT;
        self.letter()
    }

    /// Step back, wrapping `A` to `Z`.
    pub fn previous(&mut self) -> char {
        self.current = (self.current + LETTER_COUNT - 1) % LETTER_COUNT;
        self.letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn reference_angles() {
        assert_eq!(index_for_angle(0.0), 0);
        assert_eq!(index_for_angle(PI), 13);
        assert_eq!(index_for_angle(-0.01), 25);
        assert_eq!(index_for_angle(-PI), 13);
    }

    #[test]
    fn periodic_in_two_pi() {
        for &a in &[0.3f32, 1.7, -2.0, 2.9, -0.7] {
            assert_eq!(index_for_angle(a), index_for_angle(a + TAU), "angle {}", a);
        }
    }

    #[test]
    fn select_reports_changes_only() {
        let mut w = LetterWheel::new();
        assert_eq!(w.select_by_angle(0.1), None);
        assert_eq!(w.select_by_angle(PI), Some(13));
        assert_eq!(w.letter(), 'N');
        assert_eq!(w.select_by_angle(PI + 0.05), None);
    }

    #[test]
    fn stepping_wraps() {
        let mut w = LetterWheel::new();
        assert_eq!(w.previous(), 'Z');
        assert_eq!(w.next(), 'A');
        assert_eq!(w.next(), 'B');
        w.select_index(25);
        assert_eq!(w.next(), 'A');
    }
}
