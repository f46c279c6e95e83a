//! # glyph_outline
//!
//! The glyph being edited: a fixed base outline per capital letter and a list
//! of control points that can be deformed as a whole or dragged one at a time.
//!
//! Every control point keeps its baseline (`original_x/y`) for life.  The
//! displayed position (`current_x/y`) is always recomputed from that baseline
//! by [`GlyphModel::apply_deformation`], so repeated deformations never drift.
//!
//! ```rust
//! use glyph_outline::{Deformation, GlyphModel};
//!
//! let mut glyph = GlyphModel::new('C', 800.0, 600.0);
//! glyph.apply_deformation(Deformation { scale: 2.0, ..Deformation::IDENTITY });
//!
//! // Top-right corner of the box, pushed away from the canvas centre.
//! let corner = &glyph.points()[0];
//! assert!((corner.original_x - 460.0).abs() < 1e-3 && (corner.original_y - 150.0).abs() < 1e-3);
//! assert!((corner.current_x  - 520.0).abs() < 1e-3 && corner.current_y.abs() < 1e-3);
//! ```

mod deform;
mod outline;

pub use deform::Deformation;
pub use outline::{base_outline, letter_index, OutlinePoint, Segment, ALPHABET};

use log::debug;
use serde::Serialize;

// ════════════════════════════════════════════════════════════════════════════
// ControlPoint
// ════════════════════════════════════════════════════════════════════════════

/// Curve type of the segment ending at a control point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveKind {
    Line,
    /// Quadratic segment; the handle is a baseline coordinate and is deformed
    /// alongside the point (see [`GlyphModel::current_handle`]).
    Quadratic { handle_x: f32, handle_y: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlPoint {
    /// Index of the point in the base outline (the leading move-to is
    /// outline index 0, so ids start at 1).
    pub id:         usize,
    pub original_x: f32,
    pub original_y: f32,
    pub current_x:  f32,
    pub current_y:  f32,
    pub curve:      CurveKind,
    pub selected:   bool,
}

/// Baseline view of one control point, as handed to the edit pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaselinePosition {
    pub id:    usize,
    pub x:     f32,
    pub y:     f32,
    pub curve: CurveKind,
}

// ════════════════════════════════════════════════════════════════════════════
// GlyphModel
// ════════════════════════════════════════════════════════════════════════════

/// One editable glyph on a canvas of fixed pixel size.
#[derive(Clone, Debug)]
pub struct GlyphModel {
    letter:      char,
    canvas_w:    f32,
    canvas_h:    f32,
    points:      Vec<ControlPoint>,
    /// Index into `points` of the selected point, if any.
    selected:    Option<usize>,
    deformation: Deformation,
}

impl GlyphModel {
    pub fn new(letter: char, canvas_w: f32, canvas_h: f32) -> Self {
        let mut glyph = GlyphModel {
            letter,
            canvas_w,
            canvas_h,
            points:      Vec::new(),
            selected:    None,
            deformation: Deformation::IDENTITY,
        };
        glyph.load_points();
        glyph
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn letter(&self)      -> char            { self.letter }
    pub fn points(&self)      -> &[ControlPoint] { &self.points }
    pub fn deformation(&self) -> Deformation     { self.deformation }
    pub fn canvas_size(&self) -> (f32, f32)      { (self.canvas_w, self.canvas_h) }

    /// Canvas centre; the pivot for scale and rotation.
    pub fn center(&self) -> (f32, f32) {
        (self.canvas_w / 2.0, self.canvas_h / 2.0)
    }

    /// Half-height of the drawn glyph in pixels.
    pub fn glyph_size(&self) -> f32 {
        self.canvas_h / 4.0
    }

    pub fn selected(&self) -> Option<&ControlPoint> {
        self.selected.and_then(|i| self.points.get(i))
    }

    pub fn baseline_positions(&self) -> Vec<BaselinePosition> {
        self.points.iter()
            .map(|p| BaselinePosition {
                id:    p.id,
                x:     p.original_x,
                y:     p.original_y,
                curve: p.curve,
            })
            .collect()
    }

    // ── character switching ───────────────────────────────────────────────

    /// Switch to another letter.  The new outline is shown under the current
    /// deformation; any drag on the old letter is discarded.
    pub fn set_character(&mut self, letter: char) {
        debug!("glyph: switching {} -> {}", self.letter, letter);
        self.letter = letter;
        self.load_points();
        let d = self.deformation;
        self.apply_deformation(d);
    }

    /// Throw away drags and deformation; every point returns to baseline.
    pub fn reset(&mut self) {
        self.deformation = Deformation::IDENTITY;
        self.load_points();
    }

    fn load_points(&mut self) {
        let outline = base_outline(self.letter, self.center(), self.glyph_size());
        self.selected = None;
        self.points = outline.iter()
            .enumerate()
            .filter_map(|(id, p)| {
                let curve = match p.segment {
                    Segment::MoveTo            => return None,
                    Segment::LineTo            => CurveKind::Line,
                    Segment::QuadTo { hx, hy } => CurveKind::Quadratic { handle_x: hx, handle_y: hy },
                };
                Some(ControlPoint {
                    id,
                    original_x: p.x,
                    original_y: p.y,
                    current_x:  p.x,
                    current_y:  p.y,
                    curve,
                    selected:   false,
                })
            })
            .collect();
    }

    // ── deformation ───────────────────────────────────────────────────────

    /// Recompute every point's current position from its baseline.
    pub fn apply_deformation(&mut self, deformation: Deformation) {
        self.deformation = deformation;
        let center = self.center();
        for p in &mut self.points {
            let (x, y) = deformation.apply(center, p.original_x, p.original_y);
            p.current_x = x;
            p.current_y = y;
        }
    }

    /// Re-apply the current deformation, discarding any drags.
    pub fn regenerate(&mut self) {
        let d = self.deformation;
        self.apply_deformation(d);
    }

    /// The deformed handle of a quadratic point; `None` for straight segments.
    pub fn current_handle(&self, point: &ControlPoint) -> Option<(f32, f32)> {
        match point.curve {
            CurveKind::Line => None,
            CurveKind::Quadratic { handle_x, handle_y } => {
                Some(self.deformation.apply(self.center(), handle_x, handle_y))
            }
        }
    }

    // ── direct manipulation ───────────────────────────────────────────────

    /// Select the first point (in outline order) whose current position lies
    /// strictly within `radius` pixels of `(x, y)`.  This is the first match,
    /// not necessarily the nearest.  Clears the selection when nothing is
    /// close enough.
    pub fn try_select_near(&mut self, x: f32, y: f32, radius: f32) -> Option<usize> {
        let hit = self.points.iter().position(|p| {
            let dx = p.current_x - x;
            let dy = p.current_y - y;
            (dx * dx + dy * dy).sqrt() < radius
        });

        for (i, p) in self.points.iter_mut().enumerate() {
            p.selected = Some(i) == hit;
        }
        self.selected = hit;
        hit.map(|i| self.points[i].id)
    }

    /// Overwrite the current position of point `id`.  Returns false for an
    /// unknown id.
    pub fn set_control_point_position(&mut self, id: usize, x: f32, y: f32) -> bool {
        match self.points.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.current_x = x;
                p.current_y = y;
                true
            }
            None => false,
        }
    }

    /// Drag the selected point, if there is one.
    pub fn move_selected(&mut self, x: f32, y: f32) -> bool {
        match self.selected.and_then(|i| self.points.get_mut(i)) {
            Some(p) => {
                p.current_x = x;
                p.current_y = y;
                true
            }
            None => false,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(letter: char) -> GlyphModel {
        GlyphModel::new(letter, 800.0, 600.0)
    }

    fn positions(g: &GlyphModel) -> Vec<(f32, f32)> {
        g.points().iter().map(|p| (p.current_x, p.current_y)).collect()
    }

    #[test]
    fn move_to_is_not_a_control_point() {
        let g = glyph('A');
        assert_eq!(g.points().len(), 7);
        assert_eq!(g.points()[0].id, 1);
        assert!(g.points().iter().all(|p| p.curve == CurveKind::Line));
    }

    #[test]
    fn b_keeps_quadratic_handles() {
        let g = glyph('B');
        let quads: Vec<_> = g.points().iter()
            .filter(|p| matches!(p.curve, CurveKind::Quadratic { .. }))
            .collect();
        assert_eq!(quads.len(), 4);
        let (hx, hy) = g.current_handle(quads[0]).unwrap();
        assert!((hx - 490.0).abs() < 1e-3 && (hy - 420.0).abs() < 1e-3);
        assert_eq!(g.current_handle(&g.points()[0]), None);
    }

    #[test]
    fn starts_at_baseline() {
        let g = glyph('C');
        for p in g.points() {
            assert_eq!((p.current_x, p.current_y), (p.original_x, p.original_y));
        }
    }

    #[test]
    fn deformation_is_idempotent() {
        let mut g = glyph('A');
        let d = Deformation { scale: 1.7, rotation: 0.4, distortion: 35.0 };
        g.apply_deformation(d);
        let first = positions(&g);
        g.apply_deformation(d);
        assert_eq!(positions(&g), first);
    }

    #[test]
    fn deformation_never_reads_current_positions() {
        let mut g = glyph('A');
        let d = Deformation { scale: 2.0, ..Deformation::IDENTITY };
        g.apply_deformation(d);
        let expected = positions(&g);
        g.set_control_point_position(1, 0.0, 0.0);
        g.apply_deformation(d);
        assert_eq!(positions(&g), expected);
    }

    #[test]
    fn select_within_radius() {
        let mut g = glyph('C');
        let (x, y) = (g.points()[0].current_x, g.points()[0].current_y);
        assert_eq!(g.try_select_near(x + 10.0, y, 15.0), Some(g.points()[0].id));
        assert!(g.points()[0].selected);
        assert_eq!(g.try_select_near(x + 15.0, y, 15.0), None, "radius is strict");
        assert!(g.selected().is_none());
        assert!(!g.points()[0].selected);
    }

    #[test]
    fn select_takes_first_match_not_nearest() {
        let mut g = glyph('C');
        // Put point 2 exactly under the cursor and point 1 slightly off.
        let (id1, id2) = (g.points()[0].id, g.points()[1].id);
        g.set_control_point_position(id1, 105.0, 100.0);
        g.set_control_point_position(id2, 100.0, 100.0);
        assert_eq!(g.try_select_near(100.0, 100.0, 15.0), Some(id1));
    }

    #[test]
    fn drag_selected_point() {
        let mut g = glyph('C');
        assert!(!g.move_selected(1.0, 1.0), "nothing selected yet");
        let p = g.points()[2].clone();
        g.try_select_near(p.current_x, p.current_y, 15.0);
        assert!(g.move_selected(42.0, 24.0));
        assert_eq!((g.points()[2].current_x, g.points()[2].current_y), (42.0, 24.0));
        assert_eq!((g.points()[2].original_x, g.points()[2].original_y),
                   (p.original_x, p.original_y));
    }

    #[test]
    fn regenerate_discards_drag() {
        let mut g = glyph('C');
        g.apply_deformation(Deformation { rotation: 0.5, ..Deformation::IDENTITY });
        let expected = positions(&g);
        g.set_control_point_position(g.points()[1].id, 7.0, 7.0);
        g.regenerate();
        assert_eq!(positions(&g), expected);
    }

    #[test]
    fn set_position_unknown_id() {
        let mut g = glyph('C');
        assert!(!g.set_control_point_position(99, 0.0, 0.0));
    }

    #[test]
    fn set_character_keeps_deformation() {
        let mut g = glyph('A');
        let d = Deformation { scale: 2.0, ..Deformation::IDENTITY };
        g.apply_deformation(d);
        g.set_character('D');
        assert_eq!(g.letter(), 'D');
        assert_eq!(g.points().len(), 4);
        let p = &g.points()[0];
        assert_eq!((p.current_x, p.current_y), d.apply(g.center(), p.original_x, p.original_y));
    }

    #[test]
    fn reset_returns_to_baseline() {
        let mut g = glyph('A');
        g.apply_deformation(Deformation { scale: 0.5, rotation: 1.0, distortion: 90.0 });
        g.reset();
        assert_eq!(g.deformation(), Deformation::IDENTITY);
        for p in g.points() {
            assert_eq!((p.current_x, p.current_y), (p.original_x, p.original_y));
        }
    }

    #[test]
    fn baseline_positions_match_points() {
        let g = glyph('B');
        let base = g.baseline_positions();
        assert_eq!(base.len(), g.points().len());
        assert_eq!(base[0].id, g.points()[0].id);
        assert_eq!((base[0].x, base[0].y), (g.points()[0].original_x, g.points()[0].original_y));
    }
}
