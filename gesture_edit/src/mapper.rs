//! Gesture → edit rule.
//!
//! The mapper is level-triggered: while a stable gesture persists its rule is
//! re-applied every frame using that frame's measurements.
//!
//! | Gesture | Mode | Rule |
//! |---|---|---|
//! | `point` | `PointEdit` | cursor = tip × canvas; select first point within radius, drag it |
//! | `pinch`, distance ≥ 0.04 | `Scale` | `scale = 0.5 + 2·clamp((d − 0.02) / 0.13, 0, 1)` |
//! | `pinch`, distance < 0.04 | `LetterSelect` | letter = `floor(angle / 2π · 26) mod 26`, on change only |
//! | `fist` | `Distort` | `distortion = min(100, hand_size · 500)` |
//! | `open` | `ResetGlide` | relax toward rest by `k = 0.1` per frame |
//! | `two_fingers` | `Rotate` | `rotation = index→middle angle` |
//! | `none` | `Idle` | nothing |
//!
//! Whenever the edit state actually changes, every control point is
//! recomputed from its baseline.

use std::fmt;

use glyph_outline::GlyphModel;
use hand_gesture::{Gesture, HandFeatures};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::edit_state::EditState;
use crate::letter_wheel::LetterWheel;

// ════════════════════════════════════════════════════════════════════════════
// MapperConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Pinches tighter than this pick letters instead of scaling.
    pub letter_select_threshold: f32,
    /// Pinch distance mapped to the smallest scale.
    pub pinch_min:               f32,
    /// Pinch distance mapped to the largest scale.
    pub pinch_max:               f32,
    pub scale_base:              f32,
    pub scale_span:              f32,
    /// Distortion per unit of hand size.
    pub distortion_gain:         f32,
    /// Fraction of the remaining distance to rest covered per open-hand frame.
    pub glide_rate:              f32,
    /// Control-point pick radius in canvas pixels.
    pub select_radius:           f32,
    pub canvas_width:            f32,
    pub canvas_height:           f32,
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            letter_select_threshold: 0.04,
            pinch_min:               0.02,
            pinch_max:               0.15,
            scale_base:              0.5,
            scale_span:              2.0,
            distortion_gain:         500.0,
            glide_rate:              0.1,
            select_radius:           15.0,
            canvas_width:            800.0,
            canvas_height:           600.0,
        }
    }
}

impl MapperConfig {
    /// Pinch distance → scale, before the edit-state clamp.
    pub fn scale_for_pinch(&self, distance: f32) -> f32 {
        let span = self.pinch_max - self.pinch_min;
        let n = if span > 0.0 { ((distance - self.pinch_min) / span).clamp(0.0, 1.0) } else { 0.0 };
        self.scale_base + n * self.scale_span
    }

    /// Hand size → distortion, before the edit-state clamp.
    pub fn distortion_for_hand(&self, hand_size: f32) -> f32 {
        (hand_size * self.distortion_gain).min(100.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mode
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Idle,
    PointEdit,
    Scale,
    Distort,
    ResetGlide,
    Rotate,
    LetterSelect,
}

impl Mode {
    /// A pinch splits into scale or letter-select on its distance.
    pub fn resolve(gesture: &Gesture, config: &MapperConfig) -> Mode {
        match *gesture {
            Gesture::None                => Mode::Idle,
            Gesture::Point { .. }        => Mode::PointEdit,
            Gesture::Pinch { distance, .. } if distance < config.letter_select_threshold
                                         => Mode::LetterSelect,
            Gesture::Pinch { .. }        => Mode::Scale,
            Gesture::Fist { .. }         => Mode::Distort,
            Gesture::Open { .. }         => Mode::ResetGlide,
            Gesture::TwoFingers { .. }   => Mode::Rotate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idle         => "idle",
            Mode::PointEdit    => "point edit",
            Mode::Scale        => "scale",
            Mode::Distort      => "distort",
            Mode::ResetGlide   => "reset glide",
            Mode::Rotate       => "rotate",
            Mode::LetterSelect => "letter select",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TransformMapper
// ════════════════════════════════════════════════════════════════════════════

/// What one mapper pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapOutcome {
    pub edit_changed: bool,
    /// New wheel index and letter, when letter-select moved the wheel.
    pub letter:       Option<(usize, char)>,
    /// Newly selected control point id.
    pub selected:     Option<usize>,
}

#[derive(Clone, Debug)]
pub struct TransformMapper {
    config:        MapperConfig,
    mode:          Mode,
    last_selected: Option<usize>,
}

impl TransformMapper {
    pub fn new(config: MapperConfig) -> Self {
        TransformMapper { config, mode: Mode::Idle, last_selected: None }
    }

    pub fn config(&self) -> &MapperConfig { &self.config }

    pub fn mode(&self) -> Mode { self.mode }

    /// The hand is gone: drop to idle without touching any state.
    pub fn release(&mut self) {
        self.enter(Mode::Idle);
        self.last_selected = None;
    }

    /// Apply the rule for this frame's features.
    pub fn apply(
        &mut self,
        features: &HandFeatures,
        edit:     &mut EditState,
        wheel:    &mut LetterWheel,
        glyph:    &mut GlyphModel,
    ) -> MapOutcome {
        let mode = Mode::resolve(&features.gesture, &self.config);
        self.enter(mode);

        let mut outcome = MapOutcome::default();
        let before = *edit;

        match (mode, features.gesture) {
            (Mode::PointEdit, Gesture::Point { tip }) => {
                let x = tip.x * self.config.canvas_width;
                let y = tip.y * self.config.canvas_height;
                let hit = glyph.try_select_near(x, y, self.config.select_radius);
                if let Some(id) = hit {
                    glyph.set_control_point_position(id, x, y);
                    if self.last_selected != Some(id) {
                        outcome.selected = Some(id);
                    }
                }
                self.last_selected = hit;
            }
            (Mode::Scale, Gesture::Pinch { distance, .. }) => {
                edit.set_scale(self.config.scale_for_pinch(distance));
            }
            (Mode::LetterSelect, Gesture::Pinch { angle, .. }) => {
                if let Some(index) = wheel.select_by_angle(angle) {
                    let letter = wheel.letter();
                    glyph.set_character(letter);
                    outcome.letter = Some((index, letter));
                }
            }
            (Mode::Distort, Gesture::Fist { hand_size, .. }) => {
                edit.set_distortion(self.config.distortion_for_hand(hand_size));
            }
            (Mode::ResetGlide, _) => {
                edit.glide_toward_rest(self.config.glide_rate);
            }
            (Mode::Rotate, Gesture::TwoFingers { rotation, .. }) => {
                edit.set_rotation(rotation);
            }
            _ => {}
        }

        if mode != Mode::PointEdit {
            self.last_selected = None;
        }

        if *edit != before {
            glyph.apply_deformation(edit.deformation());
            outcome.edit_changed = true;
        }
        outcome
    }

    fn enter(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!("mapper: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }
}

impl Default for TransformMapper {
    fn default() -> Self { TransformMapper::new(MapperConfig::default()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{extract_features, pose, GestureKind};

    struct Rig {
        mapper: TransformMapper,
        edit:   EditState,
        wheel:  LetterWheel,
        glyph:  GlyphModel,
    }

    impl Rig {
        fn new() -> Self {
            Rig {
                mapper: TransformMapper::default(),
                edit:   EditState::default(),
                wheel:  LetterWheel::new(),
                glyph:  GlyphModel::new('A', 800.0, 600.0),
            }
        }

        fn feed(&mut self, kind: GestureKind, frame: &hand_gesture::LandmarkFrame) -> MapOutcome {
            let f = extract_features(kind, frame);
            self.mapper.apply(&f, &mut self.edit, &mut self.wheel, &mut self.glyph)
        }
    }

    fn close(a: f32, b: f32) -> bool { (a - b).abs() < 1e-4 }

    #[test]
    fn scale_mapping_reference_values() {
        let c = MapperConfig::default();
        assert!(close(c.scale_for_pinch(0.02), 0.5));
        assert!(close(c.scale_for_pinch(0.15), 2.5));
        assert!(close(c.scale_for_pinch(0.085), 1.5));
        assert!(close(c.scale_for_pinch(0.0), 0.5));
        assert!(close(c.scale_for_pinch(0.5), 2.5));
    }

    #[test]
    fn distortion_mapping_reference_values() {
        let c = MapperConfig::default();
        assert!(close(c.distortion_for_hand(0.1), 50.0));
        assert!(close(c.distortion_for_hand(0.3), 100.0));
    }

    #[test]
    fn pinch_splits_on_distance() {
        let c = MapperConfig::default();
        let pinch = |distance| Gesture::Pinch { distance, angle: 0.0 };
        assert_eq!(Mode::resolve(&pinch(0.039), &c), Mode::LetterSelect);
        assert_eq!(Mode::resolve(&pinch(0.04), &c), Mode::Scale);
        assert_eq!(Mode::resolve(&Gesture::None, &c), Mode::Idle);
    }

    #[test]
    fn scale_rule_rewrites_points() {
        let mut rig = Rig::new();
        let out = rig.feed(GestureKind::Pinch, &pose::pinch(0.045, 0.0));
        assert_eq!(rig.mapper.mode(), Mode::Scale);
        assert!(out.edit_changed);
        assert!(close(rig.edit.scale(), 0.5 + 2.0 * 0.025 / 0.13));

        let mut expected = GlyphModel::new('A', 800.0, 600.0);
        expected.apply_deformation(rig.edit.deformation());
        assert_eq!(rig.glyph.points(), expected.points());

        // Same pinch again: nothing changes, nothing is recomputed.
        let out = rig.feed(GestureKind::Pinch, &pose::pinch(0.045, 0.0));
        assert!(!out.edit_changed);
    }

    #[test]
    fn letter_select_fires_on_index_change_only() {
        let mut rig = Rig::new();
        let out = rig.feed(GestureKind::Pinch, &pose::pinch(0.03, std::f32::consts::PI + 0.1));
        assert_eq!(rig.mapper.mode(), Mode::LetterSelect);
        assert_eq!(out.letter, Some((13, 'N')));
        assert_eq!(rig.glyph.letter(), 'N');
        assert!(!out.edit_changed);

        let out = rig.feed(GestureKind::Pinch, &pose::pinch(0.03, std::f32::consts::PI + 0.15));
        assert_eq!(out.letter, None);
    }

    #[test]
    fn fist_distorts() {
        let mut rig = Rig::new();
        rig.feed(GestureKind::Fist, &pose::fist(0.1));
        assert!((rig.edit.distortion() - 50.0).abs() < 1e-2);
        rig.feed(GestureKind::Fist, &pose::fist(0.3));
        assert_eq!(rig.edit.distortion(), 100.0);
    }

    #[test]
    fn two_fingers_set_rotation_directly() {
        let mut rig = Rig::new();
        rig.feed(GestureKind::TwoFingers, &pose::two_fingers(0.06, 0.3));
        assert!((rig.edit.rotation() - 0.3).abs() < 1e-3);
        rig.feed(GestureKind::TwoFingers, &pose::two_fingers(0.06, -0.5));
        assert!((rig.edit.rotation() + 0.5).abs() < 1e-3);
    }

    #[test]
    fn open_hand_glides() {
        let mut rig = Rig::new();
        rig.edit.set_scale(2.0);
        let out = rig.feed(GestureKind::Open, &pose::open_hand());
        assert!(out.edit_changed);
        assert!(close(rig.edit.scale(), 1.9));
    }

    #[test]
    fn none_is_idle() {
        let mut rig = Rig::new();
        let before = rig.edit;
        let out = rig.feed(GestureKind::None, &pose::open_hand());
        assert_eq!(rig.mapper.mode(), Mode::Idle);
        assert_eq!(out, MapOutcome::default());
        assert_eq!(rig.edit, before);
    }

    #[test]
    fn point_drags_control_point() {
        let mut rig = Rig::new();
        let target = rig.glyph.points()[0].clone();
        // Tip 5 px right of the first control point.
        let (x, y) = ((target.current_x + 5.0) / 800.0, target.current_y / 600.0);
        let out = rig.feed(GestureKind::Point, &pose::point_at(x, y));
        assert_eq!(out.selected, Some(target.id));
        let p = &rig.glyph.points()[0];
        assert!((p.current_x - (target.current_x + 5.0)).abs() < 1e-2);
        assert!(p.selected);

        // Holding the point keeps dragging without a new selection report.
        let out = rig.feed(GestureKind::Point, &pose::point_at(x + 0.01, y));
        assert_eq!(out.selected, None);
        assert!((rig.glyph.points()[0].current_x - (target.current_x + 13.0)).abs() < 1e-2);
    }
}
