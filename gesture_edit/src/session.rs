//! One editing session: the whole pipeline from landmarks to glyph.
//!
//! [`GestureSession::process_frame`] runs one frame to completion and returns
//! the events it produced, in order: gesture transition first, then point or
//! letter selection, then the edit-state change.

use glyph_outline::GlyphModel;
use hand_gesture::{
    extract_features, GestureClassifier, GestureKind, GestureScores, LandmarkFrame, Stabilizer,
    StableGestureEvent,
};
use log::{debug, info};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::edit_state::EditState;
use crate::letter_wheel::LetterWheel;
use crate::mapper::{Mode, TransformMapper};
use crate::snapshot::GlyphSnapshot;

// ════════════════════════════════════════════════════════════════════════════
// SessionEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The stable gesture changed.
    Gesture(StableGestureEvent),
    EditStateChanged { scale: f32, rotation: f32, distortion: f32 },
    LetterSelected   { index: usize, letter: char },
    PointSelected    { id: usize },
}

impl SessionEvent {
    fn edit(state: &EditState) -> Self {
        SessionEvent::EditStateChanged {
            scale:      state.scale(),
            rotation:   state.rotation(),
            distortion: state.distortion(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureSession
// ════════════════════════════════════════════════════════════════════════════

pub struct GestureSession {
    classifier: GestureClassifier,
    stabilizer: Stabilizer,
    mapper:     TransformMapper,
    edit:       EditState,
    wheel:      LetterWheel,
    glyph:      GlyphModel,

    // ── last frame, for display ───────────────────────────────────────────
    raw:        GestureKind,
    scores:     GestureScores,
    hand:       Option<LandmarkFrame>,
}

impl GestureSession {
    pub fn new(config: SessionConfig) -> Self {
        let wheel = LetterWheel::new();
        let glyph = GlyphModel::new(
            wheel.letter(),
            config.mapper.canvas_width,
            config.mapper.canvas_height,
        );
        GestureSession {
            stabilizer: Stabilizer::new(config.classifier.history_len),
            classifier: GestureClassifier::new(config.classifier),
            mapper:     TransformMapper::new(config.mapper),
            edit:       EditState::default(),
            wheel,
            glyph,
            raw:        GestureKind::None,
            scores:     GestureScores::default(),
            hand:       None,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn edit_state(&self)     -> &EditState           { &self.edit }
    pub fn glyph(&self)          -> &GlyphModel          { &self.glyph }
    pub fn wheel(&self)          -> &LetterWheel         { &self.wheel }
    pub fn mode(&self)           -> Mode                 { self.mapper.mode() }
    pub fn stable_gesture(&self) -> GestureKind          { self.stabilizer.current() }
    pub fn raw_gesture(&self)    -> GestureKind          { self.raw }
    pub fn scores(&self)         -> &GestureScores       { &self.scores }
    pub fn hand(&self)           -> Option<&LandmarkFrame> { self.hand.as_ref() }

    // ── pipeline ──────────────────────────────────────────────────────────

    /// Classify, stabilise, measure and map one frame.  `None` means no hand
    /// was detected.
    pub fn process_frame(&mut self, frame: Option<&LandmarkFrame>) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        let frame = match frame {
            Some(f) => f,
            None    => {
                self.hand   = None;
                self.raw    = GestureKind::None;
                self.scores = GestureScores::default();
                if let Some(kind) = self.stabilizer.hand_lost() {
                    debug!("session: hand lost");
                    events.push(SessionEvent::Gesture(StableGestureEvent::new(kind, None)));
                }
                self.mapper.release();
                return events;
            }
        };

        self.hand = Some(*frame);
        let (raw, scores) = self.classifier.classify(frame);
        self.raw    = raw;
        self.scores = scores;

        let stable   = self.stabilizer.push(raw);
        let features = extract_features(self.stabilizer.current(), frame);
        if let Some(kind) = stable {
            debug!("session: gesture -> {}", kind);
            events.push(SessionEvent::Gesture(StableGestureEvent::new(kind, Some(features))));
        }

        let outcome = self.mapper.apply(&features, &mut self.edit, &mut self.wheel, &mut self.glyph);
        if let Some(id) = outcome.selected {
            events.push(SessionEvent::PointSelected { id });
        }
        if let Some((index, letter)) = outcome.letter {
            info!("session: letter {} selected", letter);
            events.push(SessionEvent::LetterSelected { index, letter });
        }
        if outcome.edit_changed {
            events.push(SessionEvent::edit(&self.edit));
        }
        events
    }

    // ── direct commands ───────────────────────────────────────────────────

    /// Back to the rest pose with undragged points on the current letter.
    /// Reports the rest values whether or not anything had moved.
    pub fn reset(&mut self) -> SessionEvent {
        info!("session: reset");
        self.edit = EditState::default();
        self.glyph.reset();
        SessionEvent::edit(&self.edit)
    }

    pub fn next_letter(&mut self) -> SessionEvent {
        let letter = self.wheel.next();
        self.switch_letter(letter)
    }

    pub fn previous_letter(&mut self) -> SessionEvent {
        let letter = self.wheel.previous();
        self.switch_letter(letter)
    }

    fn switch_letter(&mut self, letter: char) -> SessionEvent {
        info!("session: letter {} selected", letter);
        self.glyph.set_character(letter);
        SessionEvent::LetterSelected { index: self.wheel.index(), letter }
    }

    pub fn snapshot(&self) -> GlyphSnapshot {
        GlyphSnapshot::capture(&self.glyph, &self.edit)
    }
}

impl Default for GestureSession {
    fn default() -> Self { GestureSession::new(SessionConfig::default()) }
}
