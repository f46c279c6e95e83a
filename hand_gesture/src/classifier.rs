//! Per-frame gesture scoring.
//!
//! Every frame is scored against all five gestures with simple tip-versus-
//! joint comparisons.  The best score wins only if it strictly exceeds the
//! acceptance threshold; otherwise the frame is `none`.
//!
//! | Gesture | Rule | Score |
//! |---|---|---|
//! | `point` | index extended, middle/ring/pinky folded | 0.9 |
//! | `pinch` | thumb tip to index tip < pinch threshold | 0.9 |
//! | `fist` | at least 3 of the 4 long fingers folded | 0.9 |
//! | `open` | at least 4 of the 5 tips above their knuckle | 0.8 |
//! | `two_fingers` | index + middle extended, ring + pinky folded | 0.8 |
//!
//! "Extended" means the tip is above (smaller `y` than) the PIP joint;
//! "folded" means it is below.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::distance;
use crate::landmark::{Finger, Joint, LandmarkFrame};

// ════════════════════════════════════════════════════════════════════════════
// GestureKind
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Point,
    Pinch,
    Fist,
    Open,
    TwoFingers,
    None,
}

impl GestureKind {
    /// The scored gestures, in tie-break order: earlier wins a tie.
    pub const SCORED: [GestureKind; 5] = [
        GestureKind::Point,
        GestureKind::Pinch,
        GestureKind::Fist,
        GestureKind::Open,
        GestureKind::TwoFingers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureKind::Point      => "point",
            GestureKind::Pinch      => "pinch",
            GestureKind::Fist       => "fist",
            GestureKind::Open       => "open",
            GestureKind::TwoFingers => "two_fingers",
            GestureKind::None       => "none",
        }
    }

    fn slot(&self) -> Option<usize> {
        GestureKind::SCORED.iter().position(|k| k == self)
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ClassifierConfig
// ════════════════════════════════════════════════════════════════════════════

/// Thresholds for classification and stabilisation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// A gesture must score strictly above this to be reported.
    pub acceptance_threshold: f32,
    /// Thumb-to-index distance under which a hand is pinching.
    pub pinch_threshold:      f32,
    /// Length of the majority-vote window, in frames.
    pub history_len:          usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            acceptance_threshold: 0.7,
            pinch_threshold:      0.05,
            history_len:          5,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureScores
// ════════════════════════════════════════════════════════════════════════════

const STRONG: f32 = 0.9;
const WEAK:   f32 = 0.8;

/// Confidence per scored gesture for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureScores {
    scores: [f32; 5],
}

impl GestureScores {
    /// Score for `kind`.  `none` is never scored and reads as 0.
    pub fn get(&self, kind: GestureKind) -> f32 {
        kind.slot().map_or(0.0, |i| self.scores[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (GestureKind, f32)> + '_ {
        GestureKind::SCORED.iter().copied().zip(self.scores.iter().copied())
    }

    /// Arg-max above `threshold`, earliest gesture on ties; `none` if nothing
    /// clears the threshold.
    pub fn best(&self, threshold: f32) -> GestureKind {
        let mut best = GestureKind::None;
        let mut best_score = threshold;
        for (kind, score) in self.iter() {
            if score > best_score {
                best = kind;
                best_score = score;
            }
        }
        best
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureClassifier
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        GestureClassifier { config }
    }

    pub fn config(&self) -> &ClassifierConfig { &self.config }

    pub fn score(&self, frame: &LandmarkFrame) -> GestureScores {
        GestureScores {
            scores: [
                score_point(frame),
                score_pinch(frame, self.config.pinch_threshold),
                score_fist(frame),
                score_open(frame),
                score_two_fingers(frame),
            ],
        }
    }

    /// Score the frame and pick the winning label.
    pub fn classify(&self, frame: &LandmarkFrame) -> (GestureKind, GestureScores) {
        let scores = self.score(frame);
        (scores.best(self.config.acceptance_threshold), scores)
    }
}

fn extended(frame: &LandmarkFrame, finger: Finger) -> bool {
    frame[finger.tip()].y < frame[finger.pip()].y
}

fn folded(frame: &LandmarkFrame, finger: Finger) -> bool {
    frame[finger.tip()].y > frame[finger.pip()].y
}

fn score_point(frame: &LandmarkFrame) -> f32 {
    let hit = extended(frame, Finger::Index)
        && folded(frame, Finger::Middle)
        && folded(frame, Finger::Ring)
        && folded(frame, Finger::Pinky);
    if hit { STRONG } else { 0.0 }
}

fn score_pinch(frame: &LandmarkFrame, threshold: f32) -> f32 {
    if distance(frame[Joint::ThumbTip], frame[Joint::IndexTip]) < threshold { STRONG } else { 0.0 }
}

fn score_fist(frame: &LandmarkFrame) -> f32 {
    let n = Finger::LONG.iter().filter(|&&f| folded(frame, f)).count();
    if n >= 3 { STRONG } else { 0.0 }
}

fn score_open(frame: &LandmarkFrame) -> f32 {
    let n = Finger::ALL.iter()
        .filter(|&&f| frame[f.tip()].y < frame[f.mcp()].y)
        .count();
    if n >= 4 { WEAK } else { 0.0 }
}

fn score_two_fingers(frame: &LandmarkFrame) -> f32 {
    let hit = extended(frame, Finger::Index)
        && extended(frame, Finger::Middle)
        && folded(frame, Finger::Ring)
        && folded(frame, Finger::Pinky);
    if hit { WEAK } else { 0.0 }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose;

    fn classify(frame: &LandmarkFrame) -> GestureKind {
        GestureClassifier::default().classify(frame).0
    }

    #[test]
    fn canonical_poses() {
        assert_eq!(classify(&pose::open_hand()),              GestureKind::Open);
        assert_eq!(classify(&pose::fist(0.15)),               GestureKind::Fist);
        assert_eq!(classify(&pose::point_at(0.5, 0.5)),       GestureKind::Point);
        assert_eq!(classify(&pose::pinch(0.03, 0.0)),         GestureKind::Pinch);
        assert_eq!(classify(&pose::two_fingers(0.06, 0.3)),   GestureKind::TwoFingers);
    }

    #[test]
    fn point_beats_fist_on_tie() {
        // Three folded fingers also satisfy the fist rule at the same score.
        let scores = GestureClassifier::default().score(&pose::point_at(0.5, 0.5));
        assert_eq!(scores.get(GestureKind::Point), 0.9);
        assert_eq!(scores.get(GestureKind::Fist),  0.9);
        assert_eq!(scores.best(0.7), GestureKind::Point);
    }

    #[test]
    fn pinch_beats_open() {
        let scores = GestureClassifier::default().score(&pose::pinch(0.02, 1.0));
        assert_eq!(scores.get(GestureKind::Open),  0.8);
        assert_eq!(scores.get(GestureKind::Pinch), 0.9);
        assert_eq!(scores.best(0.7), GestureKind::Pinch);
    }

    #[test]
    fn wide_pinch_is_open_hand() {
        assert_eq!(classify(&pose::pinch(0.08, 0.0)), GestureKind::Open);
    }

    #[test]
    fn threshold_is_strict() {
        let scores = GestureClassifier::default().score(&pose::open_hand());
        assert_eq!(scores.best(0.8), GestureKind::None);
        assert_eq!(scores.best(0.79), GestureKind::Open);
    }

    #[test]
    fn nothing_above_threshold_is_none() {
        assert_eq!(GestureScores::default().best(0.7), GestureKind::None);
    }

    #[test]
    fn none_reads_zero() {
        let scores = GestureClassifier::default().score(&pose::fist(0.2));
        assert_eq!(scores.get(GestureKind::None), 0.0);
    }

    #[test]
    fn custom_pinch_threshold() {
        let wide = GestureClassifier::new(ClassifierConfig {
            pinch_threshold: 0.1,
            ..ClassifierConfig::default()
        });
        assert_eq!(wide.classify(&pose::pinch(0.08, 0.0)).0, GestureKind::Pinch);
    }

    #[test]
    fn labels() {
        assert_eq!(GestureKind::TwoFingers.to_string(), "two_fingers");
        assert_eq!(GestureKind::None.as_str(), "none");
    }
}
