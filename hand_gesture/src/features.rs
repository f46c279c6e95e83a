//! Continuous features that ride along with a stable gesture.

use serde::{Deserialize, Serialize};

use crate::classifier::GestureKind;
use crate::geometry::{angle_between, distance, hand_size, palm_center, Point2};
use crate::landmark::{Joint, LandmarkFrame};

/// Fixed confidence attached to every feature set.
pub const FEATURE_CONFIDENCE: f32 = 0.9;

/// A gesture together with the measurements its editing rule needs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    None,
    Point      { tip: Point2 },
    /// `angle` is the direction from thumb tip to index tip.
    Pinch      { distance: f32, angle: f32 },
    Fist       { palm_center: Point2, hand_size: f32 },
    Open       { palm_center: Point2 },
    /// `rotation` is the direction from index tip to middle tip.
    TwoFingers { spread: f32, rotation: f32 },
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::None              => GestureKind::None,
            Gesture::Point { .. }      => GestureKind::Point,
            Gesture::Pinch { .. }      => GestureKind::Pinch,
            Gesture::Fist { .. }       => GestureKind::Fist,
            Gesture::Open { .. }       => GestureKind::Open,
            Gesture::TwoFingers { .. } => GestureKind::TwoFingers,
        }
    }
}

/// Everything the mapper reads from one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandFeatures {
    pub index_tip:   Point2,
    pub thumb_tip:   Point2,
    pub palm_center: Point2,
    pub hand_size:   f32,
    pub confidence:  f32,
    pub gesture:     Gesture,
}

/// Measure `frame` for the stable gesture `kind`.
pub fn extract_features(kind: GestureKind, frame: &LandmarkFrame) -> HandFeatures {
    let index_tip = Point2::from(frame[Joint::IndexTip]);
    let thumb_tip = Point2::from(frame[Joint::ThumbTip]);
    let palm      = palm_center(frame);
    let size      = hand_size(frame);

    let gesture = match kind {
        GestureKind::None  => Gesture::None,
        GestureKind::Point => Gesture::Point { tip: index_tip },
        GestureKind::Pinch => Gesture::Pinch {
            distance: distance(thumb_tip, index_tip),
            angle:    angle_between(thumb_tip, index_tip),
        },
        GestureKind::Fist  => Gesture::Fist { palm_center: palm, hand_size: size },
        GestureKind::Open  => Gesture::Open { palm_center: palm },
        GestureKind::TwoFingers => {
            let middle_tip = frame[Joint::MiddleTip];
            Gesture::TwoFingers {
                spread:   distance(index_tip, middle_tip),
                rotation: angle_between(index_tip, middle_tip),
            }
        }
    };

    HandFeatures {
        index_tip,
        thumb_tip,
        palm_center: palm,
        hand_size:   size,
        confidence:  FEATURE_CONFIDENCE,
        gesture,
    }
}

/// Emitted when the stable gesture changes.  `features` is absent when the
/// change was caused by losing the hand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StableGestureEvent {
    pub kind:       GestureKind,
    pub confidence: f32,
    pub features:   Option<HandFeatures>,
}

impl StableGestureEvent {
    pub fn new(kind: GestureKind, features: Option<HandFeatures>) -> Self {
        let confidence = features.map_or(0.0, |f| f.confidence);
        StableGestureEvent { kind, confidence, features }
    }
}
