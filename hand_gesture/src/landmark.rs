//! The 21-point hand landmark frame.
//!
//! Coordinates are normalised to the camera frame: `x` and `y` in `[0, 1]`
//! with `y` growing downward, so a raised fingertip has a *smaller* `y` than
//! the joint below it.  `z` is a relative depth and is ignored by all
//! gesture math.

use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Point3 / Joint / Finger
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Point3 { x, y, z }
    }
}

/// Anatomical landmark index, in detector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Joint {
    Wrist = 0,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl Joint {
    pub const ALL: [Joint; LANDMARK_COUNT] = [
        Joint::Wrist,
        Joint::ThumbCmc,  Joint::ThumbMcp,  Joint::ThumbIp,   Joint::ThumbTip,
        Joint::IndexMcp,  Joint::IndexPip,  Joint::IndexDip,  Joint::IndexTip,
        Joint::MiddleMcp, Joint::MiddlePip, Joint::MiddleDip, Joint::MiddleTip,
        Joint::RingMcp,   Joint::RingPip,   Joint::RingDip,   Joint::RingTip,
        Joint::PinkyMcp,  Joint::PinkyPip,  Joint::PinkyDip,  Joint::PinkyTip,
    ];

    pub const fn index(self) -> usize { self as usize }
}

/// One of the five digits, for the tip-versus-joint comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger { Thumb, Index, Middle, Ring, Pinky }

impl Finger {
    pub const ALL:  [Finger; 5] = [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];
    /// The four long fingers.
    pub const LONG: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Knuckle joint.  For the thumb this is the thumb MCP (landmark 2).
    pub const fn mcp(self) -> Joint {
        match self {
            Finger::Thumb  => Joint::ThumbMcp,
            Finger::Index  => Joint::IndexMcp,
            Finger::Middle => Joint::MiddleMcp,
            Finger::Ring   => Joint::RingMcp,
            Finger::Pinky  => Joint::PinkyMcp,
        }
    }

    /// Middle joint.  For the thumb this is the IP joint.
    pub const fn pip(self) -> Joint {
        match self {
            Finger::Thumb  => Joint::ThumbIp,
            Finger::Index  => Joint::IndexPip,
            Finger::Middle => Joint::MiddlePip,
            Finger::Ring   => Joint::RingPip,
            Finger::Pinky  => Joint::PinkyPip,
        }
    }

    /// Joint below the tip.  The thumb has no DIP; its IP joint stands in.
    pub const fn dip(self) -> Joint {
        match self {
            Finger::Thumb  => Joint::ThumbIp,
            Finger::Index  => Joint::IndexDip,
            Finger::Middle => Joint::MiddleDip,
            Finger::Ring   => Joint::RingDip,
            Finger::Pinky  => Joint::PinkyDip,
        }
    }

    pub const fn tip(self) -> Joint {
        match self {
            Finger::Thumb  => Joint::ThumbTip,
            Finger::Index  => Joint::IndexTip,
            Finger::Middle => Joint::MiddleTip,
            Finger::Ring   => Joint::RingTip,
            Finger::Pinky  => Joint::PinkyTip,
        }
    }
}

/// Bones to draw for a skeleton overlay.
pub const HAND_SKELETON: [(Joint, Joint); 21] = [
    (Joint::Wrist, Joint::ThumbCmc),      (Joint::ThumbCmc, Joint::ThumbMcp),
    (Joint::ThumbMcp, Joint::ThumbIp),    (Joint::ThumbIp, Joint::ThumbTip),
    (Joint::Wrist, Joint::IndexMcp),      (Joint::IndexMcp, Joint::IndexPip),
    (Joint::IndexPip, Joint::IndexDip),   (Joint::IndexDip, Joint::IndexTip),
    (Joint::Wrist, Joint::MiddleMcp),     (Joint::MiddleMcp, Joint::MiddlePip),
    (Joint::MiddlePip, Joint::MiddleDip), (Joint::MiddleDip, Joint::MiddleTip),
    (Joint::Wrist, Joint::RingMcp),       (Joint::RingMcp, Joint::RingPip),
    (Joint::RingPip, Joint::RingDip),     (Joint::RingDip, Joint::RingTip),
    (Joint::Wrist, Joint::PinkyMcp),      (Joint::PinkyMcp, Joint::PinkyPip),
    (Joint::PinkyPip, Joint::PinkyDip),   (Joint::PinkyDip, Joint::PinkyTip),
    (Joint::IndexMcp, Joint::MiddleMcp),
];

// ════════════════════════════════════════════════════════════════════════════
// FrameError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("expected 21 landmarks, got {0}")]
    WrongLength(usize),
    #[error("landmark {0} has a non-finite coordinate")]
    NonFinite(usize),
    #[error("malformed landmark JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkFrame
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand: exactly 21 points, indexed by [`Joint`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: [Point3; LANDMARK_COUNT],
}

impl LandmarkFrame {
    pub fn new(points: [Point3; LANDMARK_COUNT]) -> Self {
        LandmarkFrame { points }
    }

    /// Build a frame from detector output, rejecting wrong lengths and NaN/inf.
    pub fn from_slice(points: &[Point3]) -> Result<Self, FrameError> {
        let points: [Point3; LANDMARK_COUNT] = points.try_into()
            .map_err(|_| FrameError::WrongLength(points.len()))?;
        if let Some(i) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite())) {
            return Err(FrameError::NonFinite(i));
        }
        Ok(LandmarkFrame { points })
    }

    pub fn points(&self) -> &[Point3; LANDMARK_COUNT] { &self.points }

    pub fn get(&self, joint: Joint) -> Point3 {
        self.points[joint.index()]
    }

    pub fn set(&mut self, joint: Joint, point: Point3) {
        self.points[joint.index()] = point;
    }

    /// The same hand shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let mut out = *self;
        for p in &mut out.points {
            p.x += dx;
            p.y += dy;
        }
        out
    }
}

impl Index<Joint> for LandmarkFrame {
    type Output = Point3;
    fn index(&self, joint: Joint) -> &Point3 {
        &self.points[joint.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_indices_follow_detector_order() {
        for (i, j) in Joint::ALL.iter().enumerate() {
            assert_eq!(j.index(), i);
        }
        assert_eq!(Joint::ThumbTip.index(), 4);
        assert_eq!(Joint::IndexTip.index(), 8);
        assert_eq!(Joint::MiddleTip.index(), 12);
        assert_eq!(Joint::PinkyTip.index(), 20);
    }

    #[test]
    fn finger_joints() {
        assert_eq!(Finger::Thumb.mcp(), Joint::ThumbMcp);
        assert_eq!(Finger::Ring.pip(),  Joint::RingPip);
        assert_eq!(Finger::Pinky.tip(), Joint::PinkyTip);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let pts = vec![Point3::default(); 20];
        assert!(matches!(LandmarkFrame::from_slice(&pts), Err(FrameError::WrongLength(20))));
    }

    #[test]
    fn from_slice_rejects_nan() {
        let mut pts = vec![Point3::default(); 21];
        pts[7].y = f32::NAN;
        assert!(matches!(LandmarkFrame::from_slice(&pts), Err(FrameError::NonFinite(7))));
    }

    #[test]
    fn index_by_joint() {
        let mut pts = [Point3::default(); 21];
        pts[8] = Point3::new(0.25, 0.5, 0.0);
        let f = LandmarkFrame::new(pts);
        assert_eq!(f[Joint::IndexTip], Point3::new(0.25, 0.5, 0.0));
        assert_eq!(f.get(Joint::IndexTip).x, 0.25);
    }

    #[test]
    fn translate_moves_every_point() {
        let f = LandmarkFrame::new([Point3::new(0.1, 0.2, 0.3); 21]).translated(0.5, -0.1);
        for p in f.points() {
            assert!((p.x - 0.6).abs() < 1e-6 && (p.y - 0.1).abs() < 1e-6 && p.z == 0.3);
        }
    }
}
