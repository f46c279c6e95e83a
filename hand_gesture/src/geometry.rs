//! Distances, midpoints and angles over landmark subsets.
//!
//! Everything here works in the normalised x/y plane; `z` is dropped.

use serde::{Deserialize, Serialize};

use crate::landmark::{Joint, LandmarkFrame, Point3};

/// Wrist plus the four long-finger knuckles.
pub const PALM_JOINTS: [Joint; 5] = [
    Joint::Wrist, Joint::IndexMcp, Joint::MiddleMcp, Joint::RingMcp, Joint::PinkyMcp,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self { Point2 { x, y } }
}

impl From<Point3> for Point2 {
    fn from(p: Point3) -> Self { Point2 { x: p.x, y: p.y } }
}

pub fn distance(p: impl Into<Point2>, q: impl Into<Point2>) -> f32 {
    let (p, q) = (p.into(), q.into());
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    (dx * dx + dy * dy).sqrt()
}

/// Mean position of the given joints.  An empty list yields the origin.
pub fn midpoint_of(frame: &LandmarkFrame, joints: &[Joint]) -> Point2 {
    if joints.is_empty() {
        return Point2::default();
    }
    let (sx, sy) = joints.iter()
        .map(|&j| frame[j])
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = joints.len() as f32;
    Point2::new(sx / n, sy / n)
}

/// Direction from `a` to `b`, `atan2(Δy, Δx)`, in `(-π, π]`.
pub fn angle_between(a: impl Into<Point2>, b: impl Into<Point2>) -> f32 {
    let (a, b) = (a.into(), b.into());
    (b.y - a.y).atan2(b.x - a.x)
}

pub fn palm_center(frame: &LandmarkFrame) -> Point2 {
    midpoint_of(frame, &PALM_JOINTS)
}

/// Wrist to middle fingertip.
pub fn hand_size(frame: &LandmarkFrame) -> f32 {
    distance(frame[Joint::Wrist], frame[Joint::MiddleTip])
}
