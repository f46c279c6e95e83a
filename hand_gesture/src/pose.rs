//! Synthetic hand poses.
//!
//! Hand-built landmark frames that classify as each gesture under the default
//! thresholds.  The keyboard simulator, the replay demo and the tests all use
//! them in place of a camera.
//!
//! The neutral hand stands upright with the wrist at `(0.5, 0.8)` and the
//! knuckles around `y = 0.6`.

use crate::landmark::{Finger, Joint, LandmarkFrame, Point3};

const WRIST: (f32, f32) = (0.5, 0.8);

/// MCP positions of index, middle, ring and pinky.
const KNUCKLES: [(f32, f32); 4] = [(0.44, 0.60), (0.50, 0.58), (0.56, 0.60), (0.61, 0.63)];

/// Wrist-to-middle-tip distance of the unscaled fist.
const FIST_HAND_SIZE: f32 = 0.18;

/// Index fingertip of the pointing hand.
const POINT_TIP: (f32, f32) = (0.44, 0.42);

#[derive(Clone, Copy, Debug, PartialEq)]
enum Digit { Extended, Folded }

use Digit::{Extended, Folded};

fn p(x: f32, y: f32) -> Point3 { Point3::new(x, y, 0.0) }

fn hand(thumb: Digit, fingers: [Digit; 4]) -> LandmarkFrame {
    let mut f = LandmarkFrame::new([Point3::default(); 21]);
    f.set(Joint::Wrist,    p(WRIST.0, WRIST.1));
    f.set(Joint::ThumbCmc, p(0.45, 0.76));
    f.set(Joint::ThumbMcp, p(0.40, 0.72));
    match thumb {
        Extended => {
            f.set(Joint::ThumbIp,  p(0.36, 0.67));
            f.set(Joint::ThumbTip, p(0.33, 0.62));
        }
        Folded => {
            f.set(Joint::ThumbIp,  p(0.43, 0.70));
            f.set(Joint::ThumbTip, p(0.47, 0.74));
        }
    }

    for ((finger, &(mx, my)), digit) in Finger::LONG.iter().zip(KNUCKLES.iter()).zip(fingers) {
        let (pip, dip, tip) = match digit {
            Extended => (my - 0.08, my - 0.13, my - 0.18),
            Folded   => (my - 0.05, my - 0.01, my + 0.04),
        };
        f.set(finger.mcp(), p(mx, my));
        f.set(finger.pip(), p(mx, pip));
        f.set(finger.dip(), p(mx, dip));
        f.set(finger.tip(), p(mx, tip));
    }
    f
}

/// Scale the whole hand about the wrist.
fn scaled(frame: LandmarkFrame, s: f32) -> LandmarkFrame {
    let mut out = frame;
    for &j in Joint::ALL.iter() {
        let q = frame[j];
        out.set(j, p(WRIST.0 + (q.x - WRIST.0) * s, WRIST.1 + (q.y - WRIST.1) * s));
    }
    out
}

/// All five digits up.
pub fn open_hand() -> LandmarkFrame {
    hand(Extended, [Extended; 4])
}

/// Closed fist whose wrist-to-middle-tip distance is `hand_size`.
///
/// Below a hand size of about 0.09 the tucked thumb comes within pinch range
/// of the index tip and the pose reads as a pinch instead.
pub fn fist(hand_size: f32) -> LandmarkFrame {
    scaled(hand(Folded, [Folded; 4]), hand_size / FIST_HAND_SIZE)
}

/// Index finger up with its tip at `(x, y)`.
pub fn point_at(x: f32, y: f32) -> LandmarkFrame {
    hand(Folded, [Extended, Folded, Folded, Folded])
        .translated(x - POINT_TIP.0, y - POINT_TIP.1)
}

/// Thumb tip held `distance` away from a bent index tip, in direction
/// `angle` measured from thumb to index.  Reads as a pinch only while
/// `distance` is under the pinch threshold; wider it is an open hand.
pub fn pinch(distance: f32, angle: f32) -> LandmarkFrame {
    let mut f = hand(Extended, [Folded, Extended, Extended, Extended]);
    // Index curls forward: tip just below its PIP.
    f.set(Joint::IndexPip, p(0.42, 0.52));
    f.set(Joint::IndexDip, p(0.41, 0.50));
    f.set(Joint::IndexTip, p(0.41, 0.53));

    let (sin, cos) = angle.sin_cos();
    f.set(Joint::ThumbIp,  p(0.38, 0.64));
    f.set(Joint::ThumbTip, p(0.41 - distance * cos, 0.53 - distance * sin));
    f
}

/// Index and middle up, middle tip `spread` away from the index tip in
/// direction `rotation`.  The middle tip must stay above its PIP joint,
/// which holds while `spread * sin(rotation) < 0.08`.
pub fn two_fingers(spread: f32, rotation: f32) -> LandmarkFrame {
    let mut f = hand(Folded, [Extended, Extended, Folded, Folded]);
    let (sin, cos) = rotation.sin_cos();
    f.set(Joint::MiddleTip, p(POINT_TIP.0 + spread * cos, POINT_TIP.1 + spread * sin));
    f
}

/// Index and pinky down, middle and ring up: matches no gesture.
pub fn relaxed() -> LandmarkFrame {
    hand(Folded, [Folded, Extended, Extended, Folded])
}
