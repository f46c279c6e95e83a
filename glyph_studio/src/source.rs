//! Live landmark sources: keyboard simulation and LeapMotion hardware.
//!
//! Both deliver `Option<LandmarkFrame>` through the same
//! [`LandmarkSource`] interface as the recorded sources in `hand_gesture`, so
//! the app doesn't care where frames come from.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use hand_gesture::{pose, LandmarkFrame, LandmarkSource};
use log::debug;

// ════════════════════════════════════════════════════════════════════════════
// Simulated hand
// ════════════════════════════════════════════════════════════════════════════

/// Which synthetic pose the simulated hand is holding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    /// No hand in view.
    Away,
    /// A hand that matches no gesture.
    Relaxed,
    Point,
    Pinch,
    Fist,
    Open,
    TwoFingers,
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Pose(SimPose),  // 0–5, 9
    Up,             // I
    Down,           // K
    Left,           // J
    Right,          // L
    Wider,          // W
    Narrower,       // S
    TurnLeft,       // A
    TurnRight,      // D
    Quit,           // Q / Escape
}

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
}

const MOVE_STEP:   f32 = 0.01;
const PINCH_STEP:  f32 = 0.005;
const SIZE_STEP:   f32 = 0.01;
const SPREAD_STEP: f32 = 0.005;
const ANGLE_STEP:  f32 = 0.1;
const TURN_STEP:   f32 = 0.05;

/// Pose parameters of the simulated hand.
///
/// Fist sizes stay above 0.09; smaller fists read as pinches.  Two-finger
/// rotation stays below 0.6 rad so the middle finger keeps reading as
/// extended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimHand {
    pub pose:     SimPose,
    /// Where the hand is centred (the fingertip for `Point`).
    pub x:        f32,
    pub y:        f32,
    pub pinch:    f32,
    pub angle:    f32,
    pub size:     f32,
    pub spread:   f32,
    pub rotation: f32,
}

impl Default for SimHand {
    fn default() -> Self {
        SimHand {
            pose:     SimPose::Away,
            x:        0.5,
            y:        0.5,
            pinch:    0.045,
            angle:    0.0,
            size:     0.12,
            spread:   0.06,
            rotation: 0.0,
        }
    }
}

impl SimHand {
    pub fn apply(&mut self, key: SimKey) {
        match key {
            SimKey::Pose(p) => self.pose = p,
            SimKey::Up      => self.y = (self.y - MOVE_STEP).max(0.0),
            SimKey::Down    => self.y = (self.y + MOVE_STEP).min(1.0),
            SimKey::Left    => self.x = (self.x - MOVE_STEP).max(0.0),
            SimKey::Right   => self.x = (self.x + MOVE_STEP).min(1.0),
            SimKey::Wider     => self.resize(1.0),
            SimKey::Narrower  => self.resize(-1.0),
            SimKey::TurnLeft  => self.turn(-1.0),
            SimKey::TurnRight => self.turn(1.0),
            SimKey::Quit      => {}
        }
    }

    fn resize(&mut self, dir: f32) {
        match self.pose {
            SimPose::Pinch      => self.pinch  = (self.pinch  + dir * PINCH_STEP).clamp(0.005, 0.12),
            SimPose::Fist       => self.size   = (self.size   + dir * SIZE_STEP).clamp(0.09, 0.3),
            SimPose::TwoFingers => self.spread = (self.spread + dir * SPREAD_STEP).clamp(0.01, 0.12),
            _ => {}
        }
    }

    fn turn(&mut self, dir: f32) {
        match self.pose {
            SimPose::Pinch      => self.angle    += dir * ANGLE_STEP,
            SimPose::TwoFingers => self.rotation  = (self.rotation + dir * TURN_STEP).clamp(-3.0, 0.6),
            _ => {}
        }
    }

    /// The landmark frame for the current pose; `None` when away.
    pub fn frame(&self) -> Option<LandmarkFrame> {
        let (dx, dy) = (self.x - 0.5, self.y - 0.5);
        let frame = match self.pose {
            SimPose::Away       => return None,
            SimPose::Point      => return Some(pose::point_at(self.x, self.y)),
            SimPose::Relaxed    => pose::relaxed(),
            SimPose::Pinch      => pose::pinch(self.pinch, self.angle),
            SimPose::Fist       => pose::fist(self.size),
            SimPose::Open       => pose::open_hand(),
            SimPose::TwoFingers => pose::two_fingers(self.spread, self.rotation),
        };
        Some(frame.translated(dx, dy))
    }

    pub fn describe(&self) -> String {
        match self.pose {
            SimPose::Away       => "hand away".to_string(),
            SimPose::Relaxed    => "relaxed".to_string(),
            SimPose::Point      => format!("point at {:.2},{:.2}", self.x, self.y),
            SimPose::Pinch      => format!("pinch d={:.3} a={:.2}", self.pinch, self.angle),
            SimPose::Fist       => format!("fist size={:.2}", self.size),
            SimPose::Open       => "open".to_string(),
            SimPose::TwoFingers => format!("two fingers s={:.3} r={:.2}", self.spread, self.rotation),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource: keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source driven by [`SimInput`] events from the visualizer's
/// window.  Emits the simulated hand's frame every `interval`, like a camera.
pub struct SimLandmarkSource {
    pub rx:       Receiver<SimInput>,
    pub interval: Duration,
    pub hand:     SimHand,
}

impl SimLandmarkSource {
    pub fn new(rx: Receiver<SimInput>, interval: Duration) -> Self {
        SimLandmarkSource { rx, interval, hand: SimHand::default() }
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<Option<LandmarkFrame>>) {
        let SimLandmarkSource { rx, interval, mut hand } = *self;
        loop {
            loop {
                match rx.try_recv() {
                    Ok(SimInput::KeyDown(SimKey::Quit)) => return,
                    Ok(SimInput::KeyDown(key)) => {
                        let before = hand.pose;
                        hand.apply(key);
                        if hand.pose != before {
                            debug!("sim: {}", hand.describe());
                        }
                    }
                    Err(TryRecvError::Empty)        => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }
            if tx.send(hand.frame()).is_err() { return; }
            thread::sleep(interval);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Leap bones are mapped onto the 21 camera landmarks: for each digit the
/// bone joints give MCP, PIP, DIP and tip, and the middle metacarpal base
/// stands in for the wrist.  Millimetres above the device are projected into
/// the normalised image plane with `y` flipped to grow downward.
#[cfg(feature = "leap")]
pub struct LeapLandmarkSource;

#[cfg(feature = "leap")]
impl LandmarkSource for LeapLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<Option<LandmarkFrame>>) {
        use hand_gesture::{Joint, Point3};
        use leaprs::*;
        use log::{info, warn};

        /// Millimetres spanned by the normalised frame.
        const SPAN_MM: f32 = 800.0;

        let project = |x: f32, y: f32, z: f32| {
            Point3::new(0.5 + x / SPAN_MM, 1.0 - y / SPAN_MM, z / SPAN_MM)
        };
        macro_rules! joint {
            ($j:expr) => {{ let j = $j; project(j.x, j.y, j.z) }};
        }

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                warn!("leap: cannot create connection: {:?}", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            warn!("leap: cannot open device: {:?}", e);
            return;
        }
        info!("leap: connected");

        const CHAINS: [[Joint; 4]; 5] = [
            [Joint::ThumbCmc,  Joint::ThumbMcp,  Joint::ThumbIp,   Joint::ThumbTip],
            [Joint::IndexMcp,  Joint::IndexPip,  Joint::IndexDip,  Joint::IndexTip],
            [Joint::MiddleMcp, Joint::MiddlePip, Joint::MiddleDip, Joint::MiddleTip],
            [Joint::RingMcp,   Joint::RingPip,   Joint::RingDip,   Joint::RingTip],
            [Joint::PinkyMcp,  Joint::PinkyPip,  Joint::PinkyDip,  Joint::PinkyTip],
        ];

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                let hand = hands.iter()
                    .find(|h| h.hand_type() == HandType::Right)
                    .or_else(|| hands.first());

                let landmarks = hand.and_then(|h| {
                    let digits: Vec<_> = h.digits().collect();
                    if digits.len() < 5 { return None; }
                    let mut out = LandmarkFrame::new([Point3::default(); 21]);
                    out.set(Joint::Wrist, joint!(digits[2].metacarpal().prev_joint()));
                    for (digit, chain) in digits.iter().zip(CHAINS.iter()) {
                        out.set(chain[0], joint!(digit.proximal().prev_joint()));
                        out.set(chain[1], joint!(digit.intermediate().prev_joint()));
                        out.set(chain[2], joint!(digit.distal().prev_joint()));
                        out.set(chain[3], joint!(digit.distal().next_joint()));
                    }
                    Some(out)
                });

                if tx.send(landmarks).is_err() { return; }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{GestureClassifier, GestureKind, Joint};
    use std::sync::mpsc;

    fn classify(hand: &SimHand) -> GestureKind {
        hand.frame().map_or(GestureKind::None, |f| GestureClassifier::default().classify(&f).0)
    }

    fn with_pose(p: SimPose) -> SimHand {
        let mut h = SimHand::default();
        h.apply(SimKey::Pose(p));
        h
    }

    #[test]
    fn every_pose_classifies_as_intended() {
        assert!(SimHand::default().frame().is_none());
        assert_eq!(classify(&with_pose(SimPose::Relaxed)),    GestureKind::None);
        assert_eq!(classify(&with_pose(SimPose::Point)),      GestureKind::Point);
        assert_eq!(classify(&with_pose(SimPose::Pinch)),      GestureKind::Pinch);
        assert_eq!(classify(&with_pose(SimPose::Fist)),       GestureKind::Fist);
        assert_eq!(classify(&with_pose(SimPose::Open)),       GestureKind::Open);
        assert_eq!(classify(&with_pose(SimPose::TwoFingers)), GestureKind::TwoFingers);
    }

    #[test]
    fn parameter_keys_stay_in_classifying_range() {
        let mut fist = with_pose(SimPose::Fist);
        for _ in 0..50 { fist.apply(SimKey::Narrower); }
        assert_eq!(classify(&fist), GestureKind::Fist);

        let mut two = with_pose(SimPose::TwoFingers);
        for _ in 0..50 { two.apply(SimKey::Wider); two.apply(SimKey::TurnRight); }
        assert_eq!(classify(&two), GestureKind::TwoFingers);
    }

    #[test]
    fn movement_steers_the_point() {
        let mut h = with_pose(SimPose::Point);
        h.apply(SimKey::Right);
        h.apply(SimKey::Up);
        let f = h.frame().unwrap();
        assert!((f[Joint::IndexTip].x - 0.51).abs() < 1e-5);
        assert!((f[Joint::IndexTip].y - 0.49).abs() < 1e-5);
    }

    #[test]
    fn sim_source_follows_keys_and_quits() {
        let (key_tx, key_rx) = mpsc::channel();
        key_tx.send(SimInput::KeyDown(SimKey::Pose(SimPose::Open))).unwrap();
        let frames = hand_gesture::spawn_landmark_source(
            SimLandmarkSource::new(key_rx, Duration::from_millis(1)),
        );
        let first = frames.recv().unwrap();
        assert!(first.is_some());
        key_tx.send(SimInput::KeyDown(SimKey::Quit)).unwrap();
        // Drains to the end once the source sees Quit.
        assert!(frames.iter().count() < 1000);
    }
}
