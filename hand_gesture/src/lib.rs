//! # hand_gesture
//!
//! Turns a noisy stream of 21-point hand landmarks into a stable discrete
//! gesture plus the continuous measurements that go with it.
//!
//! ## Pipeline
//!
//! ```text
//! LandmarkSource ──▶ GestureClassifier ──▶ Stabilizer ──▶ extract_features
//!   (per tick)        (raw label+scores)   (majority vote)  (HandFeatures)
//! ```
//!
//! ## Gestures
//!
//! | Gesture | Shape | Features |
//! |---|---|---|
//! | `point` | index up, others curled | index-tip position |
//! | `pinch` | thumb tip touching index tip | distance, thumb→index angle |
//! | `fist` | three or more long fingers curled | palm centre, hand size |
//! | `open` | four or more tips above their knuckles | palm centre |
//! | `two_fingers` | index + middle up, ring + pinky curled | spread, index→middle angle |
//!
//! A hand that matches nothing strongly enough is `none`, as is a missing
//! hand.  Neither is an error.

pub mod landmark;
pub mod geometry;
pub mod classifier;
pub mod stabilizer;
pub mod features;
pub mod pose;
pub mod source;

pub use classifier::{ClassifierConfig, GestureClassifier, GestureKind, GestureScores};
pub use features::{extract_features, Gesture, HandFeatures, StableGestureEvent, FEATURE_CONFIDENCE};
pub use geometry::Point2;
pub use landmark::{FrameError, Joint, LandmarkFrame, Point3, HAND_SKELETON, LANDMARK_COUNT};
pub use source::{spawn_landmark_source, JsonLinesSource, LandmarkSource, ScriptedSource};
pub use stabilizer::{GestureHistory, Stabilizer};
