//! # gesture_edit
//!
//! Maps stabilised hand gestures onto a bounded edit state and applies it to
//! a glyph.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Point (index up) | Pick the control point under the fingertip and drag it |
//! | Pinch, wider than 0.04 | Scale the glyph, 0.5× to 2.5× |
//! | Pinch, tighter than 0.04 | Turn the thumb→index angle into a letter, A to Z |
//! | Fist | Distort in proportion to hand size |
//! | Two fingers | Rotate by the index→middle angle |
//! | Open hand | Glide back to the rest pose, 10% per frame |
//!
//! [`GestureSession`] ties the pipeline together; everything else is usable
//! on its own.

pub mod config;
pub mod edit_state;
pub mod letter_wheel;
pub mod mapper;
pub mod session;
pub mod snapshot;

pub use config::{ConfigError, SessionConfig};
pub use edit_state::{EditState, DISTORTION_MAX, SCALE_MAX, SCALE_MIN};
pub use letter_wheel::{index_for_angle, LetterWheel, LETTER_COUNT};
pub use mapper::{MapOutcome, MapperConfig, Mode, TransformMapper};
pub use session::{GestureSession, SessionEvent};
pub use snapshot::{GlyphSnapshot, SnapshotError};
