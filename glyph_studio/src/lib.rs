//! # glyph_studio
//!
//! Interactive front end for `gesture_edit`: a hand (simulated, recorded or
//! tracked by a LeapMotion controller) reshapes a glyph outline drawn in a
//! software-rendered window.
//!
//! ## Visualization
//!
//! The canvas shows the glyph outline over a faint copy of the plain letter,
//! with control points as squares and the selected point in red.  The side
//! panel shows the tracked hand skeleton, gesture scores, the edit state and
//! the letter wheel.
//!
//! ## Feature flags
//!
//! * (default) **Simulation mode**. The keyboard poses a synthetic hand.
//! * `leap`, **Hardware mode**. Polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `1` `2` `3` `4` `5` | Point, pinch, fist, open hand, two fingers |
//! | `9` / `0` | Relaxed (no gesture) / hand away |
//! | `I` `J` `K` `L` | Move the hand |
//! | `W` / `S` | Widen / narrow the pinch, fist or finger spread |
//! | `A` / `D` | Turn the pinch or two-finger angle |
//!
//! ### Always available
//!
//! | Key | Effect |
//! |---|---|
//! | `N` / `P` | Next / previous letter |
//! | `R` | Reset to the rest pose |
//! | `E` | Export `custom-glyph-<letter>.json` |
//! | `Q` / `Escape` | Quit |

pub mod source;
pub mod visualizer;
pub mod app;
