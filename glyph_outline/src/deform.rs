//! Whole-glyph deformation: scale, rotate, then a sinusoidal wobble.

use serde::{Deserialize, Serialize};

/// Deformation parameters applied to every control point.
///
/// `distortion` is on the 0–100 scale used by the editor; the wobble
/// amplitude is `distortion / 100` of the maximum (20 px horizontal,
/// 10 px vertical).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deformation {
    pub scale:      f32,
    pub rotation:   f32,
    pub distortion: f32,
}

impl Deformation {
    pub const IDENTITY: Deformation = Deformation {
        scale:      1.0,
        rotation:   0.0,
        distortion: 0.0,
    };

    /// Map one baseline coordinate through the deformation.
    ///
    /// Order is fixed: translate to `center`, scale, rotate, translate back,
    /// then add the wobble.  The vertical wobble reads the already-wobbled
    /// `x`.
    pub fn apply(&self, center: (f32, f32), x: f32, y: f32) -> (f32, f32) {
        let (cx, cy) = center;

        let mut x = (x - cx) * self.scale + cx;
        let mut y = (y - cy) * self.scale + cy;

        if self.rotation != 0.0 {
            let (sin, cos) = self.rotation.sin_cos();
            let dx = x - cx;
            let dy = y - cy;
            x = cx + dx * cos - dy * sin;
            y = cy + dx * sin + dy * cos;
        }

        if self.distortion > 0.0 {
            let d = self.distortion / 100.0;
            x += (y * 0.01).sin() * d * 20.0;
            y += (x * 0.01).cos() * d * 10.0;
        }

        (x, y)
    }
}

impl Default for Deformation {
    fn default() -> Self { Deformation::IDENTITY }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const C: (f32, f32) = (400.0, 300.0);

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn identity_is_noop() {
        assert_eq!(Deformation::IDENTITY.apply(C, 123.0, 456.0), (123.0, 456.0));
    }

    #[test]
    fn scale_about_center() {
        let d = Deformation { scale: 2.0, ..Deformation::IDENTITY };
        assert_eq!(d.apply(C, 450.0, 300.0), (500.0, 300.0));
        assert_eq!(d.apply(C, 400.0, 300.0), C);
    }

    #[test]
    fn quarter_turn_rotation() {
        let d = Deformation { rotation: FRAC_PI_2, ..Deformation::IDENTITY };
        // +x axis goes to +y axis (screen coordinates, y down)
        assert!(close(d.apply(C, 500.0, 300.0), (400.0, 400.0)));
    }

    #[test]
    fn scale_applies_before_rotation() {
        let d = Deformation { scale: 0.5, rotation: FRAC_PI_2, distortion: 0.0 };
        assert!(close(d.apply(C, 500.0, 300.0), (400.0, 350.0)));
    }

    #[test]
    fn full_distortion_wobble() {
        let d = Deformation { distortion: 100.0, ..Deformation::IDENTITY };
        let (x, y) = d.apply(C, 100.0, 200.0);
        let ex = 100.0 + (2.0f32).sin() * 20.0;
        let ey = 200.0 + (ex * 0.01).cos() * 10.0;
        assert!(close((x, y), (ex, ey)));
    }
}
