//! The bounded set of continuous glyph-transform parameters.

use glyph_outline::Deformation;
use serde::Serialize;

pub const SCALE_MIN:      f32 = 0.1;
pub const SCALE_MAX:      f32 = 3.0;
pub const DISTORTION_MAX: f32 = 100.0;

/// Scale, rotation, distortion and smoothness.  Every setter clamps, so the
/// fields are always in range; non-finite inputs are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EditState {
    scale:      f32,
    rotation:   f32,
    distortion: f32,
    smoothness: f32,
}

impl EditState {
    /// Scale 1, no rotation, no distortion, smoothness 0.8.
    pub const REST: EditState = EditState {
        scale:      1.0,
        rotation:   0.0,
        distortion: 0.0,
        smoothness: 0.8,
    };

    pub fn scale(&self)      -> f32 { self.scale }
    pub fn rotation(&self)   -> f32 { self.rotation }
    pub fn distortion(&self) -> f32 { self.distortion }
    pub fn smoothness(&self) -> f32 { self.smoothness }

    /// Clamped to `[0.1, 3.0]`.
    pub fn set_scale(&mut self, v: f32) {
        if v.is_finite() {
            self.scale = v.clamp(SCALE_MIN, SCALE_MAX);
        }
    }

    /// Radians, unbounded.
    pub fn set_rotation(&mut self, v: f32) {
        if v.is_finite() {
            self.rotation = v;
        }
    }

    /// Clamped to `[0, 100]`.
    pub fn set_distortion(&mut self, v: f32) {
        if v.is_finite() {
            self.distortion = v.clamp(0.0, DISTORTION_MAX);
        }
    }

    /// Clamped to `[0, 1]`.
    pub fn set_smoothness(&mut self, v: f32) {
        if v.is_finite() {
            self.smoothness = v.clamp(0.0, 1.0);
        }
    }

    /// One step of exponential relaxation toward rest.  Smoothness is left
    /// alone.
    pub fn glide_toward_rest(&mut self, k: f32) {
        let k = k.clamp(0.0, 1.0);
        self.set_scale(self.scale + (1.0 - self.scale) * k);
        self.set_rotation(self.rotation * (1.0 - k));
        self.set_distortion(self.distortion * (1.0 - k));
    }

    /// The geometric part of the state, for the glyph model.
    pub fn deformation(&self) -> Deformation {
        Deformation {
            scale:      self.scale,
            rotation:   self.rotation,
            distortion: self.distortion,
        }
    }
}

impl Default for EditState {
    fn default() -> Self { EditState::REST }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp() {
        let mut s = EditState::default();
        s.set_scale(10.0);
        assert_eq!(s.scale(), SCALE_MAX);
        s.set_scale(0.0);
        assert_eq!(s.scale(), SCALE_MIN);
        s.set_distortion(-5.0);
        assert_eq!(s.distortion(), 0.0);
        s.set_distortion(250.0);
        assert_eq!(s.distortion(), DISTORTION_MAX);
        s.set_smoothness(1.5);
        assert_eq!(s.smoothness(), 1.0);
        s.set_rotation(-20.0);
        assert_eq!(s.rotation(), -20.0);
    }

    #[test]
    fn non_finite_is_ignored() {
        let mut s = EditState::default();
        s.set_scale(f32::NAN);
        s.set_rotation(f32::INFINITY);
        s.set_distortion(f32::NAN);
        assert_eq!(s, EditState::REST);
    }

    #[test]
    fn glide_converges_monotonically() {
        let mut s = EditState::default();
        s.set_scale(2.5);
        s.set_rotation(1.0);
        s.set_distortion(80.0);

        let (mut prev_scale, mut prev_rot, mut prev_dist) = (2.5f32, 1.0f32, 80.0f32);
        for _ in 0..65 {
            s.glide_toward_rest(0.1);
            assert!(s.scale() < prev_scale && s.scale() >= 1.0);
            assert!(s.rotation() < prev_rot && s.rotation() >= 0.0);
            assert!(s.distortion() < prev_dist && s.distortion() >= 0.0);
            prev_scale = s.scale();
            prev_rot   = s.rotation();
            prev_dist  = s.distortion();
        }

        // Within 1% of the starting offset from rest.
        assert!((s.scale() - 1.0).abs() <= 0.01 * 1.5);
        assert!(s.rotation().abs() <= 0.01 * 1.0);
        assert!(s.distortion() <= 0.01 * 80.0);
        assert_eq!(s.smoothness(), 0.8);
    }

    #[test]
    fn deformation_mirrors_state() {
        let mut s = EditState::default();
        s.set_scale(1.5);
        s.set_rotation(0.25);
        s.set_distortion(40.0);
        let d = s.deformation();
        assert_eq!((d.scale, d.rotation, d.distortion), (1.5, 0.25, 40.0));
        assert_eq!(EditState::REST.deformation(), Deformation::IDENTITY);
    }
}
