//! # Vector and Rotation Types
//!
//! The three geometric types the wire format carries: single- and
//! double-precision vectors, and unit quaternions.
//!
//! Quaternions crossing the wire are stored in their shorter-arc form
//! (non-negative `w`), which lets the protocol drop `w` entirely and
//! reconstruct it on the far side.

use bytemuck::{Pod, Zeroable};

/// A 3D vector in single precision.
///
/// Used for region-local positions, velocities, and axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the squared length.
    ///
    /// Avoids the sqrt call for magnitude comparisons.
    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
}

/// A 3D vector in double precision.
///
/// Used for world-global positions, where single precision would drift at
/// the scale of the full grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec3d {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3d {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A rotation quaternion.
///
/// Wire-bound quaternions must be unit length with `w >= 0` - the wire
/// format drops `w` and the decoder reconstructs it under that convention.
/// [`Quaternion::normalized_wire_form`] produces the representative to
/// encode; [`Quaternion::from_xyz`] is the matching reconstruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Quaternion {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W (scalar) component.
    pub w: f32,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new quaternion.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Returns the magnitude.
    #[inline]
    #[must_use]
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Returns the unit-length, non-negative-`w` representative of this
    /// rotation.
    ///
    /// `q` and `-q` describe the same rotation; this picks the one the wire
    /// format can carry. A degenerate (near-zero) quaternion collapses to
    /// [`Quaternion::IDENTITY`].
    #[must_use]
    pub fn normalized_wire_form(self) -> Self {
        let mag = self.magnitude();
        if mag <= f32::EPSILON {
            return Self::IDENTITY;
        }
        let q = Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag);
        if q.w < 0.0 {
            Self::new(-q.x, -q.y, -q.z, -q.w)
        } else {
            q
        }
    }

    /// Reconstructs a unit quaternion from its vector part.
    ///
    /// `w` is recovered as `sqrt(max(0, 1 - x^2 - y^2 - z^2))`. The radicand
    /// is clamped at zero so float error on near-unit inputs never produces
    /// NaN.
    #[inline]
    #[must_use]
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        let w = (1.0 - x * x - y * y - z * z).max(0.0).sqrt();
        Self::new(x, y, z, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_xyz_identity() {
        let q = Quaternion::from_xyz(0.0, 0.0, 0.0);
        assert!((q.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_xyz_reconstructs_w() {
        let q = Quaternion::from_xyz(0.6, 0.0, 0.0);
        assert!((q.w - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_from_xyz_clamps_radicand() {
        // Slightly over unit length from accumulated float error.
        let q = Quaternion::from_xyz(0.8, 0.6, 0.001);
        assert!(q.w >= 0.0);
        assert!(!q.w.is_nan());
    }

    #[test]
    fn test_wire_form_flips_negative_w() {
        let q = Quaternion::new(0.0, 0.0, 0.6, -0.8).normalized_wire_form();
        assert!(q.w > 0.0);
        assert!((q.z + 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_wire_form_degenerate_is_identity() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0).normalized_wire_form();
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_wire_form_normalizes() {
        let q = Quaternion::new(0.0, 0.0, 3.0, 4.0).normalized_wire_form();
        assert!((q.magnitude() - 1.0).abs() < 1e-6);
        assert!((q.z - 0.6).abs() < 1e-6);
        assert!((q.w - 0.8).abs() < 1e-6);
    }
}
