use crate::{Point3, Vec3};

/// A half-line starting at `origin` and travelling along `direction`.
///
/// The direction is not required to be normalized; `t` values returned by
/// intersection routines are measured in units of the direction's length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// `origin + t * direction`
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    /// From the origin down the camera's viewing axis.
    fn default() -> Self {
        Self::new(Point3::ZERO, Vec3::NEG_Z)
    }
}
