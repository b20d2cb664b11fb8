use crate::{Interval, Point3, Ray, Vec3};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Round-robin axis for a tree level: x, y, z, x, ...
    pub fn from_depth(depth: usize) -> Self {
        Self::ALL[depth % 3]
    }

    /// Index of the axis (0=X, 1=Y, 2=Z).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pick this axis' component out of a vector.
    #[inline]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Axis-aligned bounding box, stored as its two extreme corners.
///
/// Boxes built through [`Aabb::from_points`] or [`Aabb::surrounding`] keep
/// `min <= max` on every axis. Zero-size boxes are valid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Create a box from its corners, taken as given.
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from two arbitrary corner points.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    pub fn axis_min(&self, axis: Axis) -> f32 {
        axis.component(self.min)
    }

    pub fn axis_max(&self, axis: Axis) -> f32 {
        axis.component(self.max)
    }

    /// Extent of the box on one axis.
    pub fn axis_interval(&self, axis: Axis) -> Interval {
        Interval::new(self.axis_min(axis), self.axis_max(axis))
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method. A zero direction component divides to an infinity, which
    /// reduces that slab to "the origin lies between the planes".
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in Axis::ALL {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / axis.component(r.direction);
            let orig = axis.component(r.origin);

            let mut t0 = (slab.min - orig) * adinv;
            let mut t1 = (slab.max - orig) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Copy of this box with its upper bound on `axis` moved to `pos`.
    pub fn clip_max(&self, axis: Axis, pos: f32) -> Aabb {
        let mut out = *self;
        match axis {
            Axis::X => out.max.x = pos,
            Axis::Y => out.max.y = pos,
            Axis::Z => out.max.z = pos,
        }
        out
    }

    /// Copy of this box with its lower bound on `axis` moved to `pos`.
    pub fn clip_min(&self, axis: Axis, pos: f32) -> Aabb {
        let mut out = *self;
        match axis {
            Axis::X => out.min.x = pos,
            Axis::Y => out.min.y = pos,
            Axis::Z => out.min.z = pos,
        }
        out
    }

    /// True if `other` lies entirely inside this box (boundaries included).
    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }

    /// True if the point lies inside the box or on its boundary.
    pub fn contains_point(&self, p: Point3) -> bool {
        self.min.cmple(p).all() && p.cmple(self.max).all()
    }

    /// Box containing nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };
}
