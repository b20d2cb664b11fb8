//! Hittable trait, HitRecord, and the surface types the scene is made of.

use std::sync::Arc;

use crate::{Material, Ray, Sphere};
use kdray_math::{Aabb, Interval, Point3, Vec3};

/// Where and how a ray met a surface.
///
/// Lives only as long as the query that produced it; the material is
/// borrowed from the surface that was hit.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    pub p: Point3,
    /// Unit normal facing the incoming ray
    pub normal: Vec3,
    pub t: f32,
    /// True when the ray arrived from outside the surface
    pub front_face: bool,
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` against the ray.
    pub fn new(ray: &Ray, t: f32, p: Point3, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p,
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Flip `outward_normal` toward the ray origin and remember which side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Anything a ray can be intersected with: single surfaces and whole worlds.
pub trait Hittable: Send + Sync {
    /// Closest intersection with parameter strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Box enclosing everything `hit` can return.
    fn bounding_box(&self) -> Aabb;
}

/// Every geometric primitive a scene can contain.
pub enum Surface {
    Sphere(Sphere),
}

/// Shared, read-only handle to a surface.
///
/// The flat object list and any number of tree leaves point at the same
/// surfaces, so rebuilding a tree never copies geometry.
pub type SurfaceRef = Arc<Surface>;

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl Hittable for Surface {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Surface::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }

    #[inline]
    fn bounding_box(&self) -> Aabb {
        match self {
            Surface::Sphere(sphere) => sphere.bounding_box(),
        }
    }
}

/// Closest hit among `objects`, shrinking the upper bound after each hit.
pub(crate) fn closest_hit<'a>(
    objects: &'a [SurfaceRef],
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord<'a>> {
    let mut closest: Option<HitRecord<'a>> = None;
    let mut closest_so_far = ray_t.max;

    for object in objects {
        if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
            closest_so_far = rec.t;
            closest = Some(rec);
        }
    }

    closest
}

/// A flat list of surfaces tested one after another.
///
/// This is the unaccelerated reference the kd-tree is measured against.
pub struct SurfaceList {
    objects: Vec<SurfaceRef>,
    bbox: Aabb,
}

impl SurfaceList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    pub fn from_objects(objects: Vec<SurfaceRef>) -> Self {
        let bbox = objects.iter().fold(Aabb::EMPTY, |acc, o| {
            Aabb::surrounding(&acc, &o.bounding_box())
        });
        Self { objects, bbox }
    }

    /// Append a surface, growing the cached bounds.
    pub fn add(&mut self, object: SurfaceRef) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[SurfaceRef] {
        &self.objects
    }
}

impl Default for SurfaceList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for SurfaceList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        closest_hit(&self.objects, ray, ray_t)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn sphere_at(z: f32) -> SurfaceRef {
        let material = Arc::new(Material::diffuse(Color::splat(0.5)));
        Arc::new(Sphere::new(Vec3::new(0.0, 0.0, z), 0.5, material).into())
    }

    #[test]
    fn test_face_normal_orientation() {
        let material = Material::diffuse(Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Outward normal facing the ray origin: front face
        let rec = HitRecord::new(&ray, 1.0, ray.at(1.0), Vec3::Z, &material);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        // Outward normal facing away: back face, normal flipped
        let rec = HitRecord::new(&ray, 1.0, ray.at(1.0), -Vec3::Z, &material);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_list_returns_closest() {
        let list = SurfaceList::from_objects(vec![sphere_at(-10.0), sphere_at(-3.0), sphere_at(-6.0)]);
        assert_eq!(list.len(), 3);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = list
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit");
        assert!((rec.t - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_list_bbox_and_clear() {
        let mut list = SurfaceList::new();
        assert!(list.is_empty());
        assert_eq!(list.bounding_box(), Aabb::EMPTY);

        list.add(sphere_at(-1.0));
        list.add(sphere_at(-4.0));
        let bbox = list.bounding_box();
        assert_eq!(bbox.min, Vec3::new(-0.5, -0.5, -4.5));
        assert_eq!(bbox.max, Vec3::new(0.5, 0.5, -0.5));

        list.clear();
        assert!(list.is_empty());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(list.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }
}
