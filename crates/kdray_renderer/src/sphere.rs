//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use kdray_math::{Aabb, Interval, Point3, Vec3};

/// A sphere primitive.
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f32, material: Arc<Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(ray, root, p, outward_normal, &self.material))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn grey_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Arc::new(Material::diffuse(Color::splat(0.5))))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("should hit");
        assert!((rec.t - 0.5).abs() < 1e-4);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_known_surface_point() {
        let center = Vec3::new(1.0, 2.0, -3.0);
        let sphere = grey_sphere(center, 2.0);

        // Aim an unnormalized ray at a known point on the surface
        let target = center + Vec3::new(1.0, 1.0, 1.0).normalize() * 2.0;
        let origin = Vec3::new(10.0, 10.0, 10.0);
        let ray = Ray::new(origin, (target - origin) * 0.25);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("should hit");
        assert!((rec.t - 4.0).abs() < 1e-4, "t = {}", rec.t);
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        assert!((rec.p - target).length() < 1e-3);
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("should hit");
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        // Normal is flipped to face the ray
        assert!((rec.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_interval_excludes_roots() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Both roots (4 and 6) lie beyond the window
        assert!(sphere.hit(&ray, Interval::new(0.001, 3.0)).is_none());
        // Near root excluded, far root accepted
        let rec = sphere.hit(&ray, Interval::new(4.5, 10.0)).expect("far root");
        assert!((rec.t - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_bounding_box() {
        let sphere = grey_sphere(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let bbox = sphere.bounding_box();
        assert_eq!(bbox.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(bbox.max, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(bbox.centroid(), sphere.center());
    }
}
