//! KD-tree spatial index over surface bounding-box centroids.
//!
//! Each level splits on the next axis in x, y, z order at the median
//! centroid coordinate. Child volumes are the parent volume cut at the
//! split plane, not refit to their contents, so they bound the centroids
//! beneath them rather than the full surfaces.

use crate::hittable::{closest_hit, HitRecord, Hittable, SurfaceRef};
use crate::Ray;
use kdray_math::{Aabb, Axis, Interval};

/// Depth at which construction stops splitting.
pub const MAX_DEPTH: usize = 20;

/// Nodes holding this many surfaces or fewer become leaves.
pub const MIN_OBJECTS: usize = 4;

/// A node of the tree. Children are owned exclusively by their parent.
pub enum KdNode {
    /// Surfaces whose centroids fell inside this volume.
    Leaf { bbox: Aabb, objects: Vec<SurfaceRef> },
    /// Split of the volume by a plane perpendicular to `axis`.
    Interior {
        bbox: Aabb,
        axis: Axis,
        split: f32,
        left: Box<KdNode>,
        right: Box<KdNode>,
    },
}

#[inline]
fn centroid_on(object: &SurfaceRef, axis: Axis) -> f32 {
    axis.component(object.bounding_box().centroid())
}

impl KdNode {
    fn build(objects: Vec<SurfaceRef>, bbox: Aabb, depth: usize) -> Self {
        if objects.len() <= MIN_OBJECTS || depth >= MAX_DEPTH {
            return KdNode::Leaf { bbox, objects };
        }

        let axis = Axis::from_depth(depth);
        let split = Self::find_split_position(&objects, axis);
        let (left_objects, right_objects) = Self::partition(objects, axis, split);

        // All centroids on one side: splitting further would never terminate
        if left_objects.is_empty() || right_objects.is_empty() {
            let mut objects = left_objects;
            objects.extend(right_objects);
            return KdNode::Leaf { bbox, objects };
        }

        let left = Self::build(left_objects, bbox.clip_max(axis, split), depth + 1);
        let right = Self::build(right_objects, bbox.clip_min(axis, split), depth + 1);

        KdNode::Interior {
            bbox,
            axis,
            split,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Median centroid coordinate; the upper middle one for even counts.
    fn find_split_position(objects: &[SurfaceRef], axis: Axis) -> f32 {
        let mut positions: Vec<f32> = objects.iter().map(|o| centroid_on(o, axis)).collect();
        positions.sort_unstable_by(f32::total_cmp);
        positions[positions.len() / 2]
    }

    fn partition(
        objects: Vec<SurfaceRef>,
        axis: Axis,
        split: f32,
    ) -> (Vec<SurfaceRef>, Vec<SurfaceRef>) {
        objects
            .into_iter()
            .partition(|o| centroid_on(o, axis) < split)
    }

    pub fn bbox(&self) -> &Aabb {
        match self {
            KdNode::Leaf { bbox, .. } | KdNode::Interior { bbox, .. } => bbox,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, KdNode::Leaf { .. })
    }

    /// Number of nodes in this subtree, leaves included.
    pub fn node_count(&self) -> usize {
        match self {
            KdNode::Leaf { .. } => 1,
            KdNode::Interior { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Number of levels in this subtree; a lone leaf counts as 1.
    pub fn depth(&self) -> usize {
        match self {
            KdNode::Leaf { .. } => 1,
            KdNode::Interior { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox().hit(ray, ray_t) {
            return None;
        }

        match self {
            KdNode::Leaf { objects, .. } => closest_hit(objects, ray, ray_t),
            KdNode::Interior { left, right, .. } => {
                // Both sides see the full window
                match (left.hit(ray, ray_t), right.hit(ray, ray_t)) {
                    (Some(l), Some(r)) => Some(if l.t < r.t { l } else { r }),
                    (l, r) => l.or(r),
                }
            }
        }
    }
}

/// Spatial index over a shared list of surfaces.
///
/// The flat list is kept next to the tree; any structural change rebuilds
/// the whole tree from it.
#[derive(Default)]
pub struct KdTree {
    root: Option<Box<KdNode>>,
    objects: Vec<SurfaceRef>,
}

impl KdTree {
    /// An empty tree; every query misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree over `objects`.
    pub fn from_objects(objects: Vec<SurfaceRef>) -> Self {
        let mut tree = Self::new();
        tree.build(objects);
        tree
    }

    /// Replace the contents of the tree and rebuild it.
    pub fn build(&mut self, objects: Vec<SurfaceRef>) {
        if objects.is_empty() {
            self.clear();
            return;
        }

        let bbox = objects.iter().skip(1).fold(objects[0].bounding_box(), |acc, o| {
            Aabb::surrounding(&acc, &o.bounding_box())
        });

        self.root = Some(Box::new(KdNode::build(objects.clone(), bbox, 0)));
        self.objects = objects;

        log::info!(
            "kd-tree built with {} nodes, max depth: {}, {} objects",
            self.node_count(),
            self.max_depth(),
            self.objects.len()
        );
    }

    /// Append one surface and rebuild the whole tree.
    pub fn add(&mut self, object: SurfaceRef) {
        let mut objects = std::mem::take(&mut self.objects);
        objects.push(object);
        self.build(objects);
    }

    /// Drop every surface and the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.objects.clear();
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

    pub fn root(&self) -> Option<&KdNode> {
        self.root.as_deref()
    }

    /// Closest hit with `t` strictly between `t_min` and `t_max`.
    pub fn query(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord<'_>> {
        self.root.as_ref()?.hit(ray, Interval::new(t_min, t_max))
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.node_count())
    }

    pub fn max_depth(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.depth())
    }
}

impl Hittable for KdTree {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.query(ray, ray_t.min, ray_t.max)
    }

    fn bounding_box(&self) -> Aabb {
        self.root.as_ref().map_or(Aabb::EMPTY, |root| *root.bbox())
    }
}
