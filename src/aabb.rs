use crate::{Segment, EPSILON};
use glam::Vec3;

/// An axis-aligned bounding box, used as a broad-phase reject before the
/// full triangle scan of a mesh. `min <= max` holds componentwise after any
/// sequence of point unions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box around all the points, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(None, |aabb, p| match aabb {
            None => Some(Aabb::new(p, p)),
            Some(aabb) => Some(aabb.point_union(p)),
        })
    }

    // Grow the box to include a point
    pub fn point_union(self, p: Vec3) -> Self {
        Aabb::new(self.min.min(p), self.max.max(p))
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Slab test against the segment's parametric range `[0, 1]`.
    ///
    /// Conservative: passing only means the segment crosses the box, not
    /// that anything inside will actually be hit.
    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        let start = segment.start;
        let delta = segment.delta();
        let mut t_min = 0.0f32;
        let mut t_max = 1.0f32;

        for axis in 0..3 {
            if delta[axis].abs() < EPSILON {
                // Parallel to this slab: inside it or not at all.
                if start[axis] < self.min[axis] || start[axis] > self.max[axis] {
                    return false;
                }
            } else {
                let inv = 1.0 / delta[axis];
                let t0 = (self.min[axis] - start[axis]) * inv;
                let t1 = (self.max[axis] - start[axis]) * inv;
                let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };

                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return false;
                }
            }
        }

        true
    }
}
