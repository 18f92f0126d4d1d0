use crate::{Hit, RayCast, Segment, EPSILON};
use glam::Vec3;

/// An infinite one-sided plane: `dot(p, normal) + d == 0` for points on it.
///
/// Callers supply unit normals; every plane in this crate comes from
/// [`Triangle`](crate::Triangle), which normalizes at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            d: -point.dot(normal),
        }
    }
}

impl RayCast for Plane {
    fn ray_cast(&self, segment: &Segment) -> Option<Hit> {
        let v = segment.delta();
        let denom = v.dot(self.normal);

        // Parallel segments can never cross, and the epsilon keeps the
        // division below out of blow-up range. Degenerate segments land
        // here too (zero delta).
        if denom.abs() < EPSILON {
            return None;
        }
        // Segments moving along the normal approach from behind the plane;
        // back-facing casts do not count.
        if denom > 0.0 {
            return None;
        }

        let t = (-segment.start.dot(self.normal) - self.d) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some(Hit {
            point: segment.point_at(t),
            normal: self.normal,
            t,
        })
    }
}
