use crate::{Hit, Plane, RayCast, Segment};
use glam::Vec3;

// Containment tolerance, scaled by squared edge length so the slack in
// distance units grows with the triangle instead of being absolute.
const EDGE_TOLERANCE: f32 = 1e-4;

/// Three ordered vertices; the winding defines the outward normal via the
/// right-hand rule on `(v1 - v0) x (v2 - v0)`.
///
/// The supporting plane is computed once at construction (vertices never
/// change afterwards). A zero-area triangle gets a zero normal, whose
/// degenerate plane is parallel to every segment and so never hits.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    points: [Vec3; 3],
    plane: Plane,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            points: [a, b, c],
            plane: Plane::from_point_normal(a, normal),
        }
    }

    pub fn points(&self) -> &[Vec3; 3] {
        &self.points
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Closed same-side containment test: points on an edge count as inside.
    ///
    /// Assumes `p` lies in the triangle's plane; results are undefined if
    /// it does not.
    pub fn is_point_inside(&self, p: Vec3) -> bool {
        let normal = self.plane.normal;
        for i in 0..3 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 3];
            let edge = b - a;
            // p is outside as soon as it falls clearly behind one edge.
            if edge.cross(p - a).dot(normal) < -EDGE_TOLERANCE * edge.length_squared() {
                return false;
            }
        }
        true
    }
}

impl RayCast for Triangle {
    fn ray_cast(&self, segment: &Segment) -> Option<Hit> {
        // The plane's fraction is forwarded unchanged.
        let hit = self.plane.ray_cast(segment)?;
        if self.is_point_inside(hit.point) {
            Some(hit)
        } else {
            None
        }
    }
}
