//! Segment ray casting against static triangle-mesh geometry.
//!
//! The query shape is a bounded [`Segment`]; every level of the hierarchy
//! ([`Plane`], [`Triangle`], [`Mesh`], [`Instance`], [`Scene`]) answers the
//! same question through [`RayCast`]: what along this segment is hit first,
//! and with what surface normal. A miss is a plain `None`, never an error.
//!
//! Geometry is immutable once built, and all derived state (triangle planes,
//! mesh bounds, instance inverse transforms) is computed at construction, so
//! a built scene can be queried concurrently from many threads.

mod aabb;
mod instance;
mod mesh;
mod plane;
mod scene;
mod triangle;

pub use aabb::*;
pub use instance::*;
pub use mesh::*;
pub use plane::*;
pub use scene::*;
pub use triangle::*;

use glam::Vec3;

// Near-zero threshold shared by every guarded division in the crate.
pub(crate) const EPSILON: f32 = 1e-6;

/// A directed line segment, the ray-cast query primitive.
///
/// Intersections are clipped to the segment's parametric range `[0, 1]`;
/// a degenerate segment (`start == end`) misses everything.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn delta(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.start + t * self.delta()
    }
}

/// The result of a successful cast, in the space the query was made in.
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    /// Point where the segment first strikes the surface.
    pub point: Vec3,
    /// Unit surface normal at the hit point.
    pub normal: Vec3,
    /// Fraction along the segment, 0 = start, 1 = end.
    pub t: f32,
}

/// Computes the closest intersection between a segment and the implementor.
///
/// Semantics are identical at every level of the hierarchy, so implementors
/// compose: a [`Scene`] cast is the minimum-`t` hit over every triangle of
/// every instance, regardless of which level does the comparison.
pub trait RayCast {
    fn ray_cast(&self, segment: &Segment) -> Option<Hit>;
}
