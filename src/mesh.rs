use crate::{Aabb, Hit, RayCast, Segment, Triangle};
use glam::{vec3, Vec3};
use itertools::Itertools;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    IndexCount(usize),
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

/// A triangle soup: an immutable, flat bag of triangles forming one rigid
/// collision mesh. Not required to be convex or watertight.
///
/// The bounding box over all vertices is computed once at construction and
/// used to reject whole-mesh misses before the brute-force scan.
#[derive(Clone, Debug)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    bounds: Option<Aabb>,
}

impl Mesh {
    /// Build a mesh from a shared vertex buffer and index triples, three
    /// indices per triangle.
    pub fn new(vertices: &[Vec3], indices: &[u32]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(indices.len()));
        }
        for &index in indices {
            if index as usize >= vertices.len() {
                return Err(MeshError::IndexOutOfBounds {
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let triangles = indices
            .iter()
            .tuples()
            .map(|(&a, &b, &c)| {
                Triangle::new(
                    vertices[a as usize],
                    vertices[b as usize],
                    vertices[c as usize],
                )
            })
            .collect();
        let bounds = Aabb::from_points(vertices.iter().copied());

        Ok(Self { triangles, bounds })
    }

    /// The canonical axis-aligned cube soup: 8 vertices, 12 triangles,
    /// outward-facing winding, centered at the origin.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let vertices = [
            vec3(-h, -h, -h),
            vec3(h, -h, -h),
            vec3(h, h, -h),
            vec3(-h, h, -h),
            vec3(-h, -h, h),
            vec3(h, -h, h),
            vec3(h, h, h),
            vec3(-h, h, h),
        ];
        #[rustfmt::skip]
        let indices = [
            // bottom
            0, 2, 1,
            0, 3, 2,
            // top
            4, 5, 6,
            4, 6, 7,
            // back
            0, 1, 5,
            0, 5, 4,
            // front
            2, 3, 7,
            2, 7, 6,
            // left
            0, 4, 7,
            0, 7, 3,
            // right
            1, 2, 6,
            1, 6, 5,
        ];

        Self::new(&vertices, &indices).expect("cube topology is valid")
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }
}

impl RayCast for Mesh {
    fn ray_cast(&self, segment: &Segment) -> Option<Hit> {
        // Broad-phase: a miss against the bounds is a miss against every
        // triangle, so the scan can be skipped outright.
        match self.bounds {
            None => return None,
            Some(bounds) if !bounds.intersects_segment(segment) => return None,
            Some(_) => {}
        }

        // Brute-force scan keeping the smallest fraction. Strict `<` means
        // equal-fraction ties go to the earliest triangle in the soup.
        let mut best: Option<Hit> = None;
        for triangle in &self.triangles {
            if let Some(hit) = triangle.ray_cast(segment) {
                if best.map_or(true, |b| hit.t < b.t) {
                    best = Some(hit);
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cube_has_twelve_triangles_and_tight_bounds() {
        let cube = Mesh::cube(10.0);
        assert_eq!(cube.triangles().len(), 12);
        let bounds = cube.bounds().unwrap();
        assert_abs_diff_eq!(bounds.min, Vec3::splat(-10.0));
        assert_abs_diff_eq!(bounds.max, Vec3::splat(10.0));
    }

    #[test]
    fn closest_of_stacked_triangles_wins() {
        // Two big triangles facing +z, one at z = 5 and one at z = 10. The
        // nearer one (z = 10, smaller fraction from above) must win even
        // though it comes later in the soup.
        let vertices = [
            vec3(-100.0, -100.0, 5.0),
            vec3(100.0, -100.0, 5.0),
            vec3(0.0, 100.0, 5.0),
            vec3(-100.0, -100.0, 10.0),
            vec3(100.0, -100.0, 10.0),
            vec3(0.0, 100.0, 10.0),
        ];
        let mesh = Mesh::new(&vertices, &[0, 1, 2, 3, 4, 5]).unwrap();

        let segment = Segment::new(vec3(0.0, 0.0, 100.0), vec3(0.0, 0.0, -100.0));
        let hit = mesh.ray_cast(&segment).unwrap();
        assert_abs_diff_eq!(hit.point, vec3(0.0, 0.0, 10.0), epsilon = 1e-4);
        assert_abs_diff_eq!(hit.t, 0.45, epsilon = 1e-5);
    }

    #[test]
    fn empty_mesh_misses() {
        let mesh = Mesh::new(&[], &[]).unwrap();
        assert!(mesh.bounds().is_none());
        let segment = Segment::new(vec3(0.0, 0.0, 100.0), vec3(0.0, 0.0, -100.0));
        assert!(mesh.ray_cast(&segment).is_none());
    }

    #[test]
    fn construction_rejects_bad_indices() {
        let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(
            Mesh::new(&vertices, &[0, 1, 2, 0]).unwrap_err(),
            MeshError::IndexCount(4)
        );
        assert_eq!(
            Mesh::new(&vertices, &[0, 1, 5]).unwrap_err(),
            MeshError::IndexOutOfBounds {
                index: 5,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn broad_phase_does_not_change_the_answer() {
        let cube = Mesh::cube(10.0);
        // Misses the bounds entirely.
        let over = Segment::new(vec3(-100.0, 0.0, 20.0), vec3(100.0, 0.0, 20.0));
        assert!(!cube.bounds().unwrap().intersects_segment(&over));
        assert!(cube.ray_cast(&over).is_none());

        // Passes the bounds and really hits.
        let through = Segment::new(vec3(-100.0, 0.0, 0.0), vec3(100.0, 0.0, 0.0));
        assert!(cube.bounds().unwrap().intersects_segment(&through));
        assert!(cube.ray_cast(&through).is_some());

        // Passes the bounds but hits nothing: starts inside, so every face
        // it can reach is back-facing.
        let inside_out = Segment::new(Vec3::ZERO, vec3(100.0, 0.0, 0.0));
        assert!(cube.bounds().unwrap().intersects_segment(&inside_out));
        assert!(cube.ray_cast(&inside_out).is_none());
    }
}
