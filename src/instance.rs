use crate::{Hit, Mesh, RayCast, Segment};
use glam::Mat4;
use std::sync::Arc;

/// A [`Mesh`] placed in the world by an object-to-world transform.
///
/// Instances share meshes through `Arc`, so one soup can back thousands of
/// placements. The world-to-object inverse is computed whenever the
/// transform is set, never lazily, which keeps concurrent read-only casts
/// free of interior mutation.
#[derive(Clone, Debug)]
pub struct Instance {
    mesh: Arc<Mesh>,
    obj_to_world: Mat4,
    world_to_obj: Mat4,
}

impl Instance {
    pub fn new(mesh: Arc<Mesh>, obj_to_world: Mat4) -> Self {
        Self {
            mesh,
            obj_to_world,
            world_to_obj: obj_to_world.inverse(),
        }
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn transform(&self) -> Mat4 {
        self.obj_to_world
    }

    /// Replace the transform, keeping the cached inverse in sync.
    pub fn set_transform(&mut self, obj_to_world: Mat4) {
        self.obj_to_world = obj_to_world;
        self.world_to_obj = obj_to_world.inverse();
    }
}

impl RayCast for Instance {
    fn ray_cast(&self, segment: &Segment) -> Option<Hit> {
        // Cast in object space, then map the result back out.
        let local = Segment::new(
            self.world_to_obj.transform_point3(segment.start),
            self.world_to_obj.transform_point3(segment.end),
        );
        let hit = self.mesh.ray_cast(&local)?;

        // Points take the full affine map. Normals take the inverse
        // transpose with no translation and are re-normalized, since
        // non-uniform scale does not preserve their length or direction.
        let normal = self
            .world_to_obj
            .transpose()
            .transform_vector3(hit.normal)
            .normalize_or_zero();

        Some(Hit {
            point: self.obj_to_world.transform_point3(hit.point),
            normal,
            // Affine maps preserve the parametric fraction.
            t: hit.t,
        })
    }
}
