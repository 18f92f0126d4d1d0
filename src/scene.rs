use crate::{Hit, Instance, RayCast, Segment};

/// An ordered collection of instances, queried as one world.
///
/// Build it fully (appending is not thread-safe), then cast from as many
/// threads as you like.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    instances: Vec<Instance>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }
}

impl RayCast for Scene {
    fn ray_cast(&self, segment: &Segment) -> Option<Hit> {
        // Same closest-hit merge as inside a mesh, one level up; the two
        // compose, so the winner is the globally smallest fraction.
        let mut best: Option<Hit> = None;
        for instance in &self.instances {
            if let Some(hit) = instance.ray_cast(segment) {
                if best.map_or(true, |b| hit.t < b.t) {
                    best = Some(hit);
                }
            }
        }
        best
    }
}
