//! Cast a batch of random segments against a world of randomly placed cube
//! soups and report the throughput.

use anyhow::Context;
use glam::{vec3, EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;
use rayon::prelude::*;
use serde::Deserialize;
use soupcast::{Instance, Mesh, RayCast, Scene, Segment};
use std::{env, f32::consts::PI, fs, sync::Arc, time::Instant};

type DefaultRng = rand_xoshiro::Xoshiro256Plus;

/// Workload parameters, overridable from a TOML file passed as argv[1].
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
struct BenchConfig {
    objects: usize,
    segments: usize,
    world_radius: f32,
    min_scale: f32,
    max_scale: f32,
    seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            objects: 10_000,
            segments: 5_000,
            world_radius: 10_000.0,
            min_scale: 0.1,
            max_scale: 100.0,
            seed: 0x1337,
        }
    }
}

fn random_vec3(rng: &mut DefaultRng, min: Vec3, max: Vec3) -> Vec3 {
    vec3(
        rng.gen_range(min.x, max.x),
        rng.gen_range(min.y, max.y),
        rng.gen_range(min.z, max.z),
    )
}

fn random_transform(rng: &mut DefaultRng, config: &BenchConfig) -> Mat4 {
    let translation = config.world_radius * random_vec3(rng, -Vec3::ONE, Vec3::ONE);
    let euler = random_vec3(rng, -PI * Vec3::ONE, PI * Vec3::ONE);
    let scale = random_vec3(
        rng,
        Vec3::splat(config.min_scale),
        Vec3::splat(config.max_scale),
    );

    Mat4::from_scale_rotation_translation(
        scale,
        Quat::from_euler(EulerRot::ZYX, euler.z, euler.y, euler.x),
        translation,
    )
}

fn random_segment(rng: &mut DefaultRng, config: &BenchConfig) -> Segment {
    Segment::new(
        config.world_radius * random_vec3(rng, -Vec3::ONE, Vec3::ONE),
        config.world_radius * random_vec3(rng, -Vec3::ONE, Vec3::ONE),
    )
}

fn main() -> anyhow::Result<()> {
    let config = match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path))?;
            toml::from_str(&text).with_context(|| format!("failed to parse config {}", path))?
        }
        None => BenchConfig::default(),
    };

    let mut rng = DefaultRng::seed_from_u64(config.seed);

    // One shared cube soup, many placements.
    let cube = Arc::new(Mesh::cube(10.0));
    let mut scene = Scene::new();
    for _ in 0..config.objects {
        scene.add(Instance::new(cube.clone(), random_transform(&mut rng, &config)));
    }

    let segments = (0..config.segments)
        .map(|_| random_segment(&mut rng, &config))
        .collect::<Vec<_>>();

    let start = Instant::now();

    // Queries are pure reads, so the batch can fan out across threads.
    let hits = segments
        .par_iter()
        .filter(|segment| scene.ray_cast(segment).is_some())
        .count();

    let duration = start.elapsed();
    let casts_per_second = config.segments as f64 / duration.as_secs_f64();
    println!(
        "Cast {} segments against {} instances\nHits: {}\nTime elapsed: {:.2?}\nCasts per second: {:.0}",
        config.segments, config.objects, hits, duration, casts_per_second
    );

    Ok(())
}
