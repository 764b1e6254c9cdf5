// src/generate.rs
//
// Seeded random instances with a known thrower. Every point is placed so the
// thrower meets it at a distinct positive integer time.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::hail::{MovingPoint, Thrower, Vec3i};
use crate::input::{Instance, PointRecord};

// ---------------------------------------------
// GENERATOR CONFIG
// ---------------------------------------------
pub struct GeneratorConfig {
    pub position_range: i64,
    pub speed_range: i64,
    pub max_time: usize,
}

pub const GENERATOR: GeneratorConfig = GeneratorConfig {
    position_range: 1_000_000_000_000,
    speed_range: 300,
    max_time: 1_000_000_000,
};

#[derive(Debug, Clone)]
pub struct GeneratedInstance {
    pub instance: Instance,
    pub thrower: Thrower,
    /// Collision time of each point, in point order.
    pub times: Vec<i64>,
}

fn random_vec(rng: &mut impl Rng, range: i64) -> Vec3i {
    Vector3::new(
        rng.gen_range(-range..=range),
        rng.gen_range(-range..=range),
        rng.gen_range(-range..=range),
    )
}

/// Build `count` points that a single random thrower hits, reproducibly
/// from `seed`.
pub fn random_instance(seed: u64, count: usize) -> GeneratedInstance {
    let cfg = &GENERATOR;
    let mut rng = StdRng::seed_from_u64(seed);

    let thrower = Thrower {
        position: random_vec(&mut rng, cfg.position_range),
        velocity: random_vec(&mut rng, cfg.speed_range),
    };

    let times: Vec<i64> = index::sample(&mut rng, cfg.max_time, count)
        .into_iter()
        .map(|i| i as i64 + 1)
        .collect();

    let mut points = Vec::with_capacity(count);
    for &t in &times {
        // A shared velocity component would leave that axis with no closing speed.
        let velocity = loop {
            let v = random_vec(&mut rng, cfg.speed_range);
            if (0..3).all(|a| v[a] != thrower.velocity[a]) {
                break v;
            }
        };

        let point = MovingPoint {
            position: thrower.position + (thrower.velocity - velocity) * t,
            velocity,
        };
        points.push(PointRecord::from(&point));
    }

    GeneratedInstance {
        instance: Instance { points, test_area: None },
        thrower,
        times,
    }
}
