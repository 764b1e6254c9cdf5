// src/hail.rs

use nalgebra::Vector3;
use std::fmt;

pub type Vec3i = Vector3<i64>;
pub type Vec3w = Vector3<i128>;

// ---------------------------------------------
// WORKED INSTANCE: (position, velocity) per point
// ---------------------------------------------
pub const WORKED_INSTANCE: [([i64; 3], [i64; 3]); 3] = [
    ([219051609191782, 68260434807407, 317809635461867], [146, 364, -22]),
    ([292151991892724, 394725036264709, 272229701860796], [-43, -280, -32]),
    ([455400538938496, 167482380286201, 389150487664328], [-109, 219, -58]),
];

pub fn worked_instance() -> Vec<MovingPoint> {
    WORKED_INSTANCE
        .iter()
        .map(|&(position, velocity)| MovingPoint::new(position, velocity))
        .collect()
}

#[inline]
pub fn widen(v: &Vec3i) -> Vec3w {
    v.map(i128::from)
}

// ---------------------------------------------
// MOVING POINT (input body, never mutated)
// ---------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingPoint {
    pub position: Vec3i,
    pub velocity: Vec3i,
}

impl MovingPoint {
    pub fn new(position: [i64; 3], velocity: [i64; 3]) -> Self {
        Self {
            position: Vector3::from(position),
            velocity: Vector3::from(velocity),
        }
    }
}

impl fmt::Display for MovingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, v) = (&self.position, &self.velocity);
        write!(f, "{}, {}, {} @ {}, {}, {}", p.x, p.y, p.z, v.x, v.y, v.z)
    }
}

// ---------------------------------------------
// THROWER (derived once, from t0 / t1)
// ---------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thrower {
    pub position: Vec3i,
    pub velocity: Vec3i,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub index: usize,
    pub time: i128,
}

impl Thrower {
    pub fn position_sum(&self) -> i128 {
        widen(&self.position).sum()
    }

    /// Integer time at which the thrower and `point` occupy the same spot.
    /// `None` when they never meet at an integer time, or when their
    /// velocities are equal (parallel paths have no single collision time).
    pub fn collision_time(&self, point: &MovingPoint) -> Option<i128> {
        // p + t*v = pk + t*vk  =>  t*(v - vk) = pk - p
        let gap = widen(&point.position) - widen(&self.position);
        let closing = widen(&self.velocity) - widen(&point.velocity);

        let axis = (0..3).find(|&a| closing[a] != 0)?;
        if gap[axis] % closing[axis] != 0 {
            return None;
        }
        let t = gap[axis] / closing[axis];

        // an overflowing product can never equal a gap that fits in 65 bits
        (0..3)
            .all(|a| closing[a].checked_mul(t) == Some(gap[a]))
            .then_some(t)
    }

    /// Collision with every point, in input order. `Err(index)` names the
    /// first point the thrower misses.
    pub fn collisions(&self, points: &[MovingPoint]) -> Result<Vec<Collision>, usize> {
        points
            .iter()
            .enumerate()
            .map(|(index, p)| {
                self.collision_time(p)
                    .map(|time| Collision { index, time })
                    .ok_or(index)
            })
            .collect()
    }
}

impl fmt::Display for Thrower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p, v) = (&self.position, &self.velocity);
        write!(f, "{}, {}, {} @ {}, {}, {}", p.x, p.y, p.z, v.x, v.y, v.z)
    }
}
