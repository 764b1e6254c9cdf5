// ==============================================================================
// solver.rs — COLLISION SOLVER (ELIMINATED VELOCITY, EXACT ALGEBRA)
// ==============================================================================
// ------------------------------------------------------------------------------
// Unknowns are only the two collision times t0 (point 0) and t1 (point 1).
// The thrower velocity is never solved for; per axis it is the finite
// difference between the two hits:
//
//     v_a = (p1_a(t1) - p0_a(t0)) / (t1 - t0)
//
// With that velocity, each axis implies its own arrival time at point 2:
//
//     t_a = (p2_a + t0 * v_a - p0_a(t0)) / (v_a - d2_a)
//
// and all three must agree. Pipeline (one axis ordering):
// - t_pivot == t_first   -> cross-multiply, divide out (t1 - t0), linear in t1
//                           -> t1 = N(t0) / D(t0)
// - t_pivot == t_second  -> substitute t1, clear D -> consistency P(t0)
// - every integer root of P is back-substituted; the one giving integer
//   t1, velocity and position (and hitting all three points) is kept
// - position_a = p0_a(t0) + t0 * (d0_a - v_a)
//
// Orderings are tried x/y/z, then y/z/x, then z/x/y; the first failure is
// the one reported.
// ==============================================================================

use std::fmt;

use nalgebra::Vector3;
use num::{BigInt, BigRational, Signed, ToPrimitive, Zero};

use crate::algebra::poly::content_of;
use crate::algebra::{BiPoly, Poly, integer_roots};
use crate::error::SolveError;
use crate::hail::{Collision, MovingPoint, Thrower, Vec3i};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which axis pair fixes `t1(t0)` (`pivot`/`first`) and which pins `t0`
/// (`pivot`/`second`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisOrder {
    pub pivot: Axis,
    pub first: Axis,
    pub second: Axis,
}

impl AxisOrder {
    pub const XYZ: AxisOrder = AxisOrder { pivot: Axis::X, first: Axis::Y, second: Axis::Z };
    pub const YZX: AxisOrder = AxisOrder { pivot: Axis::Y, first: Axis::Z, second: Axis::X };
    pub const ZXY: AxisOrder = AxisOrder { pivot: Axis::Z, first: Axis::X, second: Axis::Y };

    pub const ROTATIONS: [AxisOrder; 3] = [Self::XYZ, Self::YZX, Self::ZXY];
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t_{p} == t_{a}, t_{p} == t_{b}",
            p = self.pivot,
            a = self.first,
            b = self.second
        )
    }
}

// ----- per-axis symbolic terms -----

#[derive(Debug, Clone)]
struct AxisTerms {
    /// Thrower velocity numerator; the denominator is always `t1 - t0`.
    velocity: BiPoly,
    /// Arrival time at point 2, scaled through by `t1 - t0`.
    arrival_num: BiPoly,
    arrival_den: BiPoly,
}

impl AxisTerms {
    fn new(points: &[MovingPoint; 3], axis: Axis) -> Self {
        let a = axis.index();
        let [p0, p1, p2] = points;

        let at_t0 = BiPoly::linear(p0.position[a], p0.velocity[a], BiPoly::t0());
        let at_t1 = BiPoly::linear(p1.position[a], p1.velocity[a], BiPoly::t1());
        let dt = BiPoly::t1() - BiPoly::t0();

        let velocity = &at_t1 - &at_t0;
        let arrival_num =
            (BiPoly::from_int(p2.position[a]) - &at_t0) * &dt + BiPoly::t0() * &velocity;
        let arrival_den = &velocity - &(BiPoly::from_int(p2.velocity[a]) * &dt);

        Self { velocity, arrival_num, arrival_den }
    }

    fn arrival_time(&self, t0: &BigRational, t1: &BigRational) -> Option<BigRational> {
        let den = self.arrival_den.eval(t0, t1);
        if den.is_zero() {
            return None;
        }
        Some(self.arrival_num.eval(t0, t1) / den)
    }
}

/// `t_a == t_b` with denominators cleared and the `(t1 - t0)` factor removed.
fn cross_consistency(a: &AxisTerms, b: &AxisTerms) -> Option<BiPoly> {
    let cross = &a.arrival_num * &b.arrival_den - &b.arrival_num * &a.arrival_den;
    cross.div_t1_minus_t0()
}

/// Per-axis arrival time at point 2 implied by `(t0, t1)`. An axis yields
/// `None` when the implied thrower velocity matches point 2's on that axis.
pub fn arrival_times(
    points: &[MovingPoint; 3],
    t0: &BigInt,
    t1: &BigInt,
) -> [Option<BigRational>; 3] {
    let (t0, t1) = (rational(t0), rational(t1));
    Axis::ALL.map(|axis| AxisTerms::new(points, axis).arrival_time(&t0, &t1))
}

// ----- t1 as a function of t0 -----

/// `t1 = numerator(t0) / denominator(t0)`, integer coefficients with no
/// shared factor and a positive leading denominator term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct T1Expression {
    pub numerator: Poly,
    pub denominator: Poly,
}

impl T1Expression {
    fn new(numerator: Poly, denominator: Poly) -> Self {
        let mut content = content_of(numerator.coeffs().iter().chain(denominator.coeffs()));
        if content.is_zero() {
            return Self { numerator, denominator };
        }
        if denominator.leading().is_some_and(Signed::is_negative) {
            content = -content;
        }
        let scale = content.recip();
        Self {
            numerator: numerator.scale(&scale),
            denominator: denominator.scale(&scale),
        }
    }

    pub fn eval(&self, t0: &BigInt) -> Option<BigRational> {
        let den = self.denominator.eval_int(t0);
        if den.is_zero() {
            return None;
        }
        Some(self.numerator.eval_int(t0) / den)
    }
}

impl fmt::Display for T1Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) / ({})",
            self.numerator.display("t0"),
            self.denominator.display("t0")
        )
    }
}

// ----- result -----

#[derive(Debug, Clone)]
pub struct Derivation {
    pub order: AxisOrder,
    pub t1_of_t0: T1Expression,
    /// Primitive consistency polynomial in `t0`.
    pub consistency: Poly,
    /// Every integer root of `consistency`, ascending.
    pub roots: Vec<BigInt>,
    pub t0: BigInt,
    pub t1: BigInt,
    pub t2: BigInt,
    pub thrower: Thrower,
    pub collisions: Vec<Collision>,
}

impl Derivation {
    pub fn position_sum(&self) -> i128 {
        self.thrower.position_sum()
    }
}

struct Resolved {
    t0: BigInt,
    t1: BigInt,
    t2: BigInt,
    thrower: Thrower,
    collisions: Vec<Collision>,
}

// ----- entry points -----

/// Derive the thrower from the first three moving points.
pub fn solve(points: &[MovingPoint]) -> Result<Derivation, SolveError> {
    let points = match points {
        [a, b, c, ..] => [*a, *b, *c],
        _ => return Err(SolveError::NotEnoughPoints(points.len())),
    };

    let first_err = match derive(&points, AxisOrder::XYZ) {
        Ok(derivation) => return Ok(derivation),
        Err(err) => err,
    };
    for order in &AxisOrder::ROTATIONS[1..] {
        if let Ok(derivation) = derive(&points, *order) {
            return Ok(derivation);
        }
    }
    Err(first_err)
}

/// One pass of the derivation with a fixed axis ordering.
pub fn derive(points: &[MovingPoint; 3], order: AxisOrder) -> Result<Derivation, SolveError> {
    let degenerate = |reason: &'static str| SolveError::Degenerate { order, reason };

    let terms = Axis::ALL.map(|axis| AxisTerms::new(points, axis));
    let [pivot, first, second] = [order.pivot, order.first, order.second].map(|a| &terms[a.index()]);

    // t_pivot == t_first  ->  A(t0) * t1 + B(t0) = 0
    let first_eq = cross_consistency(pivot, first)
        .ok_or_else(|| degenerate("(t1 - t0) does not divide the first consistency equation"))?;
    if first_eq.degree_t1() != Some(1) {
        return Err(degenerate("first consistency equation is not linear in t1"));
    }
    let t1_of_t0 = T1Expression::new(-first_eq.coeff_t1(0), first_eq.coeff_t1(1));

    // t_pivot == t_second with t1 = N / D  ->  P(t0) = 0
    let second_eq = cross_consistency(pivot, second)
        .ok_or_else(|| degenerate("(t1 - t0) does not divide the second consistency equation"))?;
    let consistency = second_eq
        .substitute_t1(&t1_of_t0.numerator, &t1_of_t0.denominator)
        .primitive();
    if consistency.is_zero() {
        return Err(degenerate("consistency polynomial vanishes identically"));
    }

    let roots = integer_roots(&consistency);

    let mut admissible: Vec<Resolved> = Vec::new();
    for t0 in &roots {
        let Ok(candidate) = resolve(points, order, &terms, &t1_of_t0, t0) else {
            continue;
        };
        if admissible.iter().all(|r| r.thrower != candidate.thrower) {
            admissible.push(candidate);
        }
    }

    let chosen = match admissible.len() {
        0 => return Err(SolveError::NoIntegerRoot { order, roots }),
        1 => admissible.remove(0),
        _ => {
            return Err(SolveError::AmbiguousRoots(
                admissible.into_iter().map(|r| r.t0).collect(),
            ));
        }
    };

    Ok(Derivation {
        order,
        t1_of_t0,
        consistency,
        roots,
        t0: chosen.t0,
        t1: chosen.t1,
        t2: chosen.t2,
        thrower: chosen.thrower,
        collisions: chosen.collisions,
    })
}

/// Back-substitute one integer root. Any non-integer quantity rejects it.
fn resolve(
    points: &[MovingPoint; 3],
    order: AxisOrder,
    terms: &[AxisTerms; 3],
    t1_of_t0: &T1Expression,
    t0: &BigInt,
) -> Result<Resolved, SolveError> {
    let degenerate = |reason: &'static str| SolveError::Degenerate { order, reason };

    let t1q = t1_of_t0
        .eval(t0)
        .ok_or_else(|| degenerate("t1 denominator vanishes at this root"))?;
    let t1 = exact_integer("t1", &t1q)?;
    let t0q = rational(t0);
    let dt = &t1q - &t0q;
    if dt.is_zero() {
        return Err(degenerate("collision times t0 and t1 coincide"));
    }

    let p0 = &points[0];
    let mut velocity = Vec::with_capacity(3);
    let mut position = Vec::with_capacity(3);
    for axis in Axis::ALL {
        let a = axis.index();
        let v = exact_integer("thrower velocity", &(terms[a].velocity.eval(&t0q, &t1q) / &dt))?;
        let x = BigInt::from(p0.position[a]) + t0 * (BigInt::from(p0.velocity[a]) - &v);
        velocity.push(v);
        position.push(x);
    }

    // every axis that constrains t2 must agree on it
    let times: Vec<BigRational> = terms
        .iter()
        .filter_map(|term| term.arrival_time(&t0q, &t1q))
        .collect();
    let t2q = times.first().cloned().ok_or(SolveError::MissedCollision(2))?;
    if times.iter().any(|t| *t != t2q) {
        return Err(SolveError::MissedCollision(2));
    }
    let t2 = exact_integer("t2", &t2q)?;

    let thrower = Thrower {
        position: narrow_vec("thrower position", &position)?,
        velocity: narrow_vec("thrower velocity", &velocity)?,
    };

    let collisions = thrower.collisions(points).map_err(SolveError::MissedCollision)?;
    for (hit, expected) in collisions.iter().zip([t0, &t1, &t2]) {
        if expected.to_i128() != Some(hit.time) {
            return Err(SolveError::MissedCollision(hit.index));
        }
    }

    Ok(Resolved { t0: t0.clone(), t1, t2, thrower, collisions })
}

// ----- conversions -----

fn rational(n: &BigInt) -> BigRational {
    BigRational::from_integer(n.clone())
}

pub(crate) fn exact_integer(what: &'static str, value: &BigRational) -> Result<BigInt, SolveError> {
    if value.is_integer() {
        Ok(value.to_integer())
    } else {
        Err(SolveError::NonInteger { what, value: value.clone() })
    }
}

pub(crate) fn narrow_vec(what: &'static str, v: &[BigInt]) -> Result<Vec3i, SolveError> {
    let narrow = |n: &BigInt| {
        n.to_i64()
            .ok_or_else(|| SolveError::Overflow { what, value: n.clone() })
    };
    Ok(Vector3::new(narrow(&v[0])?, narrow(&v[1])?, narrow(&v[2])?))
}
