// ==============================================================================
// linear.rs — LINEAR CROSS-CHECK OF THE THROWER (EXACT GAUSS-JORDAN)
// ------------------------------------------------------------------------------
// A thrower (p, v) meets point k iff (p - p_k) and (v - v_k) are parallel:
//
//     (p - p_k) x (v - v_k) = 0
//
// The bilinear term p x v is shared by every k, so subtracting the k = 0
// equation leaves three linear equations per extra point:
//
//     p x (v_k - v_0) + (p_k - p_0) x v = p_k x v_k - p_0 x v_0
//
// Points 1 and 2 give a 6x6 system in (p_x, p_y, p_z, v_x, v_y, v_z), solved
// here over the rationals. This is independent of solver.rs and is only used
// to confirm its result.
// ==============================================================================

use num::{BigInt, BigRational, Zero};

use crate::error::SolveError;
use crate::hail::{MovingPoint, Thrower, Vec3i, Vec3w, widen};
use crate::solver::{exact_integer, narrow_vec};

const UNKNOWNS: usize = 6;

/// Cross-product matrix: `skew(a) * b == a x b`.
fn skew(a: &Vec3w) -> [[i128; 3]; 3] {
    [
        [0, -a.z, a.y],
        [a.z, 0, -a.x],
        [-a.y, a.x, 0],
    ]
}

fn q(n: i128) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// `a x b` without a fixed-width intermediate.
fn big_cross(a: &Vec3i, b: &Vec3i) -> [BigInt; 3] {
    let [a, b] = [a, b].map(|v| v.map(BigInt::from));
    [
        &a.y * &b.z - &a.z * &b.y,
        &a.z * &b.x - &a.x * &b.z,
        &a.x * &b.y - &a.y * &b.x,
    ]
}

/// Three augmented rows `[p | v | rhs]` relating point `k` to point 0.
fn equations(p0: &MovingPoint, pk: &MovingPoint) -> Vec<Vec<BigRational>> {
    // differences of two i64 always fit in i128
    let w = skew(&(widen(&pk.velocity) - widen(&p0.velocity)));
    let dp = skew(&(widen(&pk.position) - widen(&p0.position)));
    let xk_vk = big_cross(&pk.position, &pk.velocity);
    let x0_v0 = big_cross(&p0.position, &p0.velocity);

    (0..3)
        .map(|r| {
            let mut row = Vec::with_capacity(UNKNOWNS + 1);
            // p x w == -skew(w) * p
            row.extend(w[r].iter().map(|&c| q(-c)));
            row.extend(dp[r].iter().map(|&c| q(c)));
            row.push(BigRational::from_integer(&xk_vk[r] - &x0_v0[r]));
            row
        })
        .collect()
}

/// Reduced row echelon form over an augmented square system; returns the
/// solution column.
fn gauss_jordan(mut rows: Vec<Vec<BigRational>>) -> Result<Vec<BigRational>, SolveError> {
    let n = rows.len();
    for col in 0..n {
        let pivot = (col..n)
            .find(|&r| !rows[r][col].is_zero())
            .ok_or(SolveError::Singular)?;
        rows.swap(col, pivot);

        let lead = rows[col][col].clone();
        for x in rows[col].iter_mut() {
            *x = &*x / &lead;
        }

        let pivot_row = rows[col].clone();
        for (r, row) in rows.iter_mut().enumerate() {
            if r == col || row[col].is_zero() {
                continue;
            }
            let f = row[col].clone();
            for (x, p) in row.iter_mut().zip(&pivot_row) {
                *x -= &f * p;
            }
        }
    }

    Ok(rows.into_iter().map(|row| row[n].clone()).collect())
}

/// Solve for the thrower from the first three points via the linear system.
pub fn solve_linear(points: &[MovingPoint]) -> Result<Thrower, SolveError> {
    let [p0, p1, p2, ..] = points else {
        return Err(SolveError::NotEnoughPoints(points.len()));
    };

    let mut rows = equations(p0, p1);
    rows.extend(equations(p0, p2));
    let solution = gauss_jordan(rows)?;

    let ints = solution
        .iter()
        .map(|x| exact_integer("linear thrower coordinate", x))
        .collect::<Result<Vec<_>, _>>()?;

    let thrower = Thrower {
        position: narrow_vec("thrower position", &ints[..3])?,
        velocity: narrow_vec("thrower velocity", &ints[3..])?,
    };

    thrower.collisions(&points[..3]).map_err(SolveError::MissedCollision)?;

    Ok(thrower)
}

/// Fails unless the linear system reproduces `thrower`.
pub fn cross_check(thrower: &Thrower, points: &[MovingPoint]) -> Result<(), SolveError> {
    let linear = solve_linear(points)?;
    if linear != *thrower {
        return Err(SolveError::CrossCheckMismatch { solver: *thrower, linear });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hail::worked_instance;
    use crate::solver::solve;
    use nalgebra::Vector3;

    #[test]
    fn test_skew_matches_cross() {
        let a = Vector3::new(2_i128, -3, 5);
        let b = Vector3::new(7_i128, 11, -13);
        let m = skew(&a);
        let prod: Vec<i128> = (0..3)
            .map(|r| (0..3).map(|c| m[r][c] * b[c]).sum())
            .collect();
        let cross = a.cross(&b);
        assert_eq!(prod, vec![cross.x, cross.y, cross.z]);
    }

    #[test]
    fn test_rhs_beyond_i128() {
        let p0 = MovingPoint::new([i64::MAX, i64::MIN, i64::MAX], [i64::MIN, i64::MAX, i64::MAX]);
        let pk = MovingPoint::new([0, i64::MAX, i64::MIN], [0, i64::MAX, i64::MAX]);
        let rows = equations(&p0, &pk);

        // x component: MAX * (2^64 - 1) - (-MAX * (2^64 - 1))
        let max = BigInt::from(i64::MAX);
        let span = BigInt::from(u64::MAX);
        assert_eq!(rows[0][UNKNOWNS], BigRational::from_integer(max * span * 2));
    }

    #[test]
    fn test_worked_instance_linear() {
        let thrower = solve_linear(&worked_instance()).unwrap();
        assert_eq!(thrower.velocity, Vector3::new(192, 210, 179));
        assert_eq!(thrower.position_sum(), 540_355_811_503_157);
    }

    #[test]
    fn test_agrees_with_collision_solver() {
        let points = worked_instance();
        let derivation = solve(&points).unwrap();
        assert!(cross_check(&derivation.thrower, &points).is_ok());
    }

    #[test]
    fn test_mismatch_reported() {
        let points = worked_instance();
        let mut wrong = solve(&points).unwrap().thrower;
        wrong.position.x += 1;
        assert!(matches!(
            cross_check(&wrong, &points),
            Err(SolveError::CrossCheckMismatch { .. })
        ));
    }

    #[test]
    fn test_parallel_points_singular() {
        let points = [
            MovingPoint::new([0, 0, 0], [1, 0, 0]),
            MovingPoint::new([0, 5, 0], [1, 0, 0]),
            MovingPoint::new([0, 0, 7], [1, 0, 0]),
        ];
        assert!(matches!(solve_linear(&points), Err(SolveError::Singular)));
    }
}
