// ==============================================================================
// crossing.rs — FORWARD PATH CROSSINGS IN THE XY PLANE
// ------------------------------------------------------------------------------
// For every unordered pair (a, b), ignoring z:
//
//     a.xy + s * a.dxy = b.xy + t * b.dxy
//
// Cramer's rule with D = db.x * da.y - da.x * db.y (D == 0: parallel, never
// counted). The pair counts when both s >= 0 and t >= 0 (the crossing is not
// in either point's past) and the crossing lies inside the inclusive square
// [min, max] x [min, max]. Exact rationals throughout.
// ==============================================================================

use num::{BigInt, BigRational, Signed, Zero};

use crate::hail::MovingPoint;

/// Test area used when none is configured: `[min, max]` on both axes.
pub const DEFAULT_TEST_AREA: [i64; 2] = [200_000_000_000_000, 400_000_000_000_000];

fn q(n: BigInt) -> BigRational {
    BigRational::from_integer(n)
}

/// XY crossing point of two paths, if both reach it at non-negative time.
pub fn forward_crossing(a: &MovingPoint, b: &MovingPoint) -> Option<(BigRational, BigRational)> {
    let big = |n: i64| BigInt::from(n);
    let (x0, y0) = (big(a.position.x), big(a.position.y));
    let (dx0, dy0) = (big(a.velocity.x), big(a.velocity.y));
    let (x1, y1) = (big(b.position.x), big(b.position.y));
    let (dx1, dy1) = (big(b.velocity.x), big(b.velocity.y));

    let det = &dx1 * &dy0 - &dx0 * &dy1;
    if det.is_zero() {
        return None;
    }

    let (gx, gy) = (x1 - &x0, y1 - &y0);
    let s = q(&dx1 * &gy - &dy1 * &gx) / q(det.clone());
    let t = q(&dx0 * &gy - &dy0 * &gx) / q(det);
    if s.is_negative() || t.is_negative() {
        return None;
    }

    Some((q(x0) + &s * q(dx0), q(y0) + &s * q(dy0)))
}

/// Unordered pairs whose forward XY paths cross inside the test area.
pub fn count_crossings(points: &[MovingPoint], [min, max]: [i64; 2]) -> usize {
    let (min, max) = (q(BigInt::from(min)), q(BigInt::from(max)));
    let inside = |v: &BigRational| *v >= min && *v <= max;

    points
        .iter()
        .enumerate()
        .flat_map(|(i, a)| points[..i].iter().map(move |b| (a, b)))
        .filter_map(|(a, b)| forward_crossing(a, b))
        .filter(|(x, y)| inside(x) && inside(y))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_points() -> Vec<MovingPoint> {
        vec![
            MovingPoint::new([19, 13, 30], [-2, 1, -2]),
            MovingPoint::new([18, 19, 22], [-1, -1, -2]),
            MovingPoint::new([20, 25, 34], [-2, -2, -4]),
            MovingPoint::new([12, 31, 28], [-1, -2, -1]),
            MovingPoint::new([20, 19, 15], [1, -5, -3]),
        ]
    }

    fn frac(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_example_count() {
        assert_eq!(count_crossings(&example_points(), [7, 27]), 2);
    }

    #[test]
    fn test_crossing_point_exact() {
        let p = example_points();
        // 19, 13 @ -2, 1  and  18, 19 @ -1, -1 cross at (14.333, 15.333)
        assert_eq!(forward_crossing(&p[0], &p[1]), Some((frac(43, 3), frac(46, 3))));
    }

    #[test]
    fn test_parallel_never_crosses() {
        let p = example_points();
        // 18, 19 @ -1, -1  and  20, 25 @ -2, -2
        assert_eq!(forward_crossing(&p[1], &p[2]), None);
    }

    #[test]
    fn test_crossing_in_the_past_ignored() {
        let p = example_points();
        // 19, 13 @ -2, 1  and  20, 19 @ 1, -5: crossed in the past for the first
        assert_eq!(forward_crossing(&p[0], &p[4]), None);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let a = MovingPoint::new([i64::MIN, i64::MIN, 0], [1, 1, 0]);
        let b = MovingPoint::new([i64::MAX, i64::MAX, 0], [i64::MIN, i64::MAX, 0]);
        // a reaches b's start after 2^64 - 1 steps
        let corner = frac(i64::MAX, 1);
        assert_eq!(forward_crossing(&a, &b), Some((corner.clone(), corner)));
        assert_eq!(count_crossings(&[a, b], [i64::MIN, i64::MAX]), 1);
    }

    #[test]
    fn test_empty_area_counts_nothing() {
        assert_eq!(count_crossings(&example_points(), [100, 200]), 0);
        assert_eq!(count_crossings(&[], DEFAULT_TEST_AREA), 0);
    }
}
