// ==============================================================================
// roots.rs — EXACT INTEGER ROOTS OF A RATIONAL POLYNOMIAL
// ------------------------------------------------------------------------------
// integer_roots(p):
// - reduces p to its square-free part  p / gcd(p, p')
// - builds the Sturm chain  s0 = p, s1 = p', s(k+1) = -rem(s(k-1), s(k))
// - bounds every real root by the Cauchy bound B = 1 + max|c_i / c_n|
// - bisects (-B-1, B] on integers; V(a) - V(b) counts the distinct real
//   roots in (a, b], so empty intervals are dropped and unit intervals (k-1, k]
//   are checked for an exact root at k
//
// Everything is exact; there is no tolerance and no root ordering to trust.
// ==============================================================================

use num::{BigInt, BigRational, Integer, One, Signed, Zero};

use super::poly::Poly;

/// All distinct integer roots of `p`, ascending. The zero polynomial and
/// constants have none.
pub fn integer_roots(p: &Poly) -> Vec<BigInt> {
    if p.degree().is_none_or(|d| d == 0) {
        return Vec::new();
    }

    let p = square_free(p);
    let chain = sturm_chain(&p);
    let bound = cauchy_bound(&p);

    let mut roots = Vec::new();
    let mut pending = vec![(-&bound - BigInt::one(), bound)];

    while let Some((lo, hi)) = pending.pop() {
        let count = sign_changes(&chain, &lo).saturating_sub(sign_changes(&chain, &hi));
        if count == 0 {
            continue;
        }

        if &hi - &lo == BigInt::one() {
            if p.eval_int(&hi).is_zero() {
                roots.push(hi);
            }
            continue;
        }

        let mid = (&lo + &hi).div_floor(&BigInt::from(2));
        pending.push((lo, mid.clone()));
        pending.push((mid, hi));
    }

    roots.sort();
    roots
}

fn square_free(p: &Poly) -> Poly {
    let g = p.gcd(&p.derivative());
    match g.degree() {
        Some(d) if d > 0 => p.div_rem(&g).map_or_else(|| p.clone(), |(q, _)| q),
        _ => p.clone(),
    }
}

fn sturm_chain(p: &Poly) -> Vec<Poly> {
    let mut chain = vec![p.clone(), p.derivative()];
    loop {
        let n = chain.len();
        let Some((_, rem)) = chain[n - 2].div_rem(&chain[n - 1]) else {
            break;
        };
        if rem.is_zero() {
            break;
        }
        chain.push(-rem);
    }
    chain
}

/// Sign changes along the chain at `x`, zeros skipped.
fn sign_changes(chain: &[Poly], x: &BigInt) -> usize {
    let x = BigRational::from_integer(x.clone());
    let signs: Vec<bool> = chain
        .iter()
        .map(|s| s.eval(&x))
        .filter(|v| !v.is_zero())
        .map(|v| v.is_negative())
        .collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Integer `B` with every real root inside `[-B, B]`.
fn cauchy_bound(p: &Poly) -> BigInt {
    let Some(lead) = p.leading() else {
        return BigInt::zero();
    };
    let max_ratio = p
        .coeffs()
        .iter()
        .map(|c| (c / lead).abs())
        .fold(BigRational::zero(), |acc, r| if r > acc { r } else { acc });
    (max_ratio + BigRational::one()).ceil().to_integer()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&x| BigInt::from(x)).collect()
    }

    fn from_roots(roots: &[i64]) -> Poly {
        roots
            .iter()
            .fold(Poly::from_int(1), |acc, &r| acc * Poly::from_ints(&[-r, 1]))
    }

    #[test]
    fn test_simple_roots() {
        // (t - 3)(t + 5)(2t - 1): the rational root 1/2 is not reported
        let p = from_roots(&[3, -5]) * Poly::from_ints(&[-1, 2]);
        assert_eq!(integer_roots(&p), ints(&[-5, 3]));
    }

    #[test]
    fn test_repeated_root_reported_once() {
        let p = from_roots(&[4, 4, -1]);
        assert_eq!(integer_roots(&p), ints(&[-1, 4]));
    }

    #[test]
    fn test_no_real_roots() {
        assert!(integer_roots(&Poly::from_ints(&[1, 0, 1])).is_empty());
        assert!(integer_roots(&Poly::from_int(7)).is_empty());
        assert!(integer_roots(&Poly::zero()).is_empty());
    }

    #[test]
    fn test_close_roots_separated() {
        let p = from_roots(&[10, 11, 12]);
        assert_eq!(integer_roots(&p), ints(&[10, 11, 12]));
    }

    #[test]
    fn test_large_root_with_rational_neighbour() {
        // (t - 696407182343)(3t + 7)
        let p = from_roots(&[696_407_182_343]) * Poly::from_ints(&[7, 3]);
        assert_eq!(integer_roots(&p), ints(&[696_407_182_343]));
    }

    #[test]
    fn test_root_at_zero_and_bound_edge() {
        let p = from_roots(&[0, -9]);
        assert_eq!(integer_roots(&p), ints(&[-9, 0]));
    }
}
