//! Polynomials in the two collision times: a polynomial in `t1` whose
//! coefficients are polynomials in `t0`.

use std::ops::{Add, Mul, Neg, Sub};

use num::{BigRational, Zero};

use super::poly::{Poly, forward_owned_binop};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BiPoly {
    /// `terms[j]` multiplies `t1^j`.
    terms: Vec<Poly>,
}

impl BiPoly {
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn from_terms(mut terms: Vec<Poly>) -> Self {
        while terms.last().is_some_and(Poly::is_zero) {
            terms.pop();
        }
        Self { terms }
    }

    pub fn from_int(c: i64) -> Self {
        Self::from_t0(Poly::from_int(c))
    }

    pub fn from_t0(p: Poly) -> Self {
        Self::from_terms(vec![p])
    }

    pub fn t0() -> Self {
        Self::from_t0(Poly::var())
    }

    pub fn t1() -> Self {
        Self::from_terms(vec![Poly::zero(), Poly::from_int(1)])
    }

    /// `c + rate * t`, with `t` one of the time variables. The position of a
    /// moving point along one axis.
    pub fn linear(c: i64, rate: i64, t: BiPoly) -> Self {
        Self::from_int(c) + Self::from_int(rate) * t
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn degree_t1(&self) -> Option<usize> {
        self.terms.len().checked_sub(1)
    }

    pub fn coeff_t1(&self, power: usize) -> Poly {
        self.terms.get(power).cloned().unwrap_or_default()
    }

    pub fn eval(&self, t0: &BigRational, t1: &BigRational) -> BigRational {
        self.terms
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * t1 + c.eval(t0))
    }

    /// Substitute `t1 = num / den` and clear the denominator:
    /// `sum_j c_j(t0) * num^j * den^(n - j)` where `n` is the degree in `t1`.
    pub fn substitute_t1(&self, num: &Poly, den: &Poly) -> Poly {
        let Some(n) = self.degree_t1() else {
            return Poly::zero();
        };

        let mut num_pow = vec![Poly::from_int(1)];
        let mut den_pow = vec![Poly::from_int(1)];
        for _ in 0..n {
            num_pow.push(num_pow[num_pow.len() - 1].clone() * num);
            den_pow.push(den_pow[den_pow.len() - 1].clone() * den);
        }

        self.terms
            .iter()
            .enumerate()
            .fold(Poly::zero(), |acc, (j, c)| {
                acc + c * &num_pow[j] * &den_pow[n - j]
            })
    }

    /// Exact division by `(t1 - t0)`, treating the divisor as monic in `t1`
    /// over the ring of polynomials in `t0` (synthetic division with root
    /// `t0`). `None` when `(t1 - t0)` does not divide `self`.
    pub fn div_t1_minus_t0(&self) -> Option<BiPoly> {
        let Some(n) = self.degree_t1() else {
            return Some(BiPoly::zero());
        };
        if n == 0 {
            return None;
        }

        let root = Poly::var();
        let mut quot = vec![Poly::zero(); n];
        quot[n - 1] = self.terms[n].clone();
        for k in (1..n).rev() {
            quot[k - 1] = &self.terms[k] + &(&root * &quot[k]);
        }

        let rem = &self.terms[0] + &(&root * &quot[0]);
        rem.is_zero().then(|| BiPoly::from_terms(quot))
    }
}

impl Add<&BiPoly> for &BiPoly {
    type Output = BiPoly;

    fn add(self, rhs: &BiPoly) -> BiPoly {
        let n = self.terms.len().max(rhs.terms.len());
        BiPoly::from_terms((0..n).map(|j| self.coeff_t1(j) + rhs.coeff_t1(j)).collect())
    }
}

impl Sub<&BiPoly> for &BiPoly {
    type Output = BiPoly;

    fn sub(self, rhs: &BiPoly) -> BiPoly {
        let n = self.terms.len().max(rhs.terms.len());
        BiPoly::from_terms((0..n).map(|j| self.coeff_t1(j) - rhs.coeff_t1(j)).collect())
    }
}

impl Mul<&BiPoly> for &BiPoly {
    type Output = BiPoly;

    fn mul(self, rhs: &BiPoly) -> BiPoly {
        if self.is_zero() || rhs.is_zero() {
            return BiPoly::zero();
        }
        let mut out = vec![Poly::zero(); self.terms.len() + rhs.terms.len() - 1];
        for (i, a) in self.terms.iter().enumerate() {
            for (j, b) in rhs.terms.iter().enumerate() {
                out[i + j] = &out[i + j] + &(a * b);
            }
        }
        BiPoly::from_terms(out)
    }
}

impl Neg for &BiPoly {
    type Output = BiPoly;

    fn neg(self) -> BiPoly {
        BiPoly::from_terms(self.terms.iter().map(|c| -c).collect())
    }
}

forward_owned_binop!(BiPoly, Add, add);
forward_owned_binop!(BiPoly, Sub, sub);
forward_owned_binop!(BiPoly, Mul, mul);
