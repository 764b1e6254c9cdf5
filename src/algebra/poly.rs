// ==============================================================================
// poly.rs — EXACT UNIVARIATE POLYNOMIALS OVER THE RATIONALS
// ------------------------------------------------------------------------------
// Dense coefficient vector, lowest power first, never carries trailing zeros.
// All arithmetic is exact (BigRational), so equality is structural.
//
// Used for:
// - the coefficients of BiPoly (polynomials in t0)
// - the t1(t0) expression and the consistency polynomial in solver.rs
// - real-root isolation in roots.rs (div_rem / gcd / derivative)
// ==============================================================================

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num::{BigInt, BigRational, Integer, One, Signed, Zero};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<BigRational>,
}

impl Poly {
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn constant(c: BigRational) -> Self {
        Self::from_coeffs(vec![c])
    }

    pub fn from_int(c: i64) -> Self {
        Self::constant(BigRational::from_integer(BigInt::from(c)))
    }

    /// The polynomial `t`.
    pub fn var() -> Self {
        Self::from_coeffs(vec![BigRational::zero(), BigRational::one()])
    }

    pub fn from_coeffs(mut coeffs: Vec<BigRational>) -> Self {
        while coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Convenience for tests and fixtures: integer coefficients, lowest power first.
    pub fn from_ints(coeffs: &[i64]) -> Self {
        Self::from_coeffs(
            coeffs
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    pub fn coeff(&self, power: usize) -> BigRational {
        self.coeffs.get(power).cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    pub fn leading(&self) -> Option<&BigRational> {
        self.coeffs.last()
    }

    /// Horner evaluation.
    pub fn eval(&self, x: &BigRational) -> BigRational {
        self.coeffs
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * x + c)
    }

    pub fn eval_int(&self, x: &BigInt) -> BigRational {
        self.eval(&BigRational::from_integer(x.clone()))
    }

    pub fn scale(&self, s: &BigRational) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|c| c * s).collect())
    }

    pub fn derivative(&self) -> Self {
        Self::from_coeffs(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * BigRational::from_integer(BigInt::from(i)))
                .collect(),
        )
    }

    /// Long division. Returns `None` when dividing by the zero polynomial.
    pub fn div_rem(&self, divisor: &Poly) -> Option<(Poly, Poly)> {
        let lead = divisor.leading()?;
        let d = divisor.coeffs.len();

        let mut rem = self.coeffs.clone();
        if rem.len() < d {
            return Some((Poly::zero(), self.clone()));
        }

        let mut quot = vec![BigRational::zero(); rem.len() - d + 1];
        for k in (0..quot.len()).rev() {
            let c = &rem[k + d - 1] / lead;
            if c.is_zero() {
                continue;
            }
            for (i, dc) in divisor.coeffs.iter().enumerate() {
                rem[k + i] -= &c * dc;
            }
            quot[k] = c;
        }

        Some((Poly::from_coeffs(quot), Poly::from_coeffs(rem)))
    }

    /// Leading coefficient scaled to one. The zero polynomial stays zero.
    pub fn monic(&self) -> Self {
        match self.leading() {
            Some(lead) => self.scale(&lead.recip()),
            None => Poly::zero(),
        }
    }

    /// Monic greatest common divisor (Euclid).
    pub fn gcd(&self, other: &Poly) -> Self {
        let (mut a, mut b) = (self.clone(), other.clone());
        while let Some((_, r)) = a.div_rem(&b) {
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Positive rational `c` such that `self / c` has coprime integer
    /// coefficients. Zero for the zero polynomial.
    pub fn content(&self) -> BigRational {
        content_of(self.coeffs.iter())
    }

    /// Integer coefficients with no common factor and a positive leading term.
    pub fn primitive(&self) -> Self {
        let content = self.content();
        if content.is_zero() {
            return Poly::zero();
        }
        let p = self.scale(&content.recip());
        if p.leading().is_some_and(Signed::is_negative) { -p } else { p }
    }

    pub fn display<'a>(&'a self, var: &'a str) -> PolyDisplay<'a> {
        PolyDisplay { poly: self, var }
    }
}

/// Shared content of an arbitrary set of rational coefficients:
/// gcd of the numerators over lcm of the denominators.
pub fn content_of<'a>(coeffs: impl Iterator<Item = &'a BigRational>) -> BigRational {
    let (num, den) = coeffs
        .filter(|c| !c.is_zero())
        .fold((BigInt::zero(), BigInt::one()), |(n, d), c| {
            (n.gcd(c.numer()), d.lcm(c.denom()))
        });
    BigRational::new(num, den)
}

// ----- arithmetic -----

impl Add<&Poly> for &Poly {
    type Output = Poly;

    fn add(self, rhs: &Poly) -> Poly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        Poly::from_coeffs((0..n).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl Sub<&Poly> for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        Poly::from_coeffs((0..n).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl Mul<&Poly> for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        if self.is_zero() || rhs.is_zero() {
            return Poly::zero();
        }
        let mut out = vec![BigRational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Poly::from_coeffs(out)
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly::from_coeffs(self.coeffs.iter().map(|c| -c).collect())
    }
}

impl Neg for Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        -&self
    }
}

macro_rules! forward_owned_binop {
    ($ty:ty, $tr:ident, $method:ident) => {
        impl $tr<$ty> for $ty {
            type Output = $ty;

            fn $method(self, rhs: $ty) -> $ty {
                (&self).$method(&rhs)
            }
        }

        impl $tr<&$ty> for $ty {
            type Output = $ty;

            fn $method(self, rhs: &$ty) -> $ty {
                (&self).$method(rhs)
            }
        }
    };
}

pub(crate) use forward_owned_binop;

forward_owned_binop!(Poly, Add, add);
forward_owned_binop!(Poly, Sub, sub);
forward_owned_binop!(Poly, Mul, mul);

// ----- display -----

pub struct PolyDisplay<'a> {
    poly: &'a Poly,
    var: &'a str,
}

impl fmt::Display for PolyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.poly.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (power, c) in self.poly.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }

            let sign = match (first, c.is_negative()) {
                (true, true) => "-",
                (true, false) => "",
                (false, true) => " - ",
                (false, false) => " + ",
            };
            write!(f, "{sign}")?;
            first = false;

            let mag = c.abs();
            if power == 0 {
                write!(f, "{mag}")?;
                continue;
            }
            if !mag.is_one() {
                if mag.is_integer() {
                    write!(f, "{mag}*")?;
                } else {
                    write!(f, "({mag})*")?;
                }
            }
            write!(f, "{}", self.var)?;
            if power > 1 {
                write!(f, "^{power}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display("t"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        let p = Poly::from_ints(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), Some(1));
        assert_eq!(Poly::from_ints(&[0, 0]).degree(), None);
        assert!(Poly::from_ints(&[0]).is_zero());
    }

    #[test]
    fn test_eval_horner() {
        // 3t^2 - 2t + 5 at t = 4
        let p = Poly::from_ints(&[5, -2, 3]);
        assert_eq!(p.eval_int(&BigInt::from(4)), q(45, 1));
        assert_eq!(p.eval(&q(1, 2)), q(19, 4));
    }

    #[test]
    fn test_mul_and_sub() {
        let a = Poly::from_ints(&[-1, 1]); // t - 1
        let b = Poly::from_ints(&[1, 1]); // t + 1
        assert_eq!(&a * &b, Poly::from_ints(&[-1, 0, 1]));
        assert_eq!(&a - &a, Poly::zero());
        assert_eq!(a.clone() + b.clone(), Poly::from_ints(&[0, 2]));
    }

    #[test]
    fn test_div_rem_exact_and_remainder() {
        let p = Poly::from_ints(&[-6, 11, -6, 1]); // (t-1)(t-2)(t-3)
        let (quot, rem) = p.div_rem(&Poly::from_ints(&[-2, 1])).unwrap();
        assert_eq!(quot, Poly::from_ints(&[3, -4, 1]));
        assert!(rem.is_zero());

        let (quot, rem) = Poly::from_ints(&[1, 0, 1])
            .div_rem(&Poly::from_ints(&[0, 2]))
            .unwrap();
        assert_eq!(quot, Poly::from_coeffs(vec![q(0, 1), q(1, 2)]));
        assert_eq!(rem, Poly::from_ints(&[1]));

        assert!(p.div_rem(&Poly::zero()).is_none());
    }

    #[test]
    fn test_gcd_is_monic() {
        let a = Poly::from_ints(&[-2, 0, 2]); // 2(t-1)(t+1)
        let b = Poly::from_ints(&[-3, 3]); // 3(t-1)
        assert_eq!(a.gcd(&b), Poly::from_ints(&[-1, 1]));
    }

    #[test]
    fn test_derivative() {
        let p = Poly::from_ints(&[7, 3, 0, 2]);
        assert_eq!(p.derivative(), Poly::from_ints(&[3, 0, 6]));
        assert!(Poly::from_int(9).derivative().is_zero());
    }

    #[test]
    fn test_primitive_strips_content_and_sign() {
        let p = Poly::from_ints(&[12, -8, -4]);
        assert_eq!(p.content(), q(4, 1));
        assert_eq!(p.primitive(), Poly::from_ints(&[-3, 2, 1]));

        let half = Poly::from_coeffs(vec![q(1, 2), q(3, 4)]);
        assert_eq!(half.primitive(), Poly::from_ints(&[2, 3]));
    }

    #[test]
    fn test_display() {
        let p = Poly::from_ints(&[-7, 1, 0, -3]);
        assert_eq!(p.display("t0").to_string(), "-3*t0^3 + t0 - 7");
        assert_eq!(Poly::zero().to_string(), "0");
        assert_eq!(Poly::from_coeffs(vec![q(0, 1), q(-1, 2)]).to_string(), "-(1/2)*t");
    }
}
