//! Polynomials over a prime field.
//!
//! Coefficients are stored low degree first. The representation is kept
//! reduced at all times: either the vector is empty (the zero polynomial) or
//! its last coefficient is nonzero. Every constructor reduces its input, and
//! there is no raw coefficient mutation, so the invariant cannot be broken
//! from outside.

use std::fmt;

use rand::Rng;

use crate::error::DomainError;
use crate::field::Field;

#[derive(Clone)]
pub struct FieldPolynomial {
    field: Field,
    /// coeffs[i] is the coefficient of x^i; empty means zero.
    coeffs: Vec<u64>,
}

impl FieldPolynomial {
    // -- constructors --------------------------------------------------------

    pub fn zero(field: &Field) -> FieldPolynomial {
        FieldPolynomial {
            field: field.clone(),
            coeffs: Vec::new(),
        }
    }

    /// Builds a polynomial from raw coefficients, reducing each modulo the
    /// base and stripping leading zeros.
    pub fn new(field: &Field, coeffs: &[u64]) -> FieldPolynomial {
        let base = field.base();
        let mut coeffs: Vec<u64> = coeffs.iter().map(|&c| c % base).collect();
        while coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        FieldPolynomial {
            field: field.clone(),
            coeffs,
        }
    }

    pub fn constant(field: &Field, value: u64) -> FieldPolynomial {
        FieldPolynomial::new(field, &[value])
    }

    /// The monomial x.
    pub fn x(field: &Field) -> FieldPolynomial {
        FieldPolynomial::new(field, &[0, 1])
    }

    /// Random monic polynomial of the given degree with a nonzero constant
    /// term, drawn from a caller-supplied generator.
    pub fn random<R: Rng + ?Sized>(
        field: &Field,
        degree: usize,
        rng: &mut R,
    ) -> FieldPolynomial {
        let base = field.base();
        let mut coeffs = vec![0u64; degree + 1];
        coeffs[0] = rng.gen_range(1..base);
        for c in coeffs.iter_mut().take(degree).skip(1) {
            *c = rng.gen_range(0..base);
        }
        coeffs[degree] = 1;
        FieldPolynomial {
            field: field.clone(),
            coeffs,
        }
    }

    /// Internal: wraps coefficients that are already reduced.
    fn from_reduced(field: &Field, mut coeffs: Vec<u64>) -> FieldPolynomial {
        while coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        FieldPolynomial {
            field: field.clone(),
            coeffs,
        }
    }

    // -- queries -------------------------------------------------------------

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn base(&self) -> u64 {
        self.field.base()
    }

    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Coefficient of x^i, zero beyond the stored length.
    pub fn coeff(&self, i: usize) -> u64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Number of stored coefficients (degree + 1, or 0 for zero).
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Fails on the zero polynomial, whose degree is undefined.
    pub fn degree(&self) -> Result<usize, DomainError> {
        if self.coeffs.is_empty() {
            return Err(DomainError::ZeroDegree);
        }
        Ok(self.coeffs.len() - 1)
    }

    fn check_field(&self, other: &FieldPolynomial) -> Result<(), DomainError> {
        if self.field != other.field {
            return Err(DomainError::FieldMismatch(self.base(), other.base()));
        }
        Ok(())
    }

    // -- arithmetic ----------------------------------------------------------

    pub fn add(&self, other: &FieldPolynomial) -> Result<FieldPolynomial, DomainError> {
        self.check_field(other)?;
        let (long, short) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut coeffs = long.coeffs.clone();
        for (i, &c) in short.coeffs.iter().enumerate() {
            coeffs[i] = self.field.add_raw(coeffs[i], c);
        }
        Ok(FieldPolynomial::from_reduced(&self.field, coeffs))
    }

    pub fn sub(&self, other: &FieldPolynomial) -> Result<FieldPolynomial, DomainError> {
        self.check_field(other)?;
        let n = self.len().max(other.len());
        let mut coeffs = Vec::with_capacity(n);
        for i in 0..n {
            coeffs.push(self.field.sub_raw(self.coeff(i), other.coeff(i)));
        }
        Ok(FieldPolynomial::from_reduced(&self.field, coeffs))
    }

    pub fn neg(&self) -> FieldPolynomial {
        let coeffs = self.coeffs.iter().map(|&c| self.field.neg_raw(c)).collect();
        FieldPolynomial {
            field: self.field.clone(),
            coeffs,
        }
    }

    pub fn mul(&self, other: &FieldPolynomial) -> Result<FieldPolynomial, DomainError> {
        self.check_field(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(FieldPolynomial::zero(&self.field));
        }
        let mut coeffs = vec![0u64; self.len() + other.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                let t = self.field.mul_raw(a, b);
                coeffs[i + j] = self.field.add_raw(coeffs[i + j], t);
            }
        }
        Ok(FieldPolynomial::from_reduced(&self.field, coeffs))
    }

    /// Classical long division, quotient and remainder in one pass. This is
    /// the primitive every classifier leans on, so the inner loop uses the
    /// raw field ops directly.
    pub fn div_rem(
        &self,
        divisor: &FieldPolynomial,
    ) -> Result<(FieldPolynomial, FieldPolynomial), DomainError> {
        self.check_field(divisor)?;
        if divisor.is_zero() {
            return Err(DomainError::DivisionByZero);
        }
        if self.len() < divisor.len() {
            return Ok((FieldPolynomial::zero(&self.field), self.clone()));
        }
        let n = divisor.len() - 1;
        let m = self.len() - 1;
        let mut rem = self.coeffs.clone();
        let mut quot = vec![0u64; m - n + 1];
        let lead_inv = self.field.mul_inv(divisor.coeffs[n])?;
        for k in (0..=m - n).rev() {
            let q = self.field.mul_raw(rem[n + k], lead_inv);
            quot[k] = q;
            if q == 0 {
                continue;
            }
            for j in 0..n {
                let t = self.field.mul_raw(q, divisor.coeffs[j]);
                rem[j + k] = self.field.sub_raw(rem[j + k], t);
            }
        }
        rem.truncate(n);
        Ok((
            FieldPolynomial::from_reduced(&self.field, quot),
            FieldPolynomial::from_reduced(&self.field, rem),
        ))
    }

    pub fn div(&self, divisor: &FieldPolynomial) -> Result<FieldPolynomial, DomainError> {
        Ok(self.div_rem(divisor)?.0)
    }

    pub fn rem(&self, divisor: &FieldPolynomial) -> Result<FieldPolynomial, DomainError> {
        Ok(self.div_rem(divisor)?.1)
    }

    /// Multiplication by x^n.
    pub fn shl(&self, n: usize) -> FieldPolynomial {
        if self.is_zero() || n == 0 {
            return self.clone();
        }
        let mut coeffs = vec![0u64; n + self.coeffs.len()];
        coeffs[n..].copy_from_slice(&self.coeffs);
        FieldPolynomial {
            field: self.field.clone(),
            coeffs,
        }
    }

    /// Exact division by x^n; fails if any of the n lowest coefficients is
    /// nonzero.
    pub fn shr(&self, n: usize) -> Result<FieldPolynomial, DomainError> {
        if n == 0 {
            return Ok(self.clone());
        }
        if self.coeffs.iter().take(n).any(|&c| c != 0) {
            return Err(DomainError::InexactShift(n));
        }
        let coeffs = if self.coeffs.len() > n {
            self.coeffs[n..].to_vec()
        } else {
            Vec::new()
        };
        Ok(FieldPolynomial {
            field: self.field.clone(),
            coeffs,
        })
    }

    /// Scales so the leading coefficient becomes 1.
    pub fn monic(&self) -> Result<FieldPolynomial, DomainError> {
        let deg = self.degree()?;
        let lead = self.coeffs[deg];
        if lead == 1 {
            return Ok(self.clone());
        }
        let inv = self.field.mul_inv(lead)?;
        let coeffs = self
            .coeffs
            .iter()
            .map(|&c| self.field.mul_raw(c, inv))
            .collect();
        Ok(FieldPolynomial {
            field: self.field.clone(),
            coeffs,
        })
    }
}

impl PartialEq for FieldPolynomial {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.coeffs == other.coeffs
    }
}

impl Eq for FieldPolynomial {}

impl fmt::Debug for FieldPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} over GF({})", self.coeffs, self.field.base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_constructor_reduces_and_strips() {
        let field = Field::new(3).unwrap();
        let p = FieldPolynomial::new(&field, &[4, 5, 3, 0, 6]);
        assert_eq!(p.coeffs(), &[1, 2]);
        assert_eq!(p.degree().unwrap(), 1);
    }

    #[test]
    fn test_zero_degree_is_undefined() {
        let field = Field::gf2();
        let z = FieldPolynomial::zero(&field);
        assert!(z.is_zero());
        assert_eq!(z.degree().unwrap_err(), DomainError::ZeroDegree);
        assert_eq!(
            FieldPolynomial::new(&field, &[0, 0]).degree().unwrap_err(),
            DomainError::ZeroDegree
        );
    }

    #[test]
    fn test_cross_field_polynomials_fail() {
        let a = FieldPolynomial::x(&Field::new(3).unwrap());
        let b = FieldPolynomial::x(&Field::new(5).unwrap());
        let err = DomainError::FieldMismatch(3, 5);
        assert_eq!(a.add(&b).unwrap_err(), err);
        assert_eq!(a.mul(&b).unwrap_err(), err);
        assert_eq!(a.div_rem(&b).unwrap_err(), err);
    }

    #[test]
    fn test_add_sub_mul() {
        let field = Field::new(5).unwrap();
        let a = FieldPolynomial::new(&field, &[1, 2, 3]);
        let b = FieldPolynomial::new(&field, &[4, 3]);
        assert_eq!(a.add(&b).unwrap().coeffs(), &[0, 0, 3]);
        assert_eq!(a.sub(&b).unwrap().coeffs(), &[2, 4, 3]);
        // (1 + 2x + 3x^2)(4 + 3x) = 4 + 11x + 18x^2 + 9x^3
        assert_eq!(a.mul(&b).unwrap().coeffs(), &[4, 1, 3, 4]);
        assert_eq!(a.sub(&a).unwrap().coeffs(), &[] as &[u64]);
    }

    #[test]
    fn test_div_rem_known() {
        let field = Field::gf2();
        // x^4 + x + 1 divided by x^2 + x + 1
        let a = FieldPolynomial::new(&field, &[1, 1, 0, 0, 1]);
        let b = FieldPolynomial::new(&field, &[1, 1, 1]);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q.coeffs(), &[0, 1, 1]);
        assert_eq!(r.coeffs(), &[1]);
    }

    #[test]
    fn test_div_rem_property_random() {
        let mut rng = StdRng::seed_from_u64(0x7ae3);
        for &base in &[2u64, 3, 7, 13] {
            let field = Field::new(base).unwrap();
            for _ in 0..50 {
                let da = rng.gen_range(0..10usize);
                let db = rng.gen_range(0..6usize);
                let a = FieldPolynomial::random(&field, da, &mut rng);
                let b = FieldPolynomial::random(&field, db, &mut rng);
                let (q, r) = a.div_rem(&b).unwrap();
                let back = q.mul(&b).unwrap().add(&r).unwrap();
                assert_eq!(back, a, "a != q*b + r for {:?} / {:?}", a, b);
                if !r.is_zero() {
                    assert!(
                        r.degree().unwrap() < b.degree().unwrap(),
                        "remainder degree not reduced"
                    );
                }
            }
        }
    }

    #[test]
    fn test_division_by_zero_fails() {
        let field = Field::gf2();
        let a = FieldPolynomial::x(&field);
        let z = FieldPolynomial::zero(&field);
        assert_eq!(a.div_rem(&z).unwrap_err(), DomainError::DivisionByZero);
    }

    #[test]
    fn test_shifts() {
        let field = Field::new(3).unwrap();
        let p = FieldPolynomial::new(&field, &[1, 2]);
        let shifted = p.shl(2);
        assert_eq!(shifted.coeffs(), &[0, 0, 1, 2]);
        assert_eq!(shifted.shr(2).unwrap(), p);
        assert_eq!(p.shr(1).unwrap_err(), DomainError::InexactShift(1));
        assert!(FieldPolynomial::zero(&field).shr(3).unwrap().is_zero());
    }

    #[test]
    fn test_monic() {
        let field = Field::new(5).unwrap();
        let p = FieldPolynomial::new(&field, &[2, 0, 3]);
        // 3^-1 = 2 in GF(5)
        assert_eq!(p.monic().unwrap().coeffs(), &[4, 0, 1]);
    }

    #[test]
    fn test_random_is_monic_with_nonzero_constant() {
        let mut rng = StdRng::seed_from_u64(19);
        let field = Field::new(7).unwrap();
        for _ in 0..20 {
            let p = FieldPolynomial::random(&field, 5, &mut rng);
            assert_eq!(p.degree().unwrap(), 5);
            assert_eq!(p.coeff(5), 1);
            assert_ne!(p.coeff(0), 0);
        }
    }
}
