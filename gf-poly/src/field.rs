//! Prime fields GF(p) for word-size p, and their elements.
//!
//! A `Field` is a cheaply clonable handle to an immutable descriptor holding
//! the base and a precomputed inverse table, so every element and polynomial
//! bound to the same field shares one table and the field always outlives its
//! users. Two handles compare equal whenever their bases match.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::error::DomainError;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

struct FieldInner {
    base: u64,
    /// inv[v] is the multiplicative inverse of v; inv[0] is unused.
    inv: Vec<u64>,
}

/// A prime field GF(p) with p fitting in one machine word.
#[derive(Clone)]
pub struct Field(Arc<FieldInner>);

impl Field {
    /// Constructs GF(base), eagerly tabulating all inverses.
    ///
    /// Primality is not tested up front: the inverse table is built with the
    /// extended Euclidean algorithm, and any residue sharing a factor with
    /// the base surfaces as a gcd greater than one, which means the base is
    /// composite.
    pub fn new(base: u64) -> Result<Field, DomainError> {
        if base < 2 {
            return Err(DomainError::TrivialField(base));
        }
        // Products of reduced operands must not wrap.
        if (base - 1).checked_mul(base - 1).is_none() {
            return Err(DomainError::FieldTooLarge(base));
        }

        let mut inv = vec![0u64; base as usize];
        inv[1] = 1;
        for v in 2..base {
            if inv[v as usize] != 0 {
                continue;
            }
            // Extended Euclid for v^-1 mod base; u0 tracks the Bezout
            // coefficient of v.
            let (mut r0, mut r1) = (v as i128, base as i128);
            let (mut u0, mut u1) = (1i128, 0i128);
            while r1 != 0 {
                let q = r0 / r1;
                let r2 = r0 - q * r1;
                r0 = r1;
                r1 = r2;
                let u2 = u0 - q * u1;
                u0 = u1;
                u1 = u2;
            }
            if r0 != 1 {
                return Err(DomainError::NotPrime(base));
            }
            let vi = u0.rem_euclid(base as i128) as u64;
            // Each solved pair fills two slots.
            inv[v as usize] = vi;
            inv[vi as usize] = v;
        }

        Ok(Field(Arc::new(FieldInner { base, inv })))
    }

    /// The two-element field; cannot fail, used as the default base for net
    /// construction.
    pub fn gf2() -> Field {
        Field(Arc::new(FieldInner {
            base: 2,
            inv: vec![0, 1],
        }))
    }

    pub fn base(&self) -> u64 {
        self.0.base
    }

    /// Table lookup; only zero has no inverse.
    pub fn mul_inv(&self, value: u64) -> Result<u64, DomainError> {
        let value = value % self.0.base;
        if value == 0 {
            return Err(DomainError::NoInverse(self.0.base));
        }
        Ok(self.0.inv[value as usize])
    }

    // -- trusted fast path ---------------------------------------------------
    //
    // Raw modular arithmetic on already-reduced operands. These skip the
    // field-membership checks that `FieldElement` performs and exist for the
    // inner loops of polynomial division and matrix reduction.

    /// `a + b` for reduced operands.
    #[inline]
    pub fn add_raw(&self, a: u64, b: u64) -> u64 {
        let s = a + b;
        if s >= self.0.base {
            s - self.0.base
        } else {
            s
        }
    }

    /// `a - b` for reduced operands.
    #[inline]
    pub fn sub_raw(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a + self.0.base - b
        }
    }

    /// `a * b` for reduced operands.
    #[inline]
    pub fn mul_raw(&self, a: u64, b: u64) -> u64 {
        a * b % self.0.base
    }

    /// `-a` for a reduced operand.
    #[inline]
    pub fn neg_raw(&self, a: u64) -> u64 {
        if a == 0 {
            0
        } else {
            self.0.base - a
        }
    }

    /// `a / b` for reduced operands; fails only on a zero divisor.
    #[inline]
    pub fn div_raw(&self, a: u64, b: u64) -> Result<u64, DomainError> {
        if b == 0 {
            return Err(DomainError::DivisionByZero);
        }
        Ok(self.mul_raw(a, self.0.inv[b as usize]))
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.0.base == other.0.base
    }
}

impl Eq for Field {}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.0.base)
    }
}

// ---------------------------------------------------------------------------
// FieldElement
// ---------------------------------------------------------------------------

/// A value of GF(p), always stored reduced.
///
/// Binary operations are checked: combining elements of different fields
/// fails with [`DomainError::FieldMismatch`]. Hot loops that have already
/// established a common field should use the raw ops on [`Field`] instead.
#[derive(Clone)]
pub struct FieldElement {
    field: Field,
    value: u64,
}

impl FieldElement {
    pub fn new(field: &Field, value: u64) -> FieldElement {
        FieldElement {
            field: field.clone(),
            value: value % field.base(),
        }
    }

    /// Uniformly random element, with the generator supplied by the caller.
    pub fn random<R: Rng + ?Sized>(field: &Field, rng: &mut R) -> FieldElement {
        let value = rng.gen_range(0..field.base());
        FieldElement {
            field: field.clone(),
            value,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn base(&self) -> u64 {
        self.field.base()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    fn check_field(&self, other: &FieldElement) -> Result<(), DomainError> {
        if self.field != other.field {
            return Err(DomainError::FieldMismatch(self.base(), other.base()));
        }
        Ok(())
    }

    pub fn add(&self, other: &FieldElement) -> Result<FieldElement, DomainError> {
        self.check_field(other)?;
        Ok(FieldElement {
            field: self.field.clone(),
            value: self.field.add_raw(self.value, other.value),
        })
    }

    pub fn sub(&self, other: &FieldElement) -> Result<FieldElement, DomainError> {
        self.check_field(other)?;
        Ok(FieldElement {
            field: self.field.clone(),
            value: self.field.sub_raw(self.value, other.value),
        })
    }

    pub fn mul(&self, other: &FieldElement) -> Result<FieldElement, DomainError> {
        self.check_field(other)?;
        Ok(FieldElement {
            field: self.field.clone(),
            value: self.field.mul_raw(self.value, other.value),
        })
    }

    pub fn div(&self, other: &FieldElement) -> Result<FieldElement, DomainError> {
        self.check_field(other)?;
        Ok(FieldElement {
            field: self.field.clone(),
            value: self.field.div_raw(self.value, other.value)?,
        })
    }

    pub fn neg(&self) -> FieldElement {
        FieldElement {
            field: self.field.clone(),
            value: self.field.neg_raw(self.value),
        }
    }

    pub fn mul_inv(&self) -> Result<FieldElement, DomainError> {
        Ok(FieldElement {
            field: self.field.clone(),
            value: self.field.mul_inv(self.value)?,
        })
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.value == other.value
    }
}

impl Eq for FieldElement {}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mod {}", self.value, self.field.base())
    }
}
