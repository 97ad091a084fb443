//! Irreducibility and primitivity tests for prime-field polynomials.
//!
//! Three independent irreducibility criteria are provided (Berlekamp, Rabin,
//! Ben-Or) plus a by-definition primitivity test. Berlekamp wins on GF(2) and
//! Ben-Or on larger bases, which is what [`is_irreducible`] dispatches to.

use crate::error::DomainError;
use crate::poly::FieldPolynomial;

// ---------------------------------------------------------------------------
// shared helpers
// ---------------------------------------------------------------------------

/// Formal derivative.
pub fn derivative(poly: &FieldPolynomial) -> FieldPolynomial {
    let field = poly.field();
    let coeffs: Vec<u64> = poly
        .coeffs()
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, &c)| field.mul_raw(c, i as u64 % field.base()))
        .collect();
    FieldPolynomial::new(field, &coeffs)
}

/// Euclidean gcd; undefined when either argument is zero.
pub fn gcd(
    a: &FieldPolynomial,
    b: &FieldPolynomial,
) -> Result<FieldPolynomial, DomainError> {
    if a.is_zero() || b.is_zero() {
        return Err(DomainError::GcdOfZero);
    }
    let (mut m, mut n) = if a.degree()? >= b.degree()? {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    };
    while !n.is_zero() {
        let r = m.rem(&n)?;
        m = n;
        n = r;
    }
    Ok(m)
}

/// x^pow mod `modulus` without ever materializing x^pow.
///
/// The running remainder is repeatedly padded up to deg(modulus) and reduced.
/// Whenever the remainder comes back to exactly x^deg the reduction sequence
/// has closed a cycle: the first occurrence records the exponent still
/// outstanding, the second derives the cycle length and folds the remaining
/// exponent modulo it, so the cost is bounded by the cycle length instead of
/// pow.
pub fn x_pow_mod(
    mut pow: u128,
    modulus: &FieldPolynomial,
) -> Result<FieldPolynomial, DomainError> {
    let n = modulus.degree()? as u128;
    let field = modulus.field().clone();
    let xn = FieldPolynomial::constant(&field, 1).shl(n as usize);
    let mut res = FieldPolynomial::constant(&field, 1);
    let mut reset_at: u128 = 0;
    loop {
        let m = res.degree()? as u128;
        if pow + m < n {
            break;
        }
        let step = n - m;
        pow -= step;
        res = res.shl(step as usize);
        if res == xn {
            if reset_at == 0 {
                reset_at = pow;
            } else {
                let cycle = reset_at - pow;
                pow %= cycle;
                reset_at = 0;
            }
        }
        res = res.rem(modulus)?;
    }
    Ok(res.shl(pow as usize))
}

/// base^exp in u128; callers keep exponents within word-size-field bounds.
fn pow_u128(base: u128, exp: u128) -> u128 {
    let mut acc: u128 = 1;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            acc = acc.wrapping_mul(b);
        }
        b = b.wrapping_mul(b);
        e >>= 1;
    }
    acc
}

/// v^exp mod m for word-size m.
fn pow_mod(value: u64, exp: u64, modulus: u64) -> u64 {
    let mut acc: u128 = 1;
    let mut b = value as u128 % modulus as u128;
    let mut e = exp;
    let m = modulus as u128;
    while e > 0 {
        if e & 1 == 1 {
            acc = acc * b % m;
        }
        b = b * b % m;
        e >>= 1;
    }
    acc as u64
}

/// Distinct prime factors of n, ascending, by trial division.
fn distinct_prime_factors(mut n: u128) -> Vec<u128> {
    let mut factors = Vec::new();
    let mut d: u128 = 2;
    while d * d <= n {
        if n % d == 0 {
            factors.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Common degenerate-case screen shared by every classifier. Returns
/// `Some(answer)` when the question is already settled: the zero polynomial
/// and constants are not irreducible, degree one always is, and a zero
/// constant term means x divides the polynomial.
fn screen(poly: &FieldPolynomial) -> Option<bool> {
    if poly.is_zero() || poly.len() == 1 {
        return Some(false);
    }
    if poly.len() == 2 {
        return Some(true);
    }
    if poly.coeff(0) == 0 {
        return Some(false);
    }
    None
}

// ---------------------------------------------------------------------------
// irreducibility
// ---------------------------------------------------------------------------

/// Berlekamp's criterion: square-free check through the derivative, then
/// rank(B - I) == deg - 1 where row i of B is x^(i * base) mod poly.
pub fn is_irreducible_berlekamp(poly: &FieldPolynomial) -> Result<bool, DomainError> {
    if let Some(answer) = screen(poly) {
        return Ok(answer);
    }
    let d = derivative(poly);
    if d.is_zero() {
        return Ok(false);
    }
    if gcd(poly, &d)?.degree()? != 0 {
        return Ok(false);
    }
    let n = poly.degree()?;
    Ok(berlekamp_rank(poly)? == n - 1)
}

/// Row-echelon rank of B - I over the polynomial's field, with pivot
/// swapping. Works on a raw matrix through the field's fast path.
fn berlekamp_rank(poly: &FieldPolynomial) -> Result<usize, DomainError> {
    let n = poly.degree()?;
    let field = poly.field().clone();
    let base = field.base();

    let mut b = vec![vec![0u64; n]; n];
    for (i, row) in b.iter_mut().enumerate() {
        let xi = x_pow_mod(i as u128 * base as u128, poly)?;
        for (j, &c) in xi.coeffs().iter().enumerate() {
            row[j] = c;
        }
        row[i] = field.sub_raw(row[i], 1);
    }

    let mut rank = 0;
    for k in 0..n {
        if rank >= n {
            break;
        }
        let mut have_pivot = b[rank][k] != 0;
        for j in rank + 1..n {
            if b[j][k] == 0 {
                continue;
            }
            if have_pivot {
                let factor = field.div_raw(b[j][k], b[rank][k])?;
                b[j][k] = 0;
                for l in k + 1..n {
                    let t = field.mul_raw(b[rank][l], factor);
                    b[j][l] = field.sub_raw(b[j][l], t);
                }
            } else {
                b.swap(rank, j);
                have_pivot = true;
            }
        }
        if have_pivot {
            rank += 1;
        }
    }
    Ok(rank)
}

/// Rabin's criterion: for every maximal proper divisor n/q of n the
/// polynomial must be coprime with x^(base^(n/q)) - x, and x^(base^n) - x
/// must vanish modulo it.
pub fn is_irreducible_rabin(poly: &FieldPolynomial) -> Result<bool, DomainError> {
    if let Some(answer) = screen(poly) {
        return Ok(answer);
    }
    let n = poly.degree()?;
    let base = poly.base() as u128;
    let x = FieldPolynomial::x(poly.field());

    for q in distinct_prime_factors(n as u128) {
        let ni = n as u128 / q;
        let t = x_pow_mod(pow_u128(base, ni), poly)?.sub(&x)?;
        if t.is_zero() || gcd(poly, &t)?.degree()? > 0 {
            return Ok(false);
        }
    }
    let t = x_pow_mod(pow_u128(base, n as u128), poly)?.sub(&x)?;
    Ok(t.is_zero())
}

/// Ben-Or's criterion: gcd(poly, x^(base^i) - x) must be constant for every
/// i up to half the degree.
pub fn is_irreducible_benor(poly: &FieldPolynomial) -> Result<bool, DomainError> {
    if let Some(answer) = screen(poly) {
        return Ok(answer);
    }
    let n = poly.degree()?;
    let base = poly.base() as u128;
    let x = FieldPolynomial::x(poly.field());

    for i in 1..=n / 2 {
        let t = x_pow_mod(pow_u128(base, i as u128), poly)?.sub(&x)?;
        if t.is_zero() || gcd(poly, &t)?.degree()? > 0 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Dispatch by base: Berlekamp benchmarks fastest over GF(2), Ben-Or over
/// everything larger.
pub fn is_irreducible(poly: &FieldPolynomial) -> Result<bool, DomainError> {
    if poly.base() == 2 {
        is_irreducible_berlekamp(poly)
    } else {
        is_irreducible_benor(poly)
    }
}

// ---------------------------------------------------------------------------
// primitivity
// ---------------------------------------------------------------------------

/// Primitivity by definition, on the monic normalization of the input.
///
/// With mp = (-1)^n * p(0) and r = (base^n - 1) / (base - 1), the polynomial
/// is primitive iff mp is a primitive element of the base field, x^r is
/// congruent to mp, and x^(r/q) keeps a positive degree for every prime q
/// dividing r. Assumes nothing about irreducibility; reducible inputs simply
/// fail one of the congruences.
pub fn is_primitive_definition(poly: &FieldPolynomial) -> Result<bool, DomainError> {
    if poly.is_zero() || poly.len() == 1 {
        return Ok(false);
    }
    let n = poly.degree()?;
    if n == 1 && poly.coeff(0) == 0 {
        // k*x generates the field by multiplication with x.
        return Ok(true);
    }
    if poly.coeff(0) == 0 {
        return Ok(false);
    }

    let base = poly.base();
    let npoly = poly.monic()?;
    if base == 2 && npoly.coeffs() == [1, 1] {
        // x + 1 has the trivial root 1.
        return Ok(false);
    }

    let field = npoly.field().clone();
    let mut mp = npoly.coeff(0);
    if n % 2 == 1 {
        mp = field.neg_raw(mp);
    }

    // (1) mp must generate the multiplicative group of the base field.
    if base > 2 {
        for q in distinct_prime_factors((base - 1) as u128) {
            if pow_mod(mp, (base - 1) / q as u64, base) == 1 {
                return Ok(false);
            }
        }
    }

    // (2) x^r must reduce to the constant mp.
    let r = (pow_u128(base as u128, n as u128) - 1) / (base as u128 - 1);
    let t = x_pow_mod(r, &npoly)?.sub(&FieldPolynomial::constant(&field, mp))?;
    if !t.is_zero() {
        return Ok(false);
    }

    // (3) no earlier power of x may collapse to a constant.
    for q in distinct_prime_factors(r) {
        if q == r {
            continue;
        }
        let t = x_pow_mod(r / q, &npoly)?;
        if t.is_zero() || t.degree()? == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Irreducibility first, then primitivity by definition.
pub fn is_primitive(poly: &FieldPolynomial) -> Result<bool, DomainError> {
    Ok(is_irreducible(poly)? && is_primitive_definition(poly)?)
}

// ---------------------------------------------------------------------------
// pipeline payloads
// ---------------------------------------------------------------------------

/// Which irreducibility test a payload runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrreducibleMethod {
    /// Skip the test entirely.
    Nil,
    Berlekamp,
    Rabin,
    BenOr,
    /// Per-base dispatch, see [`is_irreducible`].
    Recommended,
}

/// Which primitivity test a payload runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMethod {
    /// Skip the test entirely.
    Nil,
    Definition,
    Recommended,
}

/// Combined verdict of one payload invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    pub irreducible: bool,
    pub primitive: bool,
}

/// Builds a [`crate::pipeline::Pipeline`] payload running the selected
/// tests. Degenerate inputs on which a test cannot even run are reported as
/// failing it.
pub fn make_check_fn(
    irreducible: IrreducibleMethod,
    primitive: PrimitiveMethod,
) -> impl Fn(&FieldPolynomial) -> CheckResult + Send + Sync + 'static {
    move |poly| {
        let irr = match irreducible {
            IrreducibleMethod::Nil => false,
            IrreducibleMethod::Berlekamp => {
                is_irreducible_berlekamp(poly).unwrap_or(false)
            }
            IrreducibleMethod::Rabin => is_irreducible_rabin(poly).unwrap_or(false),
            IrreducibleMethod::BenOr => is_irreducible_benor(poly).unwrap_or(false),
            IrreducibleMethod::Recommended => is_irreducible(poly).unwrap_or(false),
        };
        let prim = match primitive {
            PrimitiveMethod::Nil => false,
            PrimitiveMethod::Definition | PrimitiveMethod::Recommended => {
                is_primitive_definition(poly).unwrap_or(false)
            }
        };
        CheckResult {
            irreducible: irr,
            primitive: prim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    fn gf2poly(bits: u64) -> FieldPolynomial {
        let field = Field::gf2();
        let coeffs: Vec<u64> = (0..64).map(|i| (bits >> i) & 1).collect();
        FieldPolynomial::new(&field, &coeffs)
    }

    #[test]
    fn test_derivative() {
        let field = Field::new(5).unwrap();
        // d/dx (1 + 2x + 3x^2 + 4x^3) = 2 + 6x + 12x^2 = 2 + x + 2x^2
        let p = FieldPolynomial::new(&field, &[1, 2, 3, 4]);
        assert_eq!(derivative(&p).coeffs(), &[2, 1, 2]);
        // Over GF(3), d/dx (1 + x^3) = 0
        let field3 = Field::new(3).unwrap();
        let q = FieldPolynomial::new(&field3, &[1, 0, 0, 1]);
        assert!(derivative(&q).is_zero());
    }

    #[test]
    fn test_gcd_known() {
        // (x+1)(x^2+x+1) = x^3 + 1 shares x+1 with (x+1)^2 = x^2 + 1
        let a = gf2poly(0b1001);
        let b = gf2poly(0b101);
        assert_eq!(gcd(&a, &b).unwrap().coeffs(), &[1, 1]);
        // Coprime pair reduces to a constant.
        let c = gf2poly(0b111);
        let d = gf2poly(0b1011);
        assert_eq!(gcd(&c, &d).unwrap().degree().unwrap(), 0);
    }

    #[test]
    fn test_gcd_of_zero_fails() {
        let field = Field::gf2();
        let z = FieldPolynomial::zero(&field);
        let x = FieldPolynomial::x(&field);
        assert_eq!(gcd(&z, &x).unwrap_err(), DomainError::GcdOfZero);
    }

    #[test]
    fn test_x_pow_mod_matches_naive() {
        let field = Field::new(3).unwrap();
        let modulus = FieldPolynomial::new(&field, &[1, 2, 0, 1]);
        let x = FieldPolynomial::x(&field);
        let mut naive = FieldPolynomial::constant(&field, 1);
        for pow in 0u32..40 {
            assert_eq!(
                x_pow_mod(pow as u128, &modulus).unwrap(),
                naive.rem(&modulus).unwrap(),
                "mismatch at pow {}",
                pow
            );
            naive = naive.mul(&x).unwrap();
        }
    }

    #[test]
    fn test_x_pow_mod_huge_exponent() {
        // x^4 + x + 1 is primitive over GF(2): x has order 15, so exponents
        // reduce modulo 15 and the cycle folding must kick in.
        let modulus = gf2poly(0b10011);
        let huge = (1u128 << 100) + 7;
        let small = (huge % 15) as u128;
        assert_eq!(
            x_pow_mod(huge, &modulus).unwrap(),
            x_pow_mod(small, &modulus).unwrap()
        );
    }

    #[test]
    fn test_classifiers_agree_on_gf2() {
        for bits in 2u64..=255 {
            let p = gf2poly(bits);
            let a = is_irreducible_berlekamp(&p).unwrap();
            let b = is_irreducible_rabin(&p).unwrap();
            let c = is_irreducible_benor(&p).unwrap();
            assert_eq!(a, b, "berlekamp vs rabin disagree on {:#b}", bits);
            assert_eq!(a, c, "berlekamp vs ben-or disagree on {:#b}", bits);
        }
    }

    #[test]
    fn test_known_gf2_irreducibles() {
        for bits in [0b10u64, 0b11, 0b111, 0b1011, 0b1101, 0b10011, 0b11001, 0b11111] {
            assert!(
                is_irreducible_berlekamp(&gf2poly(bits)).unwrap(),
                "{:#b} should be irreducible",
                bits
            );
        }
        for bits in [0b101u64, 0b110, 0b1001, 0b1111, 0b10101] {
            assert!(
                !is_irreducible_berlekamp(&gf2poly(bits)).unwrap(),
                "{:#b} should be reducible",
                bits
            );
        }
    }

    #[test]
    fn test_classifiers_agree_on_gf3() {
        let field = Field::new(3).unwrap();
        for code in 3u64..200 {
            // Base-3 digits as coefficients.
            let mut coeffs = Vec::new();
            let mut c = code;
            while c > 0 {
                coeffs.push(c % 3);
                c /= 3;
            }
            let p = FieldPolynomial::new(&field, &coeffs);
            let a = is_irreducible_berlekamp(&p).unwrap();
            let b = is_irreducible_rabin(&p).unwrap();
            let c = is_irreducible_benor(&p).unwrap();
            assert_eq!(a, b, "berlekamp vs rabin disagree on {:?}", p);
            assert_eq!(a, c, "berlekamp vs ben-or disagree on {:?}", p);
        }
    }

    #[test]
    fn test_x_is_irreducible_and_primitive() {
        let x = FieldPolynomial::x(&Field::gf2());
        assert!(is_irreducible_berlekamp(&x).unwrap());
        assert!(is_primitive_definition(&x).unwrap());
        assert!(is_primitive(&x).unwrap());
    }

    #[test]
    fn test_x_plus_one_not_primitive() {
        let p = gf2poly(0b11);
        assert!(is_irreducible_berlekamp(&p).unwrap());
        assert!(!is_primitive_definition(&p).unwrap());
    }

    #[test]
    fn test_primitive_gf2_degree_4() {
        // x^4 + x + 1 is primitive, x^4 + x^3 + x^2 + x + 1 is irreducible
        // but its root has order 5.
        assert!(is_primitive(&gf2poly(0b10011)).unwrap());
        let p = gf2poly(0b11111);
        assert!(is_irreducible_berlekamp(&p).unwrap());
        assert!(!is_primitive_definition(&p).unwrap());
    }

    #[test]
    fn test_primitive_gf3() {
        let field = Field::new(3).unwrap();
        // x^2 + x + 2 is primitive over GF(3); x^2 + 1 is irreducible with a
        // root of order 4 < 8.
        let prim = FieldPolynomial::new(&field, &[2, 1, 1]);
        assert!(is_irreducible_benor(&prim).unwrap());
        assert!(is_primitive_definition(&prim).unwrap());
        let not_prim = FieldPolynomial::new(&field, &[1, 0, 1]);
        assert!(is_irreducible_benor(&not_prim).unwrap());
        assert!(!is_primitive_definition(&not_prim).unwrap());
    }

    #[test]
    fn test_check_fn_combinations() {
        let p = gf2poly(0b10011);
        let both = make_check_fn(IrreducibleMethod::Recommended, PrimitiveMethod::Definition);
        assert_eq!(
            both(&p),
            CheckResult {
                irreducible: true,
                primitive: true
            }
        );
        let neither = make_check_fn(IrreducibleMethod::Nil, PrimitiveMethod::Nil);
        assert_eq!(
            neither(&p),
            CheckResult {
                irreducible: false,
                primitive: false
            }
        );
        let zero = FieldPolynomial::zero(&Field::gf2());
        let irr_only = make_check_fn(IrreducibleMethod::Berlekamp, PrimitiveMethod::Nil);
        assert!(!irr_only(&zero).irreducible);
    }
}
