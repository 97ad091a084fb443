//! Selection of irreducible polynomials over GF(2).
//!
//! Candidates are enumerated as coefficient bit patterns, bit i holding the
//! coefficient of x^i, so ascending odd numbers walk every polynomial with a
//! nonzero constant term in degree-then-pattern order. The defect of a
//! selection is the sum of (degree - 1) over its polynomials; it bounds the
//! quality parameter t of the net built from them, so a budget on it caps
//! how far the search may run.

use gf_poly::{
    check, make_check_fn, Field, FieldPolynomial, IrreducibleMethod, Pipeline,
    PrimitiveMethod,
};

/// Builds a GF(2) polynomial from explicit coefficients (low degree first).
pub fn make_gf2poly(coeffs: &[u64]) -> FieldPolynomial {
    FieldPolynomial::new(&Field::gf2(), coeffs)
}

/// Builds a GF(2) polynomial from a coefficient bit pattern.
pub fn poly_from_bits(bits: u64, field: &Field) -> FieldPolynomial {
    let coeffs: Vec<u64> = (0..64 - bits.leading_zeros() as usize)
        .map(|i| bits >> i & 1)
        .collect();
    FieldPolynomial::new(field, &coeffs)
}

/// Coefficient bit pattern of a GF(2) polynomial.
fn poly_to_bits(poly: &FieldPolynomial) -> u64 {
    poly.coeffs()
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, &c)| acc | (c & 1) << i)
}

fn defect_of(poly: &FieldPolynomial) -> u32 {
    // Selected polynomials always have degree >= 1.
    poly.len().saturating_sub(2) as u32
}

/// Sequentially selects up to `amount` least-degree irreducible polynomials
/// while the running defect stays within `max_defect`.
///
/// The monomial x comes first, then ascending odd coefficient patterns from
/// x + 1 upward, each tested with Berlekamp. The polynomial that would push
/// the defect past the budget is discarded and the (shorter) selection is
/// returned as is.
pub fn generate_irrpolys(amount: usize, max_defect: u32) -> Vec<FieldPolynomial> {
    if amount == 0 {
        return Vec::new();
    }
    let field = Field::gf2();
    let mut polys = vec![FieldPolynomial::x(&field)];
    let mut defect = 0u32;
    let mut bits = 1u64;
    while polys.len() < amount {
        bits += 2;
        let candidate = poly_from_bits(bits, &field);
        if !check::is_irreducible_berlekamp(&candidate).unwrap_or(false) {
            continue;
        }
        defect += defect_of(&candidate);
        if defect > max_defect {
            break;
        }
        polys.push(candidate);
    }
    log::debug!(
        "selected {} of {} irreducible polynomials (defect {})",
        polys.len(),
        amount,
        defect.min(max_defect)
    );
    polys
}

/// Pipelined variant of [`generate_irrpolys`] with identical output.
///
/// The same candidate stream is fanned out over a worker pool in non-strict
/// mode, so every candidate dispatched before the stop is still delivered;
/// re-sorting by (degree, pattern) and trimming the defect overflow then
/// reconstructs the sequential result exactly.
pub fn generate_irrpolys_in_parallel(amount: usize, max_defect: u32) -> Vec<FieldPolynomial> {
    if amount == 0 {
        return Vec::new();
    }
    let field = Field::gf2();
    let mut polys = vec![FieldPolynomial::x(&field)];
    if amount == 1 {
        return polys;
    }

    let mut pipeline: Pipeline<FieldPolynomial, gf_poly::CheckResult> = Pipeline::new();
    let mut bits = 1u64;
    let mut defect = 0u32;
    let mut found = polys.len();
    {
        let candidates = {
            let field = field.clone();
            move || {
                bits += 2;
                poly_from_bits(bits, &field)
            }
        };
        pipeline.run(
            candidates,
            make_check_fn(IrreducibleMethod::Berlekamp, PrimitiveMethod::Nil),
            |candidate, result| {
                if result.irreducible {
                    polys.push(candidate.clone());
                    defect += defect_of(candidate);
                    found += 1;
                }
                found >= amount || defect > max_defect
            },
            false,
        );
    }

    // Completion order is nondeterministic; restore the canonical order and
    // drop whatever exceeds the requested amount or the defect budget.
    polys.sort_by_key(|p| (p.len(), poly_to_bits(p)));
    let mut defect = 0u32;
    let mut keep = 0usize;
    for poly in &polys {
        if keep == amount {
            break;
        }
        defect += defect_of(poly);
        if defect > max_defect {
            break;
        }
        keep += 1;
    }
    polys.truncate(keep);
    polys
}

/// Selects one irreducible polynomial per requested degree, with repeated
/// degrees advancing through successive irreducibles of that degree.
///
/// The result may be shorter than `degrees`: selection stops early on a
/// degree of 0 or >= 64, on an exhausted degree range, or when the defect
/// budget runs out.
pub fn generate_irrpolys_with_degrees(degrees: &[u32], max_defect: u32) -> Vec<FieldPolynomial> {
    let field = Field::gf2();
    let mut cursors = std::collections::BTreeMap::<u32, u64>::new();
    let mut polys = Vec::with_capacity(degrees.len());
    let mut defect = 0u32;

    for &degree in degrees {
        if degree == 0 || degree >= 64 {
            break;
        }
        defect += degree - 1;
        if defect > max_defect {
            break;
        }
        let cursor = cursors
            .entry(degree)
            .or_insert_with(|| (1u64 << degree) + u64::from(degree != 1));
        match next_irreducible_of_degree(cursor, degree, &field) {
            Some(poly) => polys.push(poly),
            None => break,
        }
    }
    polys
}

/// Advances the cursor through the degree-d candidate range until an
/// irreducible turns up. Degree 1 admits the even candidate x; everything
/// else walks odd patterns in [2^d + 1, 2^(d+1)).
fn next_irreducible_of_degree(
    cursor: &mut u64,
    degree: u32,
    field: &Field,
) -> Option<FieldPolynomial> {
    loop {
        let bits = *cursor;
        if bits >> degree != 1 {
            return None;
        }
        let candidate = poly_from_bits(bits, field);
        *cursor = if bits == 2 { 3 } else { bits + 2 };
        if check::is_irreducible_berlekamp(&candidate).unwrap_or(false) {
            return Some(candidate);
        }
    }
}
