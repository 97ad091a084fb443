//! Linear-recurrence sequence filling over GF(2).
//!
//! Generating-matrix rows are windows into a bit sequence produced by an
//! LFSR whose taps come from a characteristic polynomial. The filler works
//! on a caller-provided slice so the scratch buffer can be reused across
//! matrix sections.

use gf_poly::FieldPolynomial;

use crate::error::NetError;

/// Fills `out` with the recurrent sequence defined by `char_poly`.
///
/// The first deg(char_poly) entries are the low bits of `init_values`
/// (element i of the initial state comes from bit i); every further entry is
/// s[n] = XOR over i < e of char_poly[i] * s[n - e + i], with e the degree.
/// Initial states wider than 64 bits occur for high-degree section
/// polynomials, hence the 128-bit seed.
pub fn fill_recursively(
    out: &mut [u64],
    init_values: u128,
    char_poly: &FieldPolynomial,
) -> Result<(), NetError> {
    let degree = char_poly.degree().map_err(|_| NetError::ConstantCharPoly)?;
    if degree == 0 {
        return Err(NetError::ConstantCharPoly);
    }

    let seeded = degree.min(out.len());
    for (i, slot) in out.iter_mut().take(seeded).enumerate() {
        *slot = (init_values >> i & 1) as u64;
    }
    for n in seeded..out.len() {
        let mut value = 0u64;
        for i in 0..degree {
            value ^= char_poly.coeff(i) & out[n - degree + i];
        }
        out[n] = value;
    }
    Ok(())
}

/// Packs per-element initial values (low bit of each) into a seed for
/// [`fill_recursively`].
pub fn pack_initial_values(values: &[u64]) -> u128 {
    values
        .iter()
        .enumerate()
        .fold(0u128, |acc, (i, &v)| acc | ((v & 1) as u128) << i)
}

/// Splits a packed seed back into `count` single-bit values.
pub fn unpack_initial_values(seed: u128, count: usize) -> Vec<u64> {
    (0..count).map(|i| (seed >> i & 1) as u64).collect()
}
