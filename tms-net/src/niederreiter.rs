//! Niederreiter's construction of (t,m,s)-nets in base 2.
//!
//! Each dimension gets a distinct irreducible polynomial p_i of degree e_i;
//! its generating matrix is assembled in sections of e_i rows, the rows of
//! section u being windows into the linear-recurrence sequence with
//! characteristic polynomial p_i^(u+1). The quality parameter satisfies
//! t <= sum (e_i - 1), so selecting least-degree polynomials keeps the net
//! tight. Two bit-ordering conventions of the same construction are
//! supported; they differ only in the per-section seed and in which end of
//! the window a row starts from.

use std::ops::Deref;

use gf_poly::{check, FieldPolynomial};

use crate::digital_net::DigitalNet;
use crate::error::NetError;
use crate::genmat::{GenNum, MAX_NBITS};
use crate::gf2poly;
use crate::recseq;

/// Bit-ordering convention of the construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The textbook layout. Its canonical seeds guarantee that every
    /// one-dimensional projection has zero defect.
    Classical,
    /// Reversed row order within each section, with a uniform seed rule.
    Modified,
}

/// Where the per-dimension polynomials come from.
#[derive(Debug, Clone)]
pub enum PolySource {
    /// Least-defect automatic selection, one polynomial per dimension.
    Auto { dim: u32, parallel: bool },
    /// Explicit degree per dimension; repeated degrees take successive
    /// irreducibles.
    Degrees(Vec<u32>),
    /// Explicit coefficient lists (low degree first), validated before use.
    Polynomials(Vec<Vec<u64>>),
}

/// A Niederreiter (t,m,s)-net: the digital net plus its defining
/// polynomials.
#[derive(Debug, Clone)]
pub struct Niederreiter {
    net: DigitalNet,
    irrpolys: Vec<FieldPolynomial>,
}

impl Niederreiter {
    /// Classical net with automatic sequential polynomial selection.
    pub fn new(nbits: u32, dim: u32) -> Result<Niederreiter, NetError> {
        Niederreiter::build(
            nbits,
            PolySource::Auto {
                dim,
                parallel: false,
            },
            Variant::Classical,
        )
    }

    /// Classical net with pipelined polynomial selection; same result as
    /// [`Niederreiter::new`], faster for large dimension counts.
    pub fn new_in_parallel(nbits: u32, dim: u32) -> Result<Niederreiter, NetError> {
        Niederreiter::build(
            nbits,
            PolySource::Auto {
                dim,
                parallel: true,
            },
            Variant::Classical,
        )
    }

    /// Classical net over polynomials of explicit degrees.
    pub fn with_degrees(nbits: u32, degrees: &[u32]) -> Result<Niederreiter, NetError> {
        Niederreiter::build(nbits, PolySource::Degrees(degrees.to_vec()), Variant::Classical)
    }

    /// Classical net over explicit polynomials.
    pub fn with_polynomials(
        nbits: u32,
        polynomials: &[Vec<u64>],
    ) -> Result<Niederreiter, NetError> {
        Niederreiter::build(
            nbits,
            PolySource::Polynomials(polynomials.to_vec()),
            Variant::Classical,
        )
    }

    /// Full-control constructor. All validation happens here: bit depth in
    /// [1, 64], enough suitable polynomials for every dimension, and the
    /// resulting defect bound within the bit depth.
    pub fn build(
        nbits: u32,
        source: PolySource,
        variant: Variant,
    ) -> Result<Niederreiter, NetError> {
        if nbits == 0 {
            return Err(NetError::ZeroBitDepth);
        }
        if nbits > MAX_NBITS {
            return Err(NetError::BitDepthTooLarge(nbits));
        }

        let irrpolys = match source {
            PolySource::Auto { dim, parallel } => {
                if dim == 0 {
                    return Err(NetError::EmptyNet);
                }
                // Budgeting the defect with nbits keeps t <= m by
                // construction.
                let polys = if parallel {
                    gf2poly::generate_irrpolys_in_parallel(dim as usize, nbits)
                } else {
                    gf2poly::generate_irrpolys(dim as usize, nbits)
                };
                if polys.len() != dim as usize {
                    return Err(NetError::InsufficientPolynomials {
                        requested: dim as usize,
                        found: polys.len(),
                    });
                }
                polys
            }
            PolySource::Degrees(degrees) => {
                if degrees.is_empty() {
                    return Err(NetError::EmptyNet);
                }
                let polys = gf2poly::generate_irrpolys_with_degrees(&degrees, nbits);
                if polys.len() != degrees.len() {
                    return Err(NetError::InsufficientPolynomials {
                        requested: degrees.len(),
                        found: polys.len(),
                    });
                }
                polys
            }
            PolySource::Polynomials(coeff_lists) => {
                if coeff_lists.is_empty() {
                    return Err(NetError::EmptyNet);
                }
                let polys: Vec<FieldPolynomial> = coeff_lists
                    .iter()
                    .map(|coeffs| gf2poly::make_gf2poly(coeffs))
                    .collect();
                validate_irrpolys(&polys, nbits)?;
                polys
            }
        };

        let t = defect_bound(&irrpolys);
        log::info!(
            "niederreiter: building ({},{},{})-net, variant {:?}",
            t,
            nbits,
            irrpolys.len(),
            variant
        );

        let gen_nums = generating_numbers(nbits, &irrpolys, variant)?;
        let net = DigitalNet::from_gen_nums(gen_nums)?;
        Ok(Niederreiter { net, irrpolys })
    }

    /// The underlying digital net.
    pub fn net(&self) -> &DigitalNet {
        &self.net
    }

    /// The per-dimension polynomials, in dimension order.
    pub fn polynomials(&self) -> &[FieldPolynomial] {
        &self.irrpolys
    }

    /// Upper bound on the quality parameter: sum of (degree - 1).
    pub fn t_estimate(&self) -> u32 {
        defect_bound(&self.irrpolys)
    }
}

impl Deref for Niederreiter {
    type Target = DigitalNet;

    fn deref(&self) -> &DigitalNet {
        &self.net
    }
}

fn defect_bound(irrpolys: &[FieldPolynomial]) -> u32 {
    irrpolys
        .iter()
        .map(|p| p.len().saturating_sub(2) as u32)
        .sum()
}

/// Checks caller-supplied polynomials before any matrix work: each must be
/// irreducible, pairwise distinct (distinct irreducibles are automatically
/// coprime), and their combined defect must fit the bit depth.
fn validate_irrpolys(polys: &[FieldPolynomial], nbits: u32) -> Result<(), NetError> {
    for (i, poly) in polys.iter().enumerate() {
        if !check::is_irreducible_berlekamp(poly).unwrap_or(false) {
            return Err(NetError::ReduciblePolynomial(i));
        }
        if polys[..i].contains(poly) {
            return Err(NetError::DuplicatePolynomial(i));
        }
    }
    let t = defect_bound(polys);
    if t > nbits {
        return Err(NetError::QualityExceedsBitDepth { t, m: nbits });
    }
    Ok(())
}

/// Assembles the packed generating matrices for every dimension.
fn generating_numbers(
    nbits: u32,
    irrpolys: &[FieldPolynomial],
    variant: Variant,
) -> Result<Vec<GenNum>, NetError> {
    let mut gen_nums = Vec::with_capacity(irrpolys.len());
    let mut alpha: Vec<u64> = Vec::new();

    for poly in irrpolys {
        let e = poly.degree()? as u32;
        let tail_rows = nbits % e;
        let last_section = (nbits - 1) / e;

        let mut numbers = GenNum::new(nbits)?;
        let mut section_poly = FieldPolynomial::constant(poly.field(), 1);
        alpha.clear();
        alpha.resize((nbits - 1 + e) as usize, 0);

        let mut row = 0u32;
        while row < nbits {
            let section = row / e;
            let section_end = (section + 1) * e;
            let rows_here = if section_end > nbits { tail_rows } else { e };
            section_poly = section_poly.mul(poly)?;

            // One-hot seed for this section's recurrence. The classical
            // variant pins the final partial section's seed to bit m - 1,
            // which is what makes one-dimensional projections defect-free.
            let seed_bit = match variant {
                Variant::Classical if tail_rows != 0 && section == last_section => nbits - 1,
                _ => section_end - 1,
            };
            recseq::fill_recursively(&mut alpha, 1u128 << seed_bit, &section_poly)?;

            for _ in 0..rows_here {
                let offset = match variant {
                    Variant::Classical => row % e,
                    Variant::Modified => e - 1 - row % e,
                };
                for col in 0..nbits {
                    if alpha[(col + offset) as usize] & 1 == 1 {
                        numbers.set_bit(row, col, true);
                    }
                }
                row += 1;
            }
        }
        gen_nums.push(numbers);
    }
    Ok(gen_nums)
}
