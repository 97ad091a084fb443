//! Digital nets in base 2: generating matrices plus point generation.
//!
//! A net is defined entirely by its generating matrices; points are derived
//! per query and never retained. Coordinates exist in two forms: exact
//! integers in [0, 2^m) and reals in [0, 1) obtained by a single scaling,
//! so accumulating rounding error cannot occur. Once built, a net is
//! immutable and can be read from any number of threads.

use crate::error::NetError;
use crate::genmat::{GenMat, GenNum};

/// One point with exact integer coordinates, scaled by 2^-m.
pub type IntPoint = Vec<u64>;
/// One point with real coordinates in [0, 1).
pub type Point = Vec<f64>;

/// A base-2 digital net with m-bit coordinates in s dimensions.
#[derive(Debug, Clone)]
pub struct DigitalNet {
    nbits: u32,
    dim: u32,
    /// 2^-m, the one scaling constant between integer and real points.
    recip: f64,
    gen_nums: Vec<GenNum>,
}

impl DigitalNet {
    /// Builds a net from packed generating numbers; all dimensions must
    /// share one matrix size.
    pub fn from_gen_nums(gen_nums: Vec<GenNum>) -> Result<DigitalNet, NetError> {
        let first = gen_nums.first().ok_or(NetError::EmptyNet)?;
        let nbits = first.size();
        if gen_nums.iter().any(|g| g.size() != nbits) {
            return Err(NetError::MismatchedWidths);
        }
        Ok(DigitalNet {
            nbits,
            dim: gen_nums.len() as u32,
            recip: (0.5f64).powi(nbits as i32),
            gen_nums,
        })
    }

    pub fn from_gen_mats(gen_mats: Vec<GenMat>) -> Result<DigitalNet, NetError> {
        DigitalNet::from_gen_nums(gen_mats.iter().map(GenMat::to_gen_num).collect())
    }

    /// Bit depth m: coordinates have m binary digits and the net has 2^m
    /// points.
    pub fn m(&self) -> u32 {
        self.nbits
    }

    /// Dimension count s.
    pub fn s(&self) -> u32 {
        self.dim
    }

    pub fn generating_numbers(&self, dim: u32) -> &GenNum {
        &self.gen_nums[dim as usize]
    }

    pub fn generating_matrix(&self, dim: u32) -> GenMat {
        self.gen_nums[dim as usize].to_matrix()
    }

    // -- point generation ---------------------------------------------------

    /// Point `pos` of the Gray-code ordering, integer coordinates.
    pub fn generate_int_point(&self, pos: u64) -> IntPoint {
        let mut point = vec![0u64; self.dim as usize];
        self.store_int_point(&mut point, pos);
        point
    }

    /// Point `pos` of the Gray-code ordering, real coordinates.
    pub fn generate_point(&self, pos: u64) -> Point {
        self.cast_int_point_to_real(&self.generate_int_point(pos))
    }

    /// Point `pos` of the classical ordering: dimension-wise product of the
    /// generating matrix with the plain binary digits of `pos`. O(m) per
    /// coordinate, no incremental shortcut.
    pub fn generate_int_point_classical(&self, pos: u64) -> IntPoint {
        self.gen_nums
            .iter()
            .map(|g| {
                let mut acc = 0u64;
                for k in 0..self.nbits {
                    if pos >> k & 1 == 1 {
                        acc ^= g[k as usize];
                    }
                }
                acc
            })
            .collect()
    }

    pub fn generate_point_classical(&self, pos: u64) -> Point {
        self.cast_int_point_to_real(&self.generate_int_point_classical(pos))
    }

    /// Streams `amount` consecutive Gray-ordered integer points starting at
    /// `start`, reusing one buffer. After the first point each step XORs in
    /// exactly one generating number per dimension.
    pub fn for_each_int_point<F>(&self, mut handler: F, amount: u64, start: u64)
    where
        F: FnMut(&[u64], u64),
    {
        if amount == 0 {
            return;
        }
        let mut point = vec![0u64; self.dim as usize];
        self.store_int_point(&mut point, start);
        handler(&point, start);
        for pos in start + 1..start + amount {
            self.store_next_int_point(&mut point, pos);
            handler(&point, pos);
        }
    }

    /// Real-coordinate counterpart of [`Self::for_each_int_point`].
    pub fn for_each_point<F>(&self, mut handler: F, amount: u64, start: u64)
    where
        F: FnMut(&[f64], u64),
    {
        let mut real = vec![0f64; self.dim as usize];
        self.for_each_int_point(
            |point, pos| {
                for (r, &c) in real.iter_mut().zip(point.iter()) {
                    *r = c as f64 * self.recip;
                }
                handler(&real, pos);
            },
            amount,
            start,
        );
    }

    pub fn cast_int_point_to_real(&self, point: &[u64]) -> Point {
        point.iter().map(|&c| c as f64 * self.recip).collect()
    }

    /// Direct computation of Gray-ordered point `pos` into a buffer: XOR
    /// together the generating numbers selected by the Gray code of `pos`.
    fn store_int_point(&self, point: &mut [u64], pos: u64) {
        let gray = pos ^ (pos >> 1);
        for (coord, g) in point.iter_mut().zip(self.gen_nums.iter()) {
            let mut acc = 0u64;
            for k in 0..self.nbits {
                if gray >> k & 1 == 1 {
                    acc ^= g[k as usize];
                }
            }
            *coord = acc;
        }
    }

    /// Incremental step from point `pos - 1` to point `pos`: the Gray codes
    /// differ in exactly bit trailing_zeros(pos).
    fn store_next_int_point(&self, point: &mut [u64], pos: u64) {
        debug_assert!(pos > 0);
        let flipped = pos.trailing_zeros();
        for (coord, g) in point.iter_mut().zip(self.gen_nums.iter()) {
            *coord ^= g[flipped as usize];
        }
    }
}
