//! Generating matrices for digital nets over GF(2), in two representations.
//!
//! [`GenNum`] is the packed form point generation works on: one 64-bit word
//! per matrix column, row 0 at the most significant bit, so XOR-ing a word
//! into an accumulator applies a whole column at once. [`GenMat`] is the
//! row-of-bits form linear algebra works on. Conversion between the two is
//! exact in both directions.

use crate::error::NetError;

/// Matrices are square with size in [1, MAX_NBITS] so one column packs into
/// one word.
pub const MAX_NBITS: u32 = u64::BITS;

fn check_size(size: u32) -> Result<(), NetError> {
    if size == 0 || size > MAX_NBITS {
        return Err(NetError::BadMatrixSize(size));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GenNum: packed columns
// ---------------------------------------------------------------------------

/// A generating matrix packed column-wise into 64-bit words.
///
/// Bit `nbits - 1 - i` of word `j` holds matrix entry (i, j), which makes
/// `numbers[k] ^ acc` exactly "add column k to the accumulated point
/// coordinate".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenNum {
    nbits: u32,
    numbers: Vec<u64>,
}

impl GenNum {
    /// Zero matrix of the given size.
    pub fn new(nbits: u32) -> Result<GenNum, NetError> {
        check_size(nbits)?;
        Ok(GenNum {
            nbits,
            numbers: vec![0; nbits as usize],
        })
    }

    /// Wraps packed column words directly; the word count is the size.
    pub fn from_numbers(numbers: Vec<u64>) -> Result<GenNum, NetError> {
        check_size(numbers.len() as u32)?;
        Ok(GenNum {
            nbits: numbers.len() as u32,
            numbers,
        })
    }

    pub fn size(&self) -> u32 {
        self.nbits
    }

    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    /// Matrix entry (i, j).
    pub fn get_bit(&self, i: u32, j: u32) -> bool {
        self.numbers[j as usize] >> (self.nbits - 1 - i) & 1 == 1
    }

    pub fn set_bit(&mut self, i: u32, j: u32, value: bool) {
        let mask = 1u64 << (self.nbits - 1 - i);
        if value {
            self.numbers[j as usize] |= mask;
        } else {
            self.numbers[j as usize] &= !mask;
        }
    }

    pub fn to_matrix(&self) -> GenMat {
        let n = self.nbits;
        let rows = (0..n)
            .map(|i| (0..n).map(|j| self.get_bit(i, j) as u8).collect())
            .collect();
        GenMat {
            nbits: n,
            rows,
        }
    }

    /// True when every row is the previous row shifted one column right,
    /// i.e. the matrix is constant along diagonals.
    pub fn is_toeplitz(&self) -> bool {
        self.to_matrix().is_toeplitz()
    }
}

impl std::ops::Index<usize> for GenNum {
    type Output = u64;

    fn index(&self, column: usize) -> &u64 {
        &self.numbers[column]
    }
}

impl std::ops::IndexMut<usize> for GenNum {
    fn index_mut(&mut self, column: usize) -> &mut u64 {
        &mut self.numbers[column]
    }
}

// ---------------------------------------------------------------------------
// GenMat: rows of bits
// ---------------------------------------------------------------------------

/// A square GF(2) matrix stored as rows of 0/1 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenMat {
    nbits: u32,
    rows: Vec<Vec<u8>>,
}

impl GenMat {
    /// Zero matrix.
    pub fn new(size: u32) -> Result<GenMat, NetError> {
        check_size(size)?;
        Ok(GenMat {
            nbits: size,
            rows: vec![vec![0; size as usize]; size as usize],
        })
    }

    pub fn identity(size: u32) -> Result<GenMat, NetError> {
        let mut m = GenMat::new(size)?;
        for i in 0..size as usize {
            m.rows[i][i] = 1;
        }
        Ok(m)
    }

    /// Wraps explicit rows; entries are taken modulo 2 and the shape must be
    /// square.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<GenMat, NetError> {
        check_size(rows.len() as u32)?;
        let n = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return Err(NetError::MismatchedWidths);
        }
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|v| v & 1).collect())
            .collect();
        Ok(GenMat {
            nbits: n as u32,
            rows,
        })
    }

    pub fn size(&self) -> u32 {
        self.nbits
    }

    pub fn row(&self, i: u32) -> &[u8] {
        &self.rows[i as usize]
    }

    pub fn get(&self, i: u32, j: u32) -> u8 {
        self.rows[i as usize][j as usize]
    }

    pub fn set(&mut self, i: u32, j: u32, value: u8) {
        self.rows[i as usize][j as usize] = value & 1;
    }

    /// Constant along diagonals: entry (i, j) must match entry (i-1, j-1).
    pub fn is_toeplitz(&self) -> bool {
        let n = self.nbits as usize;
        for i in 1..n {
            for j in 1..n {
                if self.rows[i][j] != self.rows[i - 1][j - 1] {
                    return false;
                }
            }
        }
        true
    }

    pub fn mul(&self, other: &GenMat) -> Result<GenMat, NetError> {
        if self.nbits != other.nbits {
            return Err(NetError::MismatchedWidths);
        }
        let n = self.nbits as usize;
        let mut out = GenMat::new(self.nbits)?;
        for i in 0..n {
            for j in 0..n {
                let mut acc = 0u8;
                for k in 0..n {
                    acc ^= self.rows[i][k] & other.rows[k][j];
                }
                out.rows[i][j] = acc;
            }
        }
        Ok(out)
    }

    /// Gauss-Jordan inversion over GF(2): find a pivot below the diagonal,
    /// swap it up, XOR it out of every other row. Fails on singular input.
    pub fn inverse(&self) -> Result<GenMat, NetError> {
        let n = self.nbits as usize;
        let mut work = self.rows.clone();
        let mut inv = GenMat::identity(self.nbits)?;

        for col in 0..n {
            let pivot = (col..n)
                .find(|&r| work[r][col] == 1)
                .ok_or(NetError::SingularMatrix)?;
            work.swap(col, pivot);
            inv.rows.swap(col, pivot);
            for row in 0..n {
                if row != col && work[row][col] == 1 {
                    for k in 0..n {
                        work[row][k] ^= work[col][k];
                        inv.rows[row][k] ^= inv.rows[col][k];
                    }
                }
            }
        }
        Ok(inv)
    }

    pub fn to_gen_num(&self) -> GenNum {
        let n = self.nbits;
        let mut numbers = GenNum {
            nbits: n,
            numbers: vec![0; n as usize],
        };
        for i in 0..n {
            for j in 0..n {
                if self.rows[i as usize][j as usize] == 1 {
                    numbers.set_bit(i, j, true);
                }
            }
        }
        numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limits() {
        assert_eq!(GenNum::new(0).unwrap_err(), NetError::BadMatrixSize(0));
        assert_eq!(GenNum::new(65).unwrap_err(), NetError::BadMatrixSize(65));
        assert!(GenNum::new(64).is_ok());
        assert_eq!(GenMat::new(0).unwrap_err(), NetError::BadMatrixSize(0));
        assert!(GenMat::new(1).is_ok());
    }

    #[test]
    fn test_bit_addressing() {
        let mut g = GenNum::new(4).unwrap();
        g.set_bit(0, 2, true);
        g.set_bit(3, 0, true);
        // Row 0 sits at the most significant bit.
        assert_eq!(g[2], 0b1000);
        assert_eq!(g[0], 0b0001);
        assert!(g.get_bit(0, 2));
        assert!(g.get_bit(3, 0));
        assert!(!g.get_bit(1, 2));
        g.set_bit(0, 2, false);
        assert_eq!(g[2], 0);
    }

    #[test]
    fn test_round_trip_gen_num_gen_mat() {
        let rows = vec![
            vec![1, 0, 1, 1],
            vec![0, 1, 1, 0],
            vec![1, 1, 0, 0],
            vec![0, 0, 0, 1],
        ];
        let mat = GenMat::from_rows(rows).unwrap();
        let num = mat.to_gen_num();
        assert_eq!(num.to_matrix(), mat);
        let back = num.to_matrix().to_gen_num();
        assert_eq!(back, num);
    }

    #[test]
    fn test_identity_and_mul() {
        let id = GenMat::identity(3).unwrap();
        let m = GenMat::from_rows(vec![vec![1, 1, 0], vec![0, 1, 1], vec![1, 0, 1]]).unwrap();
        assert_eq!(m.mul(&id).unwrap(), m);
        assert_eq!(id.mul(&m).unwrap(), m);
    }

    #[test]
    fn test_inverse_times_self_is_identity() {
        let m = GenMat::from_rows(vec![
            vec![1, 1, 0, 1],
            vec![0, 1, 1, 0],
            vec![0, 0, 1, 1],
            vec![1, 0, 0, 1],
        ])
        .unwrap();
        let inv = m.inverse().unwrap();
        let id = GenMat::identity(4).unwrap();
        assert_eq!(m.mul(&inv).unwrap(), id);
        assert_eq!(inv.mul(&m).unwrap(), id);
    }

    #[test]
    fn test_singular_matrix_detected() {
        let m = GenMat::from_rows(vec![vec![1, 1, 0], vec![0, 0, 0], vec![1, 1, 0]]).unwrap();
        assert_eq!(m.inverse().unwrap_err(), NetError::SingularMatrix);
    }

    #[test]
    fn test_is_toeplitz() {
        let t = GenMat::from_rows(vec![vec![1, 0, 1], vec![1, 1, 0], vec![0, 1, 1]]).unwrap();
        assert!(t.is_toeplitz());
        assert!(t.to_gen_num().is_toeplitz());
        let not_t =
            GenMat::from_rows(vec![vec![1, 0, 1], vec![1, 1, 0], vec![0, 0, 1]]).unwrap();
        assert!(!not_t.is_toeplitz());
        assert!(GenMat::identity(5).unwrap().is_toeplitz());
    }
}
