//! Digital (t,m,s)-nets in base 2, built with Niederreiter's construction.
//!
//! A digital net places 2^m points in the s-dimensional unit cube so that
//! every sufficiently coarse dyadic box holds exactly its fair share of
//! them; t measures how coarse "sufficiently" has to be, with smaller
//! better. The crate covers the whole pipeline:
//! - `gf2poly`: selection of distinct irreducible polynomials over GF(2),
//!   sequentially or over a worker pool
//! - `recseq`: the linear-recurrence sequences the matrix rows come from
//! - `genmat`: generating matrices, packed and row forms, with GF(2)
//!   inversion
//! - `digital_net`: point generation, Gray-ordered or classical, integer or
//!   real, single queries or streaming
//! - `niederreiter`: the construction itself, in classical and modified
//!   bit-ordering variants
//!
//! ```
//! use tms_net::Niederreiter;
//!
//! let net = Niederreiter::new(10, 3).unwrap();
//! assert!(net.t_estimate() <= net.m());
//! net.for_each_point(|point, _| assert_eq!(point.len(), 3), 1 << 10, 0);
//! ```

pub mod digital_net;
pub mod error;
pub mod genmat;
pub mod gf2poly;
pub mod niederreiter;
pub mod recseq;

pub use digital_net::{DigitalNet, IntPoint, Point};
pub use error::NetError;
pub use genmat::{GenMat, GenNum, MAX_NBITS};
pub use niederreiter::{Niederreiter, PolySource, Variant};
