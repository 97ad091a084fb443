//! Prime-field polynomial algebra with irreducibility and primitivity tests.
//!
//! The crate provides:
//! - `field`: word-size prime fields GF(p) with precomputed inverse tables,
//!   checked element arithmetic, and a raw fast path for inner loops
//! - `poly`: reduced-representation polynomials over a prime field
//! - `check`: Berlekamp, Rabin and Ben-Or irreducibility criteria plus a
//!   by-definition primitivity test
//! - `pipeline`: a reusable worker pool for running classifier searches over
//!   lazily generated candidate streams
//!
//! Everything is built for exhaustive search workloads: fields are shared
//! handles so cloning is free, polynomials keep their representation reduced
//! at all times, and the classifiers lean on a single one-pass division
//! primitive.

pub mod check;
pub mod error;
pub mod field;
pub mod pipeline;
pub mod poly;

pub use check::{
    is_irreducible, is_primitive, make_check_fn, CheckResult, IrreducibleMethod,
    PrimitiveMethod,
};
pub use error::DomainError;
pub use field::{Field, FieldElement};
pub use pipeline::Pipeline;
pub use poly::FieldPolynomial;
