//! Error type for net construction and matrix algebra.

use gf_poly::DomainError;

/// Net-level failures. Validation is front-loaded into the constructors, so
/// a successfully built net never fails on queries or point generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("bit depth must be at least 1")]
    ZeroBitDepth,

    /// Integer coordinates live in single 64-bit words, see
    /// [`crate::genmat::MAX_NBITS`].
    #[error("bit depth {0} exceeds the supported maximum of 64")]
    BitDepthTooLarge(u32),

    #[error("matrix size {0} is invalid: must be between 1 and 64")]
    BadMatrixSize(u32),

    #[error("a net needs at least one dimension")]
    EmptyNet,

    #[error("generating matrices must all share one size")]
    MismatchedWidths,

    /// The defect bound t must not exceed the bit depth m, or the net
    /// definition degenerates.
    #[error("quality parameter t = {t} exceeds bit depth m = {m}")]
    QualityExceedsBitDepth { t: u32, m: u32 },

    /// Polynomial selection came up short for the requested dimension count
    /// under the defect budget.
    #[error("only {found} suitable polynomials available for {requested} dimensions")]
    InsufficientPolynomials { requested: usize, found: usize },

    #[error("polynomial #{0} duplicates an earlier one")]
    DuplicatePolynomial(usize),

    #[error("polynomial #{0} is reducible")]
    ReduciblePolynomial(usize),

    #[error("matrix is singular over GF(2)")]
    SingularMatrix,

    /// A linear recurrence needs a characteristic polynomial of degree >= 1.
    #[error("characteristic polynomial must have degree at least 1")]
    ConstantCharPoly,

    #[error(transparent)]
    Algebra(#[from] DomainError),
}
