//! Error type for algebraic domain violations.

/// Everything that can go wrong when constructing fields or combining
/// field-bound values. All variants are cheap value types so tests can
/// match on them directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Field base 0 or 1 defines no multiplicative group.
    #[error("field base must be at least 2, got {0}")]
    TrivialField(u64),

    /// (base - 1)^2 must fit in a 64-bit word for products to be exact.
    #[error("field base {0} is too large for single-word arithmetic")]
    FieldTooLarge(u64),

    /// Detected while tabulating inverses: some residue shares a factor
    /// with the base.
    #[error("field base {0} is not prime")]
    NotPrime(u64),

    /// Two operands belong to different prime fields.
    #[error("field mismatch: GF({0}) vs GF({1})")]
    FieldMismatch(u64, u64),

    #[error("division by zero")]
    DivisionByZero,

    /// Only the zero element lacks an inverse.
    #[error("zero has no multiplicative inverse in GF({0})")]
    NoInverse(u64),

    /// The degree of the zero polynomial is undefined.
    #[error("degree of the zero polynomial is undefined")]
    ZeroDegree,

    /// Right shift divides by x^n and must be exact.
    #[error("cannot shift right by {0}: low coefficients are nonzero")]
    InexactShift(usize),

    #[error("gcd is undefined for the zero polynomial")]
    GcdOfZero,
}
