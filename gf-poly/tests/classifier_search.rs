//! Cross-module checks: classifier searches driven through the pipeline
//! compared against plain sequential loops.

use gf_poly::{
    make_check_fn, Field, FieldPolynomial, IrreducibleMethod, Pipeline, PrimitiveMethod,
};

fn gf2poly(bits: u64) -> FieldPolynomial {
    let field = Field::gf2();
    let coeffs: Vec<u64> = (0..64).map(|i| (bits >> i) & 1).collect();
    FieldPolynomial::new(&field, &coeffs)
}

// ---------------------------------------------------------------------------
// pipelined vs sequential search
// ---------------------------------------------------------------------------

#[test]
fn test_pipelined_irreducible_search_matches_sequential() {
    let payload = make_check_fn(IrreducibleMethod::Berlekamp, PrimitiveMethod::Nil);

    // Sequential reference: first 10 irreducible odd-pattern polynomials.
    let mut sequential = Vec::new();
    let mut bits = 1u64;
    while sequential.len() < 10 {
        bits += 2;
        if payload(&gf2poly(bits)).irreducible {
            sequential.push(bits);
        }
    }

    for threads in [1usize, 2, 4, 8] {
        let mut pipeline: Pipeline<u64, gf_poly::CheckResult> = Pipeline::with_threads(threads);
        let mut next = 1u64;
        let mut found = Vec::new();
        pipeline.run(
            || {
                next += 2;
                next
            },
            {
                let check = make_check_fn(IrreducibleMethod::Berlekamp, PrimitiveMethod::Nil);
                move |bits: &u64| check(&gf2poly(*bits))
            },
            |&bits, result| {
                if result.irreducible {
                    found.push(bits);
                }
                found.len() >= 10
            },
            false,
        );
        found.sort_unstable();
        found.truncate(10);
        assert_eq!(
            found, sequential,
            "pipelined search with {} thread(s) diverged",
            threads
        );
    }
}

#[test]
fn test_pipelined_primitive_search() {
    // Find the first primitive polynomial of each small degree through the
    // pipeline and check it against known values.
    let mut pipeline: Pipeline<u64, gf_poly::CheckResult> = Pipeline::with_threads(4);
    // First primitive polynomial patterns: degree 2 -> x^2+x+1, degree 3 ->
    // x^3+x+1, degree 4 -> x^4+x+1.
    for (degree, expected) in [(2u32, 0b111u64), (3, 0b1011), (4, 0b10011)] {
        let mut bits = (1u64 << degree) - 1;
        let mut found = Vec::new();
        pipeline.run(
            || {
                bits += 2;
                bits
            },
            {
                let check =
                    make_check_fn(IrreducibleMethod::Berlekamp, PrimitiveMethod::Definition);
                move |bits: &u64| check(&gf2poly(*bits))
            },
            |&candidate, result| {
                if result.irreducible && result.primitive {
                    found.push(candidate);
                }
                !found.is_empty()
            },
            false,
        );
        found.sort_unstable();
        assert_eq!(
            found[0], expected,
            "wrong first primitive polynomial of degree {}",
            degree
        );
    }
}

// ---------------------------------------------------------------------------
// classifier agreement on a wider field
// ---------------------------------------------------------------------------

#[test]
fn test_classifiers_agree_on_gf5() {
    use gf_poly::check::{is_irreducible_benor, is_irreducible_berlekamp, is_irreducible_rabin};

    let field = Field::new(5).unwrap();
    for code in 5u64..400 {
        let mut coeffs = Vec::new();
        let mut c = code;
        while c > 0 {
            coeffs.push(c % 5);
            c /= 5;
        }
        let p = FieldPolynomial::new(&field, &coeffs);
        let a = is_irreducible_berlekamp(&p).unwrap();
        let b = is_irreducible_rabin(&p).unwrap();
        let d = is_irreducible_benor(&p).unwrap();
        assert_eq!(a, b, "berlekamp vs rabin disagree on {:?}", p);
        assert_eq!(a, d, "berlekamp vs ben-or disagree on {:?}", p);
    }
}
