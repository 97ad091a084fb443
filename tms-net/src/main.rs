//! Demonstration of Niederreiter net construction and point generation.

use std::time::Instant;

use tms_net::{gf2poly, Niederreiter, PolySource, Variant};

fn main() {
    env_logger::init();

    println!("=== Niederreiter (t,m,s)-net demo ===\n");

    // ------------------------------------------------------------------
    // Automatic polynomial selection
    // ------------------------------------------------------------------
    let net = match Niederreiter::new(10, 5) {
        Ok(net) => net,
        Err(e) => {
            eprintln!("construction failed: {}", e);
            return;
        }
    };
    println!(
        "({},{},{})-net over polynomials:",
        net.t_estimate(),
        net.m(),
        net.s()
    );
    for (dim, poly) in net.polynomials().iter().enumerate() {
        println!("  dim {}: {:?}", dim, poly);
    }

    // ------------------------------------------------------------------
    // Point table for a small net
    // ------------------------------------------------------------------
    println!("\n=== points of the (1,3,3)-net, Gray order ===");
    let small = match Niederreiter::new(3, 3) {
        Ok(net) => net,
        Err(e) => {
            eprintln!("construction failed: {}", e);
            return;
        }
    };
    small.for_each_point(
        |point, pos| {
            println!(
                "  #{}:  ({:.3}, {:.3}, {:.3})",
                pos, point[0], point[1], point[2]
            );
        },
        8,
        0,
    );

    println!("\n=== same net, classical order ===");
    for pos in 0..8 {
        let point = small.generate_point_classical(pos);
        println!(
            "  #{}:  ({:.3}, {:.3}, {:.3})",
            pos, point[0], point[1], point[2]
        );
    }

    // ------------------------------------------------------------------
    // Sequential vs pipelined polynomial selection
    // ------------------------------------------------------------------
    println!("\n=== polynomial selection: sequential vs pipelined ===");
    let amount = 120;
    let start = Instant::now();
    let sequential = gf2poly::generate_irrpolys(amount, u32::MAX);
    let seq_time = start.elapsed();
    let start = Instant::now();
    let parallel = gf2poly::generate_irrpolys_in_parallel(amount, u32::MAX);
    let par_time = start.elapsed();
    println!("  sequential: {} polynomials in {:?}", sequential.len(), seq_time);
    println!("  pipelined:  {} polynomials in {:?}", parallel.len(), par_time);
    println!(
        "  results identical: {}",
        if sequential == parallel { "yes" } else { "NO" }
    );

    // ------------------------------------------------------------------
    // Variant comparison
    // ------------------------------------------------------------------
    println!("\n=== classical vs modified variant, first matrix of degree 2 ===");
    for variant in [Variant::Classical, Variant::Modified] {
        let net = match Niederreiter::build(
            4,
            PolySource::Polynomials(vec![vec![1, 1, 1]]),
            variant,
        ) {
            Ok(net) => net,
            Err(e) => {
                eprintln!("construction failed: {}", e);
                return;
            }
        };
        println!("  {:?}:", variant);
        let mat = net.generating_matrix(0);
        for i in 0..mat.size() {
            println!("    {:?}", mat.row(i));
        }
    }
}
