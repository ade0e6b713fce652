//! Example: exhaustive matrix-chain search.
//!
//! Run with:
//! `cargo run --example matrix_chain`

use mcm_backtrack::{ChainInstance, SearchEngine};

fn main() {
    // Example from CLRS:
    // Matrices A1..A6 with dimensions:
    // 30x35, 35x15, 15x5, 5x10, 10x20, 20x25
    let p = vec![30, 35, 15, 5, 10, 20, 25];

    let instance = ChainInstance::new(p).expect("valid dimensions");
    let outcome = SearchEngine::new(&instance)
        .run()
        .expect("search completes");

    println!("Optimal multiplication cost: {}", outcome.best_cost);
    println!("Parenthesization: {}", outcome.best_repr);
    println!("Complete parses considered: {}", outcome.accepted);
}
