//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts for move generation
//! - `draw.rs` - Game status: repetition, 50-ply rule, mate and stalemate
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `proptest.rs` - Property-based tests
//! - `search.rs` - Search results against a plain minimax

mod make_unmake;
mod perft;
mod proptest;
