//! Property-based tests for scheduling laws.
//!
//! Run with: `cargo test --test property`

mod engine_laws;
