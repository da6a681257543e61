//! Sift benchmarking suite
//!
//! Benchmarks for document normalization, display formatting and
//! configuration parsing.

pub mod common;

pub use common::*;
