//! Text canonicalization for comparison.
//!
//! # Responsibility
//! - Produce the comparison-only form of passage text.
//! - Split normalized text into clause-level fragments.
//!
//! # Invariants
//! - Normalization is pure and total; same input, same output.
//! - A non-empty normalized string always yields at least one clause.

pub mod compare;
