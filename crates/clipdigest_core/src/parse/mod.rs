//! Raw export parsing.
//!
//! # Responsibility
//! - Split export content into record blocks.
//! - Turn one block into a structured [`crate::model::entry::Entry`].
//! - Extract kind, location and timestamp via locale-alternative pattern
//!   tables.
//!
//! # Invariants
//! - No parser here ever fails hard on malformed input; fields degrade to
//!   `Unknown`/`None` and only degenerate blocks are skipped.

pub mod block;
pub mod metadata;
pub mod timestamp;
