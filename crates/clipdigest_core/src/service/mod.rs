//! Digest use-case facade.
//!
//! # Responsibility
//! - Orchestrate parsing and deduplication into the single core entry
//!   point callers consume.

pub mod digest;
