//! Text and metadata similarity tests used by the duplicate classifier.

pub mod primitives;
