//! Per-upload processing pipeline: sniff content type, extract raw text,
//! normalize for vectorization.

pub mod extract;
pub mod normalize;
pub mod sniff;
