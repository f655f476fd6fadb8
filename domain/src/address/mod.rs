//! Address handling: variant generation for lookups.

pub mod normalizer;
