//! Candidate scoring and match confidence.

pub mod confidence;
pub mod scorer;
