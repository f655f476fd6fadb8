//! Progress reporting while attempts run

pub mod reporter;
