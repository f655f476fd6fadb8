//! Sources and the order in which they are queried.
//!
//! - [`shape`]: API endpoint shapes ([`EndpointShape`](shape::EndpointShape))
//! - [`attempt`]: attempt enumeration ([`enumerate_attempts`](attempt::enumerate_attempts))

pub mod attempt;
pub mod shape;
