//! Application-level configuration.
//!
//! - [`ResolutionConfig`]: attempt timeout, enumeration order and match
//!   policy for [`ResolvePropertyUseCase`](crate::use_cases::resolve_property::ResolvePropertyUseCase)

pub mod resolution_config;

pub use resolution_config::ResolutionConfig;
