//! Common utilities for the Telegraph layout core.
//!
//! This crate provides shared infrastructure used by the DOM and CSS crates:
//! - **Warning System** - deduplicated, colored stderr diagnostics for input the
//!   pipeline tolerates but drops (bad selectors, unknown properties, malformed values)

pub mod warning;
