//! # Injection Sample Library
//!
//! Components written against the injection framework, exposed for integration testing:
//!
//! - **[widget] / [cog]**: two peers that depend on each other.
//! - **[leaf]**: a Branch that owns and drives a nested Leaf wrapper.
//! - **[counter]**: a dependency reached through a trait-object interface.
//! - **[lifecycle]**: scenarios that wire, run and tear down each arrangement.

pub mod cog;
pub mod counter;
pub mod error;
pub mod leaf;
pub mod lifecycle;
pub mod widget;

pub use error::SampleError;
