//! Shared test utilities for wglog integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Extractors built here resolve missing years against a
//! fixed reference date so expected output never depends on the clock.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
