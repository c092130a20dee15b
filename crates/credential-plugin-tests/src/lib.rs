//! Shared conformance harness for keylet credential plugins.
//! Intended for use in integration tests with plugin crates.

mod capabilities;
mod contract;
mod fixtures;
mod suite;

pub use capabilities::*;
pub use contract::*;
pub use fixtures::*;
pub use suite::*;
