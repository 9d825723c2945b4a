//! Office lease vs. co-working cost calculator.
//!
//! Two itemized cost structures (monthly OpEx, annual CapEx, one-time startup
//! costs) are kept in a flat item store with heading/child links, and a pure
//! projection engine turns them into a 60 month cumulative cost series.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
