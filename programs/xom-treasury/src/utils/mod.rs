//! Shared math and CPI helpers

pub mod math;
pub mod transfers;

pub use math::*;
pub use transfers::*;
