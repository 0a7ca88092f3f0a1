//! Account state definitions

pub mod auction;
pub mod bond;
pub mod engine;
pub mod fee_vault;
pub mod mining;

pub use auction::*;
pub use bond::*;
pub use engine::*;
pub use fee_vault::*;
pub use mining::*;
