//! Pure algorithmic modules. Nothing here touches accounts or performs
//! transfers; instruction handlers call in with plain values.

pub mod bond_math;
pub mod emissions;
pub mod split;
pub mod vesting;
pub mod weight;

pub use bond_math::*;
pub use emissions::*;
pub use split::*;
pub use vesting::*;
pub use weight::*;
