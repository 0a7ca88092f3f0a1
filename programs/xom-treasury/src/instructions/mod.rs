// Engine setup and authorization
pub mod capability;
pub mod initialize;

// Dutch-auction liquidity bootstrapping
pub mod auction;

// Fee collection, split, and bridging
pub mod fee_bridge;
pub mod fee_deposit;
pub mod fee_distribute;
pub mod vault_admin;

// Discount bonds
pub mod bond;
pub mod bond_admin;

// Liquidity mining
pub mod mining;
pub mod mining_admin;

pub use auction::*;
pub use bond::*;
pub use bond_admin::*;
pub use capability::*;
pub use fee_bridge::*;
pub use fee_deposit::*;
pub use fee_distribute::*;
pub use initialize::*;
pub use mining::*;
pub use mining_admin::*;
pub use vault_admin::*;
