//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum TreasuryError {
    // Authorization errors
    #[msg("Caller does not hold the required capability")]
    Unauthorized,

    #[msg("Capability table is full")]
    CapabilityTableFull,

    // Configuration errors
    #[msg("Component has already been configured")]
    AlreadyConfigured,

    #[msg("Component has not been configured")]
    NotConfigured,

    #[msg("Auction start time is already in the past")]
    StartTimeInPast,

    #[msg("Auction window is empty or inverted")]
    InvalidTimeWindow,

    #[msg("Weight must lie strictly between 0 and 10000 basis points")]
    InvalidWeight,

    #[msg("Basis point parameter exceeds 10000")]
    InvalidBps,

    #[msg("Engine is ossified - administrative reconfiguration is permanently disabled")]
    Ossified,

    #[msg("Reference price was updated too recently")]
    PriceUpdateTooSoon,

    #[msg("Vault operations are paused")]
    Paused,

    #[msg("Vault operations are not paused")]
    NotPaused,

    // Window / lifecycle errors
    #[msg("Auction has not started")]
    AuctionNotStarted,

    #[msg("Auction window has closed")]
    AuctionEnded,

    #[msg("Auction window has not closed yet")]
    AuctionNotEnded,

    #[msg("Auction is finalized")]
    AuctionFinalized,

    #[msg("Liquidity can only be added before the auction starts")]
    LiquidityWindowClosed,

    // Capacity / limit errors (recoverable, retry next period)
    #[msg("Daily bond capacity exceeded")]
    DailyCapExceeded,

    #[msg("Purchase exceeds the per-transaction cap")]
    PurchaseCapExceeded,

    #[msg("Reward reserve cannot cover this payout")]
    InsufficientRewardReserve,

    #[msg("No free vesting schedule slot; claim vested balances first")]
    VestingSlotsFull,

    // User input errors
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Bond asset is disabled")]
    BondAssetDisabled,

    #[msg("Mining pool is inactive")]
    PoolInactive,

    #[msg("Unstake amount exceeds staked balance")]
    InsufficientStake,

    #[msg("Pool name exceeds 32 bytes")]
    PoolNameTooLong,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Nothing to distribute")]
    NothingToDistribute,

    #[msg("Output is below the requested minimum")]
    SlippageExceeded,

    // Invariant errors (hard aborts)
    #[msg("Swap would leave the pool below the price floor")]
    PriceFloorBreached,

    #[msg("Requested amount exceeds the pending bridge balance")]
    InsufficientPendingBridge,

    #[msg("Pool reserves cannot cover this swap")]
    InsufficientReserve,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // External dependency errors
    #[msg("Swap adapter did not deliver the minimum output")]
    AdapterFillShortfall,

    #[msg("Bridge mode does not permit this operation")]
    WrongBridgeMode,

    #[msg("Invalid destination account")]
    InvalidDestination,

    #[msg("Invalid mint for this operation")]
    InvalidMint,
}
