//! XOM treasury engine
//!
//! On-chain treasury and liquidity distribution for the XOM token:
//! a time-weighted dutch-auction pool for initial distribution, a fee vault
//! with a fixed community/staking/protocol split, discounted bonds with
//! linear vesting, and accumulator-based liquidity mining. All engine vaults
//! are owned by a single authority PDA; a capability table on the engine
//! config gates privileged entry points.

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod state;
pub mod utils;

use instructions::*;
use state::BridgeMode;

declare_id!("ARB2BWgo5AK4aLKsN8doQWd9AM31rdUFHGnMuW95SAeb");

#[program]
pub mod xom_treasury {
    use super::*;

    // ------------------------------------------------------------------
    // Engine
    // ------------------------------------------------------------------

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::initialize_engine(ctx)
    }

    pub fn grant_capability(
        ctx: Context<ManageCapability>,
        account: Pubkey,
        capability: u32,
    ) -> Result<()> {
        instructions::capability::grant(ctx, account, capability)
    }

    pub fn revoke_capability(
        ctx: Context<ManageCapability>,
        account: Pubkey,
        capability: u32,
    ) -> Result<()> {
        instructions::capability::revoke(ctx, account, capability)
    }

    pub fn ossify(ctx: Context<ManageCapability>) -> Result<()> {
        instructions::capability::ossify(ctx)
    }

    // ------------------------------------------------------------------
    // Auction pool
    // ------------------------------------------------------------------

    pub fn initialize_auction(ctx: Context<InitializeAuction>) -> Result<()> {
        instructions::auction::initialize_auction(ctx)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn configure_auction(
        ctx: Context<ConfigureAuction>,
        start_time: i64,
        end_time: i64,
        start_weight: u16,
        end_weight: u16,
        price_floor: u128,
        max_purchase_per_tx: u64,
    ) -> Result<()> {
        instructions::auction::configure_auction(
            ctx,
            start_time,
            end_time,
            start_weight,
            end_weight,
            price_floor,
            max_purchase_per_tx,
        )
    }

    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        primary_amount: u64,
        counter_amount: u64,
    ) -> Result<()> {
        instructions::auction::add_liquidity(ctx, primary_amount, counter_amount)
    }

    pub fn auction_swap(
        ctx: Context<AuctionSwap>,
        amount_in: u64,
        min_amount_out: u64,
        primary_in: bool,
    ) -> Result<()> {
        instructions::auction::auction_swap(ctx, amount_in, min_amount_out, primary_in)
    }

    pub fn finalize_auction(ctx: Context<FinalizeAuction>) -> Result<()> {
        instructions::auction::finalize_auction(ctx)
    }

    // ------------------------------------------------------------------
    // Fee vault
    // ------------------------------------------------------------------

    pub fn initialize_fee_vault(ctx: Context<InitializeFeeVault>) -> Result<()> {
        instructions::vault_admin::initialize_fee_vault(ctx)
    }

    pub fn register_fee_token(
        ctx: Context<RegisterFeeToken>,
        bridge_mode: BridgeMode,
    ) -> Result<()> {
        instructions::vault_admin::register_fee_token(ctx, bridge_mode)
    }

    pub fn set_bridge_mode(ctx: Context<SetBridgeMode>, mode: BridgeMode) -> Result<()> {
        instructions::vault_admin::set_bridge_mode(ctx, mode)
    }

    pub fn pause(ctx: Context<SetVaultPause>) -> Result<()> {
        instructions::vault_admin::pause(ctx)
    }

    pub fn unpause(ctx: Context<SetVaultPause>) -> Result<()> {
        instructions::vault_admin::unpause(ctx)
    }

    pub fn deposit_fees(ctx: Context<DepositFees>, amount: u64) -> Result<()> {
        instructions::fee_deposit::deposit_fees(ctx, amount)
    }

    pub fn distribute(ctx: Context<Distribute>) -> Result<()> {
        instructions::fee_distribute::distribute(ctx)
    }

    pub fn bridge_to_treasury(ctx: Context<BridgeToTreasury>, amount: u64) -> Result<()> {
        instructions::fee_bridge::bridge_to_treasury(ctx, amount)
    }

    pub fn swap_and_bridge<'info>(
        ctx: Context<'_, '_, 'info, 'info, SwapAndBridge<'info>>,
        amount: u64,
        min_out: u64,
    ) -> Result<()> {
        instructions::fee_bridge::swap_and_bridge(ctx, amount, min_out)
    }

    // ------------------------------------------------------------------
    // Bonds
    // ------------------------------------------------------------------

    pub fn initialize_bond_issuer(
        ctx: Context<InitializeBondIssuer>,
        immediate_bps: u16,
    ) -> Result<()> {
        instructions::bond_admin::initialize_bond_issuer(ctx, immediate_bps)
    }

    pub fn add_bond_asset(
        ctx: Context<AddBondAsset>,
        discount_bps: u16,
        vesting_period: i64,
        daily_capacity: u64,
    ) -> Result<()> {
        instructions::bond_admin::add_bond_asset(ctx, discount_bps, vesting_period, daily_capacity)
    }

    pub fn update_bond_terms(
        ctx: Context<UpdateBondTerms>,
        enabled: bool,
        discount_bps: u16,
        vesting_period: i64,
        daily_capacity: u64,
    ) -> Result<()> {
        instructions::bond_admin::update_bond_terms(
            ctx,
            enabled,
            discount_bps,
            vesting_period,
            daily_capacity,
        )
    }

    pub fn set_reference_price(ctx: Context<SetReferencePrice>, price: u128) -> Result<()> {
        instructions::bond_admin::set_reference_price(ctx, price)
    }

    pub fn deposit_bond_reserve(ctx: Context<DepositBondReserve>, amount: u64) -> Result<()> {
        instructions::bond_admin::deposit_bond_reserve(ctx, amount)
    }

    pub fn bond(ctx: Context<Bond>, amount_in: u64) -> Result<()> {
        instructions::bond::bond(ctx, amount_in)
    }

    pub fn claim_bond_vested(ctx: Context<ClaimBondVested>) -> Result<()> {
        instructions::bond::claim_bond_vested(ctx)
    }

    // ------------------------------------------------------------------
    // Liquidity mining
    // ------------------------------------------------------------------

    pub fn initialize_mining_emitter(ctx: Context<InitializeMiningEmitter>) -> Result<()> {
        instructions::mining_admin::initialize_mining_emitter(ctx)
    }

    pub fn add_mining_pool(
        ctx: Context<AddMiningPool>,
        name: String,
        reward_per_second: u64,
        immediate_bps: u16,
        vesting_period: i64,
    ) -> Result<()> {
        instructions::mining_admin::add_mining_pool(
            ctx,
            name,
            reward_per_second,
            immediate_bps,
            vesting_period,
        )
    }

    pub fn set_reward_rate(ctx: Context<ManageMiningPool>, reward_per_second: u64) -> Result<()> {
        instructions::mining_admin::set_reward_rate(ctx, reward_per_second)
    }

    pub fn set_vesting_params(
        ctx: Context<ManageMiningPool>,
        immediate_bps: u16,
        vesting_period: i64,
    ) -> Result<()> {
        instructions::mining_admin::set_vesting_params(ctx, immediate_bps, vesting_period)
    }

    pub fn set_pool_active(ctx: Context<ManageMiningPool>, active: bool) -> Result<()> {
        instructions::mining_admin::set_pool_active(ctx, active)
    }

    pub fn deposit_mining_rewards(ctx: Context<DepositMiningRewards>, amount: u64) -> Result<()> {
        instructions::mining_admin::deposit_mining_rewards(ctx, amount)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::mining::stake(ctx, amount)
    }

    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::mining::unstake(ctx, amount)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::mining::claim_rewards(ctx)
    }

    pub fn claim_mining_vested(ctx: Context<ClaimMiningVested>) -> Result<()> {
        instructions::mining::claim_mining_vested(ctx)
    }
}
