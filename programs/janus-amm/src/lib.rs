use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

// Re-export modules to simplify the program interface.
pub use instructions::*;
pub use state::*;

declare_id!("AY9oySjvp4WKFCgKAXbeGsMjdgVkZCf1JWE8VJiWLUgP");

#[program]
pub mod janus_amm {
    use super::*;

    // Factory instructions
    pub fn initialize_factory(ctx: Context<InitializeFactory>, owner: Pubkey) -> Result<()> {
        instructions::factory_initialize::initialize_factory(ctx, owner)
    }

    pub fn create_pair(ctx: Context<CreatePair>) -> Result<()> {
        instructions::factory_create_pair::create_pair(ctx)
    }

    pub fn set_fee_to(ctx: Context<ConfigureFactory>, new_fee_to: Pubkey) -> Result<()> {
        instructions::factory_config::set_fee_to(ctx, new_fee_to)
    }

    pub fn set_owner_fee_share(ctx: Context<ConfigureFactory>, new_share: u64) -> Result<()> {
        instructions::factory_config::set_owner_fee_share(ctx, new_share)
    }

    pub fn set_owner(ctx: Context<ConfigureFactory>, new_owner: Pubkey) -> Result<()> {
        instructions::factory_config::set_owner(ctx, new_owner)
    }

    // Pair liquidity instructions
    pub fn mint(ctx: Context<MintLiquidity>) -> Result<()> {
        ctx.accounts.validate()?;
        MintLiquidity::handle_mint(ctx)
    }

    pub fn burn(ctx: Context<BurnLiquidity>) -> Result<()> {
        ctx.accounts.validate()?;
        BurnLiquidity::handle_burn(ctx)
    }

    // Pair swap instructions
    pub fn swap<'info>(
        ctx: Context<'_, '_, '_, 'info, Swap<'info>>,
        args: SwapArgs,
    ) -> Result<()> {
        ctx.accounts.validate(&args)?;
        Swap::handle_swap(ctx, args)
    }

    pub fn get_amount_out(ctx: Context<Quote>, amount_in: u64, token_in: Pubkey) -> Result<u64> {
        instructions::pair_quote::get_amount_out(ctx, amount_in, token_in)
    }

    // Pair bookkeeping instructions
    pub fn sync(ctx: Context<Sync>) -> Result<()> {
        instructions::pair_sync::sync(ctx)
    }

    pub fn skim(ctx: Context<Skim>) -> Result<()> {
        instructions::pair_skim::skim(ctx)
    }

    // Pair configuration instructions
    pub fn set_fee_percent(
        ctx: Context<SetFeePercent>,
        fee_percent0: u16,
        fee_percent1: u16,
    ) -> Result<()> {
        instructions::pair_set_fee_percent::set_fee_percent(ctx, fee_percent0, fee_percent1)
    }

    pub fn set_stable_swap(ctx: Context<SetStableSwap>, args: SetStableSwapArgs) -> Result<()> {
        instructions::pair_set_stable_swap::set_stable_swap(ctx, args)
    }
}
