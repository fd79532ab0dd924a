use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::SyncEvent;
use crate::state::Pair;

#[derive(Accounts)]
pub struct Sync<'info> {
    #[account(
        mut,
        seeds = [PAIR_SEED_PREFIX, pair.token0.as_ref(), pair.token1.as_ref()],
        bump = pair.bump
    )]
    pub pair: Account<'info, Pair>,

    #[account(
        seeds = [
            RESERVE_VAULT_SEED_PREFIX,
            pair.key().as_ref(),
            pair.token0.as_ref(),
        ],
        bump = pair.vault_bumps.reserve0
    )]
    pub reserve0_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        seeds = [
            RESERVE_VAULT_SEED_PREFIX,
            pair.key().as_ref(),
            pair.token1.as_ref(),
        ],
        bump = pair.vault_bumps.reserve1
    )]
    pub reserve1_vault: Box<Account<'info, TokenAccount>>,
}

/// Force reserves back to the actual custodied balances. Recovers from
/// balances that drifted through direct transfers outside the mint/swap path.
pub fn sync(ctx: Context<Sync>) -> Result<()> {
    let pair = &mut ctx.accounts.pair;
    require!(!pair.locked, ErrorCode::ReentrancyLocked);

    let balance0 = ctx.accounts.reserve0_vault.amount;
    let balance1 = ctx.accounts.reserve1_vault.amount;

    pair.sync_reserves(balance0, balance1, Clock::get()?.unix_timestamp);

    emit!(SyncEvent {
        pair: pair.key(),
        reserve0: balance0,
        reserve1: balance1,
    });

    Ok(())
}
