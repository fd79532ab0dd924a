use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::Pair;

#[derive(Accounts)]
pub struct Quote<'info> {
    #[account(
        seeds = [PAIR_SEED_PREFIX, pair.token0.as_ref(), pair.token1.as_ref()],
        bump = pair.bump
    )]
    pub pair: Account<'info, Pair>,
}

/// View returning the output amount a swap of `amount_in` would produce right
/// now. A swap requesting exactly this amount passes the invariant check with
/// zero slack.
pub fn get_amount_out(ctx: Context<Quote>, amount_in: u64, token_in: Pubkey) -> Result<u64> {
    let pair = &ctx.accounts.pair;
    require!(
        token_in == pair.token0 || token_in == pair.token1,
        ErrorCode::InvalidInputMint
    );
    pair.get_amount_out(amount_in, token_in == pair.token0)
}
