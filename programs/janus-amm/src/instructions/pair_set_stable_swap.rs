use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::StableSwapEvent;
use crate::instructions::commons::mint_protocol_fee;
use crate::state::{Factory, Pair};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct SetStableSwapArgs {
    pub enabled: bool,
    /// Current reserves as seen by the caller; the switch fails if they moved
    /// in the meantime, so a reconfiguration cannot be front-run onto a
    /// different price point.
    pub expected_reserve0: u64,
    pub expected_reserve1: u64,
}

#[derive(Accounts)]
pub struct SetStableSwap<'info> {
    #[account(
        seeds = [FACTORY_SEED_PREFIX],
        bump = factory.bump
    )]
    pub factory: Account<'info, Factory>,

    #[account(address = factory.owner @ ErrorCode::Unauthorized)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PAIR_SEED_PREFIX, pair.token0.as_ref(), pair.token1.as_ref()],
        bump = pair.bump
    )]
    pub pair: Account<'info, Pair>,

    #[account(
        mut,
        address = pair.lp_mint
    )]
    pub lp_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub fee_to_lp_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Atomically switch the active curve. Pending protocol fees are settled
/// under the outgoing curve and the invariant checkpoint is restarted under
/// the incoming one, so the switch never retroactively reprices settled
/// balances.
pub fn set_stable_swap(ctx: Context<SetStableSwap>, args: SetStableSwapArgs) -> Result<()> {
    let SetStableSwap {
        factory,
        pair,
        lp_mint,
        fee_to_lp_account,
        token_program,
        ..
    } = ctx.accounts;

    require!(!pair.locked, ErrorCode::ReentrancyLocked);
    require!(
        args.enabled != pair.stable_swap,
        ErrorCode::StableSwapUnchanged
    );
    require!(
        args.expected_reserve0 == pair.reserve0 && args.expected_reserve1 == pair.reserve1,
        ErrorCode::ReserveMismatch
    );

    mint_protocol_fee(
        pair,
        factory,
        lp_mint.to_account_info(),
        fee_to_lp_account.as_ref(),
        token_program,
    )?;

    pair.stable_swap = args.enabled;
    pair.anchor_reserve0 = pair.reserve0;
    pair.anchor_reserve1 = pair.reserve1;
    pair.update_k_last(&factory.fee_config())?;

    emit!(StableSwapEvent {
        pair: pair.key(),
        enabled: args.enabled,
        anchor_reserve0: pair.anchor_reserve0,
        anchor_reserve1: pair.anchor_reserve1,
    });

    Ok(())
}
