use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::SkimEvent;
use crate::generate_pair_seeds;
use crate::state::Pair;
use crate::utils::token::transfer_from_pair_vault;

#[derive(Accounts)]
pub struct Skim<'info> {
    #[account(
        seeds = [PAIR_SEED_PREFIX, pair.token0.as_ref(), pair.token1.as_ref()],
        bump = pair.bump
    )]
    pub pair: Account<'info, Pair>,

    #[account(
        mut,
        seeds = [
            RESERVE_VAULT_SEED_PREFIX,
            pair.key().as_ref(),
            pair.token0.as_ref(),
        ],
        bump = pair.vault_bumps.reserve0
    )]
    pub reserve0_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [
            RESERVE_VAULT_SEED_PREFIX,
            pair.key().as_ref(),
            pair.token1.as_ref(),
        ],
        bump = pair.vault_bumps.reserve1
    )]
    pub reserve1_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = pair.token0,
    )]
    pub to_token0_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = pair.token1,
    )]
    pub to_token1_account: Box<Account<'info, TokenAccount>>,

    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

/// Transfer out whatever exceeds the recorded reserves, leaving reserves
/// untouched. The counterpart of sync.
pub fn skim(ctx: Context<Skim>) -> Result<()> {
    let Skim {
        pair,
        reserve0_vault,
        reserve1_vault,
        to_token0_account,
        to_token1_account,
        user,
        token_program,
    } = ctx.accounts;
    require!(!pair.locked, ErrorCode::ReentrancyLocked);

    let amount0 = reserve0_vault
        .amount
        .checked_sub(pair.reserve0)
        .ok_or(ErrorCode::Overflow)?;
    let amount1 = reserve1_vault
        .amount
        .checked_sub(pair.reserve1)
        .ok_or(ErrorCode::Overflow)?;

    let seeds = generate_pair_seeds!(pair);
    if amount0 > 0 {
        transfer_from_pair_vault(
            pair.to_account_info(),
            reserve0_vault.to_account_info(),
            to_token0_account.to_account_info(),
            token_program.to_account_info(),
            amount0,
            &[&seeds[..]],
        )?;
    }
    if amount1 > 0 {
        transfer_from_pair_vault(
            pair.to_account_info(),
            reserve1_vault.to_account_info(),
            to_token1_account.to_account_info(),
            token_program.to_account_info(),
            amount1,
            &[&seeds[..]],
        )?;
    }

    emit!(SkimEvent {
        pair: pair.key(),
        sender: user.key(),
        amount0,
        amount1,
    });

    Ok(())
}
