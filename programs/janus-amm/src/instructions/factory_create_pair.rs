use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::PairCreatedEvent;
use crate::state::{Factory, Pair, VaultBumps};

#[derive(Accounts)]
pub struct CreatePair<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED_PREFIX],
        bump = factory.bump
    )]
    pub factory: Account<'info, Factory>,

    pub token0_mint: Box<Account<'info, Mint>>,
    pub token1_mint: Box<Account<'info, Mint>>,

    // The pair address is a function of the ordered mint pair, so (A, B) and
    // (B, A) collide on the same PDA and a duplicate create fails at init.
    #[account(
        init,
        payer = payer,
        space = 8 + Pair::SIZE,
        seeds = [
            PAIR_SEED_PREFIX,
            token0_mint.key().as_ref(),
            token1_mint.key().as_ref(),
        ],
        bump
    )]
    pub pair: Box<Account<'info, Pair>>,

    #[account(
        init,
        payer = payer,
        seeds = [LP_MINT_SEED_PREFIX, pair.key().as_ref()],
        bump,
        mint::decimals = LP_MINT_DECIMALS,
        mint::authority = pair,
    )]
    pub lp_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = payer,
        seeds = [
            RESERVE_VAULT_SEED_PREFIX,
            pair.key().as_ref(),
            token0_mint.key().as_ref(),
        ],
        bump,
        token::mint = token0_mint,
        token::authority = pair,
    )]
    pub reserve0_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = payer,
        seeds = [
            RESERVE_VAULT_SEED_PREFIX,
            pair.key().as_ref(),
            token1_mint.key().as_ref(),
        ],
        bump,
        token::mint = token1_mint,
        token::authority = pair,
    )]
    pub reserve1_vault: Box<Account<'info, TokenAccount>>,

    /// Receives LP shares sent back to the pair ahead of a burn.
    #[account(
        init,
        payer = payer,
        seeds = [LP_VAULT_SEED_PREFIX, pair.key().as_ref()],
        bump,
        token::mint = lp_mint,
        token::authority = pair,
    )]
    pub lp_vault: Box<Account<'info, TokenAccount>>,

    /// Unspendable sink for the first mint's minimum issuance. No instruction
    /// ever transfers out of this account.
    #[account(
        init,
        payer = payer,
        seeds = [LOCKED_LIQUIDITY_SEED_PREFIX, pair.key().as_ref()],
        bump,
        token::mint = lp_mint,
        token::authority = pair,
    )]
    pub locked_liquidity: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn create_pair(ctx: Context<CreatePair>) -> Result<()> {
    let token0 = ctx.accounts.token0_mint.key();
    let token1 = ctx.accounts.token1_mint.key();

    // Canonical order; also rejects a pair of identical mints.
    require_gt!(token1, token0, ErrorCode::InvalidTokenOrder);

    let precision_multiplier0 = 10u64
        .checked_pow(ctx.accounts.token0_mint.decimals as u32)
        .ok_or(ErrorCode::UnsupportedDecimals)?;
    let precision_multiplier1 = 10u64
        .checked_pow(ctx.accounts.token1_mint.decimals as u32)
        .ok_or(ErrorCode::UnsupportedDecimals)?;

    let vault_bumps = VaultBumps {
        reserve0: ctx.bumps.reserve0_vault,
        reserve1: ctx.bumps.reserve1_vault,
        lp_mint: ctx.bumps.lp_mint,
        lp_vault: ctx.bumps.lp_vault,
        locked_liquidity: ctx.bumps.locked_liquidity,
    };

    let pair = &mut ctx.accounts.pair;
    pair.set_inner(Pair::initialize(
        token0,
        token1,
        ctx.accounts.lp_mint.key(),
        precision_multiplier0,
        precision_multiplier1,
        Clock::get()?.unix_timestamp,
        ctx.bumps.pair,
        vault_bumps,
    ));

    let factory = &mut ctx.accounts.factory;
    require!(
        factory.all_pairs.len() < Factory::MAX_PAIRS,
        ErrorCode::FactoryFull
    );
    factory.all_pairs.push(pair.key());
    factory.pair_count = factory
        .pair_count
        .checked_add(1)
        .ok_or(ErrorCode::Overflow)?;

    emit!(PairCreatedEvent {
        pair: pair.key(),
        token0,
        token1,
        lp_mint: ctx.accounts.lp_mint.key(),
    });

    Ok(())
}
