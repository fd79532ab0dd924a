use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::{BurnEvent, SyncEvent};
use crate::generate_pair_seeds;
use crate::instructions::commons::mint_protocol_fee;
use crate::state::{Factory, Pair};
use crate::utils::token::{token_burn, transfer_from_pair_vault};

#[derive(Accounts)]
pub struct BurnLiquidity<'info> {
    #[account(
        mut,
        seeds = [PAIR_SEED_PREFIX, pair.token0.as_ref(), pair.token1.as_ref()],
        bump = pair.bump
    )]
    pub pair: Account<'info, Pair>,

    #[account(
        seeds = [FACTORY_SEED_PREFIX],
        bump = factory.bump
    )]
    pub factory: Account<'info, Factory>,

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
        address = pair.lp_mint
    )]
    pub lp_mint: Box<Account<'info, Mint>>,

    /// The pair's own LP balance; whatever was transferred here since the
    /// last operation is what gets burned.
    #[account(
        mut,
        seeds = [LP_VAULT_SEED_PREFIX, pair.key().as_ref()],
        bump = pair.vault_bumps.lp_vault
    )]
    pub lp_vault: Box<Account<'info, TokenAccount>>,

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

    #[account(mut)]
    pub fee_to_lp_account: Option<Account<'info, TokenAccount>>,

    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> BurnLiquidity<'info> {
    pub fn validate(&self) -> Result<()> {
        require!(!self.pair.locked, ErrorCode::ReentrancyLocked);
        Ok(())
    }

    pub fn handle_burn(ctx: Context<Self>) -> Result<()> {
        let BurnLiquidity {
            pair,
            factory,
            reserve0_vault,
            reserve1_vault,
            lp_mint,
            lp_vault,
            to_token0_account,
            to_token1_account,
            fee_to_lp_account,
            user,
            token_program,
        } = ctx.accounts;

        let balance0 = reserve0_vault.amount;
        let balance1 = reserve1_vault.amount;
        let liquidity = lp_vault.amount;

        mint_protocol_fee(
            pair,
            factory,
            lp_mint.to_account_info(),
            fee_to_lp_account.as_ref(),
            token_program,
        )?;

        // Distribute actual balances, not cached reserves, so drift since the
        // last sync is shared pro-rata too.
        let (amount0, amount1) = pair.proportional_amounts(liquidity, balance0, balance1)?;
        require!(
            amount0 > 0 && amount1 > 0,
            ErrorCode::InsufficientLiquidityBurned
        );

        let seeds = generate_pair_seeds!(pair);
        token_burn(
            pair.to_account_info(),
            token_program.to_account_info(),
            lp_mint.to_account_info(),
            lp_vault.to_account_info(),
            liquidity,
            &[&seeds[..]],
        )?;

        transfer_from_pair_vault(
            pair.to_account_info(),
            reserve0_vault.to_account_info(),
            to_token0_account.to_account_info(),
            token_program.to_account_info(),
            amount0,
            &[&seeds[..]],
        )?;
        transfer_from_pair_vault(
            pair.to_account_info(),
            reserve1_vault.to_account_info(),
            to_token1_account.to_account_info(),
            token_program.to_account_info(),
            amount1,
            &[&seeds[..]],
        )?;

        pair.total_supply = pair
            .total_supply
            .checked_sub(liquidity)
            .ok_or(ErrorCode::Overflow)?;

        reserve0_vault.reload()?;
        reserve1_vault.reload()?;
        let balance0 = reserve0_vault.amount;
        let balance1 = reserve1_vault.amount;

        pair.sync_reserves(balance0, balance1, Clock::get()?.unix_timestamp);
        pair.update_k_last(&factory.fee_config())?;

        emit!(SyncEvent {
            pair: pair.key(),
            reserve0: balance0,
            reserve1: balance1,
        });
        emit!(BurnEvent {
            pair: pair.key(),
            sender: user.key(),
            amount0,
            amount1,
            to: to_token0_account.owner,
        });

        Ok(())
    }
}
