use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::{MintEvent, SyncEvent};
use crate::generate_pair_seeds;
use crate::instructions::commons::mint_protocol_fee;
use crate::state::{Factory, Pair};
use crate::utils::token::token_mint_to;

#[derive(Accounts)]
pub struct MintLiquidity<'info> {
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

    #[account(
        mut,
        address = pair.lp_mint
    )]
    pub lp_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [LOCKED_LIQUIDITY_SEED_PREFIX, pair.key().as_ref()],
        bump = pair.vault_bumps.locked_liquidity
    )]
    pub locked_liquidity: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = pair.lp_mint,
    )]
    pub to_lp_account: Box<Account<'info, TokenAccount>>,

    /// LP account of the factory fee beneficiary; required only while
    /// protocol fee collection is enabled and fees have accrued.
    #[account(mut)]
    pub fee_to_lp_account: Option<Account<'info, TokenAccount>>,

    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> MintLiquidity<'info> {
    pub fn validate(&self) -> Result<()> {
        require!(!self.pair.locked, ErrorCode::ReentrancyLocked);
        Ok(())
    }

    /// Credits whatever was deposited into the vaults since the last sync.
    pub fn handle_mint(ctx: Context<Self>) -> Result<()> {
        let MintLiquidity {
            pair,
            factory,
            reserve0_vault,
            reserve1_vault,
            lp_mint,
            locked_liquidity,
            to_lp_account,
            fee_to_lp_account,
            user,
            token_program,
        } = ctx.accounts;

        let balance0 = reserve0_vault.amount;
        let balance1 = reserve1_vault.amount;
        let amount0 = balance0
            .checked_sub(pair.reserve0)
            .ok_or(ErrorCode::Overflow)?;
        let amount1 = balance1
            .checked_sub(pair.reserve1)
            .ok_or(ErrorCode::Overflow)?;

        // Dilute current holders in the beneficiary's favor before the new
        // deposit is priced in.
        mint_protocol_fee(
            pair,
            factory,
            lp_mint.to_account_info(),
            fee_to_lp_account.as_ref(),
            token_program,
        )?;

        let liquidity = if pair.total_supply == 0 {
            let liquidity = Pair::initial_liquidity(amount0, amount1)?;
            let seeds = generate_pair_seeds!(pair);
            token_mint_to(
                pair.to_account_info(),
                token_program.to_account_info(),
                lp_mint.to_account_info(),
                locked_liquidity.to_account_info(),
                MINIMUM_LIQUIDITY,
                &[&seeds[..]],
            )?;
            pair.total_supply = MINIMUM_LIQUIDITY;
            liquidity
        } else {
            pair.proportional_liquidity(amount0, amount1)?
        };
        require!(liquidity > 0, ErrorCode::InsufficientLiquidityMinted);

        let seeds = generate_pair_seeds!(pair);
        token_mint_to(
            pair.to_account_info(),
            token_program.to_account_info(),
            lp_mint.to_account_info(),
            to_lp_account.to_account_info(),
            liquidity,
            &[&seeds[..]],
        )?;
        pair.total_supply = pair
            .total_supply
            .checked_add(liquidity)
            .ok_or(ErrorCode::Overflow)?;

        pair.sync_reserves(balance0, balance1, Clock::get()?.unix_timestamp);
        pair.update_k_last(&factory.fee_config())?;

        emit!(SyncEvent {
            pair: pair.key(),
            reserve0: balance0,
            reserve1: balance1,
        });
        emit!(MintEvent {
            pair: pair.key(),
            sender: user.key(),
            amount0,
            amount1,
            liquidity,
        });

        Ok(())
    }
}
