use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    program::invoke,
    program_error::ProgramError,
};
use anchor_lang::AccountsExit;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::{SwapEvent, SyncEvent};
use crate::generate_pair_seeds;
use crate::state::Pair;
use crate::utils::token::transfer_from_pair_vault;

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct SwapArgs {
    pub amount0_out: u64,
    pub amount1_out: u64,
    /// Opaque payload forwarded to the recipient callback. Non-empty data
    /// turns the swap into a flash swap.
    pub data: Vec<u8>,
}

/// Instruction data handed to the callback program. The recipient is expected
/// to have sourced the required input payment by the time the callback
/// returns.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct SwapCallbackData {
    pub initiator: Pubkey,
    pub amount0_out: u64,
    pub amount1_out: u64,
    pub data: Vec<u8>,
}

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(
        mut,
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
        constraint = to_token0_account.key() != reserve0_vault.key() @ ErrorCode::InvalidTo,
    )]
    pub to_token0_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = pair.token1,
        constraint = to_token1_account.key() != reserve1_vault.key() @ ErrorCode::InvalidTo,
    )]
    pub to_token1_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: recipient program invoked with the swap callback when `data`
    /// is non-empty
    pub callback_program: Option<UncheckedAccount<'info>>,

    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Swap<'info> {
    pub fn validate(&self, args: &SwapArgs) -> Result<()> {
        require!(!self.pair.locked, ErrorCode::ReentrancyLocked);
        require!(
            args.amount0_out > 0 || args.amount1_out > 0,
            ErrorCode::InsufficientOutputAmount
        );
        require!(
            args.amount0_out < self.pair.reserve0 && args.amount1_out < self.pair.reserve1,
            ErrorCode::InsufficientLiquidity
        );
        Ok(())
    }

    /// Optimistic-transfer swap: outputs leave first, the payment is only
    /// verified against the curve afterwards. The invariant check is the sole
    /// defense against underpayment, so its rounding mirrors `get_amount_out`
    /// exactly.
    pub fn handle_swap(ctx: Context<'_, '_, '_, 'info, Self>, args: SwapArgs) -> Result<()> {
        let Swap {
            pair,
            reserve0_vault,
            reserve1_vault,
            to_token0_account,
            to_token1_account,
            callback_program,
            user,
            token_program,
        } = ctx.accounts;
        let SwapArgs {
            amount0_out,
            amount1_out,
            data,
        } = args;

        // Persist the guard before any funds move; a reentrant call observes
        // it even though this instruction has not finished.
        pair.locked = true;
        pair.exit(&crate::ID)?;

        let seeds = generate_pair_seeds!(pair);
        if amount0_out > 0 {
            transfer_from_pair_vault(
                pair.to_account_info(),
                reserve0_vault.to_account_info(),
                to_token0_account.to_account_info(),
                token_program.to_account_info(),
                amount0_out,
                &[&seeds[..]],
            )?;
        }
        if amount1_out > 0 {
            transfer_from_pair_vault(
                pair.to_account_info(),
                reserve1_vault.to_account_info(),
                to_token1_account.to_account_info(),
                token_program.to_account_info(),
                amount1_out,
                &[&seeds[..]],
            )?;
        }

        if !data.is_empty() {
            let callback_program = callback_program
                .as_ref()
                .ok_or(ErrorCode::MissingCallbackProgram)?;

            let callback_data = SwapCallbackData {
                initiator: user.key(),
                amount0_out,
                amount1_out,
                data,
            };
            let payload = callback_data
                .try_to_vec()
                .map_err(|_| ProgramError::InvalidInstructionData)?;
            let discriminator = &hash(SWAP_CALLBACK_IX_NAME).to_bytes()[..8];
            let mut instruction_data = Vec::with_capacity(8 + payload.len());
            instruction_data.extend_from_slice(discriminator);
            instruction_data.extend_from_slice(&payload);

            let mut account_metas = vec![
                AccountMeta::new_readonly(user.key(), true),
                AccountMeta::new(to_token0_account.key(), false),
                AccountMeta::new(to_token1_account.key(), false),
            ];
            for acc in ctx.remaining_accounts.iter() {
                account_metas.push(AccountMeta {
                    pubkey: acc.key(),
                    is_signer: acc.is_signer,
                    is_writable: acc.is_writable,
                });
            }
            account_metas.push(AccountMeta::new_readonly(token_program.key(), false));

            let callback_instruction = Instruction {
                program_id: callback_program.key(),
                accounts: account_metas,
                data: instruction_data,
            };

            let base_accounts = &[
                user.to_account_info(),
                to_token0_account.to_account_info(),
                to_token1_account.to_account_info(),
                token_program.to_account_info(),
            ];
            let all_accounts = [base_accounts, ctx.remaining_accounts].concat();
            invoke(&callback_instruction, &all_accounts)?;
        }

        // Balances are re-read fresh after the callback, so anything the
        // recipient paid in (or failed to pay) is accounted for here.
        reserve0_vault.reload()?;
        reserve1_vault.reload()?;
        let balance0 = reserve0_vault.amount;
        let balance1 = reserve1_vault.amount;

        let amount0_in = balance0.saturating_sub(pair.reserve0 - amount0_out);
        let amount1_in = balance1.saturating_sub(pair.reserve1 - amount1_out);
        require!(
            amount0_in > 0 || amount1_in > 0,
            ErrorCode::InsufficientInputAmount
        );

        pair.check_swap_invariant(balance0, balance1, amount0_in, amount1_in)?;

        pair.locked = false;
        pair.sync_reserves(balance0, balance1, Clock::get()?.unix_timestamp);

        emit!(SyncEvent {
            pair: pair.key(),
            reserve0: balance0,
            reserve1: balance1,
        });
        emit!(SwapEvent {
            pair: pair.key(),
            sender: user.key(),
            amount0_in,
            amount1_in,
            amount0_out,
            amount1_out,
            to: if amount0_out > 0 {
                to_token0_account.owner
            } else {
                to_token1_account.owner
            },
        });

        Ok(())
    }
}
