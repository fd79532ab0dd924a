use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::generate_pair_seeds;
use crate::state::{Factory, Pair};
use crate::utils::token::token_mint_to;

/// Protocol fee settlement. Runs as the first step of every
/// liquidity-affecting operation: if a beneficiary is configured and the
/// invariant grew since the last checkpoint, the beneficiary is credited LP
/// shares for its portion of the growth before anything else moves.
///
/// Returns the amount of LP minted (zero when collection is disabled or the
/// pool has not grown).
pub fn mint_protocol_fee<'info>(
    pair: &mut Account<'info, Pair>,
    factory: &Account<'info, Factory>,
    lp_mint: AccountInfo<'info>,
    fee_to_lp_account: Option<&Account<'info, TokenAccount>>,
    token_program: &Program<'info, Token>,
) -> Result<u64> {
    let config = factory.fee_config();
    let fee_liquidity = pair.protocol_fee_liquidity(&config)?;
    if fee_liquidity > 0 {
        let fee_account = fee_to_lp_account.ok_or(ErrorCode::InvalidFeeRecipient)?;
        require_keys_eq!(
            fee_account.owner,
            factory.fee_to,
            ErrorCode::InvalidFeeRecipient
        );
        let seeds = generate_pair_seeds!(pair);
        token_mint_to(
            pair.to_account_info(),
            token_program.to_account_info(),
            lp_mint,
            fee_account.to_account_info(),
            fee_liquidity,
            &[&seeds[..]],
        )?;
        pair.total_supply = pair
            .total_supply
            .checked_add(fee_liquidity)
            .ok_or(ErrorCode::Overflow)?;
    }
    Ok(fee_liquidity)
}
