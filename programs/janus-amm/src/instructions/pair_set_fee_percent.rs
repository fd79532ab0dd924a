use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::FeePercentUpdatedEvent;
use crate::state::{Factory, Pair};

#[derive(Accounts)]
pub struct SetFeePercent<'info> {
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
}

pub fn set_fee_percent(
    ctx: Context<SetFeePercent>,
    fee_percent0: u16,
    fee_percent1: u16,
) -> Result<()> {
    require!(
        fee_percent0 > 0 && fee_percent0 <= MAX_FEE_PERCENT,
        ErrorCode::InvalidFeePercent
    );
    require!(
        fee_percent1 > 0 && fee_percent1 <= MAX_FEE_PERCENT,
        ErrorCode::InvalidFeePercent
    );

    let pair = &mut ctx.accounts.pair;
    pair.fee_percent0 = fee_percent0;
    pair.fee_percent1 = fee_percent1;

    emit!(FeePercentUpdatedEvent {
        pair: pair.key(),
        fee_percent0,
        fee_percent1,
    });

    Ok(())
}
