use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::Factory;

#[derive(Accounts)]
pub struct ConfigureFactory<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED_PREFIX],
        bump = factory.bump
    )]
    pub factory: Account<'info, Factory>,

    #[account(address = factory.owner @ ErrorCode::Unauthorized)]
    pub owner: Signer<'info>,
}

pub fn set_fee_to(ctx: Context<ConfigureFactory>, new_fee_to: Pubkey) -> Result<()> {
    ctx.accounts.factory.fee_to = new_fee_to;
    Ok(())
}

pub fn set_owner_fee_share(ctx: Context<ConfigureFactory>, new_share: u64) -> Result<()> {
    require!(
        new_share > 0 && new_share <= FEE_DENOMINATOR,
        ErrorCode::InvalidFeeShare
    );
    ctx.accounts.factory.owner_fee_share = new_share;
    Ok(())
}

pub fn set_owner(ctx: Context<ConfigureFactory>, new_owner: Pubkey) -> Result<()> {
    ctx.accounts.factory.owner = new_owner;
    Ok(())
}
