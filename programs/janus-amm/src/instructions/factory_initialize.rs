use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::Factory;

#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + Factory::SIZE,
        seeds = [FACTORY_SEED_PREFIX],
        bump
    )]
    pub factory: Account<'info, Factory>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_factory(ctx: Context<InitializeFactory>, owner: Pubkey) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.owner = owner;
    factory.fee_to = Pubkey::default();
    factory.owner_fee_share = DEFAULT_OWNER_FEE_SHARE;
    factory.pair_count = 0;
    factory.all_pairs = Vec::new();
    factory.bump = ctx.bumps.factory;
    Ok(())
}
