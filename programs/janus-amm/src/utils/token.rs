use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, MintTo, Transfer};

/// Outbound transfer from a pair-owned vault, signed with the pair PDA seeds.
pub fn transfer_from_pair_vault<'info>(
    pair: AccountInfo<'info>,
    from_vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from: from_vault,
                to,
                authority: pair,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Mint LP tokens; the pair PDA is the mint authority.
pub fn token_mint_to<'info>(
    pair: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token::mint_to(
        CpiContext::new_with_signer(
            token_program,
            MintTo {
                mint,
                to,
                authority: pair,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Burn LP tokens held in a pair-owned token account.
pub fn token_burn<'info>(
    pair: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    from: AccountInfo<'info>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token::burn(
        CpiContext::new_with_signer(
            token_program,
            Burn {
                mint,
                from,
                authority: pair,
            },
            signer_seeds,
        ),
        amount,
    )
}
