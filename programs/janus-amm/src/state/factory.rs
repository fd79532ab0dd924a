use anchor_lang::prelude::*;

use crate::constants::FEE_DENOMINATOR;

/// Read-only snapshot of the factory's protocol-fee parameters, captured once
/// per operation and handed to the pair engine. Keeps the engine free of
/// ambient registry state.
#[derive(Clone, Copy, Debug)]
pub struct ProtocolFeeConfig {
    pub fee_on: bool,
    pub owner_fee_share: u64,
}

impl ProtocolFeeConfig {
    pub const DISABLED: Self = Self {
        fee_on: false,
        owner_fee_share: FEE_DENOMINATOR,
    };
}

#[account]
pub struct Factory {
    pub owner: Pubkey,
    /// Protocol fee beneficiary. `Pubkey::default()` disables collection.
    pub fee_to: Pubkey,
    /// Share of swap fees diverted to `fee_to`, over FEE_DENOMINATOR.
    pub owner_fee_share: u64,
    pub pair_count: u64,
    pub all_pairs: Vec<Pubkey>, // Registry of Pair addresses
    pub bump: u8,
}

impl Factory {
    // Maximum number of pairs (for fixed storage size)
    pub const MAX_PAIRS: usize = 256;
    pub const SIZE: usize = 32 + 32 + 8 + 8 + 4 + (Self::MAX_PAIRS * 32) + 1;

    pub fn fee_config(&self) -> ProtocolFeeConfig {
        ProtocolFeeConfig {
            fee_on: self.fee_to != Pubkey::default(),
            owner_fee_share: self.owner_fee_share,
        }
    }
}
