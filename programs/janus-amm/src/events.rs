use anchor_lang::prelude::*;

#[event]
pub struct PairCreatedEvent {
    pub pair: Pubkey,
    pub token0: Pubkey,
    pub token1: Pubkey,
    pub lp_mint: Pubkey,
}

#[event]
pub struct SyncEvent {
    pub pair: Pubkey,
    pub reserve0: u64,
    pub reserve1: u64,
}

#[event]
pub struct MintEvent {
    pub pair: Pubkey,
    pub sender: Pubkey,
    pub amount0: u64,
    pub amount1: u64,
    pub liquidity: u64,
}

#[event]
pub struct BurnEvent {
    pub pair: Pubkey,
    pub sender: Pubkey,
    pub amount0: u64,
    pub amount1: u64,
    pub to: Pubkey,
}

#[event]
pub struct SwapEvent {
    pub pair: Pubkey,
    pub sender: Pubkey,
    pub amount0_in: u64,
    pub amount1_in: u64,
    pub amount0_out: u64,
    pub amount1_out: u64,
    pub to: Pubkey,
}

#[event]
pub struct SkimEvent {
    pub pair: Pubkey,
    pub sender: Pubkey,
    pub amount0: u64,
    pub amount1: u64,
}

#[event]
pub struct FeePercentUpdatedEvent {
    pub pair: Pubkey,
    pub fee_percent0: u16,
    pub fee_percent1: u16,
}

#[event]
pub struct StableSwapEvent {
    pub pair: Pubkey,
    pub enabled: bool,
    pub anchor_reserve0: u64,
    pub anchor_reserve1: u64,
}
