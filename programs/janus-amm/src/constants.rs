// Fee rates are expressed over this denominator (300 = 0.3%).
pub const FEE_DENOMINATOR: u64 = 100_000;
pub const DEFAULT_FEE_PERCENT: u16 = 300;
pub const MAX_FEE_PERCENT: u16 = 2_000;

// Share of swap fees diverted to the factory fee beneficiary, over FEE_DENOMINATOR.
pub const DEFAULT_OWNER_FEE_SHARE: u64 = 50_000;

// Pair constants
pub const MINIMUM_LIQUIDITY: u64 = 1_000; // 10^3
pub const LP_MINT_DECIMALS: u8 = 9;

// Stable-curve balances are normalized to this scale before evaluating the invariant.
pub const STABLE_PRECISION: u128 = 1_000_000_000_000_000_000; // 1e18
pub const MAX_NEWTON_ITERATIONS: usize = 255;

// Global seeds for deterministic PDAs
pub const FACTORY_SEED_PREFIX: &[u8] = b"factory";
pub const PAIR_SEED_PREFIX: &[u8] = b"pair";
pub const LP_MINT_SEED_PREFIX: &[u8] = b"lp_mint";
pub const LP_VAULT_SEED_PREFIX: &[u8] = b"lp_vault";
pub const RESERVE_VAULT_SEED_PREFIX: &[u8] = b"reserve_vault";
pub const LOCKED_LIQUIDITY_SEED_PREFIX: &[u8] = b"locked_liquidity";

// Name of the callback instruction invoked on the recipient program during a
// flash swap. Anchor discriminators are the first 8 bytes of
// SHA256("global:<name>").
pub const SWAP_CALLBACK_IX_NAME: &[u8] = b"global:swap_callback";
