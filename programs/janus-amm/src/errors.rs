use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Invalid token order. token0 must be less than token1.")]
    InvalidTokenOrder,

    #[msg("Caller is not the factory owner")]
    Unauthorized,

    #[msg("Insufficient initial liquidity")]
    InsufficientInitialLiquidity,

    #[msg("Insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    #[msg("Insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    #[msg("Insufficient output amount")]
    InsufficientOutputAmount,

    #[msg("Insufficient liquidity")]
    InsufficientLiquidity,

    #[msg("Insufficient input amount")]
    InsufficientInputAmount,

    #[msg("Swap violates the curve invariant")]
    BrokenInvariant,

    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Fee percent out of range")]
    InvalidFeePercent,

    #[msg("Owner fee share out of range")]
    InvalidFeeShare,

    #[msg("Reserves do not match the expected reserves")]
    ReserveMismatch,

    #[msg("Stable swap flag already has this value")]
    StableSwapUnchanged,

    #[msg("Recipient account must not be a pair vault")]
    InvalidTo,

    #[msg("Fee recipient token account does not belong to the fee beneficiary")]
    InvalidFeeRecipient,

    #[msg("Pair is locked")]
    ReentrancyLocked,

    #[msg("Unsupported mint decimals")]
    UnsupportedDecimals,

    #[msg("Token mint does not belong to this pair")]
    InvalidInputMint,

    #[msg("Factory is full. Cannot create more pairs.")]
    FactoryFull,

    #[msg("Callback program account is required when data is non-empty")]
    MissingCallbackProgram,
}
