use anchor_lang::prelude::*;
use primitive_types::U256;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::factory::ProtocolFeeConfig;
use crate::utils::curve::Curve;
use crate::utils::math::SqrtU128;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default)]
pub struct VaultBumps {
    pub reserve0: u8,
    pub reserve1: u8,
    pub lp_mint: u8,
    pub lp_vault: u8,
    pub locked_liquidity: u8,
}

#[account]
pub struct Pair {
    // Token addresses, canonically ordered (token0 < token1)
    pub token0: Pubkey,
    pub token1: Pubkey,
    pub lp_mint: Pubkey,

    // Reserves as of the last sync
    pub reserve0: u64,
    pub reserve1: u64,
    pub block_timestamp_last: i64,

    /// Invariant value after the most recent liquidity-affecting operation.
    /// Zero while protocol fee collection is disabled.
    pub k_last: u128,

    // Per-direction input fee over FEE_DENOMINATOR
    pub fee_percent0: u16,
    pub fee_percent1: u16,

    // Curve selection
    pub stable_swap: bool,
    pub anchor_reserve0: u64,
    pub anchor_reserve1: u64,
    pub precision_multiplier0: u64,
    pub precision_multiplier1: u64,

    // LP supply mirror, kept in lockstep with lp_mint.supply
    pub total_supply: u64,

    /// Reentrancy guard, persisted to the account before the swap callback
    /// hands control to the recipient program.
    pub locked: bool,

    pub bump: u8,
    pub vault_bumps: VaultBumps,
}

impl Pair {
    pub const SIZE: usize = 32 * 3 // token0, token1, lp_mint
        + 8 * 2                    // reserves
        + 8                        // block_timestamp_last
        + 16                       // k_last
        + 2 * 2                    // fee percents
        + 1                        // stable_swap
        + 8 * 2                    // anchor reserves
        + 8 * 2                    // precision multipliers
        + 8                        // total_supply
        + 1                        // locked
        + 1                        // bump
        + 5; // vault bumps

    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        token0: Pubkey,
        token1: Pubkey,
        lp_mint: Pubkey,
        precision_multiplier0: u64,
        precision_multiplier1: u64,
        current_time: i64,
        bump: u8,
        vault_bumps: VaultBumps,
    ) -> Self {
        Self {
            token0,
            token1,
            lp_mint,

            reserve0: 0,
            reserve1: 0,
            block_timestamp_last: current_time,
            k_last: 0,

            fee_percent0: DEFAULT_FEE_PERCENT,
            fee_percent1: DEFAULT_FEE_PERCENT,

            stable_swap: false,
            anchor_reserve0: 0,
            anchor_reserve1: 0,
            precision_multiplier0,
            precision_multiplier1,

            total_supply: 0,
            locked: false,
            bump,
            vault_bumps,
        }
    }

    /// The active pricing curve as a closed variant.
    pub fn curve(&self) -> Curve {
        if self.stable_swap {
            Curve::Stable {
                precision_multiplier0: self.precision_multiplier0,
                precision_multiplier1: self.precision_multiplier1,
            }
        } else {
            Curve::ConstantProduct
        }
    }

    pub fn k(&self, balance0: u64, balance1: u64) -> Result<u128> {
        self.curve().k(balance0, balance1)
    }

    /// Quote for swapping `amount_in` of one side against current reserves.
    pub fn get_amount_out(&self, amount_in: u64, input_is_token0: bool) -> Result<u64> {
        let (reserve_in, reserve_out, fee_percent) = if input_is_token0 {
            (self.reserve0, self.reserve1, self.fee_percent0)
        } else {
            (self.reserve1, self.reserve0, self.fee_percent1)
        };
        require!(
            reserve_in > 0 && reserve_out > 0,
            ErrorCode::InsufficientLiquidity
        );
        self.curve().get_amount_out(
            amount_in,
            reserve_in,
            reserve_out,
            fee_percent as u64,
            input_is_token0,
        )
    }

    /// LP issued against the very first deposit. `MINIMUM_LIQUIDITY` of the
    /// geometric mean is withheld for the permanently locked sink.
    pub fn initial_liquidity(amount0: u64, amount1: u64) -> Result<u64> {
        let liquidity = (amount0 as u128)
            .checked_mul(amount1 as u128)
            .ok_or(ErrorCode::Overflow)?
            .sqrt()
            .ok_or(ErrorCode::Overflow)?
            .checked_sub(MINIMUM_LIQUIDITY as u128)
            .ok_or(ErrorCode::InsufficientInitialLiquidity)?;
        require!(liquidity > 0, ErrorCode::InsufficientInitialLiquidity);
        liquidity
            .try_into()
            .map_err(|_| error!(ErrorCode::Overflow))
    }

    /// LP issued against a follow-up deposit. The minimum of the two
    /// per-reserve ratios credits a skewed depositor only for the limiting
    /// asset, so existing holders are never diluted.
    pub fn proportional_liquidity(&self, amount0: u64, amount1: u64) -> Result<u64> {
        require!(
            self.reserve0 > 0 && self.reserve1 > 0,
            ErrorCode::InsufficientLiquidity
        );
        let liquidity0 = (amount0 as u128)
            .checked_mul(self.total_supply as u128)
            .ok_or(ErrorCode::Overflow)?
            / self.reserve0 as u128;
        let liquidity1 = (amount1 as u128)
            .checked_mul(self.total_supply as u128)
            .ok_or(ErrorCode::Overflow)?
            / self.reserve1 as u128;
        liquidity0
            .min(liquidity1)
            .try_into()
            .map_err(|_| error!(ErrorCode::Overflow))
    }

    /// Pro-rata share of the actual custodied balances for `liquidity` LP
    /// units. Uses balances rather than reserves so any drift since the last
    /// sync is distributed as well.
    pub fn proportional_amounts(
        &self,
        liquidity: u64,
        balance0: u64,
        balance1: u64,
    ) -> Result<(u64, u64)> {
        require!(self.total_supply > 0, ErrorCode::InsufficientLiquidity);
        let amount0 = (liquidity as u128)
            .checked_mul(balance0 as u128)
            .ok_or(ErrorCode::Overflow)?
            / self.total_supply as u128;
        let amount1 = (liquidity as u128)
            .checked_mul(balance1 as u128)
            .ok_or(ErrorCode::Overflow)?
            / self.total_supply as u128;
        Ok((
            amount0.try_into().map_err(|_| error!(ErrorCode::Overflow))?,
            amount1.try_into().map_err(|_| error!(ErrorCode::Overflow))?,
        ))
    }

    /// LP owed to the protocol beneficiary for invariant growth since
    /// `k_last`. Growth in `sqrt(k)` beyond the last checkpoint is trading
    /// fee revenue; `owner_fee_share / FEE_DENOMINATOR` of it is captured by
    /// diluting current holders.
    pub fn protocol_fee_liquidity(&self, config: &ProtocolFeeConfig) -> Result<u64> {
        if !config.fee_on || self.k_last == 0 {
            return Ok(0);
        }
        let root_k = self
            .k(self.reserve0, self.reserve1)?
            .sqrt()
            .ok_or(ErrorCode::Overflow)?;
        let root_k_last = self.k_last.sqrt().ok_or(ErrorCode::Overflow)?;
        if root_k <= root_k_last {
            return Ok(0);
        }

        // share of growth routed to the beneficiary:
        //   liquidity = total_supply * (root_k - root_k_last) * 100
        //             / (root_k * d + root_k_last * 100)
        // with d = FEE_DENOMINATOR * 100 / owner_fee_share - 100
        let d = (FEE_DENOMINATOR as u128)
            .checked_mul(100)
            .ok_or(ErrorCode::Overflow)?
            .checked_div(config.owner_fee_share as u128)
            .ok_or(ErrorCode::InvalidFeeShare)?
            .checked_sub(100)
            .ok_or(ErrorCode::InvalidFeeShare)?;
        let numerator =
            U256::from(self.total_supply) * U256::from(root_k - root_k_last) * U256::from(100u8);
        let denominator = U256::from(root_k) * U256::from(d) + U256::from(root_k_last) * U256::from(100u8);
        let liquidity = numerator / denominator;
        if liquidity > U256::from(u64::MAX) {
            return err!(ErrorCode::Overflow);
        }
        Ok(liquidity.as_u64())
    }

    /// Post-swap invariant check against the pre-swap reserves.
    pub fn check_swap_invariant(
        &self,
        balance0: u64,
        balance1: u64,
        amount0_in: u64,
        amount1_in: u64,
    ) -> Result<()> {
        self.curve().check_invariant(
            self.reserve0,
            self.reserve1,
            balance0,
            balance1,
            amount0_in,
            amount1_in,
            self.fee_percent0 as u64,
            self.fee_percent1 as u64,
        )
    }

    pub fn sync_reserves(&mut self, balance0: u64, balance1: u64, current_time: i64) {
        self.reserve0 = balance0;
        self.reserve1 = balance1;
        self.block_timestamp_last = current_time;
    }

    /// Checkpoint the invariant after a liquidity-affecting operation.
    pub fn update_k_last(&mut self, config: &ProtocolFeeConfig) -> Result<()> {
        self.k_last = if config.fee_on {
            self.k(self.reserve0, self.reserve1)?
        } else {
            0
        };
        Ok(())
    }
}

#[macro_export]
macro_rules! generate_pair_seeds {
    ($pair:expr) => {
        [
            PAIR_SEED_PREFIX,
            $pair.token0.as_ref(),
            $pair.token1.as_ref(),
            &[$pair.bump],
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    const E18: u64 = 1_000_000_000_000_000_000;
    const E9: u64 = 1_000_000_000;

    fn test_pair(reserve0: u64, reserve1: u64, total_supply: u64, precision_multiplier: u64) -> Pair {
        let token0 = Pubkey::new_unique();
        let token1 = Pubkey::new_unique();
        let mut pair = Pair::initialize(
            token0,
            token1,
            Pubkey::new_unique(),
            precision_multiplier,
            precision_multiplier,
            0,
            255,
            VaultBumps::default(),
        );
        pair.reserve0 = reserve0;
        pair.reserve1 = reserve1;
        pair.total_supply = total_supply;
        pair
    }

    fn fee_config(owner_fee_share: u64) -> ProtocolFeeConfig {
        ProtocolFeeConfig {
            fee_on: true,
            owner_fee_share,
        }
    }

    #[test]
    fn first_deposit_withholds_minimum_liquidity() {
        // sqrt(1e18 * 4e18) = 2e18 total, 1000 of it permanently locked
        let liquidity = Pair::initial_liquidity(E18, 4 * E18).unwrap();
        assert_eq!(liquidity, 2 * E18 - MINIMUM_LIQUIDITY);
        assert_eq!(liquidity + MINIMUM_LIQUIDITY, 2 * E18);
    }

    #[test]
    fn degenerate_first_deposit_is_rejected() {
        let err = Pair::initial_liquidity(1_000, 1_000).unwrap_err();
        assert_eq!(err, ErrorCode::InsufficientInitialLiquidity.into());
        let err = Pair::initial_liquidity(10, 10).unwrap_err();
        assert_eq!(err, ErrorCode::InsufficientInitialLiquidity.into());
    }

    #[test]
    fn skewed_deposit_is_credited_for_the_limiting_asset() {
        let pair = test_pair(E18, 4 * E18, 2 * E18, E18);
        // token1 side limits: 1e18 * 2e18 / 4e18 = 5e17
        let liquidity = pair.proportional_liquidity(E18, E18).unwrap();
        assert_eq!(liquidity, 5 * E18 / 10);
        // balanced deposit doubles the supply
        let liquidity = pair.proportional_liquidity(E18, 4 * E18).unwrap();
        assert_eq!(liquidity, 2 * E18);
    }

    #[test]
    fn proportional_liquidity_is_curve_independent() {
        let mut pair = test_pair(1_000 * E9, 1_000 * E9, 1_000 * E9, E9);
        let product = pair.proportional_liquidity(10 * E9, 10 * E9).unwrap();
        pair.stable_swap = true;
        let stable = pair.proportional_liquidity(10 * E9, 10 * E9).unwrap();
        assert_eq!(product, stable);
    }

    #[test]
    fn burn_returns_proportional_share_and_leaves_the_minimum() {
        let pair = test_pair(3 * E18, 3 * E18, 3 * E18, E18);
        let liquidity = 3 * E18 - MINIMUM_LIQUIDITY;
        let (amount0, amount1) = pair
            .proportional_amounts(liquidity, 3 * E18, 3 * E18)
            .unwrap();
        assert_eq!(amount0, 3 * E18 - MINIMUM_LIQUIDITY);
        assert_eq!(amount1, 3 * E18 - MINIMUM_LIQUIDITY);
        assert_eq!(3 * E18 - amount0, MINIMUM_LIQUIDITY);
        assert_eq!(3 * E18 - amount1, MINIMUM_LIQUIDITY);
    }

    #[test]
    fn quote_requires_liquidity() {
        let pair = test_pair(0, 0, 0, E18);
        let err = pair.get_amount_out(E18, true).unwrap_err();
        assert_eq!(err, ErrorCode::InsufficientLiquidity.into());
    }

    #[test]
    fn per_direction_fees_produce_asymmetric_quotes() {
        let mut pair = test_pair(10 * E18, 10 * E18, 10 * E18, E18);
        pair.fee_percent0 = 150;
        pair.fee_percent1 = 1000;
        let out0_in = pair.get_amount_out(E18, true).unwrap();
        let out1_in = pair.get_amount_out(E18, false).unwrap();
        assert_eq!(out0_in, 907851070600536436);
        assert_eq!(out1_in, 900818926296633303);
        assert_ne!(out0_in, out1_in);
    }

    #[test]
    fn exact_quote_passes_the_k_check_and_one_more_unit_fails() {
        let pair = test_pair(5 * E18, 10 * E18, 5 * E18, E18);
        let amount_in = E18;
        let out = pair.get_amount_out(amount_in, true).unwrap();
        assert_eq!(out, 1662497915624478906);

        pair.check_swap_invariant(5 * E18 + amount_in, 10 * E18 - out, amount_in, 0)
            .unwrap();
        let err = pair
            .check_swap_invariant(5 * E18 + amount_in, 10 * E18 - (out + 1), amount_in, 0)
            .unwrap_err();
        assert_eq!(err, ErrorCode::BrokenInvariant.into());
    }

    #[test]
    fn protocol_fee_is_zero_without_checkpoint_or_growth() {
        let mut pair = test_pair(1_000 * E9, 1_000 * E9, 1_000 * E9, E9);
        // no checkpoint yet
        assert_eq!(pair.protocol_fee_liquidity(&fee_config(16_666)).unwrap(), 0);
        // checkpoint at current reserves, no growth since
        pair.update_k_last(&fee_config(16_666)).unwrap();
        assert_eq!(pair.protocol_fee_liquidity(&fee_config(16_666)).unwrap(), 0);
        // disabled beneficiary never accrues
        pair.reserve0 += E9;
        assert_eq!(
            pair.protocol_fee_liquidity(&ProtocolFeeConfig::DISABLED)
                .unwrap(),
            0
        );
    }

    #[test]
    fn protocol_fee_captures_the_configured_share_of_growth() {
        // 1000/1000 (9-decimal) pool, one 1-token swap at fee 300,
        // owner share 16666 / 100000
        let mut pair = test_pair(1_000 * E9, 1_000 * E9, 1_000 * E9, E9);
        pair.update_k_last(&fee_config(16_666)).unwrap();

        let amount_in = E9;
        let out = pair.get_amount_out(amount_in, false).unwrap();
        assert_eq!(out, 996006981);
        let balance0 = pair.reserve0 - out;
        let balance1 = pair.reserve1 + amount_in;
        pair.sync_reserves(balance0, balance1, 0);

        let fee_liquidity = pair.protocol_fee_liquidity(&fee_config(16_666)).unwrap();
        assert_eq!(fee_liquidity, 249_750);
    }

    #[test]
    fn burn_after_fee_accrual_conserves_all_assets() {
        // Same scenario as above, then the depositor and the beneficiary both
        // exit. Every unit of both tokens must be accounted for.
        let mut pair = test_pair(1_000 * E9, 1_000 * E9, 1_000 * E9, E9);
        pair.update_k_last(&fee_config(16_666)).unwrap();
        let out = pair.get_amount_out(E9, false).unwrap();
        let balance0 = pair.reserve0 - out;
        let balance1 = pair.reserve1 + E9;
        pair.sync_reserves(balance0, balance1, 0);

        let fee_liquidity = pair.protocol_fee_liquidity(&fee_config(16_666)).unwrap();
        assert!(fee_liquidity > 0);
        pair.total_supply += fee_liquidity;

        // depositor burns everything but the locked minimum
        let depositor_liquidity = 1_000 * E9 - MINIMUM_LIQUIDITY;
        let (amount0, amount1) = pair
            .proportional_amounts(depositor_liquidity, balance0, balance1)
            .unwrap();
        pair.total_supply -= depositor_liquidity;
        let (balance0, balance1) = (balance0 - amount0, balance1 - amount1);

        // beneficiary burns its accrued shares
        let (fee_amount0, fee_amount1) = pair
            .proportional_amounts(fee_liquidity, balance0, balance1)
            .unwrap();
        assert!(fee_amount0 > 0 && fee_amount1 > 0);
        pair.total_supply -= fee_liquidity;
        let (balance0, balance1) = (balance0 - fee_amount0, balance1 - fee_amount1);

        // only the locked minimum's backing remains
        assert_eq!(pair.total_supply, MINIMUM_LIQUIDITY);
        assert_eq!(balance0, 1_000);
        assert_eq!(balance1, 1_002);
    }

    #[test]
    fn sync_with_unchanged_balances_is_a_no_op() {
        let mut pair = test_pair(5 * E18, 10 * E18, 5 * E18, E18);
        pair.sync_reserves(5 * E18, 10 * E18, 42);
        let (reserve0, reserve1) = (pair.reserve0, pair.reserve1);
        pair.sync_reserves(5 * E18, 10 * E18, 43);
        assert_eq!(pair.reserve0, reserve0);
        assert_eq!(pair.reserve1, reserve1);
    }

    #[test]
    fn k_last_clears_when_the_beneficiary_is_disabled() {
        let mut pair = test_pair(1_000 * E9, 1_000 * E9, 1_000 * E9, E9);
        pair.update_k_last(&fee_config(16_666)).unwrap();
        assert_eq!(pair.k_last, (1_000 * E9 as u128) * (1_000 * E9 as u128));
        pair.update_k_last(&ProtocolFeeConfig::DISABLED).unwrap();
        assert_eq!(pair.k_last, 0);
    }

    #[test]
    fn curve_selection_follows_the_stable_flag() {
        let mut pair = test_pair(10 * E18, 10 * E18, 10 * E18, E18);
        assert_eq!(pair.curve(), Curve::ConstantProduct);
        pair.stable_swap = true;
        assert_eq!(
            pair.curve(),
            Curve::Stable {
                precision_multiplier0: E18,
                precision_multiplier1: E18,
            }
        );
        // the stable curve quotes near 1:1 where constant product cannot
        pair.fee_percent0 = 300;
        let stable_out = pair.get_amount_out(E18, true).unwrap();
        assert_eq!(stable_out, 996506480231247732);
    }
}
