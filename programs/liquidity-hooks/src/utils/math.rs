use anchor_lang::prelude::*;
use crate::constants::MAX_BPS;
use crate::errors::HookError;

/// AMM math utilities using constant product formula (x * y = k).
///
/// Everything is computed in u64 with checked operations: an intermediate
/// value that does not fit is an `ArithmeticOverflow`, never a wrapped or
/// widened result, so every validator reproduces the same outcome.
pub struct AmmMath;

/// Output of the constant product pricing for one swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAmounts {
    /// Input left after the fee is taken
    pub effective_input: u64,
    /// Amount paid out of the opposite reserve
    pub amount_out: u64,
}

impl AmmMath {
    /// Calculate output amount given input using constant product formula.
    ///
    /// `effective = amount_in * (MAX_BPS - fee_bps) / MAX_BPS`, then the new
    /// output reserve is `ceil(reserve_in * reserve_out / (reserve_in + effective))`
    /// and the trader receives the difference. Rounding the new reserve up
    /// keeps every remainder in the pool.
    pub fn get_amount_out(
        amount_in: u64,
        reserve_in: u64,
        reserve_out: u64,
        fee_bps: u64,
    ) -> Result<SwapAmounts> {
        require!(fee_bps <= MAX_BPS, HookError::InvalidRequest);
        require!(reserve_in > 0 && reserve_out > 0, HookError::InsufficientTokens);

        let effective_input = Self::apply_bps(amount_in, MAX_BPS - fee_bps)?;

        let k = reserve_in
            .checked_mul(reserve_out)
            .ok_or(HookError::ArithmeticOverflow)?;

        let denominator = reserve_in
            .checked_add(effective_input)
            .ok_or(HookError::ArithmeticOverflow)?;

        let new_reserve_out = Self::div_ceil(k, denominator)?;

        let amount_out = reserve_out
            .checked_sub(new_reserve_out)
            .ok_or(HookError::ArithmeticOverflow)?;

        Ok(SwapAmounts {
            effective_input,
            amount_out,
        })
    }

    /// Calculate liquidity tokens to mint for initial deposit
    /// Formula: sqrt(amount_a * amount_b)
    pub fn calculate_initial_liquidity(amount_a: u64, amount_b: u64) -> Result<u64> {
        let product = amount_a
            .checked_mul(amount_b)
            .ok_or(HookError::ArithmeticOverflow)?;

        Ok(Self::sqrt(product))
    }

    /// Calculate liquidity tokens for subsequent deposits
    /// Formula: min(amount_a * total_supply / reserve_a, amount_b * total_supply / reserve_b)
    pub fn calculate_liquidity(
        amount_a: u64,
        amount_b: u64,
        reserve_a: u64,
        reserve_b: u64,
        total_supply: u64,
    ) -> Result<u64> {
        require!(reserve_a > 0 && reserve_b > 0, HookError::InsufficientTokens);

        let liquidity_a = amount_a
            .checked_mul(total_supply)
            .ok_or(HookError::ArithmeticOverflow)?
            / reserve_a;

        let liquidity_b = amount_b
            .checked_mul(total_supply)
            .ok_or(HookError::ArithmeticOverflow)?
            / reserve_b;

        Ok(std::cmp::min(liquidity_a, liquidity_b))
    }

    /// Calculate amounts to withdraw given liquidity tokens
    pub fn calculate_withdraw_amounts(
        liquidity: u64,
        total_supply: u64,
        reserve_a: u64,
        reserve_b: u64,
    ) -> Result<(u64, u64)> {
        require!(total_supply > 0, HookError::InsufficientTokens);

        let amount_a = reserve_a
            .checked_mul(liquidity)
            .ok_or(HookError::ArithmeticOverflow)?
            / total_supply;

        let amount_b = reserve_b
            .checked_mul(liquidity)
            .ok_or(HookError::ArithmeticOverflow)?
            / total_supply;

        Ok((amount_a, amount_b))
    }

    /// Apply basis points to an amount, truncating
    pub fn apply_bps(amount: u64, bps: u64) -> Result<u64> {
        let scaled = amount
            .checked_mul(bps)
            .ok_or(HookError::ArithmeticOverflow)?;

        Ok(scaled / MAX_BPS)
    }

    /// Division rounding towards positive infinity
    pub fn div_ceil(numerator: u64, denominator: u64) -> Result<u64> {
        require!(denominator > 0, HookError::ArithmeticOverflow);

        let quotient = numerator / denominator;
        if numerator % denominator == 0 {
            Ok(quotient)
        } else {
            Ok(quotient + 1)
        }
    }

    /// Integer square root using Newton's method
    pub fn sqrt(y: u64) -> u64 {
        if y == 0 {
            return 0;
        }

        let mut z = y;
        let mut x = y / 2 + 1;

        while x < z {
            z = x;
            x = (y / x + x) / 2;
        }

        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn hook_error(err: Error) -> HookError {
        HookError::from_error(&err)
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(AmmMath::sqrt(0), 0);
        assert_eq!(AmmMath::sqrt(1), 1);
        assert_eq!(AmmMath::sqrt(3), 1);
        assert_eq!(AmmMath::sqrt(4), 2);
        assert_eq!(AmmMath::sqrt(99), 9);
        assert_eq!(AmmMath::sqrt(10000), 100);
        assert_eq!(AmmMath::sqrt(1_000_000), 1000);
        assert_eq!(AmmMath::sqrt(u64::MAX), 4_294_967_295);
    }

    #[test]
    fn test_get_amount_out() {
        // 100 in at 30 bps: 100 * 9970 / 10000 = 99 effective.
        // New reserve out: ceil(1_000_000 / 1099) = 910, so 90 out.
        let amounts = AmmMath::get_amount_out(100, 1000, 1000, 30).unwrap();
        assert_eq!(amounts.effective_input, 99);
        assert_eq!(amounts.amount_out, 90);
    }

    #[test]
    fn test_get_amount_out_without_fee() {
        let amounts = AmmMath::get_amount_out(1000, 1000, 1000, 0).unwrap();
        assert_eq!(amounts.effective_input, 1000);
        assert_eq!(amounts.amount_out, 500);
    }

    #[test]
    fn test_get_amount_out_overflow() {
        let err = AmmMath::get_amount_out(u64::MAX, 1000, 1000, 30).unwrap_err();
        assert_eq!(hook_error(err), HookError::ArithmeticOverflow);

        let err = AmmMath::get_amount_out(1, u64::MAX / 2, 3, 30).unwrap_err();
        assert_eq!(hook_error(err), HookError::ArithmeticOverflow);
    }

    #[test]
    fn test_get_amount_out_rejects_fee_above_max() {
        let err = AmmMath::get_amount_out(100, 1000, 1000, MAX_BPS + 1).unwrap_err();
        assert_eq!(hook_error(err), HookError::InvalidRequest);
    }

    #[test]
    fn test_liquidity_takes_limiting_side() {
        // Pool 1000/2000 with 1000 shares; a 100/100 deposit is limited by B.
        let minted = AmmMath::calculate_liquidity(100, 100, 1000, 2000, 1000).unwrap();
        assert_eq!(minted, 50);
    }

    #[test]
    fn test_withdraw_truncates() {
        let (a, b) = AmmMath::calculate_withdraw_amounts(1, 3, 10, 11).unwrap();
        assert_eq!((a, b), (3, 3));
    }

    #[test]
    fn test_initial_liquidity_overflow() {
        let err = AmmMath::calculate_initial_liquidity(u64::MAX, 2).unwrap_err();
        assert_eq!(hook_error(err), HookError::ArithmeticOverflow);
    }

    #[test]
    fn test_div_ceil() {
        assert_eq!(AmmMath::div_ceil(10, 5).unwrap(), 2);
        assert_eq!(AmmMath::div_ceil(11, 5).unwrap(), 3);
        assert_eq!(AmmMath::div_ceil(0, 5).unwrap(), 0);
        assert!(AmmMath::div_ceil(1, 0).is_err());
    }
}
