use anchor_lang::prelude::*;
use solana_program::hash::hashv;

use crate::constants::POOL_SEED;
use crate::errors::HookError;
use crate::host::{Asset, StateKey};
use crate::utils::AmmMath;

/// One side of the pool, encoded on the wire as index 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolSide {
    A,
    B,
}

impl PoolSide {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PoolSide::A),
            1 => Some(PoolSide::B),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            PoolSide::A => PoolSide::B,
            PoolSide::B => PoolSide::A,
        }
    }

    pub fn asset(self) -> Asset {
        match self {
            PoolSide::A => Asset::TokenA,
            PoolSide::B => Asset::TokenB,
        }
    }
}

/// Liquidity pool state
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Pool {
    /// Current reserve of token A
    pub reserve_a: u64,

    /// Current reserve of token B
    pub reserve_b: u64,

    /// Total LP tokens in circulation
    pub total_lp_supply: u64,

    /// Total swap input received in token A
    pub total_volume_a: u64,

    /// Total swap input received in token B
    pub total_volume_b: u64,

    /// Swap fees retained in token A
    pub total_fees_a: u64,

    /// Swap fees retained in token B
    pub total_fees_b: u64,
}

/// Priced swap, computed before any reserve changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    pub input_side: PoolSide,
    pub amount_in: u64,
    pub amount_out: u64,
    /// Part of the input kept as fee
    pub fee: u64,
}

impl Pool {
    pub const LEN: usize = 8 + // discriminator
        8 + // reserve_a
        8 + // reserve_b
        8 + // total_lp_supply
        8 + // total_volume_a
        8 + // total_volume_b
        8 + // total_fees_a
        8; // total_fees_b

    /// State key of the pool operated by `amm_id`.
    pub fn key(amm_id: u64) -> StateKey {
        hashv(&[POOL_SEED, &amm_id.to_le_bytes()]).to_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.total_lp_supply == 0
    }

    pub fn reserve(&self, side: PoolSide) -> u64 {
        match side {
            PoolSide::A => self.reserve_a,
            PoolSide::B => self.reserve_b,
        }
    }

    /// Either empty, or funded on both sides with shares outstanding.
    pub fn is_consistent(&self) -> bool {
        let funded = [self.reserve_a > 0, self.reserve_b > 0, self.total_lp_supply > 0];
        funded.iter().all(|&f| f) || funded.iter().all(|&f| !f)
    }

    /// `reserve_a * reserve_b`, widened so it can always be compared.
    pub fn product(&self) -> u128 {
        self.reserve_a as u128 * self.reserve_b as u128
    }

    /// LP tokens minted for depositing `amount_a` and `amount_b`.
    ///
    /// The first deposit mints the geometric mean of the two amounts. Later
    /// deposits mint the smaller of the two proportional shares; whatever the
    /// other side brings beyond that ratio stays in the pool.
    pub fn quote_deposit(&self, amount_a: u64, amount_b: u64) -> Result<u64> {
        require!(amount_a > 0 && amount_b > 0, HookError::InsufficientTokens);

        let minted = if self.is_empty() {
            AmmMath::calculate_initial_liquidity(amount_a, amount_b)?
        } else {
            AmmMath::calculate_liquidity(
                amount_a,
                amount_b,
                self.reserve_a,
                self.reserve_b,
                self.total_lp_supply,
            )?
        };

        require!(minted > 0, HookError::InsufficientTokens);
        Ok(minted)
    }

    pub fn apply_deposit(&mut self, amount_a: u64, amount_b: u64, minted: u64) -> Result<()> {
        let reserve_a = self
            .reserve_a
            .checked_add(amount_a)
            .ok_or(HookError::ArithmeticOverflow)?;
        let reserve_b = self
            .reserve_b
            .checked_add(amount_b)
            .ok_or(HookError::ArithmeticOverflow)?;
        let total_lp_supply = self
            .total_lp_supply
            .checked_add(minted)
            .ok_or(HookError::ArithmeticOverflow)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_lp_supply = total_lp_supply;
        Ok(())
    }

    /// Token amounts returned for burning `lp_amount` shares, truncated in the
    /// pool's favour.
    pub fn quote_withdraw(&self, lp_amount: u64) -> Result<(u64, u64)> {
        require!(
            lp_amount > 0 && lp_amount <= self.total_lp_supply,
            HookError::InsufficientTokens
        );

        AmmMath::calculate_withdraw_amounts(
            lp_amount,
            self.total_lp_supply,
            self.reserve_a,
            self.reserve_b,
        )
    }

    pub fn apply_withdraw(&mut self, lp_amount: u64, amount_a: u64, amount_b: u64) -> Result<()> {
        let reserve_a = self
            .reserve_a
            .checked_sub(amount_a)
            .ok_or(HookError::InternalError)?;
        let reserve_b = self
            .reserve_b
            .checked_sub(amount_b)
            .ok_or(HookError::InternalError)?;
        let total_lp_supply = self
            .total_lp_supply
            .checked_sub(lp_amount)
            .ok_or(HookError::InternalError)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_lp_supply = total_lp_supply;
        Ok(())
    }

    pub fn quote_swap(&self, amount_in: u64, input_side: PoolSide, fee_bps: u64) -> Result<SwapQuote> {
        require!(amount_in > 0, HookError::InsufficientTokens);
        require!(!self.is_empty(), HookError::InsufficientTokens);

        let amounts = AmmMath::get_amount_out(
            amount_in,
            self.reserve(input_side),
            self.reserve(input_side.opposite()),
            fee_bps,
        )?;

        Ok(SwapQuote {
            input_side,
            amount_in,
            amount_out: amounts.amount_out,
            fee: amount_in - amounts.effective_input,
        })
    }

    pub fn apply_swap(&mut self, quote: &SwapQuote) -> Result<()> {
        let mut next = self.clone();
        let (reserve_in, reserve_out, volume_in, fees_in) = match quote.input_side {
            PoolSide::A => (
                &mut next.reserve_a,
                &mut next.reserve_b,
                &mut next.total_volume_a,
                &mut next.total_fees_a,
            ),
            PoolSide::B => (
                &mut next.reserve_b,
                &mut next.reserve_a,
                &mut next.total_volume_b,
                &mut next.total_fees_b,
            ),
        };

        *reserve_in = reserve_in
            .checked_add(quote.amount_in)
            .ok_or(HookError::ArithmeticOverflow)?;
        *reserve_out = reserve_out
            .checked_sub(quote.amount_out)
            .ok_or(HookError::InternalError)?;
        *volume_in = volume_in
            .checked_add(quote.amount_in)
            .ok_or(HookError::ArithmeticOverflow)?;
        *fees_in = fees_in
            .checked_add(quote.fee)
            .ok_or(HookError::ArithmeticOverflow)?;

        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn hook_error(err: Error) -> HookError {
        HookError::from_error(&err)
    }

    fn seeded(amount_a: u64, amount_b: u64) -> Pool {
        let mut pool = Pool::default();
        let minted = pool.quote_deposit(amount_a, amount_b).unwrap();
        pool.apply_deposit(amount_a, amount_b, minted).unwrap();
        pool
    }

    #[test]
    fn test_seed_uses_geometric_mean() {
        let pool = seeded(1000, 1000);
        assert_eq!(pool.total_lp_supply, 1000);
        assert_eq!((pool.reserve_a, pool.reserve_b), (1000, 1000));

        let pool = seeded(400, 900);
        assert_eq!(pool.total_lp_supply, 600);
    }

    #[test]
    fn test_excess_side_is_retained() {
        let mut pool = seeded(1000, 1000);
        let minted = pool.quote_deposit(100, 300).unwrap();
        assert_eq!(minted, 100);

        pool.apply_deposit(100, 300, minted).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b), (1100, 1300));
        assert_eq!(pool.total_lp_supply, 1100);
    }

    #[test]
    fn test_deposit_rejects_zero_and_dust() {
        let pool = Pool::default();
        assert_eq!(
            hook_error(pool.quote_deposit(0, 10).unwrap_err()),
            HookError::InsufficientTokens
        );

        let pool = seeded(1_000_000, 1_000_000);
        // 1 * 1000 / 1_000_000 rounds to zero shares.
        let pool = Pool {
            total_lp_supply: 1000,
            ..pool
        };
        assert_eq!(
            hook_error(pool.quote_deposit(1, 1).unwrap_err()),
            HookError::InsufficientTokens
        );
    }

    #[test]
    fn test_withdraw_bounds() {
        let pool = seeded(1000, 1000);
        assert!(pool.quote_withdraw(0).is_err());
        assert!(pool.quote_withdraw(1001).is_err());
        assert_eq!(pool.quote_withdraw(1000).unwrap(), (1000, 1000));
    }

    #[test]
    fn test_full_withdraw_empties_pool() {
        let mut pool = seeded(1234, 567);
        let lp = pool.total_lp_supply;
        let (a, b) = pool.quote_withdraw(lp).unwrap();
        pool.apply_withdraw(lp, a, b).unwrap();
        assert_eq!(pool.reserve_a, 0);
        assert_eq!(pool.reserve_b, 0);
        assert!(pool.is_empty());
        assert!(pool.is_consistent());
    }

    #[test]
    fn test_swap_scenario() {
        let mut pool = seeded(1000, 1000);
        let quote = pool.quote_swap(100, PoolSide::A, 30).unwrap();
        assert_eq!(quote.amount_out, 90);
        assert_eq!(quote.fee, 1);

        let before = pool.product();
        pool.apply_swap(&quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b), (1100, 910));
        assert_eq!(pool.total_lp_supply, 1000);
        assert_eq!(pool.total_volume_a, 100);
        assert_eq!(pool.total_fees_a, 1);
        assert!(pool.product() >= before);
    }

    #[test]
    fn test_swap_b_to_a() {
        let mut pool = seeded(1000, 1000);
        let quote = pool.quote_swap(100, PoolSide::B, 30).unwrap();
        pool.apply_swap(&quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b), (910, 1100));
        assert_eq!(pool.total_volume_b, 100);
    }

    #[test]
    fn test_dust_swap_prices_to_zero() {
        // 1 in at 30 bps leaves no effective input; the whole input is fee.
        let mut pool = seeded(1000, 1000);
        let quote = pool.quote_swap(1, PoolSide::A, 30).unwrap();
        assert_eq!(quote.amount_out, 0);
        assert_eq!(quote.fee, 1);

        pool.apply_swap(&quote).unwrap();
        assert_eq!((pool.reserve_a, pool.reserve_b), (1001, 1000));
        assert_eq!(pool.total_fees_a, 1);
        assert!(pool.is_consistent());
    }

    #[test]
    fn test_swap_on_empty_pool() {
        let pool = Pool::default();
        assert_eq!(
            hook_error(pool.quote_swap(100, PoolSide::A, 30).unwrap_err()),
            HookError::InsufficientTokens
        );
    }

    #[test]
    fn test_swap_overflow_leaves_pool_untouched() {
        let mut pool = seeded(1000, 1000);
        let quote = SwapQuote {
            input_side: PoolSide::A,
            amount_in: u64::MAX,
            amount_out: 1,
            fee: 0,
        };
        let before = pool.clone();
        assert_eq!(
            hook_error(pool.apply_swap(&quote).unwrap_err()),
            HookError::ArithmeticOverflow
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn test_pool_keys_are_per_amm() {
        assert_ne!(Pool::key(0), Pool::key(1));
        assert_eq!(Pool::key(7), Pool::key(7));
    }
}
