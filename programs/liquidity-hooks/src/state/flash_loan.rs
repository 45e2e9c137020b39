use anchor_lang::prelude::*;
use solana_program::hash::hashv;

use crate::constants::{FLASH_LOAN_SEED, LOAN_RESERVE_SEED};
use crate::errors::HookError;
use crate::host::{StateKey, TokenId};
use crate::utils::AmmMath;

/// Terms of the loan currently outstanding.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveLoan {
    /// Amount lent to the borrower
    pub principal: u64,

    /// Fee owed on top of the principal
    pub fee: u64,

    /// Asset that was lent
    pub token_id: TokenId,
}

impl ActiveLoan {
    /// Principal plus fee, the least a repayment may carry
    pub fn total_due(&self) -> Result<u64> {
        Ok(self
            .principal
            .checked_add(self.fee)
            .ok_or(HookError::ArithmeticOverflow)?)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoanState {
    #[default]
    Idle,
    Borrowed(ActiveLoan),
}

/// Flash loan state - at most one loan is outstanding at a time
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct FlashLoanRecord {
    pub state: LoanState,
}

impl FlashLoanRecord {
    pub const LEN: usize = 8 + // discriminator
        1 + // state tag
        8 + // principal
        8 + // fee
        32; // token_id

    pub fn key() -> StateKey {
        hashv(&[FLASH_LOAN_SEED]).to_bytes()
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self.state, LoanState::Borrowed(_))
    }

    pub fn active(&self) -> Option<&ActiveLoan> {
        match &self.state {
            LoanState::Borrowed(loan) => Some(loan),
            LoanState::Idle => None,
        }
    }

    /// Idle -> Borrowed
    pub fn begin(&mut self, loan: ActiveLoan) -> Result<()> {
        require!(!self.is_borrowed(), HookError::InvalidState);

        self.state = LoanState::Borrowed(loan);
        Ok(())
    }

    /// Borrowed -> Idle, handing back the terms that were outstanding.
    pub fn settle(&mut self) -> Result<ActiveLoan> {
        match self.state {
            LoanState::Borrowed(loan) => {
                self.state = LoanState::Idle;
                Ok(loan)
            }
            LoanState::Idle => err!(HookError::InvalidState),
        }
    }
}

/// Lendable balance of one asset
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct LoanReserve {
    /// Asset held by this reserve
    pub token_id: TokenId,

    /// Amount available to lend
    pub amount: u64,

    /// Lifetime flash loan fees collected
    pub total_fees_earned: u64,
}

impl LoanReserve {
    pub const LEN: usize = 8 + // discriminator
        32 + // token_id
        8 + // amount
        8; // total_fees_earned

    pub fn new(token_id: TokenId) -> Self {
        Self {
            token_id,
            ..Self::default()
        }
    }

    pub fn key(token_id: &TokenId) -> StateKey {
        hashv(&[LOAN_RESERVE_SEED, token_id.as_ref()]).to_bytes()
    }

    /// Amount that may be lent, capped to `reserve_ratio_bps` of the balance
    /// when a ratio is configured.
    pub fn lendable(&self, reserve_ratio_bps: Option<u64>) -> Result<u64> {
        match reserve_ratio_bps {
            Some(ratio) => AmmMath::apply_bps(self.amount, ratio),
            None => Ok(self.amount),
        }
    }

    pub fn debit(&mut self, amount: u64) -> Result<()> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(HookError::InsufficientFunds)?;
        Ok(())
    }

    /// Adds `amount` to the balance; `fee` is the part of it that is income.
    pub fn credit(&mut self, amount: u64, fee: u64) -> Result<()> {
        let balance = self
            .amount
            .checked_add(amount)
            .ok_or(HookError::ArithmeticOverflow)?;
        let fees = self
            .total_fees_earned
            .checked_add(fee)
            .ok_or(HookError::ArithmeticOverflow)?;

        self.amount = balance;
        self.total_fees_earned = fees;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan() -> ActiveLoan {
        ActiveLoan {
            principal: 1000,
            fee: 9,
            token_id: Pubkey::new_from_array([5u8; 32]),
        }
    }

    #[test]
    fn test_loan_lifecycle() {
        let mut record = FlashLoanRecord::default();
        assert!(!record.is_borrowed());
        assert!(record.active().is_none());

        record.begin(loan()).unwrap();
        assert!(record.is_borrowed());
        assert_eq!(record.active().unwrap().total_due().unwrap(), 1009);

        assert_eq!(record.settle().unwrap(), loan());
        assert_eq!(record.state, LoanState::Idle);
    }

    #[test]
    fn test_state_guards() {
        let mut record = FlashLoanRecord::default();
        let err = record.settle().unwrap_err();
        assert_eq!(HookError::from_error(&err), HookError::InvalidState);

        record.begin(loan()).unwrap();
        let err = record.begin(loan()).unwrap_err();
        assert_eq!(HookError::from_error(&err), HookError::InvalidState);
        assert_eq!(record.active(), Some(&loan()));
    }

    #[test]
    fn test_total_due_overflow() {
        let loan = ActiveLoan {
            principal: u64::MAX,
            fee: 1,
            ..loan()
        };
        let err = loan.total_due().unwrap_err();
        assert_eq!(HookError::from_error(&err), HookError::ArithmeticOverflow);
    }

    #[test]
    fn test_reserve_ratio_caps_lendable() {
        let mut reserve = LoanReserve::new(Pubkey::new_from_array([1u8; 32]));
        reserve.credit(10_000, 0).unwrap();
        assert_eq!(reserve.lendable(None).unwrap(), 10_000);
        assert_eq!(reserve.lendable(Some(2_500)).unwrap(), 2_500);

        reserve.debit(4_000).unwrap();
        reserve.credit(4_040, 40).unwrap();
        assert_eq!(reserve.amount, 10_040);
        assert_eq!(reserve.total_fees_earned, 40);
        assert!(reserve.debit(10_041).is_err());
    }

    #[test]
    fn test_serialized_sizes() {
        let mut record = FlashLoanRecord::default();
        record.begin(loan()).unwrap();
        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), FlashLoanRecord::LEN);

        let decoded = FlashLoanRecord::try_deserialize(&mut data.as_slice()).unwrap();
        assert_eq!(decoded, record);

        let mut data = Vec::new();
        LoanReserve::new(loan().token_id)
            .try_serialize(&mut data)
            .unwrap();
        assert_eq!(data.len(), LoanReserve::LEN);
    }
}
