//! Ledger hooks for a constant-product AMM and a single-borrower flash loan.
//!
//! Both hooks run inline with transaction validation. They read the
//! transaction data and parameters from the host, work on hook-local state
//! and request mint, burn and transfer effects. An invocation either commits
//! all of its state writes and effects or, on any error, rolls back with a
//! result code and leaves nothing behind.

use anchor_lang::prelude::*;

pub mod constants;
pub mod context;
pub mod errors;
pub mod host;
pub mod instructions;
pub mod state;
pub mod utils;

use context::{execute, transact};
use host::{Host, TokenId};
use state::FlashLoanRecord;
use utils::{AmmOperation, LoanOperation};

declare_id!("Hook111111111111111111111111111111111111111");

pub mod liquidity_hooks {
    use super::*;

    /// AMM hook: provide liquidity, remove liquidity or swap
    pub fn amm_hook<H: Host>(host: &mut H) -> i64 {
        execute(host, |ctx, data| match AmmOperation::decode(data)? {
            AmmOperation::ProvideLiquidity { amount_a, amount_b } => {
                instructions::provide_liquidity::handler(ctx, amount_a, amount_b)?;
                Ok("Liquidity added")
            }
            AmmOperation::RemoveLiquidity { lp_amount } => {
                instructions::remove_liquidity::handler(ctx, lp_amount)?;
                Ok("Liquidity removed")
            }
            AmmOperation::Swap {
                input_amount,
                input_side,
                min_output,
            } => {
                instructions::swap::handler(ctx, input_amount, input_side, min_output)?;
                Ok("Swap executed")
            }
        })
    }

    /// Flash loan hook: borrows while idle, expects the repayment while a loan
    /// is outstanding
    pub fn flash_loan_hook<H: Host>(host: &mut H) -> i64 {
        execute(host, |ctx, data| {
            let record: FlashLoanRecord = ctx.load(&FlashLoanRecord::key())?.unwrap_or_default();

            let operation = if record.is_borrowed() {
                LoanOperation::decode_repay(data)?
            } else {
                LoanOperation::decode_borrow(data)?
            };

            match operation {
                LoanOperation::Borrow {
                    loan_amount,
                    token_id,
                } => {
                    instructions::borrow::handler(ctx, loan_amount, token_id)?;
                    Ok("Flash loan issued")
                }
                LoanOperation::Repay { repayment_amount } => {
                    instructions::repay::handler(ctx, repayment_amount)?;
                    Ok("Flash loan repaid")
                }
            }
        })
    }

    /// Add lendable funds for `token_id` (deployment setup)
    pub fn fund_reserve<H: Host>(host: &mut H, token_id: TokenId, amount: u64) -> i64 {
        transact(host, |ctx| {
            instructions::fund_reserve::handler(ctx, token_id, amount)?;
            Ok("Reserve funded")
        })
    }
}
