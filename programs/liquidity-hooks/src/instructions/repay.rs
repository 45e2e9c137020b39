use anchor_lang::prelude::*;
use crate::context::HookContext;
use crate::errors::HookError;
use crate::host::{Asset, Direction, Effect, Host};
use crate::state::{FlashLoanRecord, LoanReserve};

pub fn handler<H: Host>(ctx: &mut HookContext<'_, H>, repayment_amount: u64) -> Result<()> {
    let record_key = FlashLoanRecord::key();
    let mut record: FlashLoanRecord = ctx.load(&record_key)?.unwrap_or_default();

    // Borrowed -> Idle; only written back once the repayment went through
    let loan = record.settle()?;

    // Validate repayment amount
    let total_due = loan.total_due()?;
    require_gte!(repayment_amount, total_due, HookError::RepaymentFailed);

    // Process repayment
    ctx.emit(
        Effect::Transfer {
            asset: Asset::Token(loan.token_id),
            amount: repayment_amount,
            direction: Direction::FromCaller,
        },
        HookError::RepaymentFailed,
    )?;

    let reserve_key = LoanReserve::key(&loan.token_id);
    let mut reserve: LoanReserve = ctx
        .load(&reserve_key)?
        .ok_or(HookError::InternalError)?;
    reserve.credit(repayment_amount, loan.fee)?;

    ctx.store(&reserve_key, &reserve)?;
    ctx.clear(&record_key);

    msg!("Flash loan repaid successfully");
    msg!("Repaid: {} of {}", repayment_amount, loan.token_id);
    msg!("Fee collected: {}", loan.fee);

    Ok(())
}
