use anchor_lang::prelude::*;
use crate::context::HookContext;
use crate::errors::HookError;
use crate::host::{Asset, Direction, Effect, Host, TokenId};
use crate::state::{ActiveLoan, FlashLoanRecord, LoanReserve};
use crate::utils::{AmmMath, LoanParams};

pub fn handler<H: Host>(
    ctx: &mut HookContext<'_, H>,
    loan_amount: u64,
    token_id: TokenId,
) -> Result<()> {
    let record_key = FlashLoanRecord::key();
    let mut record: FlashLoanRecord = ctx.load(&record_key)?.unwrap_or_default();
    require!(!record.is_borrowed(), HookError::InvalidState);

    let params = LoanParams::load(ctx.params())?;
    require!(loan_amount > 0, HookError::InvalidRequest);

    // Validate against maximum loan amount
    if let Some(max_loan) = params.max_loan {
        require_gte!(max_loan, loan_amount, HookError::InvalidRequest);
    }

    // Check reserves; the same snapshot is debited below
    let reserve_key = LoanReserve::key(&token_id);
    let mut reserve: LoanReserve = ctx
        .load(&reserve_key)?
        .unwrap_or_else(|| LoanReserve::new(token_id));
    let lendable = reserve.lendable(params.reserve_ratio_bps)?;
    require_gte!(lendable, loan_amount, HookError::InsufficientFunds);

    // Calculate fee
    let fee = match params.fee_rate_bps {
        Some(fee_rate) => AmmMath::apply_bps(loan_amount, fee_rate)?,
        None => 0,
    };

    let loan = ActiveLoan {
        principal: loan_amount,
        fee,
        token_id,
    };
    let total_due = loan.total_due()?;

    reserve.debit(loan_amount)?;
    record.begin(loan)?;

    // Record loan details before any funds move
    ctx.store_or(&record_key, &record, HookError::InvalidRequest)?;
    ctx.store(&reserve_key, &reserve)?;

    // Transfer tokens to borrower
    ctx.emit(
        Effect::Transfer {
            asset: Asset::Token(token_id),
            amount: loan_amount,
            direction: Direction::ToCaller,
        },
        HookError::InvalidRequest,
    )?;

    msg!("Flash loan initiated");
    msg!("Borrowed: {} of {}", loan_amount, token_id);
    msg!("Fee: {}", fee);
    msg!("Must repay {} before the transaction completes", total_due);

    Ok(())
}
