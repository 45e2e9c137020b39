use anchor_lang::prelude::*;
use crate::context::HookContext;
use crate::errors::HookError;
use crate::host::{Asset, Direction, Effect, Host, TokenId};
use crate::state::LoanReserve;

/// Deposits lendable funds for `token_id`. Deployment setup, not reachable
/// from transaction data.
pub fn handler<H: Host>(ctx: &mut HookContext<'_, H>, token_id: TokenId, amount: u64) -> Result<()> {
    require!(amount > 0, HookError::InvalidRequest);

    let reserve_key = LoanReserve::key(&token_id);
    let mut reserve: LoanReserve = ctx
        .load(&reserve_key)?
        .unwrap_or_else(|| LoanReserve::new(token_id));
    reserve.credit(amount, 0)?;

    ctx.emit(
        Effect::Transfer {
            asset: Asset::Token(token_id),
            amount,
            direction: Direction::FromCaller,
        },
        HookError::InvalidRequest,
    )?;
    ctx.store(&reserve_key, &reserve)?;

    msg!("Reserve funded: {} of {}, balance {}", amount, token_id, reserve.amount);

    Ok(())
}
