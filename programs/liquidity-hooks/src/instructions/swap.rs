use anchor_lang::prelude::*;
use crate::context::HookContext;
use crate::errors::HookError;
use crate::host::{Direction, Effect, Host};
use crate::state::{Pool, PoolSide};
use crate::utils::AmmParams;

pub fn handler<H: Host>(
    ctx: &mut HookContext<'_, H>,
    input_amount: u64,
    input_side: PoolSide,
    min_output: u64,
) -> Result<()> {
    let params = AmmParams::load(ctx.params());
    let pool_key = Pool::key(params.amm_id);
    let mut pool: Pool = ctx.load(&pool_key)?.unwrap_or_default();

    // Calculate output amount using constant product formula
    let quote = pool.quote_swap(input_amount, input_side, params.swap_fee_bps()?)?;

    // Check slippage tolerance
    require_gte!(quote.amount_out, min_output, HookError::InsufficientTokens);

    // Update pool reserves
    pool.apply_swap(&quote)?;

    ctx.emit(
        Effect::Transfer {
            asset: input_side.opposite().asset(),
            amount: quote.amount_out,
            direction: Direction::ToCaller,
        },
        HookError::InvalidRequest,
    )?;
    ctx.store(&pool_key, &pool)?;

    msg!("Swap executed successfully");
    msg!("Amount in: {}, Amount out: {}", quote.amount_in, quote.amount_out);
    msg!("Fee collected: {}", quote.fee);
    msg!("Direction: {}", if input_side == PoolSide::A { "A -> B" } else { "B -> A" });

    Ok(())
}
