use anchor_lang::prelude::*;
use crate::context::HookContext;
use crate::errors::HookError;
use crate::host::{Asset, Direction, Effect, Host};
use crate::state::Pool;
use crate::utils::AmmParams;

pub fn handler<H: Host>(ctx: &mut HookContext<'_, H>, lp_amount: u64) -> Result<()> {
    let params = AmmParams::load(ctx.params());
    let pool_key = Pool::key(params.amm_id);
    let mut pool: Pool = ctx.load(&pool_key)?.unwrap_or_default();

    // Calculate amounts to withdraw
    let (amount_a, amount_b) = pool.quote_withdraw(lp_amount)?;

    // Burn first so a refused payout can never leave shares alive
    ctx.emit(Effect::BurnLp { amount: lp_amount }, HookError::InvalidRequest)?;

    pool.apply_withdraw(lp_amount, amount_a, amount_b)?;

    // Transfer tokens from pool to user
    for (asset, amount) in [(Asset::TokenA, amount_a), (Asset::TokenB, amount_b)] {
        ctx.emit(
            Effect::Transfer {
                asset,
                amount,
                direction: Direction::ToCaller,
            },
            HookError::InvalidRequest,
        )?;
    }

    ctx.store(&pool_key, &pool)?;

    msg!("Liquidity removed successfully");
    msg!("LP tokens burned: {}", lp_amount);
    msg!("Amount A: {}, Amount B: {}", amount_a, amount_b);

    Ok(())
}
