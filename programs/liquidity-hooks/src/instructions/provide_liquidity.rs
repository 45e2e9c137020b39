use anchor_lang::prelude::*;
use crate::context::HookContext;
use crate::errors::HookError;
use crate::host::{Effect, Host};
use crate::state::Pool;
use crate::utils::AmmParams;

pub fn handler<H: Host>(ctx: &mut HookContext<'_, H>, amount_a: u64, amount_b: u64) -> Result<()> {
    let params = AmmParams::load(ctx.params());

    // Validate minimum amounts
    if let Some(min_amount) = params.min_lp_tokens {
        require!(
            amount_a >= min_amount && amount_b >= min_amount,
            HookError::InsufficientTokens
        );
    }

    let pool_key = Pool::key(params.amm_id);
    let mut pool: Pool = ctx.load(&pool_key)?.unwrap_or_default();

    // Calculate liquidity to mint
    let liquidity = pool.quote_deposit(amount_a, amount_b)?;

    // Update pool state
    pool.apply_deposit(amount_a, amount_b, liquidity)?;

    // Mint LP tokens to user
    ctx.emit(Effect::MintLp { amount: liquidity }, HookError::InvalidRequest)?;
    ctx.store(&pool_key, &pool)?;

    msg!("Liquidity added successfully");
    msg!("Amount A: {}, Amount B: {}", amount_a, amount_b);
    msg!("LP tokens minted: {}", liquidity);

    Ok(())
}
