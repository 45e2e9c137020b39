use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::HookError;
use crate::host::ParamStore;

/// Reads a little-endian u64 parameter; `None` when the caller did not set it.
pub fn param_u64<P: ParamStore + ?Sized>(params: &P, key: u8) -> Option<u64> {
    params.param(key).map(u64::from_le_bytes)
}

/// AMM hook configuration for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmmParams {
    /// Pool this deployment operates on
    pub amm_id: u64,
    /// Floor applied to both deposit amounts
    pub min_lp_tokens: Option<u64>,
    /// Swap fee override in basis points, as configured
    pub swap_fee_param: Option<u64>,
}

impl AmmParams {
    pub fn load<P: ParamStore + ?Sized>(params: &P) -> Self {
        Self {
            amm_id: param_u64(params, AMM_PARAM_AMM_ID).unwrap_or(DEFAULT_AMM_ID),
            min_lp_tokens: param_u64(params, AMM_PARAM_MIN_LP_TOKENS),
            swap_fee_param: param_u64(params, AMM_PARAM_SWAP_FEE_BPS),
        }
    }

    /// Effective swap fee. Only swaps price with it, so an out of range value
    /// fails swaps alone.
    pub fn swap_fee_bps(&self) -> Result<u64> {
        let fee = self.swap_fee_param.unwrap_or(DEFAULT_SWAP_FEE_BPS);
        require!(fee <= MAX_BPS, HookError::InvalidRequest);
        Ok(fee)
    }
}

/// Flash loan hook configuration for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanParams {
    pub max_loan: Option<u64>,
    /// Fee charged on the principal, in basis points
    pub fee_rate_bps: Option<u64>,
    /// Share of a reserve that may be lent out, in basis points
    pub reserve_ratio_bps: Option<u64>,
}

impl LoanParams {
    pub fn load<P: ParamStore + ?Sized>(params: &P) -> Result<Self> {
        let reserve_ratio_bps = param_u64(params, LOAN_PARAM_RESERVE_RATIO);
        if let Some(ratio) = reserve_ratio_bps {
            require!(ratio <= MAX_BPS, HookError::InvalidRequest);
        }

        Ok(Self {
            max_loan: param_u64(params, LOAN_PARAM_MAX_LOAN),
            fee_rate_bps: param_u64(params, LOAN_PARAM_FEE_RATE),
            reserve_ratio_bps,
        })
    }
}
