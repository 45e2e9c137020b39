#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use anchor_lang::AccountDeserialize;
use liquidity_hooks::constants::*;
use liquidity_hooks::host::{MemoryHost, StateKey};
use liquidity_hooks::state::{FlashLoanRecord, LoanReserve, Pool};

pub fn provide(amount_a: u64, amount_b: u64) -> Vec<u8> {
    let mut data = vec![AMM_OP_PROVIDE_LIQUIDITY];
    data.extend_from_slice(&amount_a.to_le_bytes());
    data.extend_from_slice(&amount_b.to_le_bytes());
    data
}

pub fn remove(lp_amount: u64) -> Vec<u8> {
    let mut data = vec![AMM_OP_REMOVE_LIQUIDITY];
    data.extend_from_slice(&lp_amount.to_le_bytes());
    data
}

pub fn swap(input_amount: u64, input_index: u8, min_output: u64) -> Vec<u8> {
    let mut data = vec![AMM_OP_SWAP];
    data.extend_from_slice(&input_amount.to_le_bytes());
    data.push(input_index);
    data.extend_from_slice(&min_output.to_le_bytes());
    data
}

pub fn borrow(loan_amount: u64, token_id: &Pubkey) -> Vec<u8> {
    let mut data = loan_amount.to_le_bytes().to_vec();
    data.extend_from_slice(token_id.as_ref());
    data
}

pub fn repay(repayment_amount: u64) -> Vec<u8> {
    repayment_amount.to_le_bytes().to_vec()
}

pub fn token(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

fn committed<T: AccountDeserialize>(host: &MemoryHost, key: &StateKey) -> Option<T> {
    let mut data = host.committed_state(key)?;
    Some(T::try_deserialize(&mut data).expect("committed state decodes"))
}

/// Committed pool of `amm_id`, or the empty pool when none was stored yet.
pub fn pool(host: &MemoryHost, amm_id: u64) -> Pool {
    committed(host, &Pool::key(amm_id)).unwrap_or_default()
}

pub fn loan_record(host: &MemoryHost) -> FlashLoanRecord {
    committed(host, &FlashLoanRecord::key()).unwrap_or_default()
}

pub fn reserve(host: &MemoryHost, token_id: &Pubkey) -> Option<LoanReserve> {
    committed(host, &LoanReserve::key(token_id))
}
