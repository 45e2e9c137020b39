//! Capabilities the hooks consume from the ledger they run inside.
//!
//! A host hands the hook its transaction bytes and parameters, stores its
//! state, carries out the effects it requests, and finally accepts or rolls
//! back the whole invocation. Each concern is its own trait so tests can fake
//! exactly one of them; [`Host`] is implemented for anything providing all.

use anchor_lang::prelude::Pubkey;
use solana_program::program_error::ProgramError;

use crate::constants::PARAM_WIDTH;

pub mod memory;

pub use memory::MemoryHost;

/// 32-byte key of a hook state entry.
pub type StateKey = [u8; 32];

/// Opaque asset identifier, compared by exact byte equality.
pub type TokenId = Pubkey;

/// Source of the raw bytes of the triggering transaction.
pub trait TransactionSource {
    /// Copies the transaction data into `buf`, returning the number of bytes
    /// written. Data longer than `buf` is an error, never a silent truncation.
    fn txn_data(&self, buf: &mut [u8]) -> Result<usize, ProgramError>;
}

/// Caller-supplied configuration keyed by a numeric parameter id.
pub trait ParamStore {
    fn param(&self, key: u8) -> Option<[u8; PARAM_WIDTH]>;
}

/// Durable hook-local state.
pub trait StateStore {
    fn state(&self, key: &StateKey) -> Option<Vec<u8>>;

    /// Writes `data` under `key`; `None` deletes the entry.
    fn set_state(&mut self, key: &StateKey, data: Option<&[u8]>) -> Result<(), ProgramError>;
}

/// Which side of the hook account a transfer moves value towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToCaller,
    FromCaller,
}

/// Asset moved by a transfer effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    TokenA,
    TokenB,
    Token(TokenId),
}

/// Ledger effect requested by a hook. Effects stay provisional until the
/// invocation is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    MintLp { amount: u64 },
    BurnLp { amount: u64 },
    Transfer {
        asset: Asset,
        amount: u64,
        direction: Direction,
    },
}

pub trait EffectEmitter {
    fn emit(&mut self, effect: Effect) -> Result<(), ProgramError>;
}

/// Terminal outcome of an invocation.
pub trait Outcome {
    /// Commits every provisional effect and state write.
    fn accept(&mut self, message: &str, code: i64);

    /// Discards every provisional effect and state write.
    fn rollback(&mut self, message: &str, code: i64);
}

pub trait Host: TransactionSource + ParamStore + StateStore + EffectEmitter + Outcome {}

impl<T> Host for T where T: TransactionSource + ParamStore + StateStore + EffectEmitter + Outcome {}
