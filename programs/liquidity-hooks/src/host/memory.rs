//! In-memory host.
//!
//! Keeps provisional effects and state writes apart from the committed ledger
//! so a rolled back invocation leaves no trace, the same way a validator
//! discards a hook that called `rollback`.

use std::collections::BTreeMap;

use solana_program::program_error::ProgramError;

use super::{
    Effect, EffectEmitter, Outcome, ParamStore, StateKey, StateStore, TransactionSource,
};
use crate::constants::{BUFFER_SIZE, MAX_STATE_DATA_LEN, PARAM_WIDTH};

#[derive(Default)]
pub struct MemoryHost {
    txn: Option<Vec<u8>>,
    params: BTreeMap<u8, [u8; PARAM_WIDTH]>,
    state: BTreeMap<StateKey, Vec<u8>>,
    pending_state: BTreeMap<StateKey, Option<Vec<u8>>>,
    effects: Vec<Effect>,
    pending_effects: Vec<Effect>,
    outcome: Option<(i64, String)>,
    rejects: Option<fn(&Effect) -> bool>,
    rejected_writes: Option<fn(&StateKey) -> bool>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the next transaction and clears the previous outcome.
    pub fn set_txn(&mut self, data: &[u8]) {
        self.txn = Some(data.to_vec());
        self.outcome = None;
    }

    /// Simulates a host that cannot supply transaction data.
    pub fn clear_txn(&mut self) {
        self.txn = None;
        self.outcome = None;
    }

    pub fn set_param(&mut self, key: u8, value: u64) {
        self.params.insert(key, value.to_le_bytes());
    }

    pub fn clear_param(&mut self, key: u8) {
        self.params.remove(&key);
    }

    /// Makes the emitter refuse every effect matching `predicate`.
    pub fn reject_effects(&mut self, predicate: fn(&Effect) -> bool) {
        self.rejects = Some(predicate);
    }

    pub fn accept_all_effects(&mut self) {
        self.rejects = None;
    }

    /// Makes the state store refuse writes to every key matching `predicate`.
    pub fn reject_state_writes(&mut self, predicate: fn(&StateKey) -> bool) {
        self.rejected_writes = Some(predicate);
    }

    /// Committed state entry under `key`.
    pub fn committed_state(&self, key: &StateKey) -> Option<&[u8]> {
        self.state.get(key).map(Vec::as_slice)
    }

    /// Effects committed by accepted invocations, oldest first.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Code and message of the last accept or rollback.
    pub fn outcome(&self) -> Option<(i64, &str)> {
        self.outcome
            .as_ref()
            .map(|(code, message)| (*code, message.as_str()))
    }
}

impl TransactionSource for MemoryHost {
    fn txn_data(&self, buf: &mut [u8]) -> Result<usize, ProgramError> {
        let data = self.txn.as_ref().ok_or(ProgramError::InvalidInstructionData)?;
        if data.len() > buf.len() || data.len() > BUFFER_SIZE {
            return Err(ProgramError::InvalidInstructionData);
        }
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }
}

impl ParamStore for MemoryHost {
    fn param(&self, key: u8) -> Option<[u8; PARAM_WIDTH]> {
        self.params.get(&key).copied()
    }
}

impl StateStore for MemoryHost {
    fn state(&self, key: &StateKey) -> Option<Vec<u8>> {
        match self.pending_state.get(key) {
            Some(pending) => pending.clone(),
            None => self.state.get(key).cloned(),
        }
    }

    fn set_state(&mut self, key: &StateKey, data: Option<&[u8]>) -> Result<(), ProgramError> {
        if data.map_or(false, |bytes| bytes.len() > MAX_STATE_DATA_LEN) {
            return Err(ProgramError::AccountDataTooSmall);
        }
        if self.rejected_writes.map_or(false, |rejects| rejects(key)) {
            return Err(ProgramError::AccountBorrowFailed);
        }
        self.pending_state.insert(*key, data.map(<[u8]>::to_vec));
        Ok(())
    }
}

impl EffectEmitter for MemoryHost {
    fn emit(&mut self, effect: Effect) -> Result<(), ProgramError> {
        if self.rejects.map_or(false, |rejects| rejects(&effect)) {
            return Err(ProgramError::InsufficientFunds);
        }
        self.pending_effects.push(effect);
        Ok(())
    }
}

impl Outcome for MemoryHost {
    fn accept(&mut self, message: &str, code: i64) {
        for (key, data) in std::mem::take(&mut self.pending_state) {
            match data {
                Some(bytes) => self.state.insert(key, bytes),
                None => self.state.remove(&key),
            };
        }
        self.effects.append(&mut self.pending_effects);
        self.outcome = Some((code, message.to_string()));
    }

    fn rollback(&mut self, message: &str, code: i64) {
        self.pending_state.clear();
        self.pending_effects.clear();
        self.outcome = Some((code, message.to_string()));
    }
}
