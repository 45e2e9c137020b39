//! Transactional boundary around every hook invocation.
//!
//! Handlers run against a [`HookContext`] that stages state writes in memory.
//! The staged writes reach the host only after the handler succeeded, and the
//! host is then told to accept. Any error, wherever it was raised, ends in a
//! single rollback carrying the error's result code, which discards the
//! effects the host has been holding provisionally.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::constants::{BUFFER_SIZE, MAX_STATE_DATA_LEN};
use crate::errors::{HookError, ResultCode};
use crate::host::{Effect, Host, ParamStore, StateKey};

/// A write waiting for commit, with the error a refused write surfaces as.
struct StagedWrite {
    data: Option<Vec<u8>>,
    on_reject: HookError,
}

pub struct HookContext<'a, H: Host> {
    host: &'a mut H,
    staged: BTreeMap<StateKey, StagedWrite>,
}

impl<'a, H: Host> HookContext<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        Self {
            host,
            staged: BTreeMap::new(),
        }
    }

    pub fn params(&self) -> &dyn ParamStore {
        &*self.host
    }

    /// Reads a state account, seeing writes staged earlier in this invocation.
    pub fn load<T: AccountDeserialize>(&self, key: &StateKey) -> Result<Option<T>> {
        let data = match self.staged.get(key) {
            Some(staged) => staged.data.clone(),
            None => self.host.state(key),
        };

        match data {
            Some(bytes) => T::try_deserialize(&mut bytes.as_slice())
                .map(Some)
                .map_err(|err| {
                    msg!("Failed to decode hook state: {}", err);
                    error!(HookError::InternalError)
                }),
            None => Ok(None),
        }
    }

    /// Stages `value` under `key`. Entries above the host limit are refused.
    pub fn store<T: AccountSerialize>(&mut self, key: &StateKey, value: &T) -> Result<()> {
        self.store_or(key, value, HookError::InternalError)
    }

    /// Like [`Self::store`], but a host refusing the write at commit fails
    /// the invocation with `on_reject`.
    pub fn store_or<T: AccountSerialize>(
        &mut self,
        key: &StateKey,
        value: &T,
        on_reject: HookError,
    ) -> Result<()> {
        let mut data = Vec::new();
        value.try_serialize(&mut data)?;

        require!(data.len() <= MAX_STATE_DATA_LEN, HookError::InvalidRequest);

        self.staged.insert(
            *key,
            StagedWrite {
                data: Some(data),
                on_reject,
            },
        );
        Ok(())
    }

    pub fn clear(&mut self, key: &StateKey) {
        self.staged.insert(
            *key,
            StagedWrite {
                data: None,
                on_reject: HookError::InternalError,
            },
        );
    }

    /// Hands `effect` to the host, failing with `on_reject` if it is refused.
    pub fn emit(&mut self, effect: Effect, on_reject: HookError) -> Result<()> {
        self.host.emit(effect.clone()).map_err(|err| {
            msg!("Effect {:?} rejected: {}", effect, err);
            error!(on_reject)
        })
    }

    fn commit(self) -> Result<()> {
        for (key, write) in self.staged {
            self.host.set_state(&key, write.data.as_deref()).map_err(|err| {
                msg!("Failed to persist hook state: {}", err);
                error!(write.on_reject)
            })?;
        }
        Ok(())
    }
}

/// Runs `invocation` with the transaction data copied out of the host.
pub fn execute<H, F>(host: &mut H, invocation: F) -> i64
where
    H: Host,
    F: FnOnce(&mut HookContext<'_, H>, &[u8]) -> Result<&'static str>,
{
    let mut buf = [0u8; BUFFER_SIZE];

    match host.txn_data(&mut buf) {
        Ok(len) if len <= BUFFER_SIZE => transact(host, |ctx| invocation(ctx, &buf[..len])),
        Ok(len) => {
            msg!("Transaction data too long: {} bytes", len);
            settle(host, err!(HookError::InvalidTransaction))
        }
        Err(err) => {
            msg!("Failed to get transaction data: {}", err);
            settle(host, err!(HookError::InvalidTransaction))
        }
    }
}

/// Runs `invocation` and accepts or rolls back the host accordingly.
pub fn transact<H, F>(host: &mut H, invocation: F) -> i64
where
    H: Host,
    F: FnOnce(&mut HookContext<'_, H>) -> Result<&'static str>,
{
    let mut ctx = HookContext::new(host);
    let outcome = invocation(&mut ctx).and_then(|message| ctx.commit().map(|()| message));
    settle(host, outcome)
}

fn settle<H: Host>(host: &mut H, outcome: Result<&'static str>) -> i64 {
    match outcome {
        Ok(message) => {
            let code = i64::from(ResultCode::Success);
            host.accept(message, code);
            code
        }
        Err(err) => {
            let reason = HookError::from_error(&err);
            let code = i64::from(reason.result_code());
            msg!("Rolling back: {} (code {})", reason.name(), code);
            host.rollback(&reason.to_string(), code);
            code
        }
    }
}
