use anchor_lang::error::Error;
use anchor_lang::prelude::*;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum HookError {
    #[msg("Malformed operation data")]
    MalformedInput,

    #[msg("Invalid operation type")]
    UnknownOperation,

    #[msg("Operation data is truncated")]
    TruncatedInput,

    #[msg("Failed to get transaction data")]
    InvalidTransaction,

    #[msg("Request violates hook policy")]
    InvalidRequest,

    #[msg("Insufficient token amount")]
    InsufficientTokens,

    #[msg("Insufficient reserves")]
    InsufficientFunds,

    #[msg("Math overflow occurred")]
    ArithmeticOverflow,

    #[msg("Operation not valid in the current loan state")]
    InvalidState,

    #[msg("Insufficient repayment")]
    RepaymentFailed,

    #[msg("Hook state is inconsistent")]
    InternalError,
}

impl HookError {
    pub const ALL: [HookError; 11] = [
        HookError::MalformedInput,
        HookError::UnknownOperation,
        HookError::TruncatedInput,
        HookError::InvalidTransaction,
        HookError::InvalidRequest,
        HookError::InsufficientTokens,
        HookError::InsufficientFunds,
        HookError::ArithmeticOverflow,
        HookError::InvalidState,
        HookError::RepaymentFailed,
        HookError::InternalError,
    ];

    /// Result code surfaced to the caller when this error aborts a hook.
    pub fn result_code(self) -> ResultCode {
        match self {
            HookError::InsufficientTokens | HookError::InsufficientFunds => {
                ResultCode::InsufficientFunds
            }
            HookError::RepaymentFailed => ResultCode::RepaymentFailed,
            HookError::MalformedInput
            | HookError::UnknownOperation
            | HookError::TruncatedInput
            | HookError::InvalidTransaction
            | HookError::InvalidRequest
            | HookError::ArithmeticOverflow
            | HookError::InvalidState
            | HookError::InternalError => ResultCode::InvalidTransaction,
        }
    }

    /// Recovers the hook error carried by an anchor error.
    ///
    /// Anything that did not originate from [`HookError`] (a program error
    /// raised by a dependency, a discriminator mismatch while decoding state)
    /// is reported as [`HookError::InternalError`].
    pub fn from_error(err: &Error) -> HookError {
        match err {
            Error::AnchorError(anchor) => Self::ALL
                .into_iter()
                .find(|candidate| u32::from(*candidate) == anchor.error_code_number)
                .unwrap_or(HookError::InternalError),
            Error::ProgramError(_) => HookError::InternalError,
        }
    }
}

/// Hook return values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ResultCode {
    Success = 0,
    InvalidTransaction = 1,
    InsufficientFunds = 2,
    RepaymentFailed = 3,
}

impl From<ResultCode> for i64 {
    fn from(code: ResultCode) -> i64 {
        code as i64
    }
}
