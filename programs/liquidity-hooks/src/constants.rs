/// Size of the buffer the transaction data is copied into
pub const BUFFER_SIZE: usize = 1024;

/// Width of every hook parameter value (little-endian u64)
pub const PARAM_WIDTH: usize = 8;

/// Largest serialized state entry the host will persist
pub const MAX_STATE_DATA_LEN: usize = 256;

/// Maximum basis points (100%)
pub const MAX_BPS: u64 = 10000;

/// Default swap fee in basis points (0.3%)
pub const DEFAULT_SWAP_FEE_BPS: u64 = 30;

/// Pool id used when the `AMM_ID` parameter is not set
pub const DEFAULT_AMM_ID: u64 = 0;

// AMM operation types
pub const AMM_OP_PROVIDE_LIQUIDITY: u8 = 1;
pub const AMM_OP_REMOVE_LIQUIDITY: u8 = 2;
pub const AMM_OP_SWAP: u8 = 3;

// AMM hook parameters
pub const AMM_PARAM_AMM_ID: u8 = 0x01;
pub const AMM_PARAM_MIN_LP_TOKENS: u8 = 0x02;
pub const AMM_PARAM_SWAP_FEE_BPS: u8 = 0x03;

// Flash loan hook parameters
pub const LOAN_PARAM_MAX_LOAN: u8 = 0x01;
pub const LOAN_PARAM_FEE_RATE: u8 = 0x02;
pub const LOAN_PARAM_RESERVE_RATIO: u8 = 0x03;

/// Pool state seed prefix
pub const POOL_SEED: &[u8] = b"pool";

/// Flash loan record seed prefix
pub const FLASH_LOAN_SEED: &[u8] = b"flash_loan";

/// Lendable reserve seed prefix
pub const LOAN_RESERVE_SEED: &[u8] = b"loan_reserve";
