//! Decoding of the operation carried in the transaction data.
//!
//! AMM operations start with a one byte opcode followed by fixed-offset
//! little-endian fields. Flash loan operations carry no opcode: the loan
//! phase decides which layout applies. Buffers longer than the layout are
//! accepted, shorter ones are never zero-padded.

use anchor_lang::prelude::*;

use crate::constants::{AMM_OP_PROVIDE_LIQUIDITY, AMM_OP_REMOVE_LIQUIDITY, AMM_OP_SWAP};
use crate::errors::HookError;
use crate::host::TokenId;
use crate::state::PoolSide;

/// Bounds-checked cursor over the transaction data.
pub struct WireReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        require!(self.remaining() >= N, HookError::TruncatedInput);

        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[self.offset..self.offset + N]);
        self.offset += N;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.take::<1>()?;
        Ok(byte)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take::<8>()?))
    }

    pub fn read_token_id(&mut self) -> Result<TokenId> {
        Ok(Pubkey::new_from_array(self.take::<32>()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmOperation {
    ProvideLiquidity {
        amount_a: u64,
        amount_b: u64,
    },
    RemoveLiquidity {
        lp_amount: u64,
    },
    Swap {
        input_amount: u64,
        input_side: PoolSide,
        min_output: u64,
    },
}

impl AmmOperation {
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(data);

        match reader.read_u8()? {
            AMM_OP_PROVIDE_LIQUIDITY => Ok(AmmOperation::ProvideLiquidity {
                amount_a: reader.read_u64()?,
                amount_b: reader.read_u64()?,
            }),
            AMM_OP_REMOVE_LIQUIDITY => Ok(AmmOperation::RemoveLiquidity {
                lp_amount: reader.read_u64()?,
            }),
            AMM_OP_SWAP => {
                let input_amount = reader.read_u64()?;
                let input_index = reader.read_u8()?;
                let min_output = reader.read_u64()?;
                let input_side =
                    PoolSide::from_index(input_index).ok_or(HookError::MalformedInput)?;

                Ok(AmmOperation::Swap {
                    input_amount,
                    input_side,
                    min_output,
                })
            }
            op_type => {
                msg!("Invalid operation type: {}", op_type);
                err!(HookError::UnknownOperation)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanOperation {
    Borrow { loan_amount: u64, token_id: TokenId },
    Repay { repayment_amount: u64 },
}

impl LoanOperation {
    /// Layout used while no loan is outstanding.
    pub fn decode_borrow(data: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(data);

        Ok(LoanOperation::Borrow {
            loan_amount: reader.read_u64()?,
            token_id: reader.read_token_id()?,
        })
    }

    /// Layout used while a loan is outstanding.
    pub fn decode_repay(data: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(data);

        Ok(LoanOperation::Repay {
            repayment_amount: reader.read_u64()?,
        })
    }
}
