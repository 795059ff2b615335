// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::borrow::Cow;

use sandchain_uplink::{AccountId, ContractError, ContractId};
use thiserror::Error;

use crate::session::BlockInfo;

/// The error type returned by the simulated ledger.
///
/// Errors are split in two groups. Those raised while validating a
/// transaction leave the chain untouched: no block is mined and nothing is
/// charged. Those raised during execution ([`OutOfGas`], [`Revert`] and
/// friends) come from a mined transaction whose effects were rolled back;
/// the sender still paid for the gas reported with them.
///
/// [`OutOfGas`]: Error::OutOfGas
/// [`Revert`]: Error::Revert
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(
        "No block can follow height {} at timestamp {}",
        .0.height,
        .0.timestamp
    )]
    BlockOverflow(BlockInfo),
    #[error("Contract does not exist: {0}")]
    ContractDoesNotExist(ContractId),
    #[error("Gas limit {limit} exceeds the block gas limit {max}")]
    GasLimitTooHigh { limit: u64, max: u64 },
    #[error("InitializationError: {0}")]
    InitializationError(Cow<'static, str>),
    #[error("Insufficient balance: {account} has {balance}, needs {required}")]
    InsufficientBalance {
        account: AccountId,
        balance: u128,
        required: u128,
    },
    #[error("Gas limit {limit} is below the intrinsic cost {required}")]
    IntrinsicGas { limit: u64, required: u64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(Cow<'static, str>),
    #[error("Invalid function: {0}")]
    InvalidFunction(String),
    #[error("The null account cannot sign or hold funds")]
    NullAccount,
    #[error("OutOfGas after spending {gas_spent}")]
    OutOfGas { gas_spent: u64 },
    #[error("Reverted: {reason}")]
    Revert { reason: String, gas_spent: u64 },
    #[error("Serialization error")]
    SerializationError,
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountId),
    #[error("ValidationError")]
    ValidationError,
}

impl Error {
    /// Map the error a contract invocation ended with, charging it
    /// `gas_spent`.
    pub(crate) fn from_contract(err: ContractError, gas_spent: u64) -> Self {
        match err {
            ContractError::Revert(reason) => Self::Revert { reason, gas_spent },
            ContractError::OutOfGas => Self::OutOfGas { gas_spent },
            ContractError::UnknownFunction(name) => Self::InvalidFunction(name),
            ContractError::InvalidArgument => Self::ValidationError,
            ContractError::Serialization => Self::SerializationError,
        }
    }

    /// The reason a transaction reverted with, if it did.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::Revert { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Gas the failed transaction consumed, if it was mined.
    pub fn gas_spent(&self) -> Option<u64> {
        match self {
            Self::Revert { gas_spent, .. } | Self::OutOfGas { gas_spent } => {
                Some(*gas_spent)
            }
            _ => None,
        }
    }
}
