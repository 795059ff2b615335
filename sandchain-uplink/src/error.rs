// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloc::string::String;

use core::fmt::{Display, Formatter};

/// The error a contract invocation can end with.
///
/// Any of these aborts the invocation: the ledger discards every change the
/// contract made and every event it emitted during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The contract rejected the invocation, giving a reason.
    Revert(String),
    /// The invocation ran into its gas limit.
    OutOfGas,
    /// The contract does not export a function with this name.
    UnknownFunction(String),
    /// The argument bytes do not hold a valid value of the expected type.
    InvalidArgument,
    /// The return value or event data could not be serialized.
    Serialization,
}

impl ContractError {
    /// Creates a revert with the given `reason`.
    pub fn revert<R: Into<String>>(reason: R) -> Self {
        Self::Revert(reason.into())
    }

    /// The revert reason, if the contract reverted.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Revert(reason) => Some(reason),
            _ => None,
        }
    }
}

impl Display for ContractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ContractError::Revert(reason) => write!(f, "REVERT: {reason}"),
            ContractError::OutOfGas => write!(f, "OUT OF GAS"),
            ContractError::UnknownFunction(name) => {
                write!(f, "UNKNOWN FUNCTION: {name}")
            }
            ContractError::InvalidArgument => write!(f, "INVALID ARGUMENT"),
            ContractError::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}
