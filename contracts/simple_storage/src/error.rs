// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use core::fmt;

use sandchain_uplink::ContractError;
use thiserror::Error;

/// Which side of the value range an operation ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Upper,
    Lower,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Upper => write!(f, "Value too large"),
            Bound::Lower => write!(f, "Cannot decrement below zero"),
        }
    }
}

/// Reasons the storage contract reverts with.
///
/// The `Display` form is the revert reason carried by the failed
/// transaction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    #[error("{0}")]
    OutOfRange(Bound),
    #[error("Not the owner")]
    NotOwner,
    #[error("Invalid address")]
    InvalidAddress,
    #[error("Already the owner")]
    AlreadyOwner,
}

/// The kind of a [`StorageError`], without its detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfRange,
    NotOwner,
    InvalidAddress,
    AlreadyOwner,
}

const ALL: [StorageError; 5] = [
    StorageError::OutOfRange(Bound::Upper),
    StorageError::OutOfRange(Bound::Lower),
    StorageError::NotOwner,
    StorageError::InvalidAddress,
    StorageError::AlreadyOwner,
];

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::OutOfRange(_) => ErrorKind::OutOfRange,
            StorageError::NotOwner => ErrorKind::NotOwner,
            StorageError::InvalidAddress => ErrorKind::InvalidAddress,
            StorageError::AlreadyOwner => ErrorKind::AlreadyOwner,
        }
    }

    /// Recover the error from the revert reason of a failed transaction.
    pub fn from_reason(reason: &str) -> Option<Self> {
        ALL.into_iter().find(|err| err.to_string() == reason)
    }
}

impl From<StorageError> for ContractError {
    fn from(err: StorageError) -> Self {
        ContractError::revert(err.to_string())
    }
}
