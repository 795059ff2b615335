// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use sandchain::Error;
use simple_storage::{ErrorKind, StorageError};
use thiserror::Error;

/// Why a transaction submitted through the harness failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    /// The contract reverted with one of its own reasons.
    #[error("Reverted: {reason} (gas spent: {gas_spent})")]
    Revert {
        error: StorageError,
        reason: String,
        gas_spent: u64,
    },
    /// The ledger refused or aborted the transaction.
    #[error(transparent)]
    Ledger(Error),
}

impl From<Error> for TxError {
    fn from(err: Error) -> Self {
        if let Error::Revert { reason, gas_spent } = &err {
            if let Some(error) = StorageError::from_reason(reason) {
                return TxError::Revert {
                    error,
                    reason: reason.clone(),
                    gas_spent: *gas_spent,
                };
            }
        }
        TxError::Ledger(err)
    }
}

impl TxError {
    /// The kind of the contract error, if the contract reverted.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            TxError::Revert { error, .. } => Some(error.kind()),
            TxError::Ledger(_) => None,
        }
    }

    /// The revert reason, whether or not the contract recognizes it.
    pub fn reason(&self) -> Option<&str> {
        match self {
            TxError::Revert { reason, .. } => Some(reason),
            TxError::Ledger(err) => err.revert_reason(),
        }
    }

    /// Gas charged for the failed transaction, if it was mined.
    pub fn gas_spent(&self) -> Option<u64> {
        match self {
            TxError::Revert { gas_spent, .. } => Some(*gas_spent),
            TxError::Ledger(err) => err.gas_spent(),
        }
    }

    /// Whether the contract reverted with `kind`, with a reason containing
    /// `message` when one is given.
    pub fn matches(&self, kind: ErrorKind, message: Option<&str>) -> bool {
        match (self.kind(), self.reason()) {
            (Some(k), Some(reason)) if k == kind => {
                message.map_or(true, |message| reason.contains(message))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use simple_storage::Bound;

    use super::*;

    #[test]
    fn known_reasons_become_typed() {
        let err = TxError::from(Error::Revert {
            reason: "Cannot decrement below zero".into(),
            gas_spent: 30_000,
        });

        assert_eq!(
            err,
            TxError::Revert {
                error: StorageError::OutOfRange(Bound::Lower),
                reason: "Cannot decrement below zero".into(),
                gas_spent: 30_000,
            }
        );
        assert!(err.matches(ErrorKind::OutOfRange, None));
        assert!(err.matches(ErrorKind::OutOfRange, Some("below zero")));
        assert!(!err.matches(ErrorKind::OutOfRange, Some("too large")));
        assert!(!err.matches(ErrorKind::NotOwner, None));
    }

    #[test]
    fn other_failures_stay_untyped() {
        let err = TxError::from(Error::OutOfGas { gas_spent: 21_500 });
        assert_eq!(err.kind(), None);
        assert_eq!(err.gas_spent(), Some(21_500));
        assert!(!err.matches(ErrorKind::OutOfRange, None));

        let err = TxError::from(Error::Revert {
            reason: "Incremental panic".into(),
            gas_spent: 1,
        });
        assert!(matches!(err, TxError::Ledger(_)));
        assert_eq!(err.reason(), Some("Incremental panic"));
    }
}
