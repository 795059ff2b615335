// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Gas schedule and metering.
//!
//! The ledger charges the intrinsic costs of a transaction; everything a
//! contract does while executing is charged through [`GasMeter`].

use crate::ContractError;

/// Base cost of every transaction.
pub const TX_BASE: u64 = 21_000;
/// Cost per byte of call argument.
pub const TX_DATA_BYTE: u64 = 16;
/// Extra cost of a deployment transaction.
pub const CREATE: u64 = 32_000;

/// Reading a storage slot.
pub const STORAGE_READ: u64 = 2_100;
/// Writing a non-zero value into a zero slot.
pub const STORAGE_SET: u64 = 20_000;
/// Changing a slot in any other way.
pub const STORAGE_RESET: u64 = 5_000;
/// Writing the value a slot already holds.
pub const STORAGE_NOOP: u64 = 100;

/// Base cost of emitting an event.
pub const LOG: u64 = 375;
/// Cost per event topic.
pub const LOG_TOPIC: u64 = 375;
/// Cost per byte of event data.
pub const LOG_DATA_BYTE: u64 = 8;

/// Cost of overwriting a storage slot.
pub fn storage_write(was_zero: bool, is_zero: bool, changed: bool) -> u64 {
    if !changed {
        STORAGE_NOOP
    } else if was_zero && !is_zero {
        STORAGE_SET
    } else {
        STORAGE_RESET
    }
}

/// Cost of emitting an event with a single topic and `data_len` bytes of
/// data.
pub fn log(data_len: usize) -> u64 {
    LOG + LOG_TOPIC + LOG_DATA_BYTE * data_len as u64
}

/// Intrinsic cost of a transaction carrying `arg_len` argument bytes.
pub fn intrinsic(arg_len: usize, deploy: bool) -> u64 {
    let base = TX_BASE + TX_DATA_BYTE * arg_len as u64;
    match deploy {
        true => base + CREATE,
        false => base,
    }
}

/// Tracks the gas spent against a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    spent: u64,
}

impl GasMeter {
    pub const fn new(limit: u64) -> Self {
        Self { limit, spent: 0 }
    }

    /// Charge `points` of gas.
    ///
    /// Running past the limit leaves the meter exhausted and returns
    /// [`ContractError::OutOfGas`].
    pub fn charge(&mut self, points: u64) -> Result<(), ContractError> {
        let spent = self.spent.saturating_add(points);
        if spent > self.limit {
            self.spent = self.limit;
            return Err(ContractError::OutOfGas);
        }
        self.spent = spent;
        Ok(())
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn spent(&self) -> u64 {
        self.spent
    }

    pub fn remaining(&self) -> u64 {
        self.limit - self.spent
    }
}
