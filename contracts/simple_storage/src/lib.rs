// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Contract holding a bounded value that anyone can step up or down, and
//! that only its owner can overwrite, reset, or hand over to someone else.

use bytecheck::CheckBytes;
use rkyv::{Archive, Deserialize, Serialize};
use sandchain_uplink::{
    gas, wrap_call, AccountId, Contract, ContractError, Env, INIT_METHOD,
};

mod error;
mod events;

pub use error::{Bound, ErrorKind, StorageError};
pub use events::{OwnershipTransferred, ValueChanged};

/// Values must stay strictly below this.
pub const VALUE_LIMIT: u32 = 1_000_000;

/// The largest value the contract can hold.
pub const MAX_VALUE: u32 = VALUE_LIMIT - 1;

const EXPORTS: [&str; 10] = [
    INIT_METHOD,
    "get_value",
    "get_storage_info",
    "owner",
    "increment",
    "decrement",
    "add_value",
    "set_value",
    "reset",
    "transfer_ownership",
];

/// Struct that describes the state of the SimpleStorage contract
///
/// The default value is the blank state handed to the ledger at deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleStorage {
    value: u32,
    owner: AccountId,
    last_updated: u64,
}

/// Everything the contract stores, read in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[archive_attr(derive(CheckBytes))]
pub struct StorageInfo {
    pub value: u32,
    pub owner: AccountId,
    pub last_updated: u64,
}

fn check_bound(value: u32) -> Result<u32, StorageError> {
    match value < VALUE_LIMIT {
        true => Ok(value),
        false => Err(StorageError::OutOfRange(Bound::Upper)),
    }
}

impl SimpleStorage {
    /// Initialize the contract with its first value, making the deployer its
    /// owner.
    pub fn init(
        &mut self,
        env: &mut Env,
        initial_value: u32,
    ) -> Result<(), ContractError> {
        let value = check_bound(initial_value)?;
        let deployer = env.caller();

        self.store_owner(env, deployer)?;
        self.write_value(env, 0, value, deployer)
    }

    /// Read the stored value
    pub fn get_value(&self, env: &mut Env) -> Result<u32, ContractError> {
        self.load_value(env)
    }

    /// Read the value, the owner and the time of the last write
    pub fn get_storage_info(
        &self,
        env: &mut Env,
    ) -> Result<StorageInfo, ContractError> {
        Ok(StorageInfo {
            value: self.load_value(env)?,
            owner: self.load_owner(env)?,
            last_updated: self.load_last_updated(env)?,
        })
    }

    /// Read the owner
    pub fn owner(&self, env: &mut Env) -> Result<AccountId, ContractError> {
        self.load_owner(env)
    }

    /// Increment the value by 1
    pub fn increment(&mut self, env: &mut Env) -> Result<(), ContractError> {
        self.add_value(env, 1)
    }

    /// Decrement the value by 1, never going below zero
    pub fn decrement(&mut self, env: &mut Env) -> Result<(), ContractError> {
        let old = self.load_value(env)?;
        let new = old
            .checked_sub(1)
            .ok_or(StorageError::OutOfRange(Bound::Lower))?;

        let caller = env.caller();
        self.write_value(env, old, new, caller)
    }

    /// Add `amount` to the value
    pub fn add_value(
        &mut self,
        env: &mut Env,
        amount: u32,
    ) -> Result<(), ContractError> {
        let old = self.load_value(env)?;
        let new = old
            .checked_add(amount)
            .ok_or(StorageError::OutOfRange(Bound::Upper))
            .and_then(check_bound)?;

        let caller = env.caller();
        self.write_value(env, old, new, caller)
    }

    /// Overwrite the value. Only the owner may do this.
    pub fn set_value(
        &mut self,
        env: &mut Env,
        new_value: u32,
    ) -> Result<(), ContractError> {
        let caller = self.only_owner(env)?;
        let new = check_bound(new_value)?;
        let old = self.load_value(env)?;

        self.write_value(env, old, new, caller)
    }

    /// Set the value back to zero. Only the owner may do this.
    pub fn reset(&mut self, env: &mut Env) -> Result<(), ContractError> {
        let caller = self.only_owner(env)?;
        let old = self.load_value(env)?;

        self.write_value(env, old, 0, caller)
    }

    /// Hand the contract over to `new_owner`. Only the owner may do this.
    pub fn transfer_ownership(
        &mut self,
        env: &mut Env,
        new_owner: AccountId,
    ) -> Result<(), ContractError> {
        let previous_owner = self.only_owner(env)?;

        if new_owner.is_zero() {
            return Err(StorageError::InvalidAddress.into());
        }
        if new_owner == previous_owner {
            return Err(StorageError::AlreadyOwner.into());
        }

        self.store_owner(env, new_owner)?;
        env.emit(
            OwnershipTransferred::TOPIC,
            &OwnershipTransferred {
                previous_owner,
                new_owner,
            },
        )
    }

    // Returns the caller, as long as it is the owner.
    fn only_owner(&self, env: &mut Env) -> Result<AccountId, ContractError> {
        let caller = env.caller();
        match self.load_owner(env)? == caller {
            true => Ok(caller),
            false => Err(StorageError::NotOwner.into()),
        }
    }

    // Stores `new`, stamps the write with the block time and announces it.
    fn write_value(
        &mut self,
        env: &mut Env,
        old: u32,
        new: u32,
        updated_by: AccountId,
    ) -> Result<(), ContractError> {
        let now = env.timestamp();
        self.store_value(env, new)?;
        self.store_last_updated(env, now)?;
        env.emit(
            ValueChanged::TOPIC,
            &ValueChanged {
                old_value: old,
                new_value: new,
                updated_by,
            },
        )
    }

    fn load_value(&self, env: &mut Env) -> Result<u32, ContractError> {
        env.charge(gas::STORAGE_READ)?;
        Ok(self.value)
    }

    fn load_owner(&self, env: &mut Env) -> Result<AccountId, ContractError> {
        env.charge(gas::STORAGE_READ)?;
        Ok(self.owner)
    }

    fn load_last_updated(&self, env: &mut Env) -> Result<u64, ContractError> {
        env.charge(gas::STORAGE_READ)?;
        Ok(self.last_updated)
    }

    fn store_value(
        &mut self,
        env: &mut Env,
        value: u32,
    ) -> Result<(), ContractError> {
        env.charge(gas::storage_write(
            self.value == 0,
            value == 0,
            self.value != value,
        ))?;
        self.value = value;
        Ok(())
    }

    fn store_owner(
        &mut self,
        env: &mut Env,
        owner: AccountId,
    ) -> Result<(), ContractError> {
        env.charge(gas::storage_write(
            self.owner.is_zero(),
            owner.is_zero(),
            self.owner != owner,
        ))?;
        self.owner = owner;
        Ok(())
    }

    fn store_last_updated(
        &mut self,
        env: &mut Env,
        timestamp: u64,
    ) -> Result<(), ContractError> {
        env.charge(gas::storage_write(
            self.last_updated == 0,
            timestamp == 0,
            self.last_updated != timestamp,
        ))?;
        self.last_updated = timestamp;
        Ok(())
    }
}

impl Contract for SimpleStorage {
    fn exports(&self) -> &'static [&'static str] {
        &EXPORTS
    }

    fn call(
        &mut self,
        env: &mut Env,
        fn_name: &str,
        arg: &[u8],
    ) -> Result<Vec<u8>, ContractError> {
        match fn_name {
            INIT_METHOD => wrap_call(arg, |value: u32| self.init(env, value)),
            "get_value" => wrap_call(arg, |_: ()| self.get_value(env)),
            "get_storage_info" => {
                wrap_call(arg, |_: ()| self.get_storage_info(env))
            }
            "owner" => wrap_call(arg, |_: ()| self.owner(env)),
            "increment" => wrap_call(arg, |_: ()| self.increment(env)),
            "decrement" => wrap_call(arg, |_: ()| self.decrement(env)),
            "add_value" => {
                wrap_call(arg, |amount: u32| self.add_value(env, amount))
            }
            "set_value" => {
                wrap_call(arg, |value: u32| self.set_value(env, value))
            }
            "reset" => wrap_call(arg, |_: ()| self.reset(env)),
            "transfer_ownership" => wrap_call(arg, |owner: AccountId| {
                self.transfer_ownership(env, owner)
            }),
            name => Err(ContractError::UnknownFunction(name.into())),
        }
    }
}
