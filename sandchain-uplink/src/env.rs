// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloc::string::String;
use alloc::vec::Vec;

use rkyv::Serialize;

use crate::gas::{self, GasMeter};
use crate::{
    serialize_data, AccountId, ContractError, ContractId, Event,
    StandardBufSerializer,
};

/// The environment of a single contract invocation.
///
/// Built by the ledger for every call and handed to the contract. The block
/// height and timestamp are those of the block the invocation is executed
/// in.
#[derive(Debug)]
pub struct Env {
    caller: AccountId,
    self_id: ContractId,
    height: u64,
    timestamp: u64,
    meter: GasMeter,
    events: Vec<Event>,
}

impl Env {
    pub fn new(
        caller: AccountId,
        self_id: ContractId,
        height: u64,
        timestamp: u64,
        gas_limit: u64,
    ) -> Self {
        Self {
            caller,
            self_id,
            height,
            timestamp,
            meter: GasMeter::new(gas_limit),
            events: Vec::new(),
        }
    }

    /// The account that signed the transaction.
    pub fn caller(&self) -> AccountId {
        self.caller
    }

    /// The ID of the contract being executed.
    pub fn self_id(&self) -> ContractId {
        self.self_id
    }

    /// Height of the block being executed.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Timestamp, in seconds, of the block being executed.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// The gas limit of this invocation.
    pub fn limit(&self) -> u64 {
        self.meter.limit()
    }

    /// The gas spent so far.
    pub fn spent(&self) -> u64 {
        self.meter.spent()
    }

    /// Charge `points` of gas for the work about to be done.
    pub fn charge(&mut self, points: u64) -> Result<(), ContractError> {
        self.meter.charge(points)
    }

    /// Emits an event with the given topic and data.
    ///
    /// The event is paid for before it is recorded, so an invocation that
    /// cannot afford it never sees it in its receipt.
    pub fn emit<T, D>(
        &mut self,
        topic: T,
        data: &D,
    ) -> Result<(), ContractError>
    where
        T: Into<String>,
        D: for<'a> Serialize<StandardBufSerializer<'a>>,
    {
        let data = serialize_data(data)?;
        self.charge(gas::log(data.len()))?;

        self.events.push(Event {
            source: self.self_id,
            topic: topic.into(),
            data,
        });

        Ok(())
    }

    /// The events emitted so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consume the environment, returning the gas spent and the events
    /// emitted.
    pub fn finish(self) -> (u64, Vec<Event>) {
        (self.meter.spent(), self.events)
    }
}
