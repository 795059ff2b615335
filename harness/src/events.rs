// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use sandchain::{CallReceipt, Event};
use sandchain_uplink::deserialize_data;
use simple_storage::{OwnershipTransferred, ValueChanged};

/// An event of a receipt, classified by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEvent {
    ValueChanged(ValueChanged),
    OwnershipTransferred(OwnershipTransferred),
    /// An event the storage contract does not emit, or whose data does not
    /// decode.
    Unknown(Event),
}

impl StorageEvent {
    pub fn decode(event: &Event) -> Self {
        let decoded = match event.topic.as_str() {
            ValueChanged::TOPIC => deserialize_data(&event.data)
                .ok()
                .map(StorageEvent::ValueChanged),
            OwnershipTransferred::TOPIC => deserialize_data(&event.data)
                .ok()
                .map(StorageEvent::OwnershipTransferred),
            _ => None,
        };
        decoded.unwrap_or_else(|| StorageEvent::Unknown(event.clone()))
    }

    pub fn as_value_changed(&self) -> Option<&ValueChanged> {
        match self {
            StorageEvent::ValueChanged(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_ownership_transferred(&self) -> Option<&OwnershipTransferred> {
        match self {
            StorageEvent::OwnershipTransferred(event) => Some(event),
            _ => None,
        }
    }
}

/// Decode the events of a receipt, in emission order.
pub fn read_events<T>(receipt: &CallReceipt<T>) -> Vec<StorageEvent> {
    receipt.events.iter().map(StorageEvent::decode).collect()
}
