// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use bytecheck::CheckBytes;
use rkyv::{Archive, Deserialize, Serialize};
use sandchain_uplink::AccountId;

/// Emitted whenever the stored value is written, including at deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[archive_attr(derive(CheckBytes))]
pub struct ValueChanged {
    pub old_value: u32,
    pub new_value: u32,
    pub updated_by: AccountId,
}

impl ValueChanged {
    pub const TOPIC: &'static str = "ValueChanged";
}

/// Emitted when the owner hands the contract over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[archive_attr(derive(CheckBytes))]
pub struct OwnershipTransferred {
    pub previous_owner: AccountId,
    pub new_owner: AccountId,
}

impl OwnershipTransferred {
    pub const TOPIC: &'static str = "OwnershipTransferred";
}
