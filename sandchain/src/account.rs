// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use sandchain_uplink::{AccountId, ACCOUNT_ID_BYTES};

const DEV_ACCOUNT_DOMAIN: &[u8] = b"sandchain-dev-account";

/// State the ledger keeps per account.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    /// Balance in wei.
    pub balance: u128,
    /// Number of transactions the account has sent.
    pub nonce: u64,
}

/// Identity of the development account with the given `index`.
///
/// The same index always yields the same identity, so tests and scripts can
/// refer to accounts across sessions.
pub fn dev_account(index: usize) -> AccountId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DEV_ACCOUNT_DOMAIN);
    hasher.update(&(index as u64).to_le_bytes());
    let hash = hasher.finalize();

    let mut bytes = [0u8; ACCOUNT_ID_BYTES];
    bytes.copy_from_slice(&hash.as_bytes()[..ACCOUNT_ID_BYTES]);
    AccountId::from_bytes(bytes)
}
