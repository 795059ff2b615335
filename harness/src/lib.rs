// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Harness for verifying the simple storage contract on a simulated chain.
//!
//! A [`Fixture`] is a fresh chain with one freshly deployed contract. Tests
//! submit [`Operation`]s to it as signed transactions, then assert on the
//! state, on the events read with [`read_events`], and on the typed
//! [`TxError`] a failed transaction surfaces.
//!
//! ```ignore
//! let mut fixture = Fixture::new(42)?;
//! let user = fixture.account(1);
//!
//! let receipt = fixture.call(Operation::Increment, user)?;
//! assert_eq!(fixture.value()?, 43);
//!
//! let err = fixture.call(Operation::Reset, user).unwrap_err();
//! assert!(err.matches(ErrorKind::NotOwner, Some("Not the owner")));
//! ```

mod deployment;
mod error;
mod events;
mod fixture;
pub mod gas;

pub use deployment::DeploymentInfo;
pub use error::TxError;
pub use events::{read_events, StorageEvent};
pub use fixture::{deploy, Deployment, Fixture, Operation, GAS_LIMIT};

// re-exports

pub use simple_storage::{
    Bound, ErrorKind, OwnershipTransferred, StorageError, StorageInfo,
    ValueChanged, MAX_VALUE, VALUE_LIMIT,
};
