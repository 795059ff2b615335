// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! An in-memory simulated ledger for exercising contracts.
//!
//! A [`Ledger`] holds the chain configuration and hands out [`Session`]s,
//! each one a fresh chain starting at genesis with a set of funded
//! development accounts. Contracts are deployed and called within a session;
//! every transaction is executed atomically and mined into its own block.
//!
//! ```ignore
//! let ledger = Ledger::ephemeral();
//! let mut session = ledger.session();
//! let deployer = session.accounts()[0];
//!
//! let receipt = session.deploy(
//!     MyContract::default(),
//!     ContractData::builder(deployer).constructor_arg(&42u32),
//!     GAS_LIMIT,
//! )?;
//! let id = receipt.data;
//!
//! session.call::<(), ()>(deployer, id, "increment", &(), GAS_LIMIT)?;
//! ```

mod account;
mod config;
mod contract;
mod error;
mod ledger;
mod session;

pub use account::{dev_account, Account};
pub use config::{
    LedgerConfig, LedgerConfigBuilder, WEI_PER_ETHER, WEI_PER_GWEI,
};
pub use contract::{ContractData, ContractDataBuilder, ContractMetadata};
pub use error::Error;
pub use ledger::Ledger;
pub use session::{BlockInfo, CallReceipt, Session};

// re-exports

pub use sandchain_uplink::{
    AccountId, Contract, ContractError, ContractId, Env, Event, INIT_METHOD,
};
