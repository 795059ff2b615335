// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Contract-side API of the `sandchain` simulated ledger.
//!
//! Contracts are plain Rust types implementing [`Contract`]. The ledger hands
//! every invocation an [`Env`], through which a contract learns who called it
//! and when, pays for the work it does, and emits events.

#![no_std]

extern crate alloc;

mod contract;
pub use contract::*;

mod env;
pub use env::*;

mod error;
pub use error::*;

pub mod gas;

mod helpers;
pub use helpers::*;

mod types;
pub use types::*;

#[cfg(feature = "serde")]
mod serde_support;

/// How many bytes to use for scratch space when serializing
pub const SCRATCH_BUF_BYTES: usize = 64;

/// The size of the argument buffer in bytes
pub const ARGBUF_LEN: usize = 64 * 1024;

/// Name of the method run once, at deployment, with the constructor argument.
pub const INIT_METHOD: &str = "init";
