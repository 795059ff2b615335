// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloc::vec::Vec;

use crate::{ContractError, Env};

/// A contract the ledger can deploy and call.
///
/// The value handed to the ledger at deployment is the contract's blank
/// state; `init` (see [`INIT_METHOD`]) is then called on it with the
/// constructor argument, if the contract exports one.
///
/// Arguments and return values cross the boundary in their `rkyv`
/// representation; [`wrap_call`] does the (de)serialization for a typed
/// method.
///
/// The ledger takes care of atomicity by snapshotting the state before every
/// call, so a contract may return an error at any point after mutating
/// itself.
///
/// [`INIT_METHOD`]: crate::INIT_METHOD
/// [`wrap_call`]: crate::wrap_call
pub trait Contract: Clone + Send + 'static {
    /// Names of the functions this contract exports.
    fn exports(&self) -> &'static [&'static str];

    /// Execute the function `fn_name` with the serialized argument `arg`,
    /// returning the serialized return value.
    fn call(
        &mut self,
        env: &mut Env,
        fn_name: &str,
        arg: &[u8],
    ) -> Result<Vec<u8>, ContractError>;

    fn is_function_exported(&self, name: &str) -> bool {
        self.exports().iter().any(|exported| *exported == name)
    }
}
