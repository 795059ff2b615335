// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use sandchain_uplink::{AccountId, Contract, ContractError, ContractId, Env};

pub struct ContractData<'a, A> {
    pub(crate) constructor_arg: Option<&'a A>,
    pub(crate) deployer: AccountId,
}

// `()` is done on purpose, since by default it should be that the constructor
// takes no argument.
impl<'a> ContractData<'a, ()> {
    /// Build a deploy data structure.
    ///
    /// The `deployer` signs the deployment, pays for it, and is the account
    /// the contract sees as its caller during `init`.
    pub fn builder(deployer: AccountId) -> ContractDataBuilder<'a, ()> {
        ContractDataBuilder {
            constructor_arg: None,
            deployer,
        }
    }
}

impl<'a, A> From<ContractDataBuilder<'a, A>> for ContractData<'a, A> {
    fn from(builder: ContractDataBuilder<'a, A>) -> Self {
        builder.build()
    }
}

pub struct ContractDataBuilder<'a, A> {
    constructor_arg: Option<&'a A>,
    deployer: AccountId,
}

impl<'a, A> ContractDataBuilder<'a, A> {
    /// Set the constructor argument for deployment.
    pub fn constructor_arg<B>(self, arg: &B) -> ContractDataBuilder<B> {
        ContractDataBuilder {
            constructor_arg: Some(arg),
            deployer: self.deployer,
        }
    }

    pub fn build(self) -> ContractData<'a, A> {
        ContractData {
            constructor_arg: self.constructor_arg,
            deployer: self.deployer,
        }
    }
}

/// What the ledger records about a deployed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractMetadata {
    pub contract_id: ContractId,
    pub deployer: AccountId,
    /// Height of the block the contract was deployed in.
    pub deployed_at: u64,
}

/// A deployed contract whose state can be rolled back.
pub(crate) trait ContractInstance: Send {
    fn snap(&mut self);

    fn revert(&mut self);

    fn apply(&mut self);

    fn is_function_exported(&self, name: &str) -> bool;

    fn call(
        &mut self,
        env: &mut Env,
        fn_name: &str,
        arg: &[u8],
    ) -> Result<Vec<u8>, ContractError>;
}

pub(crate) struct WrappedContract<C> {
    state: C,
    snapshot: Option<C>,
}

impl<C: Contract> WrappedContract<C> {
    pub(crate) fn new(state: C) -> Self {
        Self {
            state,
            snapshot: None,
        }
    }
}

impl<C: Contract> ContractInstance for WrappedContract<C> {
    fn snap(&mut self) {
        self.snapshot = Some(self.state.clone());
    }

    fn revert(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.state = snapshot;
        }
    }

    fn apply(&mut self) {
        self.snapshot = None;
    }

    fn is_function_exported(&self, name: &str) -> bool {
        self.state.is_function_exported(name)
    }

    fn call(
        &mut self,
        env: &mut Env,
        fn_name: &str,
        arg: &[u8],
    ) -> Result<Vec<u8>, ContractError> {
        self.state.call(env, fn_name, arg)
    }
}
