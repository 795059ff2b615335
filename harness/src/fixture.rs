// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use core::fmt;

use sandchain::{
    AccountId, CallReceipt, ContractData, ContractId, Error, Ledger,
    LedgerConfig, Session,
};
use simple_storage::{SimpleStorage, StorageInfo};
use tracing::debug;

use crate::TxError;

/// Gas limit every harness transaction is sent with.
pub const GAS_LIMIT: u64 = 1_000_000;

/// A state-mutating operation of the storage contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Increment,
    Decrement,
    AddValue(u32),
    SetValue(u32),
    Reset,
    TransferOwnership(AccountId),
}

impl Operation {
    /// Name of the contract function the operation calls.
    pub fn fn_name(&self) -> &'static str {
        match self {
            Operation::Increment => "increment",
            Operation::Decrement => "decrement",
            Operation::AddValue(_) => "add_value",
            Operation::SetValue(_) => "set_value",
            Operation::Reset => "reset",
            Operation::TransferOwnership(_) => "transfer_ownership",
        }
    }

    /// Whether only the owner may perform the operation.
    pub fn is_owner_only(&self) -> bool {
        matches!(
            self,
            Operation::SetValue(_)
                | Operation::Reset
                | Operation::TransferOwnership(_)
        )
    }

    fn submit(
        &self,
        session: &mut Session,
        contract: ContractId,
        from: AccountId,
    ) -> Result<CallReceipt<()>, Error> {
        let fn_name = self.fn_name();
        match self {
            Operation::Increment | Operation::Decrement | Operation::Reset => {
                session.call(from, contract, fn_name, &(), GAS_LIMIT)
            }
            Operation::AddValue(n) | Operation::SetValue(n) => {
                session.call(from, contract, fn_name, n, GAS_LIMIT)
            }
            Operation::TransferOwnership(owner) => {
                session.call(from, contract, fn_name, owner, GAS_LIMIT)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddValue(n) | Operation::SetValue(n) => {
                write!(f, "{}({n})", self.fn_name())
            }
            Operation::TransferOwnership(owner) => {
                write!(f, "{}({owner})", self.fn_name())
            }
            _ => write!(f, "{}()", self.fn_name()),
        }
    }
}

/// A deployed storage contract and the receipt of its deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub contract: ContractId,
    pub receipt: CallReceipt<ContractId>,
}

/// A fresh chain with a storage contract deployed by its first account.
#[derive(Debug)]
pub struct Fixture {
    session: Session,
    deployment: Deployment,
}

impl Fixture {
    /// Deploy with `initial_value` on a chain with the default
    /// configuration.
    pub fn new(initial_value: u32) -> Result<Self, TxError> {
        Self::with_config(LedgerConfig::default(), initial_value)
    }

    /// Deploy with `initial_value` on a chain with the given `config`.
    ///
    /// # Errors
    /// An invalid `config` is rejected with [`Error::InvalidConfig`] before
    /// any chain is started.
    pub fn with_config(
        config: LedgerConfig,
        initial_value: u32,
    ) -> Result<Self, TxError> {
        let mut session = Ledger::new(config)?.session();
        let deployer = session.accounts().first().copied().ok_or(
            Error::InvalidConfig("at least one account is required".into()),
        )?;
        let deployment = deploy(&mut session, initial_value, deployer)?;

        Ok(Self {
            session,
            deployment,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The deployment the fixture was created with.
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn contract(&self) -> ContractId {
        self.deployment.contract
    }

    /// The development account at `index`. Account 0 deployed the contract.
    ///
    /// # Panics
    /// If the chain has no account at `index`.
    pub fn account(&self, index: usize) -> AccountId {
        self.session.accounts()[index]
    }

    /// Deploy another storage contract on the same chain.
    pub fn deploy(
        &mut self,
        initial_value: u32,
        from: AccountId,
    ) -> Result<Deployment, TxError> {
        deploy(&mut self.session, initial_value, from)
    }

    /// Submit `op` to the fixture's contract, signed by `from`.
    pub fn call(
        &mut self,
        op: Operation,
        from: AccountId,
    ) -> Result<CallReceipt<()>, TxError> {
        let contract = self.contract();
        self.call_on(contract, op, from)
    }

    /// Submit `op` to another `contract`, signed by `from`.
    pub fn call_on(
        &mut self,
        contract: ContractId,
        op: Operation,
        from: AccountId,
    ) -> Result<CallReceipt<()>, TxError> {
        debug!(%op, %from, "submitting");
        Ok(op.submit(&mut self.session, contract, from)?)
    }

    pub fn increment(
        &mut self,
        from: AccountId,
    ) -> Result<CallReceipt<()>, TxError> {
        self.call(Operation::Increment, from)
    }

    pub fn decrement(
        &mut self,
        from: AccountId,
    ) -> Result<CallReceipt<()>, TxError> {
        self.call(Operation::Decrement, from)
    }

    pub fn add_value(
        &mut self,
        amount: u32,
        from: AccountId,
    ) -> Result<CallReceipt<()>, TxError> {
        self.call(Operation::AddValue(amount), from)
    }

    pub fn set_value(
        &mut self,
        value: u32,
        from: AccountId,
    ) -> Result<CallReceipt<()>, TxError> {
        self.call(Operation::SetValue(value), from)
    }

    pub fn reset(
        &mut self,
        from: AccountId,
    ) -> Result<CallReceipt<()>, TxError> {
        self.call(Operation::Reset, from)
    }

    pub fn transfer_ownership(
        &mut self,
        new_owner: AccountId,
        from: AccountId,
    ) -> Result<CallReceipt<()>, TxError> {
        self.call(Operation::TransferOwnership(new_owner), from)
    }

    /// The stored value, read without a transaction.
    pub fn value(&mut self) -> Result<u32, TxError> {
        let contract = self.contract();
        Ok(self.session.query(contract, "get_value", &())?)
    }

    pub fn owner(&mut self) -> Result<AccountId, TxError> {
        let contract = self.contract();
        Ok(self.session.query(contract, "owner", &())?)
    }

    pub fn storage_info(&mut self) -> Result<StorageInfo, TxError> {
        let contract = self.contract();
        Ok(self.session.query(contract, "get_storage_info", &())?)
    }
}

/// Deploy a storage contract holding `initial_value`, signed by `from`.
pub fn deploy(
    session: &mut Session,
    initial_value: u32,
    from: AccountId,
) -> Result<Deployment, TxError> {
    let receipt = session.deploy(
        SimpleStorage::default(),
        ContractData::builder(from).constructor_arg(&initial_value),
        GAS_LIMIT,
    )?;
    let contract = receipt.data;

    debug!(%contract, initial_value, %from, "storage deployed");

    Ok(Deployment { contract, receipt })
}
