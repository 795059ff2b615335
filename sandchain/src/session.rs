// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

use bytecheck::CheckBytes;
use rkyv::validation::validators::DefaultValidator;
use rkyv::{Archive, Deserialize, Infallible, Serialize};
use sandchain_uplink::{
    gas, AccountId, Contract, ContractError, ContractId, Env, Event,
    StandardBufSerializer, CONTRACT_ID_BYTES, INIT_METHOD,
};
use tracing::{debug, trace, warn};

use crate::account::{dev_account, Account};
use crate::config::LedgerConfig;
use crate::contract::{
    ContractData, ContractInstance, ContractMetadata, WrappedContract,
};
use crate::error::Error::{self, InitializationError};

/// Position of a block in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockInfo {
    pub height: u64,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

struct DeployedContract {
    metadata: ContractMetadata,
    instance: Box<dyn ContractInstance>,
}

// What running a contract function left behind.
type Execution = (Result<(Vec<u8>, Vec<Event>), ContractError>, u64);

/// A running simulated chain.
///
/// `Session`s are spawned using a [`Ledger`], and start at genesis with the
/// development accounts funded. Contracts are [`deploy`]ed into a session and
/// then [`call`]ed with transactions, or read with [`query`].
///
/// Every transaction is mined into its own block, so each one observes a
/// strictly greater height and timestamp than the one before it. A
/// transaction is atomic: should it fail, the contract state is left exactly
/// as it was, and only the gas spent is charged to the sender.
///
/// [`Ledger`]: crate::Ledger
/// [`deploy`]: Session::deploy
/// [`call`]: Session::call
/// [`query`]: Session::query
pub struct Session {
    config: LedgerConfig,
    block: BlockInfo,
    dev_accounts: Vec<AccountId>,
    accounts: BTreeMap<AccountId, Account>,
    contracts: BTreeMap<ContractId, DeployedContract>,
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("chain_id", &self.config.chain_id)
            .field("block", &self.block)
            .field("accounts", &self.accounts.len())
            .field("contracts", &self.contracts.len())
            .finish()
    }
}

impl Session {
    pub(crate) fn new(config: LedgerConfig) -> Self {
        let dev_accounts: Vec<_> =
            (0..config.accounts).map(dev_account).collect();

        let accounts = dev_accounts
            .iter()
            .map(|id| {
                let account = Account {
                    balance: config.account_balance,
                    nonce: 0,
                };
                (*id, account)
            })
            .collect();

        let block = BlockInfo {
            height: 0,
            timestamp: config.genesis_timestamp,
        };

        Self {
            config,
            block,
            dev_accounts,
            accounts,
            contracts: BTreeMap::new(),
        }
    }

    /// The configuration of the chain.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The development accounts funded at genesis, in index order.
    pub fn accounts(&self) -> &[AccountId] {
        &self.dev_accounts
    }

    /// Balance, in wei, of the given account. Unknown accounts hold nothing.
    pub fn balance(&self, account: AccountId) -> u128 {
        self.accounts
            .get(&account)
            .map(|account| account.balance)
            .unwrap_or_default()
    }

    /// Number of transactions sent by the given account.
    pub fn nonce(&self, account: AccountId) -> u64 {
        self.accounts
            .get(&account)
            .map(|account| account.nonce)
            .unwrap_or_default()
    }

    /// Credit `amount` wei to `account`, creating it if needed.
    ///
    /// # Errors
    /// The null account cannot hold funds.
    pub fn fund(
        &mut self,
        account: AccountId,
        amount: u128,
    ) -> Result<(), Error> {
        if account.is_zero() {
            return Err(Error::NullAccount);
        }
        let entry = self.accounts.entry(account).or_default();
        entry.balance = entry.balance.saturating_add(amount);
        Ok(())
    }

    /// The latest mined block.
    pub fn block(&self) -> BlockInfo {
        self.block
    }

    /// Height of the latest mined block.
    pub fn height(&self) -> u64 {
        self.block.height
    }

    /// Timestamp of the latest mined block.
    pub fn timestamp(&self) -> u64 {
        self.block.timestamp
    }

    /// Move the clock forward by `seconds` without mining a block. The next
    /// block is mined `block_time` after the new time.
    ///
    /// The clock stops at `u64::MAX`, after which no further block fits.
    pub fn increase_time(&mut self, seconds: u64) {
        self.block.timestamp = self.block.timestamp.saturating_add(seconds);
        trace!(timestamp = self.block.timestamp, "time increased");
    }

    /// Metadata of a deployed contract.
    pub fn contract_metadata(
        &self,
        contract: &ContractId,
    ) -> Option<&ContractMetadata> {
        self.contracts.get(contract).map(|deployed| &deployed.metadata)
    }

    /// Deploy a contract, returning a receipt carrying its [`ContractId`].
    ///
    /// The ID is computed from the deployer and its nonce. If the contract
    /// exports an `init` method, it is called with the constructor argument,
    /// metered with the given `gas_limit`. Should `init` fail, nothing is
    /// deployed, but the deployer still pays for the gas spent.
    ///
    /// # Errors
    /// Giving a constructor argument to a contract that does not export
    /// `init` results in an [`InitializationError`].
    ///
    /// [`ContractId`]: ContractId
    /// [`InitializationError`]: Error::InitializationError
    pub fn deploy<'a, C, A, D>(
        &mut self,
        contract: C,
        deploy_data: D,
        gas_limit: u64,
    ) -> Result<CallReceipt<ContractId>, Error>
    where
        C: Contract,
        A: 'a + for<'b> Serialize<StandardBufSerializer<'b>>,
        D: Into<ContractData<'a, A>>,
    {
        let deploy_data = deploy_data.into();

        let init_arg = deploy_data
            .constructor_arg
            .map(Self::serialize_data)
            .transpose()?;

        self.deploy_raw(contract, init_arg, deploy_data.deployer, gas_limit)
    }

    /// Deploy a contract with an already serialized constructor argument.
    ///
    /// For more information about deployments see [`deploy`].
    ///
    /// [`deploy`]: Session::deploy
    pub fn deploy_raw<C: Contract>(
        &mut self,
        contract: C,
        init_arg: Option<Vec<u8>>,
        deployer: AccountId,
        gas_limit: u64,
    ) -> Result<CallReceipt<ContractId>, Error> {
        let has_init = contract.is_function_exported(INIT_METHOD);
        if init_arg.is_some() && !has_init {
            return Err(InitializationError(
                "constructor argument given, but init is not exported".into(),
            ));
        }

        let arg = init_arg.unwrap_or_default();
        let intrinsic = gas::intrinsic(arg.len(), true);
        self.validate_transaction(deployer, gas_limit, intrinsic)?;

        let contract_id = self.next_contract_id(deployer);
        if self.contracts.contains_key(&contract_id) {
            return Err(InitializationError("Contract already exists".into()));
        }

        let tx_hash = self.tx_hash(deployer, &contract_id, INIT_METHOD, &arg);
        let block = self.mine_block()?;

        let metadata = ContractMetadata {
            contract_id,
            deployer,
            deployed_at: block.height,
        };
        self.contracts.insert(
            contract_id,
            DeployedContract {
                metadata,
                instance: Box::new(WrappedContract::new(contract)),
            },
        );

        // If no argument was provided, we call the init method anyway, but
        // with an empty argument. The contract decides whether that is
        // acceptable.
        let (result, spent) = match has_init {
            true => self.execute(
                deployer,
                contract_id,
                INIT_METHOD,
                &arg,
                gas_limit - intrinsic,
                block,
                &|_: &[u8]| true,
            ),
            false => (Ok((Vec::new(), Vec::new())), 0),
        };

        if result.is_err() {
            self.contracts.remove(&contract_id);
        }

        let gas_spent = intrinsic + spent;
        self.settle(deployer, gas_spent);

        match result {
            Ok((_, events)) => {
                debug!(
                    contract = %contract_id,
                    %deployer,
                    height = block.height,
                    gas_spent,
                    "contract deployed"
                );
                Ok(CallReceipt {
                    tx_hash,
                    block,
                    gas_limit,
                    gas_spent,
                    gas_price: self.config.gas_price,
                    events,
                    data: contract_id,
                })
            }
            Err(err) => {
                warn!(%deployer, gas_spent, error = %err, "deployment failed");
                Err(Error::from_contract(err, gas_spent))
            }
        }
    }

    /// Execute a transaction calling `fn_name` on a `contract`, signed by
    /// `from`.
    ///
    /// Calls are atomic, meaning that on failure their execution doesn't
    /// modify the state. They are also metered, and will execute with the
    /// given `gas_limit`, which must cover the intrinsic cost of the
    /// transaction.
    ///
    /// # Errors
    /// Transactions that fail validation (unknown sender or contract, not
    /// enough gas or balance) are rejected without being mined. Mined
    /// transactions may still fail during execution, most commonly by the
    /// contract reverting or by running against the gas limit. Calling the
    /// `init` method is not allowed except for when deploying.
    ///
    /// A return that cannot be read as `R` fails the mined transaction with
    /// [`Error::ValidationError`]. Its effects are rolled back and the
    /// sender pays for the gas, as with any other execution failure.
    ///
    /// A clock moved to the end of time by [`increase_time`] leaves no room
    /// for another block, and every transaction is then rejected with
    /// [`Error::BlockOverflow`].
    ///
    /// [`increase_time`]: Session::increase_time
    pub fn call<A, R>(
        &mut self,
        from: AccountId,
        contract: ContractId,
        fn_name: &str,
        fn_arg: &A,
        gas_limit: u64,
    ) -> Result<CallReceipt<R>, Error>
    where
        A: for<'b> Serialize<StandardBufSerializer<'b>>,
        R: Archive,
        R::Archived: Deserialize<R, Infallible>
            + for<'b> CheckBytes<DefaultValidator<'b>>,
    {
        let fn_arg = Self::serialize_data(fn_arg)?;
        let receipt = self.transact(
            from,
            contract,
            fn_name,
            fn_arg,
            gas_limit,
            &|data: &[u8]| Self::deserialize_data::<R>(data).is_ok(),
        )?;

        receipt.deserialize()
    }

    /// Execute a raw transaction on the current state of this session.
    ///
    /// Raw calls do not specify the type of the argument or of the return.
    /// The caller is responsible for serializing the argument as the target
    /// `contract` expects.
    ///
    /// For more information about calls see [`call`].
    ///
    /// [`call`]: Session::call
    pub fn call_raw<V: Into<Vec<u8>>>(
        &mut self,
        from: AccountId,
        contract: ContractId,
        fn_name: &str,
        fn_arg: V,
        gas_limit: u64,
    ) -> Result<CallReceipt<Vec<u8>>, Error> {
        self.transact(
            from,
            contract,
            fn_name,
            fn_arg.into(),
            gas_limit,
            &|_: &[u8]| true,
        )
    }

    // Validates, mines and executes a call. Execution only commits when the
    // returned data passes `check`.
    fn transact(
        &mut self,
        from: AccountId,
        contract: ContractId,
        fn_name: &str,
        fn_arg: Vec<u8>,
        gas_limit: u64,
        check: &dyn Fn(&[u8]) -> bool,
    ) -> Result<CallReceipt<Vec<u8>>, Error> {
        if fn_name == INIT_METHOD {
            return Err(InitializationError("init call not allowed".into()));
        }
        self.check_function(&contract, fn_name)?;

        let intrinsic = gas::intrinsic(fn_arg.len(), false);
        self.validate_transaction(from, gas_limit, intrinsic)?;

        let tx_hash = self.tx_hash(from, &contract, fn_name, &fn_arg);
        let block = self.mine_block()?;

        let (result, spent) = self.execute(
            from,
            contract,
            fn_name,
            &fn_arg,
            gas_limit - intrinsic,
            block,
            check,
        );

        let gas_spent = intrinsic + spent;
        self.settle(from, gas_spent);

        match result {
            Ok((data, events)) => {
                debug!(
                    %contract,
                    fn_name,
                    %from,
                    height = block.height,
                    gas_spent,
                    events = events.len(),
                    "transaction executed"
                );
                Ok(CallReceipt {
                    tx_hash,
                    block,
                    gas_limit,
                    gas_spent,
                    gas_price: self.config.gas_price,
                    events,
                    data,
                })
            }
            Err(err) => {
                warn!(
                    %contract,
                    fn_name,
                    %from,
                    height = block.height,
                    gas_spent,
                    error = %err,
                    "transaction failed"
                );
                Err(Error::from_contract(err, gas_spent))
            }
        }
    }

    /// Evaluate `fn_name` on a `contract` without a transaction.
    ///
    /// The function runs against the state as of the latest block, with the
    /// null account as caller and the block gas limit. Whatever it changes is
    /// discarded afterwards, and nothing is mined or charged.
    pub fn query<A, R>(
        &mut self,
        contract: ContractId,
        fn_name: &str,
        fn_arg: &A,
    ) -> Result<R, Error>
    where
        A: for<'b> Serialize<StandardBufSerializer<'b>>,
        R: Archive,
        R::Archived: Deserialize<R, Infallible>
            + for<'b> CheckBytes<DefaultValidator<'b>>,
    {
        let fn_arg = Self::serialize_data(fn_arg)?;
        let data = self.query_raw(contract, fn_name, fn_arg)?;

        Self::deserialize_data(&data)
    }

    /// Evaluate a function without a transaction, with a raw argument and
    /// return.
    ///
    /// For more information about queries see [`query`].
    ///
    /// [`query`]: Session::query
    pub fn query_raw<V: Into<Vec<u8>>>(
        &mut self,
        contract: ContractId,
        fn_name: &str,
        fn_arg: V,
    ) -> Result<Vec<u8>, Error> {
        if fn_name == INIT_METHOD {
            return Err(InitializationError("init query not allowed".into()));
        }
        self.check_function(&contract, fn_name)?;

        let fn_arg = fn_arg.into();
        let limit = self.config.block_gas_limit;

        let deployed = self
            .contracts
            .get_mut(&contract)
            .ok_or(Error::ContractDoesNotExist(contract))?;

        let mut env = Env::new(
            AccountId::ZERO,
            contract,
            self.block.height,
            self.block.timestamp,
            limit,
        );

        deployed.instance.snap();
        let result = deployed.instance.call(&mut env, fn_name, &fn_arg);
        deployed.instance.revert();

        let spent = env.spent();
        trace!(%contract, fn_name, spent, "query executed");

        result.map_err(|err| Error::from_contract(err, spent))
    }

    pub fn serialize_data<V>(value: &V) -> Result<Vec<u8>, Error>
    where
        V: for<'a> Serialize<StandardBufSerializer<'a>>,
    {
        sandchain_uplink::serialize_data(value)
            .map_err(|_| Error::SerializationError)
    }

    fn deserialize_data<T>(bytes: &[u8]) -> Result<T, Error>
    where
        T: Archive,
        T::Archived: Deserialize<T, Infallible>
            + for<'b> CheckBytes<DefaultValidator<'b>>,
    {
        sandchain_uplink::deserialize_data(bytes)
            .map_err(|_| Error::ValidationError)
    }

    fn check_function(
        &self,
        contract: &ContractId,
        fn_name: &str,
    ) -> Result<(), Error> {
        let deployed = self
            .contracts
            .get(contract)
            .ok_or(Error::ContractDoesNotExist(*contract))?;

        match deployed.instance.is_function_exported(fn_name) {
            true => Ok(()),
            false => Err(Error::InvalidFunction(fn_name.into())),
        }
    }

    // Checks everything that would make a transaction impossible to mine.
    fn validate_transaction(
        &self,
        from: AccountId,
        gas_limit: u64,
        intrinsic: u64,
    ) -> Result<(), Error> {
        if from.is_zero() {
            return Err(Error::NullAccount);
        }
        let account = self
            .accounts
            .get(&from)
            .ok_or(Error::UnknownAccount(from))?;

        let max = self.config.block_gas_limit;
        if gas_limit > max {
            return Err(Error::GasLimitTooHigh {
                limit: gas_limit,
                max,
            });
        }
        if gas_limit < intrinsic {
            return Err(Error::IntrinsicGas {
                limit: gas_limit,
                required: intrinsic,
            });
        }

        let required = self.fee(gas_limit);
        if account.balance < required {
            return Err(Error::InsufficientBalance {
                account: from,
                balance: account.balance,
                required,
            });
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn execute(
        &mut self,
        caller: AccountId,
        contract: ContractId,
        fn_name: &str,
        fn_arg: &[u8],
        limit: u64,
        block: BlockInfo,
        check: &dyn Fn(&[u8]) -> bool,
    ) -> Execution {
        let deployed = match self.contracts.get_mut(&contract) {
            Some(deployed) => deployed,
            None => return (Err(ContractError::InvalidArgument), 0),
        };

        let mut env =
            Env::new(caller, contract, block.height, block.timestamp, limit);

        deployed.instance.snap();
        let result = deployed
            .instance
            .call(&mut env, fn_name, fn_arg)
            .and_then(|data| match check(&data) {
                true => Ok(data),
                false => Err(ContractError::InvalidArgument),
            });

        match result {
            Ok(_) => deployed.instance.apply(),
            Err(_) => {
                trace!(%contract, fn_name, "reverting contract state");
                deployed.instance.revert();
            }
        }

        let (spent, events) = env.finish();
        (result.map(|data| (data, events)), spent)
    }

    // Mines the block a transaction lands in. Fails without touching the
    // chain if either the height or the clock would wrap.
    fn mine_block(&mut self) -> Result<BlockInfo, Error> {
        let height = self.block.height.checked_add(1);
        let timestamp =
            self.block.timestamp.checked_add(self.config.block_time);

        self.block = match (height, timestamp) {
            (Some(height), Some(timestamp)) => BlockInfo { height, timestamp },
            _ => return Err(Error::BlockOverflow(self.block)),
        };
        trace!(
            height = self.block.height,
            timestamp = self.block.timestamp,
            "block mined"
        );
        Ok(self.block)
    }

    // Charges the sender for the gas spent and bumps its nonce.
    fn settle(&mut self, from: AccountId, gas_spent: u64) {
        let fee = self.fee(gas_spent);
        if let Some(account) = self.accounts.get_mut(&from) {
            account.balance = account.balance.saturating_sub(fee);
            account.nonce += 1;
        }
    }

    fn fee(&self, gas: u64) -> u128 {
        (gas as u128).saturating_mul(self.config.gas_price)
    }

    fn next_contract_id(&self, deployer: AccountId) -> ContractId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(deployer.as_bytes());
        hasher.update(&self.nonce(deployer).to_le_bytes());

        let hash: [u8; CONTRACT_ID_BYTES] = hasher.finalize().into();
        ContractId::from_bytes(hash)
    }

    fn tx_hash(
        &self,
        from: AccountId,
        contract: &ContractId,
        fn_name: &str,
        fn_arg: &[u8],
    ) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.config.chain_id.to_le_bytes());
        hasher.update(from.as_bytes());
        hasher.update(&self.nonce(from).to_le_bytes());
        hasher.update(contract.as_bytes());
        hasher.update(fn_name.as_bytes());
        hasher.update(fn_arg);
        hasher.finalize().into()
    }
}

/// The receipt given for a successful transaction, be it a deployment using
/// [`deploy`] or a call using [`call`] or [`call_raw`].
///
/// [`deploy`]: Session::deploy
/// [`call`]: Session::call
/// [`call_raw`]: Session::call_raw
#[derive(Debug, Clone)]
pub struct CallReceipt<T> {
    /// Hash identifying the transaction.
    pub tx_hash: [u8; 32],
    /// The block the transaction was mined in.
    pub block: BlockInfo,

    /// The limit used during this execution.
    pub gas_limit: u64,
    /// The amount of gas spent, intrinsic cost included.
    pub gas_spent: u64,
    /// Price, in wei, paid per unit of gas.
    pub gas_price: u128,

    /// The events emitted during the execution of the call.
    pub events: Vec<Event>,

    /// The data returned by the called contract.
    pub data: T,
}

impl<T> CallReceipt<T> {
    /// Fee, in wei, charged to the sender.
    pub fn fee(&self) -> u128 {
        (self.gas_spent as u128).saturating_mul(self.gas_price)
    }

    /// The transaction hash in hexadecimal.
    pub fn tx_hash_hex(&self) -> String {
        hex::encode(self.tx_hash)
    }
}

impl CallReceipt<Vec<u8>> {
    /// Deserializes a `CallReceipt<Vec<u8>>` into a `CallReceipt<T>` using
    /// `rkyv`.
    fn deserialize<T>(self) -> Result<CallReceipt<T>, Error>
    where
        T: Archive,
        T::Archived: Deserialize<T, Infallible>
            + for<'b> CheckBytes<DefaultValidator<'b>>,
    {
        let data = Session::deserialize_data(&self.data)?;

        Ok(CallReceipt {
            tx_hash: self.tx_hash,
            block: self.block,
            gas_limit: self.gas_limit,
            gas_spent: self.gas_spent,
            gas_price: self.gas_price,
            events: self.events,
            data,
        })
    }
}
