// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use crate::Error;

pub const WEI_PER_GWEI: u128 = 1_000_000_000;
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Parameters of a simulated chain.
///
/// The defaults mirror a local development network: chain ID 1337, ten
/// accounts holding 10 000 ether each, and a gas price of 20 gwei.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Identifier of the chain.
    pub chain_id: u64,
    /// How many development accounts to fund at genesis.
    pub accounts: usize,
    /// Balance, in wei, of each development account at genesis.
    pub account_balance: u128,
    /// Price, in wei, of a unit of gas.
    pub gas_price: u128,
    /// Seconds between consecutive blocks.
    pub block_time: u64,
    /// Timestamp, in seconds, of the genesis block.
    pub genesis_timestamp: u64,
    /// Most gas a single transaction may be given.
    pub block_gas_limit: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            chain_id: 1337,
            accounts: 10,
            account_balance: 10_000 * WEI_PER_ETHER,
            gas_price: 20 * WEI_PER_GWEI,
            block_time: 1,
            genesis_timestamp: 1_700_000_000,
            block_gas_limit: 30_000_000,
        }
    }
}

impl LedgerConfig {
    /// Build a configuration, starting from the defaults.
    pub fn builder() -> LedgerConfigBuilder {
        LedgerConfigBuilder {
            config: LedgerConfig::default(),
        }
    }

    /// Check that a chain can run with this configuration.
    ///
    /// # Errors
    /// A chain needs at least one account to sign with, and blocks must be
    /// at least one second apart so that block timestamps strictly
    /// increase.
    pub fn validate(&self) -> Result<(), Error> {
        if self.accounts == 0 {
            return Err(Error::InvalidConfig(
                "at least one account is required".into(),
            ));
        }
        if self.block_time == 0 {
            return Err(Error::InvalidConfig(
                "block time must be at least one second".into(),
            ));
        }
        Ok(())
    }
}

pub struct LedgerConfigBuilder {
    config: LedgerConfig,
}

impl LedgerConfigBuilder {
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = chain_id;
        self
    }

    pub fn accounts(mut self, accounts: usize) -> Self {
        self.config.accounts = accounts;
        self
    }

    pub fn account_balance(mut self, balance: u128) -> Self {
        self.config.account_balance = balance;
        self
    }

    pub fn gas_price(mut self, gas_price: u128) -> Self {
        self.config.gas_price = gas_price;
        self
    }

    pub fn block_time(mut self, seconds: u64) -> Self {
        self.config.block_time = seconds;
        self
    }

    pub fn genesis_timestamp(mut self, timestamp: u64) -> Self {
        self.config.genesis_timestamp = timestamp;
        self
    }

    pub fn block_gas_limit(mut self, limit: u64) -> Self {
        self.config.block_gas_limit = limit;
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    /// See [`LedgerConfig::validate`].
    pub fn build(self) -> Result<LedgerConfig, Error> {
        self.config.validate()?;
        Ok(self.config)
    }
}
