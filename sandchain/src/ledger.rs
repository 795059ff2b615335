// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::sync::Arc;

use crate::config::LedgerConfig;
use crate::error::Error;
use crate::session::Session;

/// A simulated chain, described by its [`LedgerConfig`].
///
/// The ledger itself holds no state: every [`session`] starts a new chain
/// from genesis, so tests never observe each other's transactions.
///
/// [`session`]: Ledger::session
#[derive(Debug, Clone)]
pub struct Ledger {
    config: Arc<LedgerConfig>,
}

impl Ledger {
    /// A ledger running with the given `config`.
    ///
    /// # Errors
    /// The configuration is checked with [`LedgerConfig::validate`].
    pub fn new(config: LedgerConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// A ledger with the default development configuration.
    pub fn ephemeral() -> Self {
        Self {
            config: Arc::new(LedgerConfig::default()),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Spawn a new chain at genesis, with the development accounts funded.
    pub fn session(&self) -> Session {
        Session::new(LedgerConfig::clone(&self.config))
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::ephemeral()
    }
}
