// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::fs;
use std::io;
use std::path::Path;

use sandchain::{AccountId, ContractId, Error, Session};
use serde::{Deserialize, Serialize};

use crate::Deployment;

/// Where a storage contract was deployed, recorded for a frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub contract_address: ContractId,
    pub chain_id: u64,
    pub deployer: AccountId,
    pub initial_value: u32,
    /// Timestamp, in seconds, of the block the contract was deployed in.
    pub deployment_time: u64,
}

impl DeploymentInfo {
    /// Record `deployment`, as deployed on the chain of `session`.
    ///
    /// The deployer is taken from the contract's metadata on chain.
    ///
    /// # Errors
    /// [`Error::ContractDoesNotExist`] if the contract is not deployed on
    /// the given chain.
    pub fn new(
        session: &Session,
        deployment: &Deployment,
        initial_value: u32,
    ) -> Result<Self, Error> {
        let contract = deployment.contract;
        let metadata = session
            .contract_metadata(&contract)
            .ok_or(Error::ContractDoesNotExist(contract))?;

        Ok(Self {
            contract_address: contract,
            chain_id: session.config().chain_id,
            deployer: metadata.deployer,
            initial_value,
            deployment_time: deployment.receipt.block.timestamp,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Write the record as pretty JSON, creating parent directories as
    /// needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = self.to_json().map_err(io::Error::from)?;
        fs::write(path, json)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }
}
