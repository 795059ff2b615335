// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Gas accounting helpers.

use core::fmt;
use core::fmt::Write;

use sandchain::{CallReceipt, WEI_PER_ETHER, WEI_PER_GWEI};

/// Gas price, in gwei, assumed when none is given.
pub const DEFAULT_GAS_PRICE_GWEI: u64 = 20;

/// Convert wei to ether.
pub fn wei_to_ether(wei: u128) -> f64 {
    wei as f64 / WEI_PER_ETHER as f64
}

/// Convert ether to wei, truncating anything below a wei.
pub fn ether_to_wei(ether: f64) -> u128 {
    (ether * WEI_PER_ETHER as f64) as u128
}

/// Gas used by a single tracked transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasRecord {
    pub operation: String,
    pub gas_used: u64,
    /// Transaction hash in hexadecimal.
    pub tx_hash: String,
}

/// Collects the gas used by a sequence of transactions.
#[derive(Debug, Default, Clone)]
pub struct GasTracker {
    records: Vec<GasRecord>,
    total: u64,
}

impl GasTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the gas spent by `receipt` under the name `operation`.
    pub fn track<T>(
        &mut self,
        operation: impl Into<String>,
        receipt: &CallReceipt<T>,
    ) {
        self.total += receipt.gas_spent;
        self.records.push(GasRecord {
            operation: operation.into(),
            gas_used: receipt.gas_spent,
            tx_hash: receipt.tx_hash_hex(),
        });
    }

    pub fn records(&self) -> &[GasRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Average gas per tracked transaction, rounded down.
    pub fn average(&self) -> Option<u64> {
        match self.records.len() {
            0 => None,
            n => Some(self.total / n as u64),
        }
    }

    /// Human readable report of everything tracked.
    pub fn summary(&self) -> String {
        let average = match self.average() {
            Some(average) => average,
            None => return "No gas data recorded".into(),
        };

        let mut summary = String::from("Gas Usage Summary:\n");
        // writing to a `String` cannot fail
        let _ = writeln!(summary, "   Total Operations: {}", self.count());
        let _ = writeln!(
            summary,
            "   Total Gas Used: {}",
            thousands(self.total)
        );
        let _ = writeln!(
            summary,
            "   Average Gas per Operation: {}",
            thousands(average)
        );
        summary.push_str("   Operations:\n");
        for record in &self.records {
            let _ = writeln!(
                summary,
                "     - {}: {} gas",
                record.operation,
                thousands(record.gas_used)
            );
        }
        summary
    }
}

/// The cost of some amount of gas at a given price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasCost {
    pub gas_used: u64,
    pub gas_price_gwei: u64,
    pub total_cost_wei: u128,
}

impl GasCost {
    pub fn new(gas_used: u64, gas_price_gwei: u64) -> Self {
        let price = gas_price_gwei as u128 * WEI_PER_GWEI;
        Self {
            gas_used,
            gas_price_gwei,
            total_cost_wei: gas_used as u128 * price,
        }
    }

    /// The cost of the gas `receipt` spent, at the price it paid.
    pub fn of<T>(receipt: &CallReceipt<T>) -> Self {
        let gas_price_gwei = (receipt.gas_price / WEI_PER_GWEI) as u64;
        Self {
            gas_used: receipt.gas_spent,
            gas_price_gwei,
            total_cost_wei: receipt.fee(),
        }
    }

    pub fn total_cost_ether(&self) -> f64 {
        wei_to_ether(self.total_cost_wei)
    }
}

impl fmt::Display for GasCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} gas @ {} Gwei = {:.6} ETH",
            thousands(self.gas_used),
            self.gas_price_gwei,
            self.total_cost_ether()
        )
    }
}

// Groups digits by thousands, as in `1,234,567`.
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
