// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use simple_storage_harness::gas::{GasCost, GasTracker};
use simple_storage_harness::{Fixture, Operation, TxError, MAX_VALUE};

const CHEAP: u64 = 100_000;

#[test]
fn deployment_gas() -> Result<(), TxError> {
    let fixture = Fixture::new(42)?;
    let receipt = &fixture.deployment().receipt;

    assert!(receipt.gas_spent < 2_500_000);
    assert!(receipt.gas_spent > sandchain_uplink::gas::CREATE);

    let cost = GasCost::of(receipt);
    assert_eq!(cost.gas_price_gwei, 20);
    assert_eq!(cost.total_cost_wei, receipt.fee());

    Ok(())
}

#[test]
fn initial_value_barely_matters() -> Result<(), TxError> {
    let low = Fixture::new(0)?;
    let high = Fixture::new(MAX_VALUE)?;

    let low = low.deployment().receipt.gas_spent;
    let high = high.deployment().receipt.gas_spent;

    assert!(low.abs_diff(high) < 25_000);

    Ok(())
}

#[test]
fn operations_are_cheap() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let owner = fixture.account(0);
    let user = fixture.account(1);
    let mut tracker = GasTracker::new();

    let ops = [
        (Operation::Increment, user),
        (Operation::Decrement, user),
        (Operation::AddValue(25), user),
        (Operation::SetValue(100), owner),
        (Operation::Reset, owner),
        (Operation::TransferOwnership(user), owner),
    ];

    for (op, from) in ops {
        let receipt = fixture.call(op, from)?;
        assert!(receipt.gas_spent < CHEAP, "{op} spent {}", receipt.gas_spent);
        tracker.track(op.fn_name(), &receipt);
    }

    assert_eq!(tracker.count(), ops.len());
    let total: u64 = tracker.records().iter().map(|r| r.gas_used).sum();
    assert_eq!(tracker.total(), total);
    assert_eq!(tracker.average(), Some(total / ops.len() as u64));

    let summary = tracker.summary();
    assert!(summary.contains("Total Operations: 6"));
    assert!(summary.contains("- transfer_ownership: "));

    Ok(())
}

#[test]
fn failed_calls_still_cost() -> Result<(), TxError> {
    let mut fixture = Fixture::new(0)?;
    let user = fixture.account(1);

    let err = fixture
        .decrement(user)
        .expect_err("decrementing zero should fail");
    let spent = err.gas_spent().expect("the transaction was mined");

    assert!(spent > sandchain_uplink::gas::TX_BASE);
    assert!(spent < CHEAP);

    Ok(())
}

#[test]
fn reads_are_free() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let owner = fixture.account(0);
    let balance = fixture.session().balance(owner);

    for _ in 0..10 {
        fixture.value()?;
        fixture.storage_info()?;
    }

    assert_eq!(fixture.session().balance(owner), balance);

    Ok(())
}
