// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use simple_storage_harness::{
    read_events, ErrorKind, Fixture, Operation, StorageEvent, TxError,
    ValueChanged, MAX_VALUE,
};

#[test]
fn increment() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let user = fixture.account(1);

    let receipt = fixture.increment(user)?;
    assert_eq!(fixture.value()?, 43);
    assert_eq!(
        read_events(&receipt),
        vec![StorageEvent::ValueChanged(ValueChanged {
            old_value: 42,
            new_value: 43,
            updated_by: user,
        })]
    );

    Ok(())
}

#[test]
fn decrement() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let user = fixture.account(1);

    fixture.decrement(user)?;
    assert_eq!(fixture.value()?, 41);

    Ok(())
}

#[test]
fn decrement_at_zero_fails() -> Result<(), TxError> {
    let mut fixture = Fixture::new(1)?;
    let user = fixture.account(1);

    fixture.decrement(user)?;
    assert_eq!(fixture.value()?, 0);

    let before = fixture.storage_info()?;
    let err = fixture
        .decrement(user)
        .expect_err("decrementing zero should fail");
    assert!(err.matches(
        ErrorKind::OutOfRange,
        Some("Cannot decrement below zero")
    ));
    assert_eq!(fixture.storage_info()?, before);

    Ok(())
}

#[test]
fn add_value() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let user = fixture.account(1);

    let receipt = fixture.add_value(25, user)?;
    assert_eq!(fixture.value()?, 67);

    let events = read_events(&receipt);
    let changed = events[0]
        .as_value_changed()
        .expect("a value change should be emitted");
    assert_eq!(changed.old_value, 42);
    assert_eq!(changed.new_value, 67);

    // adding nothing is still a write
    let receipt = fixture.add_value(0, user)?;
    assert_eq!(read_events(&receipt).len(), 1);
    assert_eq!(fixture.value()?, 67);

    Ok(())
}

#[test]
fn upper_bound_is_enforced() -> Result<(), TxError> {
    let mut fixture = Fixture::new(0)?;
    let owner = fixture.account(0);
    let user = fixture.account(1);

    fixture.set_value(MAX_VALUE, owner)?;

    let err = fixture
        .increment(user)
        .expect_err("incrementing the maximum should fail");
    assert!(err.matches(ErrorKind::OutOfRange, Some("Value too large")));
    assert_eq!(fixture.value()?, MAX_VALUE);

    fixture.set_value(1, owner)?;
    let err = fixture
        .add_value(MAX_VALUE, user)
        .expect_err("reaching the limit should fail");
    assert!(err.matches(ErrorKind::OutOfRange, None));

    // arithmetic overflow is just another out of range
    let err = fixture
        .add_value(u32::MAX, user)
        .expect_err("overflowing should fail");
    assert!(err.matches(ErrorKind::OutOfRange, Some("Value too large")));
    assert_eq!(fixture.value()?, 1);

    fixture.add_value(MAX_VALUE - 1, user)?;
    assert_eq!(fixture.value()?, MAX_VALUE);

    Ok(())
}

#[test]
fn set_value_by_owner() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let owner = fixture.account(0);

    let receipt = fixture.set_value(100, owner)?;
    assert_eq!(fixture.value()?, 100);
    assert_eq!(
        read_events(&receipt),
        vec![StorageEvent::ValueChanged(ValueChanged {
            old_value: 42,
            new_value: 100,
            updated_by: owner,
        })]
    );

    let err = fixture
        .set_value(1_000_000, owner)
        .expect_err("setting the limit should fail");
    assert!(err.matches(ErrorKind::OutOfRange, Some("Value too large")));
    assert_eq!(fixture.value()?, 100);

    Ok(())
}

#[test]
fn reset_by_owner() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let owner = fixture.account(0);

    fixture.set_value(123, owner)?;
    let before = fixture.storage_info()?;

    let receipt = fixture.reset(owner)?;
    let after = fixture.storage_info()?;

    assert_eq!(after.value, 0);
    assert!(after.last_updated > before.last_updated);
    assert_eq!(
        read_events(&receipt),
        vec![StorageEvent::ValueChanged(ValueChanged {
            old_value: 123,
            new_value: 0,
            updated_by: owner,
        })]
    );

    // resetting zero still stamps the write
    let receipt = fixture.reset(owner)?;
    let again = fixture.storage_info()?;
    assert_eq!(again.value, 0);
    assert!(again.last_updated > after.last_updated);
    assert_eq!(read_events(&receipt).len(), 1);

    Ok(())
}

#[test]
fn operations_describe_themselves() {
    assert_eq!(Operation::Increment.to_string(), "increment()");
    assert_eq!(Operation::AddValue(25).to_string(), "add_value(25)");
    assert_eq!(Operation::SetValue(7).fn_name(), "set_value");

    assert!(Operation::Reset.is_owner_only());
    assert!(!Operation::Decrement.is_owner_only());
}
