// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use sandchain::AccountId;
use simple_storage_harness::{
    read_events, ErrorKind, Fixture, Operation, OwnershipTransferred,
    StorageEvent, TxError,
};

#[test]
fn non_owner_is_rejected() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let user = fixture.account(1);
    let other = fixture.account(2);

    let before = fixture.storage_info()?;

    for op in [
        Operation::SetValue(200),
        Operation::Reset,
        Operation::TransferOwnership(other),
    ] {
        let err = fixture
            .call(op, user)
            .expect_err("only the owner may do this");
        assert!(
            err.matches(ErrorKind::NotOwner, Some("Not the owner")),
            "{op} should fail with NotOwner, got {err}"
        );
    }

    assert_eq!(fixture.storage_info()?, before);

    Ok(())
}

#[test]
fn ownership_is_checked_before_bounds() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let user = fixture.account(1);

    let err = fixture
        .set_value(1_000_000, user)
        .expect_err("a non-owner with a bad value should fail");
    assert!(err.matches(ErrorKind::NotOwner, None));

    Ok(())
}

#[test]
fn transfer_ownership() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let owner = fixture.account(0);
    let user = fixture.account(1);

    let receipt = fixture.transfer_ownership(user, owner)?;
    assert_eq!(fixture.owner()?, user);
    assert_eq!(
        read_events(&receipt),
        vec![StorageEvent::OwnershipTransferred(OwnershipTransferred {
            previous_owner: owner,
            new_owner: user,
        })]
    );

    let err = fixture
        .set_value(7, owner)
        .expect_err("the previous owner is no longer in charge");
    assert!(err.matches(ErrorKind::NotOwner, Some("Not the owner")));

    fixture.set_value(7, user)?;
    assert_eq!(fixture.value()?, 7);

    Ok(())
}

#[test]
fn transfer_does_not_touch_the_value() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let owner = fixture.account(0);
    let user = fixture.account(1);

    let before = fixture.storage_info()?;
    fixture.transfer_ownership(user, owner)?;
    let after = fixture.storage_info()?;

    assert_eq!(after.value, before.value);
    assert_eq!(after.last_updated, before.last_updated);
    assert_eq!(after.owner, user);

    Ok(())
}

#[test]
fn transfer_to_zero_fails() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let owner = fixture.account(0);

    let err = fixture
        .transfer_ownership(AccountId::ZERO, owner)
        .expect_err("the null account cannot own the contract");
    assert!(err.matches(ErrorKind::InvalidAddress, Some("Invalid address")));
    assert_eq!(fixture.owner()?, owner);

    Ok(())
}

#[test]
fn transfer_to_self_fails() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let owner = fixture.account(0);

    let err = fixture
        .transfer_ownership(owner, owner)
        .expect_err("the owner already owns the contract");
    assert!(err.matches(ErrorKind::AlreadyOwner, Some("Already the owner")));
    assert_eq!(fixture.owner()?, owner);

    Ok(())
}

#[test]
fn ownership_can_travel() -> Result<(), TxError> {
    let mut fixture = Fixture::new(0)?;
    let accounts: Vec<_> = (0..4).map(|i| fixture.account(i)).collect();

    for pair in accounts.windows(2) {
        fixture.transfer_ownership(pair[1], pair[0])?;
        assert_eq!(fixture.owner()?, pair[1]);
    }

    // and back home
    fixture.transfer_ownership(accounts[0], accounts[3])?;
    assert_eq!(fixture.owner()?, accounts[0]);

    Ok(())
}
