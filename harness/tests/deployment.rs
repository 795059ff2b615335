// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use sandchain::{Error, Ledger};
use simple_storage_harness::{
    read_events, DeploymentInfo, ErrorKind, Fixture, StorageEvent, TxError,
    ValueChanged, MAX_VALUE, VALUE_LIMIT,
};

#[test]
fn deploy_with_initial_value() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let deployer = fixture.account(0);

    assert_eq!(fixture.value()?, 42);
    assert_eq!(fixture.owner()?, deployer);

    let events = read_events(&fixture.deployment().receipt);
    assert_eq!(
        events,
        vec![StorageEvent::ValueChanged(ValueChanged {
            old_value: 0,
            new_value: 42,
            updated_by: deployer,
        })]
    );

    let info = fixture.storage_info()?;
    assert_eq!(info.last_updated, fixture.deployment().receipt.block.timestamp);

    Ok(())
}

#[test]
fn deploy_at_the_bounds() -> Result<(), TxError> {
    let mut fixture = Fixture::new(0)?;
    assert_eq!(fixture.value()?, 0);

    let deployer = fixture.account(0);
    let max = fixture.deploy(MAX_VALUE, deployer)?;
    let value: u32 =
        fixture.session_mut().query(max.contract, "get_value", &())?;
    assert_eq!(value, MAX_VALUE);

    Ok(())
}

#[test]
fn deploy_out_of_range_fails() {
    let err = Fixture::new(VALUE_LIMIT)
        .expect_err("deploying the limit itself should fail");

    assert!(err.matches(ErrorKind::OutOfRange, Some("Value too large")));
    assert!(err.gas_spent().is_some());

    let err = Fixture::new(u32::MAX).expect_err("u32::MAX is out of range");
    assert!(err.matches(ErrorKind::OutOfRange, None));
}

#[test]
fn any_account_can_deploy() -> Result<(), TxError> {
    let mut fixture = Fixture::new(1)?;
    let user = fixture.account(3);

    let deployment = fixture.deploy(7, user)?;
    assert_ne!(deployment.contract, fixture.contract());

    let owner: sandchain::AccountId =
        fixture.session_mut().query(deployment.contract, "owner", &())?;
    assert_eq!(owner, user);

    // the fixture's own contract is untouched
    assert_eq!(fixture.value()?, 1);
    assert_eq!(fixture.owner()?, fixture.account(0));

    Ok(())
}

#[test]
fn deployment_record_round_trips_as_json() -> Result<(), TxError> {
    let fixture = Fixture::new(42)?;
    let deployer = fixture.account(0);

    let info =
        DeploymentInfo::new(fixture.session(), fixture.deployment(), 42)?;
    assert_eq!(info.deployer, deployer);
    assert_eq!(info.chain_id, 1337);
    assert_eq!(info.contract_address, fixture.contract());
    assert_eq!(
        info.deployment_time,
        fixture.session().config().genesis_timestamp + 1
    );

    let json = info.to_json().expect("serializing should succeed");
    let value: serde_json::Value =
        serde_json::from_str(&json).expect("the record is valid JSON");
    assert_eq!(value["chainId"], 1337);
    assert_eq!(value["initialValue"], 42);
    assert_eq!(value["deployer"], deployer.to_string());
    assert_eq!(
        value["contractAddress"],
        fixture.contract().to_string()
    );

    let parsed =
        DeploymentInfo::from_json(&json).expect("deserializing should succeed");
    assert_eq!(parsed, info);

    Ok(())
}

#[test]
fn deployment_record_names_the_actual_deployer() -> Result<(), TxError> {
    let mut fixture = Fixture::new(42)?;
    let deployer = fixture.account(3);

    let second = fixture.deploy(7, deployer)?;
    let info = DeploymentInfo::new(fixture.session(), &second, 7)?;
    assert_eq!(info.deployer, deployer);
    assert_eq!(info.contract_address, second.contract);

    // a fresh chain has no contracts at all
    let empty = Ledger::ephemeral().session();
    let err = DeploymentInfo::new(&empty, &second, 7)
        .expect_err("the contract is not on a fresh chain");
    assert_eq!(err, Error::ContractDoesNotExist(second.contract));

    Ok(())
}

#[test]
fn deployment_record_saves_to_disk() -> Result<(), TxError> {
    let fixture = Fixture::new(5)?;
    let info =
        DeploymentInfo::new(fixture.session(), fixture.deployment(), 5)?;

    let path = std::env::temp_dir()
        .join(format!("simple-storage-{}", std::process::id()))
        .join("deployment.json");

    info.save(&path).expect("saving should succeed");
    let loaded = DeploymentInfo::load(&path).expect("loading should succeed");
    assert_eq!(loaded, info);

    let _ = std::fs::remove_dir_all(path.parent().expect("has a parent"));

    Ok(())
}
