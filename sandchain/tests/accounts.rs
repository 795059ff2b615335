// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use sandchain::{
    dev_account, AccountId, ContractData, Error, Ledger, LedgerConfig,
    WEI_PER_ETHER, WEI_PER_GWEI,
};
use sandchain_uplink::gas;
use simple_storage::SimpleStorage;

const GAS_LIMIT: u64 = 1_000_000;

#[test]
fn genesis_accounts_are_funded() {
    let ledger = Ledger::ephemeral();
    let session = ledger.session();

    assert_eq!(session.accounts().len(), 10);
    for (index, account) in session.accounts().iter().enumerate() {
        assert_eq!(*account, dev_account(index));
        assert_eq!(session.balance(*account), 10_000 * WEI_PER_ETHER);
        assert_eq!(session.nonce(*account), 0);
    }

    let stranger = AccountId::from_bytes([9; 20]);
    assert_eq!(session.balance(stranger), 0);
    assert_eq!(session.config().chain_id, 1337);
}

#[test]
fn unknown_and_null_senders_are_rejected() -> Result<(), Error> {
    let ledger = Ledger::ephemeral();
    let mut session = ledger.session();

    let stranger = AccountId::from_bytes([9; 20]);
    let err = session
        .deploy(
            SimpleStorage::default(),
            ContractData::builder(stranger).constructor_arg(&1u32),
            GAS_LIMIT,
        )
        .expect_err("an unknown account cannot sign");
    assert_eq!(err, Error::UnknownAccount(stranger));

    let err = session
        .deploy(
            SimpleStorage::default(),
            ContractData::builder(AccountId::ZERO).constructor_arg(&1u32),
            GAS_LIMIT,
        )
        .expect_err("the null account cannot sign");
    assert_eq!(err, Error::NullAccount);

    assert_eq!(session.fund(AccountId::ZERO, 1), Err(Error::NullAccount));

    // once funded, the stranger can deploy
    session.fund(stranger, WEI_PER_ETHER)?;
    assert_eq!(session.balance(stranger), WEI_PER_ETHER);
    session.deploy(
        SimpleStorage::default(),
        ContractData::builder(stranger).constructor_arg(&1u32),
        GAS_LIMIT,
    )?;
    assert_eq!(session.nonce(stranger), 1);

    Ok(())
}

#[test]
fn gas_limit_is_validated() -> Result<(), Error> {
    let ledger = Ledger::ephemeral();
    let mut session = ledger.session();
    let deployer = session.accounts()[0];
    let max = ledger.config().block_gas_limit;

    let err = session
        .deploy(
            SimpleStorage::default(),
            ContractData::builder(deployer).constructor_arg(&1u32),
            max + 1,
        )
        .expect_err("a limit above the block gas limit should fail");
    assert_eq!(err, Error::GasLimitTooHigh { limit: max + 1, max });

    let err = session
        .deploy(
            SimpleStorage::default(),
            ContractData::builder(deployer).constructor_arg(&1u32),
            gas::TX_BASE,
        )
        .expect_err("a limit below the intrinsic cost should fail");
    assert!(matches!(
        err,
        Error::IntrinsicGas { limit: gas::TX_BASE, required }
            if required > gas::TX_BASE + gas::CREATE
    ));

    assert_eq!(session.height(), 0);
    assert_eq!(session.nonce(deployer), 0);
    assert_eq!(session.balance(deployer), 10_000 * WEI_PER_ETHER);

    Ok(())
}

#[test]
fn sender_must_afford_the_limit() -> Result<(), Error> {
    let config = LedgerConfig::builder()
        .accounts(2)
        .account_balance(WEI_PER_ETHER / 1_000)
        .gas_price(WEI_PER_GWEI)
        .build()?;
    let ledger = Ledger::new(config)?;
    let mut session = ledger.session();
    let deployer = session.accounts()[0];

    // 0.001 ether buys a million gas at 1 gwei
    let err = session
        .deploy(
            SimpleStorage::default(),
            ContractData::builder(deployer).constructor_arg(&1u32),
            1_000_001,
        )
        .expect_err("the deployer cannot afford this limit");
    assert_eq!(
        err,
        Error::InsufficientBalance {
            account: deployer,
            balance: WEI_PER_ETHER / 1_000,
            required: 1_000_001 * WEI_PER_GWEI,
        }
    );

    let receipt = session.deploy(
        SimpleStorage::default(),
        ContractData::builder(deployer).constructor_arg(&1u32),
        1_000_000,
    )?;
    assert_eq!(
        session.balance(deployer),
        WEI_PER_ETHER / 1_000 - receipt.fee()
    );

    Ok(())
}

#[test]
fn nonce_counts_every_mined_transaction() -> Result<(), Error> {
    let ledger = Ledger::ephemeral();
    let mut session = ledger.session();
    let owner = session.accounts()[0];
    let user = session.accounts()[1];

    let id = session
        .deploy(
            SimpleStorage::default(),
            ContractData::builder(owner).constructor_arg(&0u32),
            GAS_LIMIT,
        )?
        .data;
    assert_eq!(session.nonce(owner), 1);

    session.call::<(), ()>(user, id, "increment", &(), GAS_LIMIT)?;
    let _ = session.call::<(), ()>(user, id, "reset", &(), GAS_LIMIT);
    assert_eq!(session.nonce(user), 2);

    // queries are not transactions
    session.query::<(), u32>(id, "get_value", &())?;
    assert_eq!(session.nonce(user), 2);
    assert_eq!(session.nonce(owner), 1);

    Ok(())
}
