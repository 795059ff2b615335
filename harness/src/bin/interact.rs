// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use simple_storage_harness::gas::{wei_to_ether, GasCost, GasTracker};
use simple_storage_harness::{
    read_events, DeploymentInfo, Fixture, Operation, StorageEvent, TxError,
};
use tracing_subscriber::EnvFilter;

/// Deploy the storage contract on a simulated chain and walk it through its
/// operations.
#[derive(Parser)]
#[command(name = "interact", version, about, long_about = None)]
struct Cli {
    /// Value the contract is deployed with
    #[arg(long, default_value_t = 42)]
    initial_value: u32,

    /// Write the deployment record as JSON to this path
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut fixture = Fixture::new(cli.initial_value)?;
    let mut tracker = GasTracker::new();

    let owner = fixture.account(0);
    let user1 = fixture.account(1);
    let user2 = fixture.account(2);

    println!("{}", "Deployment".bold());
    println!("   contract: {:#}", fixture.contract());
    println!("   deployer: {owner}");
    println!(
        "   balance:  {:.4} ETH",
        wei_to_ether(fixture.session().balance(owner))
    );
    println!("   cost:     {}", GasCost::of(&fixture.deployment().receipt));
    tracker.track("deploy", &fixture.deployment().receipt);

    print_state(&mut fixture)?;

    let steps = [
        (Operation::Increment, owner),
        (Operation::AddValue(10), owner),
        (Operation::SetValue(100), owner),
        (Operation::SetValue(200), user1),
        (Operation::Decrement, user2),
        (Operation::TransferOwnership(user1), owner),
        (Operation::Reset, owner),
        (Operation::Reset, user1),
    ];

    println!("\n{}", "Interactions".bold());
    for (op, from) in steps {
        match fixture.call(op, from) {
            Ok(receipt) => {
                println!("   {} {op} from {from}", "ok".green());
                for event in read_events(&receipt) {
                    print_event(&event);
                }
                tracker.track(op.fn_name(), &receipt);
            }
            Err(TxError::Ledger(err)) => return Err(err.into()),
            Err(err) => {
                println!("   {} {op} from {from}: {err}", "reverted".red());
            }
        }
    }

    print_state(&mut fixture)?;

    println!("\n{}", tracker.summary());

    if let Some(path) = cli.out {
        let deployment = fixture.deployment();
        let info = DeploymentInfo::new(
            fixture.session(),
            deployment,
            cli.initial_value,
        )?;
        info.save(&path)?;
        println!("Deployment info saved to {}", path.display());
    }

    Ok(())
}

fn print_state(fixture: &mut Fixture) -> Result<(), TxError> {
    let info = fixture.storage_info()?;

    println!("\n{}", "State".bold());
    println!("   value:        {}", info.value);
    println!("   owner:        {}", info.owner);
    println!("   last updated: {}", info.last_updated);

    Ok(())
}

fn print_event(event: &StorageEvent) {
    match event {
        StorageEvent::ValueChanged(e) => println!(
            "      ValueChanged({} -> {}, by {})",
            e.old_value, e.new_value, e.updated_by
        ),
        StorageEvent::OwnershipTransferred(e) => println!(
            "      OwnershipTransferred({} -> {})",
            e.previous_owner, e.new_owner
        ),
        StorageEvent::Unknown(e) => {
            println!("      {} ({} bytes)", e.topic, e.data.len())
        }
    }
}
