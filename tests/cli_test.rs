use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/session.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "step,action,outcome,state,balance,item,coins",
        ))
        .stdout(predicate::str::contains("4,collect,ok,idle,0,coke,dime"))
        .stdout(predicate::str::contains(
            "7,collect,payment_incomplete,selecting,25,,",
        ))
        .stdout(predicate::str::contains("8,refund,ok,idle,0,,quarter"));

    Ok(())
}

#[test]
fn test_cli_forfeit_with_config() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action, arg, count").unwrap();
    writeln!(file, "select, water,").unwrap();
    for _ in 0..4 {
        writeln!(file, "insert, quarter,").unwrap();
    }
    writeln!(file, "collect, ,").unwrap();

    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg(file.path())
        .arg("--config")
        .arg("tests/fixtures/quarters_only.json")
        .arg("--stock");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "6,collect,insufficient_change,idle,0,,",
        ))
        .stdout(predicate::str::contains("kind,id,count"))
        .stdout(predicate::str::contains("item,water,1"))
        .stdout(predicate::str::contains("coin,quarter,14"))
        .stderr(predicate::str::contains("balance kept in cash box"))
        .stderr(predicate::str::contains("operator attention required"));
}

#[test]
fn test_cli_restock_and_sold_out() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        r#"{{"items": [{{"id": "water", "price": 100, "stock": 1}}],
            "coins": [{{"id": "quarter", "value": 25, "count": 10}}]}}"#
    )
    .unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action, arg, count").unwrap();
    writeln!(file, "select, water,").unwrap();
    for _ in 0..4 {
        writeln!(file, "insert, quarter,").unwrap();
    }
    writeln!(file, "collect, ,").unwrap();
    writeln!(file, "restock_coin, quarter, 2").unwrap();
    writeln!(file, "select, water,").unwrap();
    writeln!(file, "restock_item, water, 3").unwrap();
    writeln!(file, "select, water,").unwrap();

    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg(file.path())
        .arg("--config")
        .arg(config.path())
        .arg("--stock");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("6,collect,ok,idle,0,water,"))
        .stdout(predicate::str::contains("8,select,out_of_stock,idle,0,,"))
        .stdout(predicate::str::contains("9,restock_item,ok,idle,0,,"))
        .stdout(predicate::str::contains("10,select,ok,selecting,0,,"))
        .stdout(predicate::str::contains("item,water,3"))
        .stdout(predicate::str::contains("coin,quarter,16"));
}

#[test]
fn test_cli_skips_malformed_commands() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action, arg, count").unwrap();
    writeln!(file, "select, coke,").unwrap();
    writeln!(file, "dance, coke,").unwrap();
    writeln!(file, "restock_item, coke, lots").unwrap();
    writeln!(file, "insert, quarter,").unwrap();
    writeln!(file, "collect, ,").unwrap();

    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading command"))
        .stdout(predicate::str::contains("5,collect,ok,idle,0,coke,"));
}

#[test]
fn test_cli_missing_argument_is_reported_per_step() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action, arg, count").unwrap();
    writeln!(file, "select, ,").unwrap();
    writeln!(file, "insert, quarter,").unwrap();

    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,select,validation,idle,0,,"))
        .stdout(predicate::str::contains("2,insert,not_selecting,idle,0,,"));
}

#[test]
fn test_cli_rejects_invalid_config() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, r#"{{"items": [], "coins": []}}"#).unwrap();

    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg("tests/fixtures/session.csv")
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_cli_missing_input() {
    let mut cmd = Command::new(cargo_bin!("vendsim"));
    cmd.arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}
