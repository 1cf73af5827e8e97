// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::{db, ledger, utils};
use rust_decimal::Decimal;

#[test]
fn open_at_creates_the_schema_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocketledger.sqlite");

    {
        let conn = db::open_at(&path).unwrap();
        ledger::add_income(&conn, 1, "Salary", "Salary", "5000.00", "2024-05-01", None).unwrap();
    }

    let conn = db::open_at(&path).unwrap();
    let balance = ledger::balance(&conn, 1).unwrap();
    assert_eq!(balance, "5000.00".parse::<Decimal>().unwrap());
}

#[test]
fn opening_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocketledger.sqlite");
    db::open_at(&path).unwrap();
    // schema creation runs again without complaint
    let conn = db::open_at(&path).unwrap();
    assert!(ledger::list_expenses(&conn, 1, None).unwrap().is_empty());
}

#[test]
fn currency_setting_round_trips() {
    let conn = db::open_in_memory().unwrap();
    assert_eq!(utils::get_currency(&conn).unwrap(), "INR");
    utils::set_currency(&conn, "usd").unwrap();
    assert_eq!(utils::get_currency(&conn).unwrap(), "USD");
}
