// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::error::CoreError;
use pocketledger::loans::{self, NewLoan};
use pocketledger::models::{EffectiveStatus, LoanDirection, LoanStatus};
use pocketledger::utils::months_between;
use pocketledger::db;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn lending(amount: &str, rate: &str, start: &str, due: &str) -> NewLoan {
    NewLoan {
        direction: "lending".into(),
        counterparty_name: "Arjun".into(),
        amount: amount.into(),
        interest_rate: Some(rate.into()),
        start_date: start.into(),
        due_date: due.into(),
        counterparty_address: Some("12 MG Road".into()),
        counterparty_phone: Some("9876543210".into()),
        source: None,
        notes: None,
    }
}

fn borrowing(amount: &str, rate: &str, start: &str, due: &str) -> NewLoan {
    NewLoan {
        direction: "borrowing".into(),
        counterparty_name: "Meera".into(),
        amount: amount.into(),
        interest_rate: Some(rate.into()),
        start_date: start.into(),
        due_date: due.into(),
        counterparty_address: None,
        counterparty_phone: None,
        source: Some("Friends".into()),
        notes: None,
    }
}

#[test]
fn months_between_is_never_less_than_one() {
    let d = date("2024-05-01");
    assert_eq!(months_between(d, d), 1);
    assert_eq!(months_between(d, date("2024-05-02")), 1);
    assert_eq!(months_between(d, date("2024-05-31")), 1);
    // 31 days crosses the 30-day line and rounds up
    assert_eq!(months_between(d, date("2024-06-01")), 2);
    assert_eq!(months_between(d, date("2025-05-01")), 13);
}

#[test]
fn total_payable_is_simple_interest_over_whole_months() {
    // 60 days -> 2 months: 10000 + 10000 * 2 * 2 / 100 = 10400
    let total = loans::total_payable(
        dec("10000"),
        dec("2"),
        date("2024-01-01"),
        date("2024-03-01"),
    );
    assert_eq!(total, dec("10400"));
    // zero rate leaves the principal untouched
    let total = loans::total_payable(
        dec("500.50"),
        Decimal::ZERO,
        date("2024-01-01"),
        date("2024-06-01"),
    );
    assert_eq!(total, dec("500.50"));
    // same-day loan still accrues the one-month minimum
    let total =
        loans::total_payable(dec("1000"), dec("5"), date("2024-01-01"), date("2024-01-01"));
    assert_eq!(total, dec("1050"));
}

#[test]
fn add_loan_rejects_due_before_start() {
    let conn = setup();
    let err = loans::add_loan(&conn, 1, &lending("1000", "0", "2024-05-10", "2024-05-01"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Due date cannot be before the start date");
}

#[test]
fn lending_requires_address_and_phone() {
    let conn = setup();
    let mut req = lending("1000", "0", "2024-05-01", "2024-06-01");
    req.counterparty_phone = None;
    let err = loans::add_loan(&conn, 1, &req).unwrap_err();
    assert_eq!(err.to_string(), "Phone is required");

    let mut req = lending("1000", "0", "2024-05-01", "2024-06-01");
    req.counterparty_address = Some("  ".into());
    let err = loans::add_loan(&conn, 1, &req).unwrap_err();
    assert_eq!(err.to_string(), "Address is required");
}

#[test]
fn borrowing_requires_name_and_source() {
    let conn = setup();
    let mut req = borrowing("1000", "0", "2024-05-01", "2024-06-01");
    req.counterparty_name = "".into();
    let err = loans::add_loan(&conn, 1, &req).unwrap_err();
    assert_eq!(err.to_string(), "Counterparty name is required");

    let mut req = borrowing("1000", "0", "2024-05-01", "2024-06-01");
    req.source = None;
    let err = loans::add_loan(&conn, 1, &req).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn negative_rate_is_rejected() {
    let conn = setup();
    let err = loans::add_loan(&conn, 1, &lending("1000", "-1", "2024-05-01", "2024-06-01"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Interest rate cannot be negative");
}

#[test]
fn status_round_trip_restores_pending() {
    let conn = setup();
    let today = date("2024-05-15");
    let loan = loans::add_loan(&conn, 1, &lending("1000", "2", "2024-05-01", "2024-06-01")).unwrap();

    let paid = loans::update_status(&conn, 1, loan.id, "paid", today).unwrap();
    assert_eq!(paid.status, LoanStatus::Paid);
    assert_eq!(paid.paid_date, Some(today));

    let back = loans::update_status(&conn, 1, loan.id, "pending", today).unwrap();
    assert_eq!(back.status, LoanStatus::Pending);
    assert_eq!(back.paid_date, None);
}

#[test]
fn overdue_cannot_be_stored_and_junk_is_invalid() {
    let conn = setup();
    let loan = loans::add_loan(&conn, 1, &lending("1000", "0", "2024-05-01", "2024-06-01")).unwrap();

    let err = loans::update_status(&conn, 1, loan.id, "overdue", date("2024-05-15")).unwrap_err();
    assert!(matches!(err, CoreError::State(_)));

    let err = loans::update_status(&conn, 1, loan.id, "banana", date("2024-05-15")).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn effective_status_follows_the_due_date() {
    let conn = setup();
    let loan = loans::add_loan(&conn, 1, &lending("1000", "0", "2024-05-01", "2024-05-14")).unwrap();

    // due yesterday: overdue without any stored transition
    assert_eq!(loan.effective(date("2024-05-15")), EffectiveStatus::Overdue);
    // due tomorrow: pending again with no backfill step
    assert_eq!(loan.effective(date("2024-05-13")), EffectiveStatus::Pending);

    let paid = loans::update_status(&conn, 1, loan.id, "paid", date("2024-05-20")).unwrap();
    assert_eq!(paid.effective(date("2024-05-21")), EffectiveStatus::Paid);
}

#[test]
fn list_filters_by_direction_and_effective_status() {
    let conn = setup();
    let today = date("2024-05-15");
    loans::add_loan(&conn, 1, &lending("1000", "0", "2024-05-01", "2024-05-10")).unwrap();
    loans::add_loan(&conn, 1, &lending("2000", "0", "2024-05-01", "2024-06-01")).unwrap();
    loans::add_loan(&conn, 1, &borrowing("3000", "0", "2024-05-01", "2024-06-01")).unwrap();

    let lendings =
        loans::list_loans(&conn, 1, Some(LoanDirection::Lending), None, today).unwrap();
    assert_eq!(lendings.len(), 2);

    let overdue =
        loans::list_loans(&conn, 1, None, Some(EffectiveStatus::Overdue), today).unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].amount, dec("1000"));

    // the overdue loan does not also match pending
    let pending =
        loans::list_loans(&conn, 1, None, Some(EffectiveStatus::Pending), today).unwrap();
    assert_eq!(pending.len(), 2);
}

#[test]
fn get_and_delete_are_account_scoped() {
    let conn = setup();
    let loan = loans::add_loan(&conn, 1, &lending("1000", "0", "2024-05-01", "2024-06-01")).unwrap();

    let err = loans::get_loan(&conn, 2, loan.id).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));

    loans::delete_loan(&conn, 1, loan.id).unwrap();
    let err = loans::get_loan(&conn, 1, loan.id).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[test]
fn loan_stats_counts_overdue_separately() {
    let conn = setup();
    let today = date("2024-05-15");
    loans::add_loan(&conn, 1, &lending("1000", "0", "2024-05-01", "2024-05-10")).unwrap();
    let paid = loans::add_loan(&conn, 1, &lending("2000", "0", "2024-05-01", "2024-06-01")).unwrap();
    loans::update_status(&conn, 1, paid.id, "paid", today).unwrap();
    loans::add_loan(&conn, 1, &borrowing("3000", "0", "2024-05-01", "2024-06-01")).unwrap();

    let stats = loans::loan_stats(&conn, 1, today).unwrap();
    assert_eq!(stats.total_lent, dec("3000"));
    assert_eq!(stats.total_borrowed, dec("3000"));
    // the paid lending is no longer outstanding
    assert_eq!(stats.outstanding_lent, dec("1000"));
    assert_eq!(stats.outstanding_borrowed, dec("3000"));
    assert_eq!((stats.pending, stats.paid, stats.overdue), (1, 1, 1));
}
