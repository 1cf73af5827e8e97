// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::error::CoreError;
use pocketledger::loans::{self, NewLoan};
use pocketledger::models::{NotificationKind, Severity};
use pocketledger::suggest::{self, Advisory};
use pocketledger::{db, notify};
use rusqlite::Connection;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn overdue_lending(conn: &Connection) -> i64 {
    loans::add_loan(
        conn,
        1,
        &NewLoan {
            direction: "lending".into(),
            counterparty_name: "Arjun".into(),
            amount: "1000".into(),
            interest_rate: None,
            start_date: "2024-05-01".into(),
            due_date: "2024-05-10".into(),
            counterparty_address: Some("12 MG Road".into()),
            counterparty_phone: Some("9876543210".into()),
            source: None,
            notes: None,
        },
    )
    .unwrap()
    .id
}

fn tip(message: &str) -> Advisory {
    Advisory {
        severity: Severity::Tip,
        message: message.into(),
    }
}

#[test]
fn mark_read_is_idempotent_and_not_found_for_unknown() {
    let mut conn = setup();
    suggest::record_advisories(&mut conn, 1, &[tip("Watch your food spending.")]).unwrap();
    let list = notify::list(&mut conn, 1, false, date("2024-05-15")).unwrap();
    let id = list[0].id;

    notify::mark_read(&conn, 1, id).unwrap();
    assert_eq!(notify::unread_count(&conn, 1).unwrap(), 0);

    // marking again succeeds and changes nothing
    notify::mark_read(&conn, 1, id).unwrap();
    assert_eq!(notify::unread_count(&conn, 1).unwrap(), 0);

    let err = notify::mark_read(&conn, 1, 9999).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[test]
fn mark_all_read_clears_the_counter() {
    let mut conn = setup();
    suggest::record_advisories(
        &mut conn,
        1,
        &[tip("First tip."), tip("Second tip."), tip("Third tip.")],
    )
    .unwrap();
    assert_eq!(notify::unread_count(&conn, 1).unwrap(), 3);

    assert_eq!(notify::mark_all_read(&conn, 1).unwrap(), 3);
    assert_eq!(notify::unread_count(&conn, 1).unwrap(), 0);
    // nothing left to mark
    assert_eq!(notify::mark_all_read(&conn, 1).unwrap(), 0);
}

#[test]
fn due_date_crossing_creates_one_notification() {
    let mut conn = setup();
    overdue_lending(&conn);
    let today = date("2024-05-15");

    let list = notify::list(&mut conn, 1, false, today).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].kind, NotificationKind::LoanDue);
    assert_eq!(list[0].message, "Your loan to Arjun was due on 2024-05-10.");

    // the sync does not duplicate on later reads
    let list = notify::list(&mut conn, 1, false, today).unwrap();
    assert_eq!(list.len(), 1);
}

#[test]
fn paying_before_the_due_date_never_notifies() {
    let mut conn = setup();
    let id = overdue_lending(&conn);
    loans::update_status(&conn, 1, id, "paid", date("2024-05-09")).unwrap();

    let list = notify::list(&mut conn, 1, false, date("2024-05-15")).unwrap();
    assert!(list.is_empty());
}

#[test]
fn orphaned_loan_notifications_still_render() {
    let mut conn = setup();
    let id = overdue_lending(&conn);
    let today = date("2024-05-15");

    notify::list(&mut conn, 1, false, today).unwrap();
    loans::delete_loan(&conn, 1, id).unwrap();

    // the notification survives the delete and can still be read
    let list = notify::list(&mut conn, 1, false, today).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].loan_id, Some(id));
    notify::mark_read(&conn, 1, list[0].id).unwrap();
    assert_eq!(notify::unread_count(&conn, 1).unwrap(), 0);
}

#[test]
fn unread_filter_hides_read_notifications() {
    let mut conn = setup();
    suggest::record_advisories(&mut conn, 1, &[tip("First tip."), tip("Second tip.")]).unwrap();
    let today = date("2024-05-15");
    let all = notify::list(&mut conn, 1, false, today).unwrap();
    notify::mark_read(&conn, 1, all[0].id).unwrap();

    let unread = notify::list(&mut conn, 1, true, today).unwrap();
    assert_eq!(unread.len(), 1);
    assert!(!unread[0].is_read);
    assert_eq!(notify::list(&mut conn, 1, false, today).unwrap().len(), 2);
}

#[test]
fn notifications_are_account_scoped() {
    let mut conn = setup();
    suggest::record_advisories(&mut conn, 1, &[tip("Only for account one.")]).unwrap();

    assert_eq!(notify::unread_count(&conn, 2).unwrap(), 0);
    let list = notify::list(&mut conn, 2, false, date("2024-05-15")).unwrap();
    assert!(list.is_empty());

    let theirs = notify::list(&mut conn, 1, false, date("2024-05-15")).unwrap();
    let err = notify::mark_read(&conn, 2, theirs[0].id).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}
