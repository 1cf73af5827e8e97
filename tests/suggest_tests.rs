// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::loans::NewLoan;
use pocketledger::models::{ExpenseCategory, Severity};
use pocketledger::suggest::{self, Advisory, DueLoan, SuggestionInput, MAX_SUGGESTIONS};
use pocketledger::{db, ledger, loans, notify};
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn quiet_input() -> SuggestionInput {
    SuggestionInput {
        balance: dec("1000"),
        month_income: Decimal::ZERO,
        month_expenses: Decimal::ZERO,
        top_category: None,
        due_soon: Vec::new(),
    }
}

#[test]
fn negative_balance_warns_first() {
    let input = SuggestionInput {
        balance: dec("-0.01"),
        ..quiet_input()
    };
    let advisories = suggest::evaluate(&input);
    assert_eq!(advisories[0].severity, Severity::Warning);
    assert_eq!(
        advisories[0].message,
        "Your balance is negative. Review your recent spending to get back on track."
    );
}

#[test]
fn overspending_the_month_warns() {
    let input = SuggestionInput {
        month_income: dec("1000"),
        month_expenses: dec("1000.01"),
        ..quiet_input()
    };
    let advisories = suggest::evaluate(&input);
    assert!(advisories
        .iter()
        .any(|a| a.message == "You have spent more than you earned this month."));
}

#[test]
fn top_category_tip_requires_strictly_over_forty_percent() {
    let over = SuggestionInput {
        month_income: dec("10000"),
        month_expenses: dec("1000"),
        top_category: Some((ExpenseCategory::Food, dec("400.01"))),
        ..quiet_input()
    };
    let advisories = suggest::evaluate(&over);
    assert!(advisories.iter().any(|a| a.severity == Severity::Tip
        && a.message
            == "Food makes up over 40% of your spending this month. Consider setting a cap."));

    // exactly 40% does not trigger
    let at = SuggestionInput {
        top_category: Some((ExpenseCategory::Food, dec("400"))),
        ..over
    };
    assert!(!suggest::evaluate(&at).iter().any(|a| a.severity == Severity::Tip));
}

#[test]
fn due_loans_become_reminders_in_order() {
    let input = SuggestionInput {
        due_soon: vec![
            DueLoan {
                counterparty_name: "Arjun".into(),
                due_date: date("2024-05-16"),
            },
            DueLoan {
                counterparty_name: "Meera".into(),
                due_date: date("2024-05-17"),
            },
        ],
        ..quiet_input()
    };
    let advisories = suggest::evaluate(&input);
    let reminders: Vec<&Advisory> = advisories
        .iter()
        .filter(|a| a.severity == Severity::Reminder)
        .collect();
    assert_eq!(reminders.len(), 2);
    assert_eq!(
        reminders[0].message,
        "Your loan with Arjun is due on 2024-05-16."
    );
    assert_eq!(
        reminders[1].message,
        "Your loan with Meera is due on 2024-05-17."
    );
}

#[test]
fn saving_a_fifth_of_income_earns_a_success() {
    let input = SuggestionInput {
        month_income: dec("1000"),
        month_expenses: dec("799.99"),
        ..quiet_input()
    };
    assert!(suggest::evaluate(&input)
        .iter()
        .any(|a| a.severity == Severity::Success));

    // exactly 80% spent is not "over 20% saved"
    let input = SuggestionInput {
        month_expenses: dec("800"),
        ..input
    };
    assert!(!suggest::evaluate(&input)
        .iter()
        .any(|a| a.severity == Severity::Success));
}

#[test]
fn output_is_capped_and_order_preserving() {
    let input = SuggestionInput {
        balance: dec("-1"),
        month_income: dec("100"),
        month_expenses: dec("200"),
        top_category: Some((ExpenseCategory::Travel, dec("150"))),
        due_soon: vec![
            DueLoan {
                counterparty_name: "A".into(),
                due_date: date("2024-05-16"),
            },
            DueLoan {
                counterparty_name: "B".into(),
                due_date: date("2024-05-17"),
            },
            DueLoan {
                counterparty_name: "C".into(),
                due_date: date("2024-05-18"),
            },
        ],
    };
    let advisories = suggest::evaluate(&input);
    assert_eq!(advisories.len(), MAX_SUGGESTIONS);
    assert_eq!(advisories[0].severity, Severity::Warning);
    assert_eq!(advisories[1].severity, Severity::Warning);
    assert_eq!(advisories[2].severity, Severity::Tip);
    assert_eq!(advisories[3].severity, Severity::Reminder);
    assert_eq!(advisories[4].severity, Severity::Reminder);
}

#[test]
fn evaluation_is_byte_deterministic() {
    let input = SuggestionInput {
        balance: dec("-5"),
        month_income: dec("1000"),
        month_expenses: dec("900"),
        top_category: Some((ExpenseCategory::Bills, dec("500"))),
        due_soon: vec![DueLoan {
            counterparty_name: "Arjun".into(),
            due_date: date("2024-05-16"),
        }],
    };
    let a = serde_json::to_string(&suggest::evaluate(&input)).unwrap();
    let b = serde_json::to_string(&suggest::evaluate(&input)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn gather_sees_loans_due_within_three_days() {
    let conn = db::open_in_memory().unwrap();
    let today = date("2024-05-15");
    ledger::add_income(&conn, 1, "Salary", "Salary", "1000", "2024-05-01", None).unwrap();
    loans::add_loan(
        &conn,
        1,
        &NewLoan {
            direction: "borrowing".into(),
            counterparty_name: "Meera".into(),
            amount: "5000".into(),
            interest_rate: None,
            start_date: "2024-05-01".into(),
            due_date: "2024-05-17".into(),
            counterparty_address: None,
            counterparty_phone: None,
            source: Some("Bank".into()),
            notes: None,
        },
    )
    .unwrap();
    // due beyond the horizon stays out
    loans::add_loan(
        &conn,
        1,
        &NewLoan {
            direction: "borrowing".into(),
            counterparty_name: "Late".into(),
            amount: "100".into(),
            interest_rate: None,
            start_date: "2024-05-01".into(),
            due_date: "2024-05-25".into(),
            counterparty_address: None,
            counterparty_phone: None,
            source: Some("Bank".into()),
            notes: None,
        },
    )
    .unwrap();

    let input = suggest::gather(&conn, 1, today).unwrap();
    assert_eq!(input.due_soon.len(), 1);
    assert_eq!(input.due_soon[0].counterparty_name, "Meera");
    assert_eq!(input.month_income, dec("1000"));
}

#[test]
fn recording_advisories_skips_unread_duplicates() {
    let mut conn = db::open_in_memory().unwrap();
    let advisories = vec![Advisory {
        severity: Severity::Tip,
        message: "Food makes up over 40% of your spending this month. Consider setting a cap."
            .into(),
    }];

    assert_eq!(suggest::record_advisories(&mut conn, 1, &advisories).unwrap(), 1);
    assert_eq!(suggest::record_advisories(&mut conn, 1, &advisories).unwrap(), 0);
    assert_eq!(notify::unread_count(&conn, 1).unwrap(), 1);

    // once read, a persisting condition notifies again
    notify::mark_all_read(&conn, 1).unwrap();
    assert_eq!(suggest::record_advisories(&mut conn, 1, &advisories).unwrap(), 1);
}
