// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::{self, Period};
use crate::error::CoreError;
use crate::ledger;
use crate::loans;
use crate::models::{ExpenseCategory, Severity};
use crate::notify;

/// Advisories returned per evaluation, matching order preserved.
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}

/// Snapshot the rules run over. Assembled from the dashboard aggregates, the
/// month chart series and the loans coming due; evaluation itself touches no
/// storage.
#[derive(Debug, Clone)]
pub struct SuggestionInput {
    pub balance: Decimal,
    pub month_income: Decimal,
    pub month_expenses: Decimal,
    pub top_category: Option<(ExpenseCategory, Decimal)>,
    pub due_soon: Vec<DueLoan>,
}

#[derive(Debug, Clone)]
pub struct DueLoan {
    pub counterparty_name: String,
    pub due_date: NaiveDate,
}

pub fn gather(
    conn: &Connection,
    account_id: i64,
    today: NaiveDate,
) -> Result<SuggestionInput, CoreError> {
    let balance = ledger::balance(conn, account_id)?;
    let series = analytics::chart_series(conn, account_id, Period::Month, today)?;
    let month_income: Decimal = series.income.iter().copied().sum();
    let month_expenses: Decimal = series.expenses.iter().copied().sum();
    let top_category = analytics::category_breakdown(conn, account_id, Period::Month, today)?
        .into_iter()
        .next()
        .map(|s| (s.category, s.amount));
    let due_soon = loans::due_soon(conn, account_id, today)?
        .into_iter()
        .map(|l| DueLoan {
            counterparty_name: l.counterparty_name,
            due_date: l.due_date,
        })
        .collect();
    Ok(SuggestionInput {
        balance,
        month_income,
        month_expenses,
        top_category,
        due_soon,
    })
}

/// Ordered rule scan; first [`MAX_SUGGESTIONS`] matches win. Pure: identical
/// input yields byte-identical output.
pub fn evaluate(input: &SuggestionInput) -> Vec<Advisory> {
    let mut out = Vec::new();

    if input.balance < Decimal::ZERO {
        out.push(Advisory {
            severity: Severity::Warning,
            message: "Your balance is negative. Review your recent spending to get back on track."
                .to_string(),
        });
    }

    if input.month_income > Decimal::ZERO && input.month_expenses > input.month_income {
        out.push(Advisory {
            severity: Severity::Warning,
            message: "You have spent more than you earned this month.".to_string(),
        });
    }

    if let Some((category, amount)) = &input.top_category {
        if !input.month_expenses.is_zero()
            && *amount * Decimal::ONE_HUNDRED > input.month_expenses * Decimal::from(40)
        {
            out.push(Advisory {
                severity: Severity::Tip,
                message: format!(
                    "{} makes up over 40% of your spending this month. Consider setting a cap.",
                    category
                ),
            });
        }
    }

    for loan in &input.due_soon {
        out.push(Advisory {
            severity: Severity::Reminder,
            message: format!(
                "Your loan with {} is due on {}.",
                loan.counterparty_name, loan.due_date
            ),
        });
    }

    if input.month_income > Decimal::ZERO
        && input.month_expenses * Decimal::from(5) < input.month_income * Decimal::from(4)
    {
        out.push(Advisory {
            severity: Severity::Success,
            message: "You saved over 20% of your income this month. Keep it up!".to_string(),
        });
    }

    out.truncate(MAX_SUGGESTIONS);
    out
}

fn title_for(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "Spending alert",
        Severity::Success => "Nice work",
        Severity::Tip => "Spending tip",
        Severity::Reminder => "Loan reminder",
    }
}

/// Record advisories as suggestion notifications. An advisory whose message
/// already sits unread in the bell is not duplicated; once read, a still-true
/// condition notifies again. All inserts commit together.
pub fn record_advisories(
    conn: &mut Connection,
    account_id: i64,
    advisories: &[Advisory],
) -> Result<usize, CoreError> {
    let tx = conn.transaction()?;
    let mut created = 0;
    for advisory in advisories {
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM notifications
                 WHERE account_id=?1 AND kind='suggestion' AND is_read=0 AND message=?2",
                params![account_id, advisory.message],
                |r| r.get(0),
            )
            .optional()?;
        if existing.is_none() {
            notify::insert(
                &tx,
                account_id,
                "suggestion",
                title_for(advisory.severity),
                &advisory.message,
                None,
            )?;
            created += 1;
        }
    }
    tx.commit()?;
    Ok(created)
}
