// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Request/response boundary consumed by the client-facing collaborator
//! layer. Every call is scoped to one authenticated account id, which the
//! engine trusts as given. Responses share one envelope: failures carry a
//! human-readable message and never partial data; storage errors are not
//! wrapped here and propagate to the caller unchanged.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::analytics;
use crate::error::CoreError;
use crate::ledger;
use crate::loans::{self, NewLoan};
use crate::models::{ExpenseEntry, IncomeEntry, Loan, Notification};
use crate::notify;
use crate::suggest::{self, Advisory};
use crate::utils::fmt_amount;

pub type ApiResult<T> = Result<Envelope<T>, CoreError>;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_message(message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Domain failures become a failure envelope with the error text verbatim;
/// storage failures stay errors for the caller's retry policy.
fn respond<T>(result: Result<T, CoreError>) -> ApiResult<T> {
    match result {
        Ok(v) => Ok(Envelope::ok(v)),
        Err(CoreError::Storage(e)) => Err(CoreError::Storage(e)),
        Err(e) => Ok(Envelope::fail(e.to_string())),
    }
}

fn respond_message<T>(result: Result<(), CoreError>, message: &str) -> ApiResult<T> {
    match result {
        Ok(()) => Ok(Envelope::ok_message(message)),
        Err(CoreError::Storage(e)) => Err(CoreError::Storage(e)),
        Err(e) => Ok(Envelope::fail(e.to_string())),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExpenseRequest {
    pub name: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIncomeRequest {
    pub source: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<ExpenseEntry> for ExpenseRow {
    fn from(e: ExpenseEntry) -> Self {
        ExpenseRow {
            id: e.id,
            name: e.name,
            category: e.category.as_str().to_string(),
            amount: fmt_amount(&e.amount),
            date: e.date.to_string(),
            notes: e.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRow {
    pub id: i64,
    pub source: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<IncomeEntry> for IncomeRow {
    fn from(e: IncomeEntry) -> Self {
        IncomeRow {
            id: e.id,
            source: e.source,
            category: e.category.as_str().to_string(),
            amount: fmt_amount(&e.amount),
            date: e.date.to_string(),
            notes: e.notes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRow {
    pub id: i64,
    pub direction: String,
    pub counterparty_name: String,
    pub amount: String,
    pub interest_rate: String,
    pub start_date: String,
    pub due_date: String,
    /// Effective status: stored status, or overdue for pending loans past due.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    pub total_payable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn loan_row(loan: &Loan, today: NaiveDate) -> LoanRow {
    LoanRow {
        id: loan.id,
        direction: loan.direction.as_str().to_string(),
        counterparty_name: loan.counterparty_name.clone(),
        amount: fmt_amount(&loan.amount),
        interest_rate: fmt_amount(&loan.interest_rate),
        start_date: loan.start_date.to_string(),
        due_date: loan.due_date.to_string(),
        status: loan.effective(today).as_str().to_string(),
        paid_date: loan.paid_date.map(|d| d.to_string()),
        total_payable: fmt_amount(&loan.total_payable),
        counterparty_address: loan.counterparty_address.clone(),
        counterparty_phone: loan.counterparty_phone.clone(),
        source: loan.source.map(|s| s.as_str().to_string()),
        notes: loan.notes.clone(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub balance: String,
    pub total_income: String,
    pub total_expenses: String,
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub income: Vec<String>,
    pub expenses: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySliceRow {
    pub category: String,
    pub amount: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsData {
    pub suggestions: Vec<Advisory>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRow {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<i64>,
    pub is_read: bool,
    pub created_at: String,
}

impl From<Notification> for NotificationRow {
    fn from(n: Notification) -> Self {
        NotificationRow {
            id: n.id,
            kind: n.kind.as_str().to_string(),
            title: n.title,
            message: n.message,
            loan_id: n.loan_id,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatsData {
    pub total_lent: String,
    pub total_borrowed: String,
    pub outstanding_lent: String,
    pub outstanding_borrowed: String,
    pub pending: usize,
    pub paid: usize,
    pub overdue: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountData {
    pub unread_count: i64,
}

pub fn add_expense(
    conn: &Connection,
    account_id: i64,
    req: &AddExpenseRequest,
) -> ApiResult<ExpenseRow> {
    respond(
        ledger::add_expense(
            conn,
            account_id,
            &req.name,
            &req.category,
            &req.amount,
            &req.date,
            req.notes.as_deref(),
        )
        .map(ExpenseRow::from),
    )
}

pub fn list_expenses(conn: &Connection, account_id: i64) -> ApiResult<Vec<ExpenseRow>> {
    respond(
        ledger::list_expenses(conn, account_id, None)
            .map(|v| v.into_iter().map(ExpenseRow::from).collect()),
    )
}

pub fn delete_expense(conn: &Connection, account_id: i64, id: i64) -> ApiResult<()> {
    respond_message(
        ledger::delete_expense(conn, account_id, id),
        "Expense deleted",
    )
}

pub fn add_income(
    conn: &Connection,
    account_id: i64,
    req: &AddIncomeRequest,
) -> ApiResult<IncomeRow> {
    respond(
        ledger::add_income(
            conn,
            account_id,
            &req.source,
            &req.category,
            &req.amount,
            &req.date,
            req.notes.as_deref(),
        )
        .map(IncomeRow::from),
    )
}

pub fn list_incomes(conn: &Connection, account_id: i64) -> ApiResult<Vec<IncomeRow>> {
    respond(
        ledger::list_incomes(conn, account_id, None)
            .map(|v| v.into_iter().map(IncomeRow::from).collect()),
    )
}

pub fn delete_income(conn: &Connection, account_id: i64, id: i64) -> ApiResult<()> {
    respond_message(ledger::delete_income(conn, account_id, id), "Income deleted")
}

pub fn add_loan(
    conn: &Connection,
    account_id: i64,
    req: &NewLoan,
    today: NaiveDate,
) -> ApiResult<LoanRow> {
    respond(loans::add_loan(conn, account_id, req).map(|l| loan_row(&l, today)))
}

pub fn get_loan(conn: &Connection, account_id: i64, id: i64, today: NaiveDate) -> ApiResult<LoanRow> {
    respond(loans::get_loan(conn, account_id, id).map(|l| loan_row(&l, today)))
}

pub fn list_loans(
    conn: &Connection,
    account_id: i64,
    direction: Option<&str>,
    status: Option<&str>,
    today: NaiveDate,
) -> ApiResult<Vec<LoanRow>> {
    let run = || {
        let direction = direction.map(str::parse).transpose()?;
        let status = status.map(str::parse).transpose()?;
        let loans = loans::list_loans(conn, account_id, direction, status, today)?;
        Ok(loans.iter().map(|l| loan_row(l, today)).collect())
    };
    respond(run())
}

pub fn update_loan_status(
    conn: &Connection,
    account_id: i64,
    id: i64,
    status: &str,
    today: NaiveDate,
) -> ApiResult<LoanRow> {
    respond(loans::update_status(conn, account_id, id, status, today).map(|l| loan_row(&l, today)))
}

pub fn delete_loan(conn: &Connection, account_id: i64, id: i64) -> ApiResult<()> {
    respond_message(loans::delete_loan(conn, account_id, id), "Loan deleted")
}

pub fn loan_stats(conn: &Connection, account_id: i64, today: NaiveDate) -> ApiResult<LoanStatsData> {
    respond(loans::loan_stats(conn, account_id, today).map(|s| LoanStatsData {
        total_lent: fmt_amount(&s.total_lent),
        total_borrowed: fmt_amount(&s.total_borrowed),
        outstanding_lent: fmt_amount(&s.outstanding_lent),
        outstanding_borrowed: fmt_amount(&s.outstanding_borrowed),
        pending: s.pending,
        paid: s.paid,
        overdue: s.overdue,
    }))
}

pub fn dashboard(conn: &mut Connection, account_id: i64, today: NaiveDate) -> ApiResult<DashboardData> {
    respond(
        analytics::dashboard(conn, account_id, today).map(|d| DashboardData {
            balance: fmt_amount(&d.balance),
            total_income: fmt_amount(&d.total_income),
            total_expenses: fmt_amount(&d.total_expenses),
            unread_count: d.unread_count,
        }),
    )
}

pub fn chart_series(
    conn: &Connection,
    account_id: i64,
    period: &str,
    today: NaiveDate,
) -> ApiResult<ChartData> {
    let run = || {
        let period = period.parse()?;
        let series = analytics::chart_series(conn, account_id, period, today)?;
        Ok(ChartData {
            labels: series.labels,
            income: series.income.iter().map(fmt_amount).collect(),
            expenses: series.expenses.iter().map(fmt_amount).collect(),
        })
    };
    respond(run())
}

pub fn category_breakdown(
    conn: &Connection,
    account_id: i64,
    period: &str,
    today: NaiveDate,
) -> ApiResult<Vec<CategorySliceRow>> {
    let run = || {
        let period = period.parse()?;
        let slices = analytics::category_breakdown(conn, account_id, period, today)?;
        Ok(slices
            .into_iter()
            .map(|s| CategorySliceRow {
                category: s.category.as_str().to_string(),
                amount: fmt_amount(&s.amount),
            })
            .collect())
    };
    respond(run())
}

/// Evaluate the rule set and record fresh advisories as notifications.
pub fn suggestions(
    conn: &mut Connection,
    account_id: i64,
    today: NaiveDate,
) -> ApiResult<SuggestionsData> {
    let run = |conn: &mut Connection| {
        let input = suggest::gather(conn, account_id, today)?;
        let advisories = suggest::evaluate(&input);
        suggest::record_advisories(conn, account_id, &advisories)?;
        Ok(SuggestionsData {
            suggestions: advisories,
        })
    };
    respond(run(conn))
}

pub fn list_notifications(
    conn: &mut Connection,
    account_id: i64,
    unread_only: bool,
    today: NaiveDate,
) -> ApiResult<Vec<NotificationRow>> {
    respond(
        notify::list(conn, account_id, unread_only, today)
            .map(|v| v.into_iter().map(NotificationRow::from).collect()),
    )
}

pub fn mark_notification_read(conn: &Connection, account_id: i64, id: i64) -> ApiResult<()> {
    respond_message(
        notify::mark_read(conn, account_id, id),
        "Notification marked as read",
    )
}

pub fn mark_all_notifications_read(conn: &Connection, account_id: i64) -> ApiResult<()> {
    respond_message(
        notify::mark_all_read(conn, account_id).map(|_| ()),
        "All notifications marked as read",
    )
}

pub fn unread_count(conn: &Connection, account_id: i64) -> ApiResult<UnreadCountData> {
    respond(notify::unread_count(conn, account_id).map(|n| UnreadCountData { unread_count: n }))
}
