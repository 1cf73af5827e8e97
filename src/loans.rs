// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::CoreError;
use crate::models::{BorrowSource, EffectiveStatus, Loan, LoanDirection, LoanStatus};
use crate::notify;
use crate::utils::{decode_amount, months_between, parse_amount, parse_date, parse_rate, require};

/// Days before the due date within which a pending loan counts as due soon.
pub const DUE_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    pub direction: String,
    pub counterparty_name: String,
    pub amount: String,
    #[serde(default)]
    pub interest_rate: Option<String>,
    pub start_date: String,
    pub due_date: String,
    #[serde(default)]
    pub counterparty_address: Option<String>,
    #[serde(default)]
    pub counterparty_phone: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Agreed repayment amount, fixed once the term is set. Simple interest over
/// whole months; never re-accrued after the due date passes.
pub fn total_payable(principal: Decimal, rate: Decimal, start: NaiveDate, due: NaiveDate) -> Decimal {
    let months = Decimal::from(months_between(start, due));
    principal + principal * rate * months / Decimal::ONE_HUNDRED
}

pub fn add_loan(conn: &Connection, account_id: i64, req: &NewLoan) -> Result<Loan, CoreError> {
    let direction: LoanDirection = req.direction.parse()?;
    let counterparty_name = require("Counterparty name", &req.counterparty_name)?;
    let amount = parse_amount("Amount", &req.amount)?;
    let interest_rate = match req.interest_rate.as_deref() {
        Some(s) if !s.trim().is_empty() => parse_rate(s)?,
        _ => Decimal::ZERO,
    };
    let start_date = parse_date(&req.start_date)?;
    let due_date = parse_date(&req.due_date)?;
    if due_date < start_date {
        return Err(CoreError::Validation(
            "Due date cannot be before the start date".to_string(),
        ));
    }

    let (counterparty_address, counterparty_phone, source) = match direction {
        LoanDirection::Lending => {
            let address = require("Address", req.counterparty_address.as_deref().unwrap_or(""))?;
            let phone = require("Phone", req.counterparty_phone.as_deref().unwrap_or(""))?;
            (Some(address), Some(phone), None)
        }
        LoanDirection::Borrowing => {
            let source: BorrowSource = req
                .source
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    CoreError::Validation("Borrowing source is required".to_string())
                })?
                .parse()?;
            (None, None, Some(source))
        }
    };
    let notes = req
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    conn.execute(
        "INSERT INTO loans(account_id, direction, counterparty_name, amount, interest_rate,
                           start_date, due_date, status, counterparty_address,
                           counterparty_phone, source, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', ?8, ?9, ?10, ?11)",
        params![
            account_id,
            direction.as_str(),
            counterparty_name,
            amount.to_string(),
            interest_rate.to_string(),
            start_date.to_string(),
            due_date.to_string(),
            counterparty_address,
            counterparty_phone,
            source.map(|s| s.as_str()),
            notes
        ],
    )?;

    Ok(Loan {
        id: conn.last_insert_rowid(),
        direction,
        counterparty_name,
        amount,
        interest_rate,
        start_date,
        due_date,
        status: LoanStatus::Pending,
        paid_date: None,
        counterparty_address,
        counterparty_phone,
        source,
        notes,
        total_payable: total_payable(amount, interest_rate, start_date, due_date),
    })
}

const LOAN_COLUMNS: &str = "id, direction, counterparty_name, amount, interest_rate, start_date,
     due_date, status, paid_date, counterparty_address, counterparty_phone, source, notes";

fn read_loan(r: &Row) -> Result<Loan, CoreError> {
    let direction: String = r.get(1)?;
    let amount: String = r.get(3)?;
    let interest_rate: String = r.get(4)?;
    let status: String = r.get(7)?;
    let source: Option<String> = r.get(11)?;
    let amount = decode_amount(&amount)?;
    let interest_rate = decode_amount(&interest_rate)?;
    let start_date: NaiveDate = r.get(5)?;
    let due_date: NaiveDate = r.get(6)?;
    Ok(Loan {
        id: r.get(0)?,
        direction: direction.parse()?,
        counterparty_name: r.get(2)?,
        amount,
        interest_rate,
        start_date,
        due_date,
        status: status.parse()?,
        paid_date: r.get(8)?,
        counterparty_address: r.get(9)?,
        counterparty_phone: r.get(10)?,
        source: source.as_deref().map(str::parse).transpose()?,
        notes: r.get(12)?,
        total_payable: total_payable(amount, interest_rate, start_date, due_date),
    })
}

pub fn get_loan(conn: &Connection, account_id: i64, id: i64) -> Result<Loan, CoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM loans WHERE id=?1 AND account_id=?2",
        LOAN_COLUMNS
    ))?;
    let mut rows = stmt.query(params![id, account_id])?;
    match rows.next()? {
        Some(r) => read_loan(r),
        None => Err(CoreError::NotFound(format!("Loan {} not found", id))),
    }
}

/// List loans, optionally narrowed by direction and by effective status.
/// The status filter matches what the caller sees: a pending loan past its
/// due date matches `overdue`, not `pending`.
pub fn list_loans(
    conn: &Connection,
    account_id: i64,
    direction: Option<LoanDirection>,
    status: Option<EffectiveStatus>,
    today: NaiveDate,
) -> Result<Vec<Loan>, CoreError> {
    let mut sql = format!(
        "SELECT {} FROM loans WHERE account_id=?1",
        LOAN_COLUMNS
    );
    if let Some(d) = direction {
        sql.push_str(&format!(" AND direction='{}'", d.as_str()));
    }
    sql.push_str(" ORDER BY due_date ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![account_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let loan = read_loan(r)?;
        if let Some(want) = status {
            if loan.effective(today) != want {
                continue;
            }
        }
        data.push(loan);
    }
    Ok(data)
}

/// Apply an explicit status update. Only `pending` and `paid` are storable;
/// `overdue` is derived from the due date and refused.
pub fn update_status(
    conn: &Connection,
    account_id: i64,
    id: i64,
    status: &str,
    today: NaiveDate,
) -> Result<Loan, CoreError> {
    let n = match status.trim().to_ascii_lowercase().as_str() {
        "paid" => conn.execute(
            "UPDATE loans SET status='paid', paid_date=?1 WHERE id=?2 AND account_id=?3",
            params![today.to_string(), id, account_id],
        )?,
        "pending" => conn.execute(
            "UPDATE loans SET status='pending', paid_date=NULL WHERE id=?1 AND account_id=?2",
            params![id, account_id],
        )?,
        "overdue" => {
            return Err(CoreError::State(
                "Status 'overdue' is derived from the due date and cannot be set".to_string(),
            ));
        }
        other => {
            return Err(CoreError::Validation(format!(
                "Invalid status '{}', expected 'pending' or 'paid'",
                other
            )));
        }
    };
    if n == 0 {
        return Err(CoreError::NotFound(format!("Loan {} not found", id)));
    }
    get_loan(conn, account_id, id)
}

/// Permanent delete. Any loan-due notification for the loan is left in place
/// and keeps rendering from its own stored text.
pub fn delete_loan(conn: &Connection, account_id: i64, id: i64) -> Result<(), CoreError> {
    let n = conn.execute(
        "DELETE FROM loans WHERE id=?1 AND account_id=?2",
        params![id, account_id],
    )?;
    if n == 0 {
        return Err(CoreError::NotFound(format!("Loan {} not found", id)));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LoanStats {
    pub total_lent: Decimal,
    pub total_borrowed: Decimal,
    pub outstanding_lent: Decimal,
    pub outstanding_borrowed: Decimal,
    pub pending: usize,
    pub paid: usize,
    pub overdue: usize,
}

pub fn loan_stats(
    conn: &Connection,
    account_id: i64,
    today: NaiveDate,
) -> Result<LoanStats, CoreError> {
    let mut stats = LoanStats {
        total_lent: Decimal::ZERO,
        total_borrowed: Decimal::ZERO,
        outstanding_lent: Decimal::ZERO,
        outstanding_borrowed: Decimal::ZERO,
        pending: 0,
        paid: 0,
        overdue: 0,
    };
    for loan in list_loans(conn, account_id, None, None, today)? {
        let outstanding = loan.status == LoanStatus::Pending;
        match loan.direction {
            LoanDirection::Lending => {
                stats.total_lent += loan.amount;
                if outstanding {
                    stats.outstanding_lent += loan.amount;
                }
            }
            LoanDirection::Borrowing => {
                stats.total_borrowed += loan.amount;
                if outstanding {
                    stats.outstanding_borrowed += loan.amount;
                }
            }
        }
        match loan.effective(today) {
            EffectiveStatus::Pending => stats.pending += 1,
            EffectiveStatus::Paid => stats.paid += 1,
            EffectiveStatus::Overdue => stats.overdue += 1,
        }
    }
    Ok(stats)
}

/// Pending loans due within [`DUE_SOON_DAYS`] of today, soonest first.
pub fn due_soon(
    conn: &Connection,
    account_id: i64,
    today: NaiveDate,
) -> Result<Vec<Loan>, CoreError> {
    let horizon = today + Duration::days(DUE_SOON_DAYS);
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM loans
         WHERE account_id=?1 AND status='pending' AND due_date>=?2 AND due_date<=?3
         ORDER BY due_date ASC, counterparty_name ASC",
        LOAN_COLUMNS
    ))?;
    let mut rows = stmt.query(params![account_id, today.to_string(), horizon.to_string()])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(read_loan(r)?);
    }
    Ok(data)
}

/// Insert a loan-due notification for every pending loan whose due date has
/// passed and which has none yet. Runs on reads since there is no background
/// scheduler; the check and inserts commit together.
pub fn sync_due_notifications(
    conn: &mut Connection,
    account_id: i64,
    today: NaiveDate,
) -> Result<usize, CoreError> {
    let tx = conn.transaction()?;
    let crossed = {
        let mut stmt = tx.prepare(
            "SELECT id, direction, counterparty_name, due_date FROM loans
             WHERE account_id=?1 AND status='pending' AND due_date<?2
               AND id NOT IN (
                 SELECT loan_id FROM notifications
                 WHERE account_id=?1 AND kind='loan-due' AND loan_id IS NOT NULL)
             ORDER BY due_date ASC, id ASC",
        )?;
        let mut rows = stmt.query(params![account_id, today.to_string()])?;
        let mut crossed = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let direction: String = r.get(1)?;
            let name: String = r.get(2)?;
            let due: NaiveDate = r.get(3)?;
            let direction: LoanDirection = direction.parse()?;
            let message = match direction {
                LoanDirection::Lending => {
                    format!("Your loan to {} was due on {}.", name, due)
                }
                LoanDirection::Borrowing => {
                    format!("Your loan from {} was due on {}.", name, due)
                }
            };
            crossed.push((id, message));
        }
        crossed
    };
    let created = crossed.len();
    for (id, message) in crossed {
        notify::insert(&tx, account_id, "loan-due", "Loan due", &message, Some(id))?;
    }
    tx.commit()?;
    Ok(created)
}
