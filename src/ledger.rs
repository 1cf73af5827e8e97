// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::models::{ExpenseCategory, ExpenseEntry, IncomeCategory, IncomeEntry};
use crate::utils::{decode_amount, parse_amount, parse_date, require};

fn clean_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

pub fn add_expense(
    conn: &Connection,
    account_id: i64,
    name: &str,
    category: &str,
    amount: &str,
    date: &str,
    notes: Option<&str>,
) -> Result<ExpenseEntry, CoreError> {
    let name = require("Name", name)?;
    let category: ExpenseCategory = category.parse()?;
    let amount = parse_amount("Amount", amount)?;
    let date = parse_date(date)?;
    let notes = clean_notes(notes);
    conn.execute(
        "INSERT INTO expenses(account_id, name, category, amount, date, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account_id,
            name,
            category.as_str(),
            amount.to_string(),
            date.to_string(),
            notes
        ],
    )?;
    Ok(ExpenseEntry {
        id: conn.last_insert_rowid(),
        name,
        category,
        amount,
        date,
        notes,
    })
}

pub fn list_expenses(
    conn: &Connection,
    account_id: i64,
    limit: Option<usize>,
) -> Result<Vec<ExpenseEntry>, CoreError> {
    let mut sql = String::from(
        "SELECT id, name, category, amount, date, notes FROM expenses
         WHERE account_id=?1 ORDER BY date DESC, id DESC",
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![account_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let category: String = r.get(2)?;
        let amount: String = r.get(3)?;
        data.push(ExpenseEntry {
            id: r.get(0)?,
            name: r.get(1)?,
            category: category.parse()?,
            amount: decode_amount(&amount)?,
            date: r.get(4)?,
            notes: r.get(5)?,
        });
    }
    Ok(data)
}

pub fn delete_expense(conn: &Connection, account_id: i64, id: i64) -> Result<(), CoreError> {
    let n = conn.execute(
        "DELETE FROM expenses WHERE id=?1 AND account_id=?2",
        params![id, account_id],
    )?;
    if n == 0 {
        return Err(CoreError::NotFound(format!("Expense {} not found", id)));
    }
    Ok(())
}

pub fn add_income(
    conn: &Connection,
    account_id: i64,
    source: &str,
    category: &str,
    amount: &str,
    date: &str,
    notes: Option<&str>,
) -> Result<IncomeEntry, CoreError> {
    let source = require("Source", source)?;
    let category: IncomeCategory = category.parse()?;
    let amount = parse_amount("Amount", amount)?;
    let date = parse_date(date)?;
    let notes = clean_notes(notes);
    conn.execute(
        "INSERT INTO incomes(account_id, source, category, amount, date, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account_id,
            source,
            category.as_str(),
            amount.to_string(),
            date.to_string(),
            notes
        ],
    )?;
    Ok(IncomeEntry {
        id: conn.last_insert_rowid(),
        source,
        category,
        amount,
        date,
        notes,
    })
}

pub fn list_incomes(
    conn: &Connection,
    account_id: i64,
    limit: Option<usize>,
) -> Result<Vec<IncomeEntry>, CoreError> {
    let mut sql = String::from(
        "SELECT id, source, category, amount, date, notes FROM incomes
         WHERE account_id=?1 ORDER BY date DESC, id DESC",
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![account_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let category: String = r.get(2)?;
        let amount: String = r.get(3)?;
        data.push(IncomeEntry {
            id: r.get(0)?,
            source: r.get(1)?,
            category: category.parse()?,
            amount: decode_amount(&amount)?,
            date: r.get(4)?,
            notes: r.get(5)?,
        });
    }
    Ok(data)
}

pub fn delete_income(conn: &Connection, account_id: i64, id: i64) -> Result<(), CoreError> {
    let n = conn.execute(
        "DELETE FROM incomes WHERE id=?1 AND account_id=?2",
        params![id, account_id],
    )?;
    if n == 0 {
        return Err(CoreError::NotFound(format!("Income {} not found", id)));
    }
    Ok(())
}

fn sum_amounts(conn: &Connection, sql: &str, account_id: i64) -> Result<Decimal, CoreError> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params![account_id])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        total += decode_amount(&s)?;
    }
    Ok(total)
}

/// Full-history income and expense totals, recomputed from the entry set on
/// every call.
pub fn totals(conn: &Connection, account_id: i64) -> Result<(Decimal, Decimal), CoreError> {
    let income = sum_amounts(
        conn,
        "SELECT amount FROM incomes WHERE account_id=?1",
        account_id,
    )?;
    let expenses = sum_amounts(
        conn,
        "SELECT amount FROM expenses WHERE account_id=?1",
        account_id,
    )?;
    Ok((income, expenses))
}

pub fn balance(conn: &Connection, account_id: i64) -> Result<Decimal, CoreError> {
    let (income, expenses) = totals(conn, account_id)?;
    Ok(income - expenses)
}

/// Income and expense sums restricted to a date window, inclusive.
pub(crate) fn window_entries(
    conn: &Connection,
    account_id: i64,
    table: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<(NaiveDate, Decimal)>, CoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT date, amount FROM {} WHERE account_id=?1 AND date>=?2 AND date<=?3",
        table
    ))?;
    let mut rows = stmt.query(params![account_id, from.to_string(), to.to_string()])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: NaiveDate = r.get(0)?;
        let amount: String = r.get(1)?;
        data.push((date, decode_amount(&amount)?));
    }
    Ok(data)
}
