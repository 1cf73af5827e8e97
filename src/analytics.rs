// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::CoreError;
use crate::ledger;
use crate::loans;
use crate::models::ExpenseCategory;
use crate::notify;
use crate::utils::days_in_month;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(CoreError::Validation(format!(
                "Invalid period '{}', expected 'week', 'month' or 'year'",
                s
            ))),
        }
    }
}

/// Inclusive date window covered by a chart period.
pub fn period_bounds(period: Period, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match period {
        Period::Week => (today - Duration::days(6), today),
        Period::Month => {
            let first = today.with_day(1).unwrap_or(today);
            let last_day = days_in_month(today.year(), today.month());
            let last = today.with_day(last_day).unwrap_or(today);
            (first, last)
        }
        Period::Year => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
            (first, last)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub unread_count: i64,
}

/// Account headline numbers over the full history, not just the chart window.
pub fn dashboard(
    conn: &mut Connection,
    account_id: i64,
    today: NaiveDate,
) -> Result<DashboardSummary, CoreError> {
    loans::sync_due_notifications(conn, account_id, today)?;
    let (total_income, total_expenses) = ledger::totals(conn, account_id)?;
    let unread_count = notify::unread_count(conn, account_id)?;
    Ok(DashboardSummary {
        balance: total_income - total_expenses,
        total_income,
        total_expenses,
        unread_count,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub income: Vec<Decimal>,
    pub expenses: Vec<Decimal>,
}

/// Calendar-aligned income/expense buckets. Series length is fixed per
/// period; empty buckets report zero so renderers never see ragged arrays.
pub fn chart_series(
    conn: &Connection,
    account_id: i64,
    period: Period,
    today: NaiveDate,
) -> Result<ChartSeries, CoreError> {
    let (start, end) = period_bounds(period, today);
    let (labels, len) = match period {
        Period::Week => {
            let labels = (0..7)
                .map(|i| (start + Duration::days(i)).format("%a").to_string())
                .collect::<Vec<_>>();
            (labels, 7)
        }
        Period::Month => {
            let len = days_in_month(today.year(), today.month()) as usize;
            ((1..=len).map(|d| d.to_string()).collect(), len)
        }
        Period::Year => {
            let labels = (1..=12)
                .filter_map(|m| NaiveDate::from_ymd_opt(today.year(), m, 1))
                .map(|d| d.format("%b").to_string())
                .collect::<Vec<_>>();
            (labels, 12)
        }
    };

    let mut income = vec![Decimal::ZERO; len];
    let mut expenses = vec![Decimal::ZERO; len];
    for (date, amount) in ledger::window_entries(conn, account_id, "incomes", start, end)? {
        if let Some(i) = bucket_index(period, start, date, len) {
            income[i] += amount;
        }
    }
    for (date, amount) in ledger::window_entries(conn, account_id, "expenses", start, end)? {
        if let Some(i) = bucket_index(period, start, date, len) {
            expenses[i] += amount;
        }
    }
    Ok(ChartSeries {
        labels,
        income,
        expenses,
    })
}

fn bucket_index(period: Period, start: NaiveDate, date: NaiveDate, len: usize) -> Option<usize> {
    let idx = match period {
        Period::Week | Period::Month => (date - start).num_days(),
        Period::Year => date.month0() as i64,
    };
    (0..len as i64).contains(&idx).then_some(idx as usize)
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub category: ExpenseCategory,
    pub amount: Decimal,
}

/// Expense totals per category inside the selected chart window, largest
/// first; zero-amount categories are dropped. Ties break on category name so
/// equal inputs always produce identical output.
pub fn category_breakdown(
    conn: &Connection,
    account_id: i64,
    period: Period,
    today: NaiveDate,
) -> Result<Vec<CategorySlice>, CoreError> {
    let (start, end) = period_bounds(period, today);
    let mut stmt = conn.prepare(
        "SELECT category, amount FROM expenses
         WHERE account_id=?1 AND date>=?2 AND date<=?3",
    )?;
    let mut rows = stmt.query(rusqlite::params![
        account_id,
        start.to_string(),
        end.to_string()
    ])?;
    let mut agg: HashMap<ExpenseCategory, Decimal> = HashMap::new();
    while let Some(r) = rows.next()? {
        let category: String = r.get(0)?;
        let amount: String = r.get(1)?;
        let category: ExpenseCategory = category.parse()?;
        *agg.entry(category).or_insert(Decimal::ZERO) += crate::utils::decode_amount(&amount)?;
    }
    let mut items: Vec<CategorySlice> = agg
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(category, amount)| CategorySlice { category, amount })
        .collect();
    items.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    Ok(items)
}
