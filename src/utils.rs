// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreError;

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

/// Parse a positive currency amount from a decimal string, rounding to two
/// places half-up. Amounts never pass through binary floating point.
pub fn parse_amount(label: &str, s: &str) -> Result<Decimal, CoreError> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| CoreError::Validation(format!("Invalid {} '{}'", label, s)))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if d <= Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "{} must be greater than zero",
            label
        )));
    }
    Ok(d)
}

/// Parse a monthly interest rate in percent. Zero is allowed.
pub fn parse_rate(s: &str) -> Result<Decimal, CoreError> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| CoreError::Validation(format!("Invalid interest rate '{}'", s)))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if d < Decimal::ZERO {
        return Err(CoreError::Validation(
            "Interest rate cannot be negative".to_string(),
        ));
    }
    Ok(d)
}

pub fn require(label: &str, s: &str) -> Result<String, CoreError> {
    let v = s.trim();
    if v.is_empty() {
        return Err(CoreError::Validation(format!("{} is required", label)));
    }
    Ok(v.to_string())
}

/// Decode an amount read back from the store.
pub(crate) fn decode_amount(s: &str) -> Result<Decimal, CoreError> {
    s.parse::<Decimal>()
        .map_err(|_| CoreError::Validation(format!("Invalid amount '{}' in store", s)))
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", d)
}

/// Whole-month count between two dates: day difference divided by 30, rounded
/// up, never less than one. Partial months always count in full.
pub fn months_between(start: NaiveDate, due: NaiveDate) -> i64 {
    let days = (due - start).num_days().abs();
    ((days + 29) / 30).max(1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Display currency settings
pub fn get_currency(conn: &Connection) -> Result<String, CoreError> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='currency'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| "INR".to_string()))
}

pub fn set_currency(conn: &Connection, code: &str) -> Result<(), CoreError> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![code.trim().to_uppercase()],
    )?;
    Ok(())
}
