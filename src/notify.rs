// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::error::CoreError;
use crate::loans;
use crate::models::Notification;

pub(crate) fn insert(
    conn: &Connection,
    account_id: i64,
    kind: &str,
    title: &str,
    message: &str,
    loan_id: Option<i64>,
) -> Result<(), CoreError> {
    conn.execute(
        "INSERT INTO notifications(account_id, kind, title, message, loan_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![account_id, kind, title, message, loan_id],
    )?;
    Ok(())
}

/// Newest first. Syncs loan-due notifications before reading so a due-date
/// crossing shows up on the next poll without a scheduler.
pub fn list(
    conn: &mut Connection,
    account_id: i64,
    unread_only: bool,
    today: NaiveDate,
) -> Result<Vec<Notification>, CoreError> {
    loans::sync_due_notifications(conn, account_id, today)?;
    let mut sql = String::from(
        "SELECT id, kind, title, message, loan_id, is_read, created_at
         FROM notifications WHERE account_id=?1",
    );
    if unread_only {
        sql.push_str(" AND is_read=0");
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![account_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(1)?;
        data.push(Notification {
            id: r.get(0)?,
            kind: kind.parse()?,
            title: r.get(2)?,
            message: r.get(3)?,
            loan_id: r.get(4)?,
            is_read: r.get(5)?,
            created_at: r.get(6)?,
        });
    }
    Ok(data)
}

/// Idempotent once read; only an unknown id is an error.
pub fn mark_read(conn: &Connection, account_id: i64, id: i64) -> Result<(), CoreError> {
    let n = conn.execute(
        "UPDATE notifications SET is_read=1 WHERE id=?1 AND account_id=?2",
        params![id, account_id],
    )?;
    if n == 0 {
        return Err(CoreError::NotFound(format!(
            "Notification {} not found",
            id
        )));
    }
    Ok(())
}

pub fn mark_all_read(conn: &Connection, account_id: i64) -> Result<usize, CoreError> {
    let n = conn.execute(
        "UPDATE notifications SET is_read=1 WHERE account_id=?1 AND is_read=0",
        params![account_id],
    )?;
    Ok(n)
}

pub fn unread_count(conn: &Connection, account_id: i64) -> Result<i64, CoreError> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE account_id=?1 AND is_read=0",
        params![account_id],
        |r| r.get(0),
    )?;
    Ok(n)
}
