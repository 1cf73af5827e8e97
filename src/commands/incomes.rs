// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::IncomeRow;
use crate::ledger;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, account_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, account_id, sub)?,
        Some(("list", sub)) => list(conn, account_id, sub)?,
        Some(("rm", sub)) => rm(conn, account_id, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let entry = ledger::add_income(
        conn,
        account_id,
        sub.get_one::<String>("source").unwrap(),
        sub.get_one::<String>("category").unwrap(),
        sub.get_one::<String>("amount").unwrap(),
        sub.get_one::<String>("date").unwrap(),
        sub.get_one::<String>("notes").map(|s| s.as_str()),
    )?;
    println!(
        "Recorded income {} from '{}' ({}) on {}",
        fmt_amount(&entry.amount),
        entry.source,
        entry.category,
        entry.date
    );
    Ok(())
}

fn list(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = sub.get_one::<usize>("limit").copied();
    let data: Vec<IncomeRow> = ledger::list_incomes(conn, account_id, limit)?
        .into_iter()
        .map(IncomeRow::from)
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.source.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Source", "Category", "Amount", "Notes"],
                rows
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::delete_income(conn, account_id, id)?;
    println!("Removed income {}", id);
    Ok(())
}
