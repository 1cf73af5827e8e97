// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{self, LoanRow};
use crate::loans::{self, NewLoan};
use crate::utils::{fmt_amount, maybe_print_json, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, account_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, account_id, sub)?,
        Some(("list", sub)) => list(conn, account_id, sub)?,
        Some(("show", sub)) => show(conn, account_id, sub)?,
        Some(("status", sub)) => status(conn, account_id, sub)?,
        Some(("rm", sub)) => rm(conn, account_id, sub)?,
        Some(("stats", sub)) => stats(conn, account_id, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name).map(|s| s.to_string())
}

fn add(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let req = NewLoan {
        direction: arg(sub, "direction").unwrap_or_default(),
        counterparty_name: arg(sub, "name").unwrap_or_default(),
        amount: arg(sub, "amount").unwrap_or_default(),
        interest_rate: arg(sub, "rate"),
        start_date: arg(sub, "start").unwrap_or_default(),
        due_date: arg(sub, "due").unwrap_or_default(),
        counterparty_address: arg(sub, "address"),
        counterparty_phone: arg(sub, "phone"),
        source: arg(sub, "source"),
        notes: arg(sub, "notes"),
    };
    let loan = loans::add_loan(conn, account_id, &req)?;
    println!(
        "Recorded {} of {} with {}, due {} (total payable {})",
        loan.direction,
        fmt_amount(&loan.amount),
        loan.counterparty_name,
        loan.due_date,
        fmt_amount(&loan.total_payable)
    );
    Ok(())
}

fn list(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let now = today();
    let direction = sub
        .get_one::<String>("direction")
        .map(|s| s.parse())
        .transpose()?;
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse())
        .transpose()?;
    let data: Vec<LoanRow> = loans::list_loans(conn, account_id, direction, status, now)?
        .iter()
        .map(|l| api::loan_row(l, now))
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.direction.clone(),
                    r.counterparty_name.clone(),
                    r.amount.clone(),
                    format!("{}%", r.interest_rate),
                    r.due_date.clone(),
                    r.status.clone(),
                    r.total_payable.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Direction",
                    "Counterparty",
                    "Amount",
                    "Rate",
                    "Due",
                    "Status",
                    "Payable"
                ],
                rows
            )
        );
    }
    Ok(())
}

fn show(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let id = *sub.get_one::<i64>("id").unwrap();
    let now = today();
    let loan = loans::get_loan(conn, account_id, id)?;
    let row = api::loan_row(&loan, now);
    if !maybe_print_json(json_flag, jsonl_flag, &row)? {
        let mut fields = vec![
            vec!["Direction".to_string(), row.direction.clone()],
            vec!["Counterparty".to_string(), row.counterparty_name.clone()],
            vec!["Amount".to_string(), row.amount.clone()],
            vec!["Rate".to_string(), format!("{}% / month", row.interest_rate)],
            vec!["Start".to_string(), row.start_date.clone()],
            vec!["Due".to_string(), row.due_date.clone()],
            vec!["Status".to_string(), row.status.clone()],
            vec!["Total payable".to_string(), row.total_payable.clone()],
        ];
        if let Some(d) = &row.paid_date {
            fields.push(vec!["Paid on".to_string(), d.clone()]);
        }
        if let Some(a) = &row.counterparty_address {
            fields.push(vec!["Address".to_string(), a.clone()]);
        }
        if let Some(p) = &row.counterparty_phone {
            fields.push(vec!["Phone".to_string(), p.clone()]);
        }
        if let Some(s) = &row.source {
            fields.push(vec!["Source".to_string(), s.clone()]);
        }
        if let Some(n) = &row.notes {
            fields.push(vec!["Notes".to_string(), n.clone()]);
        }
        println!("{}", pretty_table(&["Field", "Value"], fields));
    }
    Ok(())
}

fn status(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let value = sub.get_one::<String>("value").unwrap();
    let loan = loans::update_status(conn, account_id, id, value, today())?;
    match loan.paid_date {
        Some(d) => println!("Loan {} marked paid on {}", loan.id, d),
        None => println!("Loan {} back to pending", loan.id),
    }
    Ok(())
}

fn rm(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    loans::delete_loan(conn, account_id, id)?;
    println!("Removed loan {}", id);
    Ok(())
}

fn stats(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let s = loans::loan_stats(conn, account_id, today())?;
    let data = vec![
        vec!["Total lent".to_string(), fmt_amount(&s.total_lent)],
        vec!["Total borrowed".to_string(), fmt_amount(&s.total_borrowed)],
        vec![
            "Outstanding lent".to_string(),
            fmt_amount(&s.outstanding_lent),
        ],
        vec![
            "Outstanding borrowed".to_string(),
            fmt_amount(&s.outstanding_borrowed),
        ],
        vec!["Pending".to_string(), s.pending.to_string()],
        vec!["Paid".to_string(), s.paid.to_string()],
        vec!["Overdue".to_string(), s.overdue.to_string()],
    ];
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Stat", "Value"], data));
    }
    Ok(())
}
