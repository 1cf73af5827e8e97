// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, Period};
use crate::suggest;
use crate::utils::{fmt_amount, get_currency, maybe_print_json, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn dashboard(conn: &mut Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let summary = analytics::dashboard(conn, account_id, today())?;
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let ccy = get_currency(conn)?;
        let rows = vec![
            vec![
                "Balance".to_string(),
                format!("{} {}", fmt_amount(&summary.balance), ccy),
            ],
            vec![
                "Income".to_string(),
                format!("{} {}", fmt_amount(&summary.total_income), ccy),
            ],
            vec![
                "Expenses".to_string(),
                format!("{} {}", fmt_amount(&summary.total_expenses), ccy),
            ],
            vec![
                "Unread notifications".to_string(),
                summary.unread_count.to_string(),
            ],
        ];
        println!("{}", pretty_table(&["", ""], rows));
    }
    Ok(())
}

pub fn chart(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period: Period = sub.get_one::<String>("period").unwrap().parse()?;
    let series = analytics::chart_series(conn, account_id, period, today())?;
    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let rows: Vec<Vec<String>> = series
            .labels
            .iter()
            .zip(series.income.iter().zip(series.expenses.iter()))
            .map(|(label, (inc, exp))| {
                vec![label.clone(), fmt_amount(inc), fmt_amount(exp)]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&[period.as_str(), "Income", "Expenses"], rows)
        );
    }
    Ok(())
}

pub fn categories(conn: &Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period: Period = sub.get_one::<String>("period").unwrap().parse()?;
    let slices = analytics::category_breakdown(conn, account_id, period, today())?;
    if !maybe_print_json(json_flag, jsonl_flag, &slices)? {
        let rows: Vec<Vec<String>> = slices
            .iter()
            .map(|s| vec![s.category.to_string(), fmt_amount(&s.amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

pub fn suggest(conn: &mut Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let now = today();
    let input = suggest::gather(conn, account_id, now)?;
    let advisories = suggest::evaluate(&input);
    suggest::record_advisories(conn, account_id, &advisories)?;
    if !maybe_print_json(json_flag, jsonl_flag, &advisories)? {
        if advisories.is_empty() {
            println!("No suggestions right now");
        } else {
            let rows: Vec<Vec<String>> = advisories
                .iter()
                .map(|a| vec![a.severity.as_str().to_string(), a.message.clone()])
                .collect();
            println!("{}", pretty_table(&["Severity", "Suggestion"], rows));
        }
    }
    Ok(())
}
