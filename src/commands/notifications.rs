// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::NotificationRow;
use crate::notify;
use crate::utils::{maybe_print_json, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, account_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, account_id, sub)?,
        Some(("read", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            notify::mark_read(conn, account_id, id)?;
            println!("Notification {} marked as read", id);
        }
        Some(("read-all", _)) => {
            let n = notify::mark_all_read(conn, account_id)?;
            println!("Marked {} notification(s) as read", n);
        }
        Some(("unread-count", _)) => {
            println!("{}", notify::unread_count(conn, account_id)?);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &mut Connection, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let unread_only = sub.get_flag("unread");
    let data: Vec<NotificationRow> = notify::list(conn, account_id, unread_only, today())?
        .into_iter()
        .map(NotificationRow::from)
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|n| {
                vec![
                    n.id.to_string(),
                    n.kind.clone(),
                    n.title.clone(),
                    n.message.clone(),
                    if n.is_read { "yes" } else { "no" }.to_string(),
                    n.created_at.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Kind", "Title", "Message", "Read", "Created"],
                rows
            )
        );
    }
    Ok(())
}
