// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketledger::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let account_id = *matches.get_one::<i64>("account").unwrap_or(&1);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("expense", sub)) => commands::expenses::handle(&conn, account_id, sub)?,
        Some(("income", sub)) => commands::incomes::handle(&conn, account_id, sub)?,
        Some(("loan", sub)) => commands::loans::handle(&conn, account_id, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::dashboard(&mut conn, account_id, sub)?,
        Some(("chart", sub)) => commands::dashboard::chart(&conn, account_id, sub)?,
        Some(("categories", sub)) => commands::dashboard::categories(&conn, account_id, sub)?,
        Some(("suggest", sub)) => commands::dashboard::suggest(&mut conn, account_id, sub)?,
        Some(("notifications", sub)) => {
            commands::notifications::handle(&mut conn, account_id, sub)?
        }
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
