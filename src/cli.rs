// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON Lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .version(crate_version!())
        .about("Personal-finance ledger, lending/borrowing tracker, and spending insights")
        .arg(
            Arg::new("account")
                .long("account")
                .global(true)
                .value_parser(value_parser!(i64))
                .default_value("1")
                .help("Account id scope (supplied by the auth layer in service use)"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("expense")
                .about("Record and inspect expenses")
                .subcommand(
                    Command::new("add")
                        .about("Add an expense entry")
                        .arg(Arg::new("name").long("name").required(true).help("What the money went to"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("Other")
                                .help("Food, Travel, Shopping, Entertainment, Bills, Health, Education or Other"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true).help("Decimal amount"))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List expenses, newest first").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg())),
        )
        .subcommand(
            Command::new("income")
                .about("Record and inspect incomes")
                .subcommand(
                    Command::new("add")
                        .about("Add an income entry")
                        .arg(Arg::new("source").long("source").required(true).help("Where the money came from"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("Salary")
                                .help("Salary, Freelance, Investment, Business, Gift, HomeMaker or Other"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true).help("Decimal amount"))
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List incomes, newest first").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(Command::new("rm").about("Delete an income").arg(id_arg())),
        )
        .subcommand(
            Command::new("loan")
                .about("Track lending and borrowing")
                .subcommand(
                    Command::new("add")
                        .about("Add a loan record")
                        .arg(
                            Arg::new("direction")
                                .long("direction")
                                .required(true)
                                .help("'lending' (money given out) or 'borrowing' (money taken in)"),
                        )
                        .arg(Arg::new("name").long("name").required(true).help("Counterparty name"))
                        .arg(Arg::new("amount").long("amount").required(true).help("Principal"))
                        .arg(Arg::new("rate").long("rate").help("Interest percent per month, default 0"))
                        .arg(Arg::new("start").long("start").required(true).help("Start date, YYYY-MM-DD"))
                        .arg(Arg::new("due").long("due").required(true).help("Due date, YYYY-MM-DD"))
                        .arg(Arg::new("address").long("address").help("Borrower address (lending)"))
                        .arg(Arg::new("phone").long("phone").help("Borrower phone (lending)"))
                        .arg(
                            Arg::new("source")
                                .long("source")
                                .help("Bank, Friends or 'Third Party' (borrowing)"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List loans")
                        .arg(Arg::new("direction").long("direction").help("lending | borrowing"))
                        .arg(Arg::new("status").long("status").help("pending | paid | overdue")),
                ))
                .subcommand(json_flags(
                    Command::new("show").about("Show one loan in full").arg(id_arg()),
                ))
                .subcommand(
                    Command::new("status")
                        .about("Mark a loan pending or paid")
                        .arg(id_arg())
                        .arg(Arg::new("value").required(true).help("pending | paid")),
                )
                .subcommand(Command::new("rm").about("Delete a loan").arg(id_arg()))
                .subcommand(json_flags(
                    Command::new("stats").about("Lending/borrowing totals and status counts"),
                )),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Balance, totals and unread notifications"),
        ))
        .subcommand(json_flags(
            Command::new("chart")
                .about("Income vs expense series for a period")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .default_value("week")
                        .help("week | month | year"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("categories")
                .about("Expense breakdown by category for a period")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .default_value("week")
                        .help("week | month | year"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("suggest").about("Evaluate spending advisories"),
        ))
        .subcommand(
            Command::new("notifications")
                .about("Advisory and loan-due notifications")
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("unread")
                            .long("unread")
                            .action(ArgAction::SetTrue)
                            .help("Only unread notifications"),
                    ),
                ))
                .subcommand(Command::new("read").about("Mark one as read").arg(id_arg()))
                .subcommand(Command::new("read-all").about("Mark everything as read"))
                .subcommand(Command::new("unread-count")),
        )
        .subcommand(
            Command::new("config")
                .about("Display settings")
                .subcommand(
                    Command::new("currency")
                        .about("Show or set the display currency code")
                        .arg(Arg::new("code").help("e.g. INR")),
                ),
        )
}
