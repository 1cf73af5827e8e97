// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::cli;

#[test]
fn account_flag_is_global_with_a_default() {
    let matches = cli::build_cli().get_matches_from(["pocketledger", "dashboard"]);
    assert_eq!(*matches.get_one::<i64>("account").unwrap(), 1);

    let matches =
        cli::build_cli().get_matches_from(["pocketledger", "--account", "7", "dashboard"]);
    assert_eq!(*matches.get_one::<i64>("account").unwrap(), 7);
}

#[test]
fn expense_list_parses_limit_and_json_flags() {
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "expense",
        "list",
        "--limit",
        "2",
        "--json",
    ]);
    let Some(("expense", exp_m)) = matches.subcommand() else {
        panic!("no expense subcommand");
    };
    let Some(("list", list_m)) = exp_m.subcommand() else {
        panic!("no list subcommand");
    };
    assert_eq!(*list_m.get_one::<usize>("limit").unwrap(), 2);
    assert!(list_m.get_flag("json"));
    assert!(!list_m.get_flag("jsonl"));
}

#[test]
fn loan_add_collects_direction_specific_args() {
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "loan",
        "add",
        "--direction",
        "lending",
        "--name",
        "Arjun",
        "--amount",
        "1000",
        "--start",
        "2024-05-01",
        "--due",
        "2024-06-01",
        "--address",
        "12 MG Road",
        "--phone",
        "9876543210",
    ]);
    let Some(("loan", loan_m)) = matches.subcommand() else {
        panic!("no loan subcommand");
    };
    let Some(("add", add_m)) = loan_m.subcommand() else {
        panic!("no add subcommand");
    };
    assert_eq!(add_m.get_one::<String>("direction").unwrap(), "lending");
    assert_eq!(add_m.get_one::<String>("phone").unwrap(), "9876543210");
    assert!(add_m.get_one::<String>("rate").is_none());
}

#[test]
fn notifications_list_has_an_unread_filter() {
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "notifications",
        "list",
        "--unread",
    ]);
    let Some(("notifications", n_m)) = matches.subcommand() else {
        panic!("no notifications subcommand");
    };
    let Some(("list", list_m)) = n_m.subcommand() else {
        panic!("no list subcommand");
    };
    assert!(list_m.get_flag("unread"));
}
