pub mod handlers;

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("parcel-tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Register parcels and track their delivery status")
        .subcommand_required(true)
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("SQLite database file (overrides config and PARCEL_TRACKER_DB)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file to use instead of ./parcel-tracker.toml"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print one JSON object per line"),
        )
        .arg(
            Arg::new("in-memory")
                .long("in-memory")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Keep parcels in memory for this run only"),
        )
        .subcommand(cmd_register())
        .subcommand(cmd_list())
        .subcommand(cmd_show())
        .subcommand(cmd_advance())
        .subcommand(cmd_set_address())
        .subcommand(cmd_delete())
        .subcommand(cmd_demo())
}

fn client_arg() -> Arg {
    Arg::new("client")
        .long("client")
        .value_name("ID")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Client identifier")
}

fn number_arg() -> Arg {
    Arg::new("number")
        .value_name("NUMBER")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Parcel number")
}

fn cmd_register() -> Command {
    Command::new("register")
        .about("Register a new parcel")
        .arg(client_arg())
        .arg(
            Arg::new("address")
                .long("address")
                .value_name("TEXT")
                .required(true)
                .help("Delivery address"),
        )
}

fn cmd_list() -> Command {
    Command::new("list")
        .about("List the parcels of a client")
        .arg(client_arg())
}

fn cmd_show() -> Command {
    Command::new("show").about("Show one parcel").arg(number_arg())
}

fn cmd_advance() -> Command {
    Command::new("advance")
        .about("Move a parcel to its next status")
        .arg(number_arg())
}

fn cmd_set_address() -> Command {
    Command::new("set-address")
        .about("Change the address of a registered parcel")
        .arg(number_arg())
        .arg(
            Arg::new("address")
                .value_name("ADDRESS")
                .required(true)
                .help("New delivery address"),
        )
}

fn cmd_delete() -> Command {
    Command::new("delete")
        .about("Delete a registered parcel")
        .arg(number_arg())
}

fn cmd_demo() -> Command {
    Command::new("demo")
        .about("Run the register / update / advance / delete walkthrough")
        .arg(
            Arg::new("client")
                .long("client")
                .value_name("ID")
                .default_value("1")
                .value_parser(value_parser!(i64))
                .help("Client identifier used for the walkthrough"),
        )
}
