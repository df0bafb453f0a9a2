use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use parcel_core::{ClientId, EventSink, MemoryStore, ParcelNumber, ParcelService, ParcelStore};

use crate::{
    commands,
    config::{load_config, Config},
    database::ParcelDb,
    render::{ConsoleSink, OutputFormat},
};

/// Resolve configuration from files, environment and the global CLI flags
pub fn resolve_config(matches: &ArgMatches) -> Result<Config> {
    let explicit = matches.get_one::<PathBuf>("config");
    let config = load_config(explicit.map(PathBuf::as_path))?
        .with_database(matches.get_one::<PathBuf>("db").cloned());
    config.validate()?;
    Ok(config)
}

/// Open the store, run the selected subcommand and close the store again
pub async fn dispatch(matches: &ArgMatches, config: &Config) -> Result<()> {
    let format = OutputFormat::from_json_flag(matches.get_flag("json"));
    let sink = ConsoleSink::new(format);

    if matches.get_flag("in-memory") {
        let service = ParcelService::new(MemoryStore::new(), &sink);
        return run_command(matches, &service, format).await;
    }

    let db = ParcelDb::open(&config.database)
        .await
        .with_context(|| format!("Failed to open {}", config.database.display()))?;
    let service = ParcelService::new(db, &sink);
    let result = run_command(matches, &service, format).await;
    service.into_store().close().await;
    result
}

async fn run_command<S: ParcelStore, E: EventSink>(
    matches: &ArgMatches,
    service: &ParcelService<S, E>,
    format: OutputFormat,
) -> Result<()> {
    match matches.subcommand() {
        Some(("register", sub_m)) => {
            commands::register(service, client(sub_m)?, string(sub_m, "address")?).await
        }
        Some(("list", sub_m)) => commands::list(service, client(sub_m)?).await,
        Some(("show", sub_m)) => commands::show(service, number(sub_m)?, format).await,
        Some(("advance", sub_m)) => commands::advance(service, number(sub_m)?).await,
        Some(("set-address", sub_m)) => {
            commands::set_address(service, number(sub_m)?, string(sub_m, "address")?, format)
                .await
        }
        Some(("delete", sub_m)) => commands::delete(service, number(sub_m)?, format).await,
        Some(("demo", sub_m)) => commands::demo::run(service, client(sub_m)?).await,
        _ => anyhow::bail!("Unknown command. Run 'parcel-tracker --help' for usage."),
    }
}

fn client(matches: &ArgMatches) -> Result<ClientId> {
    matches
        .get_one::<i64>("client")
        .copied()
        .map(ClientId::new)
        .context("--client is required")
}

fn number(matches: &ArgMatches) -> Result<ParcelNumber> {
    matches
        .get_one::<i64>("number")
        .copied()
        .map(ParcelNumber::new)
        .context("parcel number is required")
}

fn string<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("{id} is required"))
}
