//! Parcel tracker CLI
//!
//! Binary name: `parcel-tracker`

use std::process;

use parcel_tracker::cli::{build_cli, handlers};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let result = match handlers::resolve_config(&matches) {
        Ok(config) => {
            init_tracing(&config.log_level);
            handlers::dispatch(&matches, &config).await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {err:#}");
        }

        let code = err
            .downcast_ref::<parcel_core::Error>()
            .map_or(1, parcel_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the configured level
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
