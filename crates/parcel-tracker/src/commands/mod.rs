//! Command implementations for the parcel-tracker CLI
//!
//! Registration, listing and status changes are printed by the service's
//! event sink; the commands here only print results that produce no event.

pub mod demo;

use anyhow::Result;
use parcel_core::{ClientId, EventSink, ParcelNumber, ParcelService, ParcelStore, WriteOutcome};
use serde_json::json;

use crate::render::{render_parcel, OutputFormat};

/// Register a parcel
pub async fn register<S: ParcelStore, E: EventSink>(
    service: &ParcelService<S, E>,
    client: ClientId,
    address: &str,
) -> Result<()> {
    service.register(client, address).await?;
    Ok(())
}

/// List the parcels of a client
pub async fn list<S: ParcelStore, E: EventSink>(
    service: &ParcelService<S, E>,
    client: ClientId,
) -> Result<()> {
    service.list_for_client(client).await?;
    Ok(())
}

/// Print one parcel
#[allow(clippy::print_stdout)]
pub async fn show<S: ParcelStore, E: EventSink>(
    service: &ParcelService<S, E>,
    number: ParcelNumber,
    format: OutputFormat,
) -> Result<()> {
    let parcel = service.parcel(number).await?;

    if format.is_json() {
        println!("{}", serde_json::to_string(&parcel)?);
    } else {
        println!("{}", render_parcel(&parcel));
    }
    Ok(())
}

/// Advance a parcel to its next status
pub async fn advance<S: ParcelStore, E: EventSink>(
    service: &ParcelService<S, E>,
    number: ParcelNumber,
) -> Result<()> {
    service.advance_status(number).await?;
    Ok(())
}

/// Change the address of a registered parcel
pub async fn set_address<S: ParcelStore, E: EventSink>(
    service: &ParcelService<S, E>,
    number: ParcelNumber,
    address: &str,
    format: OutputFormat,
) -> Result<()> {
    let outcome = service.change_address(number, address).await?;
    report_outcome("set-address", number, outcome, format)
}

/// Delete a registered parcel
pub async fn delete<S: ParcelStore, E: EventSink>(
    service: &ParcelService<S, E>,
    number: ParcelNumber,
    format: OutputFormat,
) -> Result<()> {
    let outcome = service.delete(number).await?;
    report_outcome("delete", number, outcome, format)
}

#[allow(clippy::print_stdout)]
fn report_outcome(
    operation: &str,
    number: ParcelNumber,
    outcome: WriteOutcome,
    format: OutputFormat,
) -> Result<()> {
    if format.is_json() {
        let line = json!({
            "operation": operation,
            "number": number,
            "outcome": outcome,
        });
        println!("{}", serde_json::to_string(&line)?);
        return Ok(());
    }

    match outcome {
        WriteOutcome::Applied => println!("{operation}: parcel #{number} updated"),
        WriteOutcome::Unchanged => println!(
            "{operation}: parcel #{number} unchanged (missing or no longer registered)"
        ),
    }
    Ok(())
}
