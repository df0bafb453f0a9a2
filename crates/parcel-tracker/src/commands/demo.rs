//! Walkthrough of the whole parcel lifecycle
//!
//! 1. Register a parcel and change its address
//! 2. Send it, then try to delete it (blocked: no longer registered)
//! 3. Register a second parcel and delete it (allowed)
//!
//! The client's parcels are listed after each phase.

use anyhow::{Context, Result};
use parcel_core::{ClientId, EventSink, ParcelService, ParcelStore};

pub const FIRST_ADDRESS: &str = "Pskov, Pushkina St., Kolotushkina 5";
pub const NEW_ADDRESS: &str = "Saratov, Verkhnie Zori, Kozlova St. 25";

/// Run the walkthrough for `client`
pub async fn run<S: ParcelStore, E: EventSink>(
    service: &ParcelService<S, E>,
    client: ClientId,
) -> Result<()> {
    let parcel = service
        .register(client, FIRST_ADDRESS)
        .await
        .context("register failed")?;

    service
        .change_address(parcel.number, NEW_ADDRESS)
        .await
        .context("changing address failed")?;

    service
        .advance_status(parcel.number)
        .await
        .context("next status failed")?;

    service
        .list_for_client(client)
        .await
        .context("listing client parcels failed")?;

    // Sent parcels stay put
    service
        .delete(parcel.number)
        .await
        .context("failed to delete parcel")?;

    service
        .list_for_client(client)
        .await
        .context("listing client parcels failed")?;

    let fresh = service
        .register(client, FIRST_ADDRESS)
        .await
        .context("registering second parcel failed")?;

    service
        .delete(fresh.number)
        .await
        .context("failed to delete new parcel")?;

    service
        .list_for_client(client)
        .await
        .context("listing client parcels after delete failed")?;

    tracing::info!(client = %client, kept = %parcel.number, deleted = %fresh.number, "demo finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use parcel_core::{MemorySink, MemoryStore, ParcelEvent, ParcelStatus};

    use super::*;

    #[tokio::test]
    async fn test_demo_keeps_sent_parcel_and_drops_fresh_one() -> Result<()> {
        let sink = MemorySink::new();
        let service = ParcelService::new(MemoryStore::new(), &sink);

        run(&service, ClientId::new(1)).await?;

        let listings: Vec<usize> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                ParcelEvent::ClientListing { count, .. } => Some(*count),
                _ => None,
            })
            .collect();
        assert_eq!(listings, vec![1, 1, 1]);

        let remaining = service.list_for_client(ClientId::new(1)).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].address, NEW_ADDRESS);
        assert_eq!(remaining[0].status, ParcelStatus::Sent);
        Ok(())
    }
}
