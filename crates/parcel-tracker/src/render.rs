//! Console rendering of parcel events

use std::cell::Cell;

use parcel_core::{EventSink, Parcel, ParcelEvent};
use serde::{Deserialize, Serialize};

/// Output format for rendered events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Human,
    /// One JSON object per event
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Human
        }
    }

    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Human-readable line for one event
#[must_use]
pub fn render_event(event: &ParcelEvent) -> String {
    match event {
        ParcelEvent::Registered { parcel } => format!(
            "New parcel #{} to address {} from client {} registered at {}",
            parcel.number,
            parcel.address,
            parcel.client,
            parcel.created_at_rfc3339()
        ),
        ParcelEvent::ClientListing { client, .. } => format!("Parcels of client {client}:"),
        ParcelEvent::Listed { parcel } => render_parcel(parcel),
        ParcelEvent::StatusAdvanced { number, to, .. } => {
            format!("Parcel #{number} has a new status: {to}")
        }
    }
}

/// Human-readable line describing a stored parcel
#[must_use]
pub fn render_parcel(parcel: &Parcel) -> String {
    format!(
        "Parcel #{} to address {} from client {} registered at {}, status {}",
        parcel.number,
        parcel.address,
        parcel.client,
        parcel.created_at_rfc3339(),
        parcel.status
    )
}

/// Sink that prints events to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink {
    format: OutputFormat,
    listing_remaining: Cell<usize>,
}

impl ConsoleSink {
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            listing_remaining: Cell::new(0),
        }
    }

    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    #[allow(clippy::print_stdout)]
    fn print_human(&self, event: &ParcelEvent) {
        println!("{}", render_event(event));

        // A listing ends with a blank line once its last parcel is printed
        let ends_listing = match event {
            ParcelEvent::ClientListing { count, .. } => {
                self.listing_remaining.set(*count);
                *count == 0
            }
            ParcelEvent::Listed { .. } => {
                let remaining = self.listing_remaining.get().saturating_sub(1);
                self.listing_remaining.set(remaining);
                remaining == 0
            }
            _ => false,
        };
        if ends_listing {
            println!();
        }
    }

    #[allow(clippy::print_stdout)]
    fn print_json(event: &ParcelEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "failed to serialize event"),
        }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: &ParcelEvent) {
        tracing::trace!(?event, "event");
        match self.format {
            OutputFormat::Human => self.print_human(event),
            OutputFormat::Json => Self::print_json(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use parcel_core::{ClientId, NewParcel, ParcelNumber, ParcelStatus};

    use super::*;

    fn parcel() -> Parcel {
        let mut parcel = NewParcel::registered(ClientId::new(1), "Saratov, Kozlova 25")
            .with_number(ParcelNumber::new(3));
        parcel.status = ParcelStatus::Sent;
        parcel
    }

    #[test]
    fn test_render_listed_parcel_includes_every_field() {
        let parcel = parcel();
        let line = render_event(&ParcelEvent::Listed {
            parcel: parcel.clone(),
        });

        assert!(line.starts_with("Parcel #3 to address Saratov, Kozlova 25 from client 1"));
        assert!(line.contains(&parcel.created_at_rfc3339()));
        assert!(line.ends_with("status sent"));
    }

    #[test]
    fn test_render_status_advanced() {
        let line = render_event(&ParcelEvent::StatusAdvanced {
            number: ParcelNumber::new(3),
            from: ParcelStatus::Sent,
            to: ParcelStatus::Delivered,
        });
        assert_eq!(line, "Parcel #3 has a new status: delivered");
    }

    #[test]
    fn test_render_listing_header() {
        let line = render_event(&ParcelEvent::ClientListing {
            client: ClientId::new(9),
            count: 2,
        });
        assert_eq!(line, "Parcels of client 9:");
    }

    #[test]
    fn test_listing_countdown_resets() {
        let sink = ConsoleSink::new(OutputFormat::Human);
        sink.emit(&ParcelEvent::ClientListing {
            client: ClientId::new(1),
            count: 1,
        });
        assert_eq!(sink.listing_remaining.get(), 1);
        sink.emit(&ParcelEvent::Listed { parcel: parcel() });
        assert_eq!(sink.listing_remaining.get(), 0);
    }

    #[test]
    fn test_output_format_from_flag() {
        assert!(OutputFormat::from_json_flag(true).is_json());
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Human);
    }
}
