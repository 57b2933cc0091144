//! Turns server answers into the short messages shown next to each form.

use std::fmt::Display;

use log::error;
use shared::data::{ExitRecord, ParkedVehicle, Reply, RevenueSummary, StatusSummary};

/// Shown while a request is in flight.
pub const PROCESSING: &str = "Processing...";
/// Shown when a request failed before the server could say anything useful.
pub const GENERIC_ERROR: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Pending,
    Success,
    Danger,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn pending() -> Self {
        Self::new(Tone::Pending, PROCESSING)
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Tone::Success, text)
    }

    #[must_use]
    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(Tone::Danger, text)
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Tone::Info, text)
    }

    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    /// The generic failure notice. The cause is logged, never shown.
    pub fn failure(cause: &impl Display) -> Self {
        error!("Request failed: {cause}");
        Self::danger(GENERIC_ERROR)
    }
}

/// Renders the outcome of parking `number`. `number` is what was sent, not what came back.
pub fn entry<E: Display>(number: &str, outcome: &Result<Reply<ParkedVehicle>, E>) -> Notice {
    match outcome {
        Ok(Reply::Accepted(vehicle)) => {
            Notice::success(format!("Parked {number} at slot {}", vehicle.slot))
        }
        Ok(Reply::Rejected(error)) => Notice::danger(error.as_str()),
        Err(err) => Notice::failure(err),
    }
}

pub fn exit<E: Display>(outcome: &Result<Reply<ExitRecord>, E>) -> Notice {
    match outcome {
        Ok(Reply::Accepted(record)) => Notice::success(exit_text(record)),
        Ok(Reply::Rejected(error)) => Notice::danger(error.as_str()),
        Err(err) => Notice::failure(err),
    }
}

#[must_use]
pub fn exit_text(record: &ExitRecord) -> String {
    format!(
        "Vehicle {} exited from slot {}. Fee: ₹ {:.2}",
        record.vehicle_number, record.slot, record.fee
    )
}

pub fn status<E: Display>(outcome: &Result<StatusSummary, E>) -> Notice {
    match outcome {
        Ok(status) => Notice::info(status_text(status)),
        Err(err) => Notice::failure(err),
    }
}

#[must_use]
pub fn status_text(status: &StatusSummary) -> String {
    format!(
        "Occupied: {} | Free: {}",
        status.occupied_count, status.free_count
    )
}

pub fn revenue<E: Display>(outcome: &Result<Reply<RevenueSummary>, E>) -> Notice {
    match outcome {
        Ok(Reply::Accepted(summary)) => Notice::info(revenue_text(summary)),
        Ok(Reply::Rejected(error)) => Notice::danger(error.as_str()),
        Err(err) => Notice::failure(err),
    }
}

/// The revenue total is printed in its shortest form, so `40.0` reads as `40`.
#[must_use]
pub fn revenue_text(summary: &RevenueSummary) -> String {
    format!(
        "Date: {}\nVehicles: {}\nRevenue: ₹ {}",
        summary.date, summary.total_vehicles, summary.total_revenue
    )
}

#[cfg(test)]
mod tests {
    use shared::data::RevenueRecord;

    use super::*;
    use crate::error::Error;

    fn vehicle(slot: u32) -> ParkedVehicle {
        ParkedVehicle {
            number: "KA01AB1234".into(),
            vtype: "car".into(),
            entry_time: "2024-05-01T10:00:00".into(),
            slot,
            is_vip: false,
        }
    }

    fn record(fee: f64) -> ExitRecord {
        ExitRecord {
            vehicle_number: "KA01AB1234".into(),
            slot: 5,
            fee,
            vtype: "car".into(),
            entry: None,
            exit: None,
            charge_meta: None,
        }
    }

    #[test]
    fn accepted_entry_names_the_slot() {
        let outcome: Result<_, Error> = Ok(Reply::Accepted(vehicle(12)));
        assert_eq!(
            entry("KA01AB1234", &outcome),
            Notice::success("Parked KA01AB1234 at slot 12")
        );
    }

    #[test]
    fn rejected_entry_shows_server_text() {
        let outcome: Result<Reply<ParkedVehicle>, Error> = Ok(Reply::Rejected("Parking full".into()));
        assert_eq!(entry("X", &outcome), Notice::danger("Parking full"));
    }

    #[test]
    fn failures_collapse_to_generic_error() {
        let outcome: Result<Reply<ExitRecord>, Error> =
            Err(Error::ReportUnavailable("text/html".into()));
        assert_eq!(exit(&outcome), Notice::danger(GENERIC_ERROR));
    }

    #[test]
    fn failure_text_leaves_cause_to_the_log() {
        let notice = Notice::failure(&"connection refused");
        assert_eq!(notice, Notice::danger(GENERIC_ERROR));
        assert!(!notice.text.contains("connection refused"));
    }

    #[test]
    fn exit_fee_has_two_decimals() {
        let outcome: Result<_, Error> = Ok(Reply::Accepted(record(20.0)));
        assert_eq!(
            exit(&outcome).text,
            "Vehicle KA01AB1234 exited from slot 5. Fee: ₹ 20.00"
        );
        assert_eq!(exit_text(&record(7.5)), "Vehicle KA01AB1234 exited from slot 5. Fee: ₹ 7.50");
    }

    #[test]
    fn status_line_shows_counts() {
        let summary = StatusSummary {
            occupied_count: 3,
            free_count: 21,
            total_slots: 24,
            free_slots: Vec::new(),
            occupied: Vec::new(),
            vip_slots: Vec::new(),
        };
        let outcome: Result<_, Error> = Ok(summary);
        assert_eq!(status(&outcome), Notice::info("Occupied: 3 | Free: 21"));
    }

    #[test]
    fn revenue_total_uses_shortest_form() {
        let mut summary = RevenueSummary {
            date: "2024-05-01".into(),
            total_vehicles: 4,
            total_revenue: 40.0,
            records: vec![RevenueRecord {
                vehicle_number: "A".into(),
                vtype: "car".into(),
                entry: None,
                exit: None,
                slot: 1,
                fee: 0.0,
            }],
        };
        assert_eq!(
            revenue_text(&summary),
            "Date: 2024-05-01\nVehicles: 4\nRevenue: ₹ 40"
        );

        summary.total_revenue = 20.5;
        assert!(revenue_text(&summary).ends_with("₹ 20.5"));
    }

    #[test]
    fn rejected_revenue_shows_server_text() {
        let outcome: Result<Reply<RevenueSummary>, Error> =
            Ok(Reply::Rejected("Invalid date format".into()));
        assert_eq!(revenue(&outcome), Notice::danger("Invalid date format"));
    }
}
