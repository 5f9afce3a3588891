//! Point-in-time view of the engine handed to the caller on every
//! read. Field names serialize to the camelCase contract the mobile
//! screens consume.

use crate::event::LogEntry;
use crate::types::{Capabilities, Phase, RideStats, Vehicle};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalSnapshot {
    pub phase: Phase,
    pub active_vehicle: Option<Vehicle>,
    /// Newest first, capped at the configured log limit.
    pub logs: Vec<LogEntry>,
    pub ride_stats: RideStats,
    /// True iff a vehicle is bound and the phase is anything but
    /// idle/completed.
    pub flow_in_progress: bool,
    pub capabilities: Capabilities,
}
