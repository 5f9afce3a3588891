//! Shared primitive types used across the rental flow.

use serde::{Deserialize, Serialize};

/// A stable, unique identifier for a fleet vehicle.
pub type VehicleId = String;

/// The single discrete state of the rental lifecycle.
///
/// Serialized names are the camelCase strings the mobile client
/// renders against ("rideStarting" etc.) — never rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    Selecting,
    Reserving,
    Reserved,
    Scanning,
    RideStarting,
    Riding,
    Finding,
    Ending,
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Selecting => "selecting",
            Self::Reserving => "reserving",
            Self::Reserved => "reserved",
            Self::Scanning => "scanning",
            Self::RideStarting => "rideStarting",
            Self::Riding => "riding",
            Self::Finding => "finding",
            Self::Ending => "ending",
            Self::Completed => "completed",
        }
    }
}

/// Vehicle status as persisted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Reserved,
    InUse,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::InUse => "in_use",
        }
    }
}

/// The vehicle currently bound to the in-progress rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub title: String,
}

/// Simulated ride statistics. Zeroed whenever a ride starts or the
/// engine resets; updated once per metrics tick while riding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideStats {
    pub duration_seconds: u64,
    pub distance_km: f64,
    pub estimated_cost: f64,
}

/// Derived projection of [`Phase`] into action-enablement flags.
/// Never stored — always recomputed from the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_start: bool,
    pub can_reserve: bool,
    pub can_scan: bool,
    pub can_find: bool,
    pub can_end: bool,
}

impl Capabilities {
    pub fn for_phase(phase: Phase) -> Self {
        use Phase::*;
        let mid_flow = matches!(phase, Reserved | Scanning | RideStarting | Riding | Finding);
        Self {
            can_start: matches!(phase, Idle | Completed),
            can_reserve: phase == Selecting,
            can_scan: phase == Reserved,
            can_find: mid_flow,
            can_end: mid_flow,
        }
    }
}
