//! Flow timing and tariff knobs.
//!
//! Defaults reproduce the shipped client behaviour exactly — tests
//! depend on these numbers. Override via deserialized config only
//! when simulating different backends.

use serde::{Deserialize, Serialize};

/// Delays for every timed phase transition, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowTiming {
    /// reserving → reserved
    pub reserve_confirm_ms: i64,
    /// scanning → rideStarting
    pub scan_confirm_ms: i64,
    /// rideStarting → riding
    pub ride_start_ms: i64,
    /// finding → prior phase
    pub find_resolve_ms: i64,
    /// ending → completed
    pub end_confirm_ms: i64,
    /// completed → idle
    pub return_home_ms: i64,
    /// repeating GPS ping while riding
    pub gps_ping_interval_ms: i64,
    /// repeating ride stats recompute
    pub metrics_tick_ms: i64,
}

impl Default for FlowTiming {
    fn default() -> Self {
        Self {
            reserve_confirm_ms: 1300,
            scan_confirm_ms: 1100,
            ride_start_ms: 1200,
            find_resolve_ms: 1000,
            end_confirm_ms: 1500,
            return_home_ms: 3000,
            gps_ping_interval_ms: 4500,
            metrics_tick_ms: 1000,
        }
    }
}

/// Synthetic telemetry tariff. Stands in for a live pricing feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub distance_km_per_second: f64,
    pub cost_per_km: f64,
    pub minimum_fare: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            distance_km_per_second: 0.012,
            cost_per_km: 4.2,
            minimum_fare: 29.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub timing: FlowTiming,
    pub metrics: MetricsConfig,
    /// Progress log cap; oldest entries drop past this.
    pub log_limit: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            timing: FlowTiming::default(),
            metrics: MetricsConfig::default(),
            log_limit: 40,
        }
    }
}
