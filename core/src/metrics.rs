//! Ride metrics simulator — derives duration, synthetic distance and
//! an estimated cost from elapsed ride time.
//!
//! Deterministic placeholder for a live telemetry feed; this module
//! is the seam where a real GPS/telemetry stream would attach. The
//! formulas are load-bearing: tests and the shipped client agree on
//! them to the cent.

use crate::config::MetricsConfig;
use crate::types::RideStats;

/// Round to 2 decimals, the precision the tariff is quoted at.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Stats for a ride that has been running for `elapsed_seconds`.
///
/// Cost is rounded before the minimum-fare floor is applied, matching
/// the shipped client.
pub fn stats_at(config: &MetricsConfig, elapsed_seconds: u64) -> RideStats {
    let distance_km = round2(elapsed_seconds as f64 * config.distance_km_per_second);
    let estimated_cost =
        round2(distance_km * config.cost_per_km + config.minimum_fare).max(config.minimum_fare);
    RideStats {
        duration_seconds: elapsed_seconds,
        distance_km,
        estimated_cost,
    }
}
