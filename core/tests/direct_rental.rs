//! Direct QR rental path: skips the reserve step entirely.
//!
//! The status-write asymmetry is shipped behaviour: the direct path
//! writes in_use at the rideStarting transition and never writes
//! reserved, while the reserve path writes in_use only once riding.

use rentquad_core::clock::ManualClock;
use rentquad_core::config::FlowConfig;
use rentquad_core::engine::RentalEngine;
use rentquad_core::gateway::RecordingGateway;
use rentquad_core::types::{Phase, Vehicle, VehicleStatus};
use std::sync::Arc;

fn build() -> (RentalEngine, ManualClock, Arc<RecordingGateway>) {
    let clock = ManualClock::new();
    let gateway = Arc::new(RecordingGateway::new());
    let engine = RentalEngine::new(
        FlowConfig::default(),
        Box::new(clock.clone()),
        gateway.clone(),
    );
    (engine, clock, gateway)
}

fn advance(engine: &mut RentalEngine, clock: &ManualClock, ms: i64) {
    clock.advance_ms(ms);
    engine.poll();
}

fn quad() -> Vehicle {
    Vehicle {
        id: "q7".to_string(),
        title: "Quad 7".to_string(),
    }
}

#[test]
fn direct_jumps_to_scanning() {
    let (mut engine, _clock, _gateway) = build();

    engine.start_direct_rental(quad());

    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Scanning);
    assert_eq!(snap.logs.len(), 2);
    assert!(snap.flow_in_progress);
    assert_eq!(snap.active_vehicle.map(|v| v.id), Some("q7".to_string()));
}

#[test]
fn direct_writes_in_use_at_ride_starting() {
    let (mut engine, clock, gateway) = build();

    engine.start_direct_rental(quad());

    advance(&mut engine, &clock, 1100);
    assert_eq!(engine.phase(), Phase::RideStarting);
    assert_eq!(gateway.writes_for("q7", VehicleStatus::InUse), 1);

    advance(&mut engine, &clock, 1200);
    assert_eq!(engine.phase(), Phase::Riding);
    // No second write at the riding transition on this path.
    assert_eq!(gateway.writes_for("q7", VehicleStatus::InUse), 1);
}

#[test]
fn direct_never_writes_reserved() {
    let (mut engine, clock, gateway) = build();

    engine.start_direct_rental(quad());
    advance(&mut engine, &clock, 1100);
    advance(&mut engine, &clock, 1200);
    engine.end_ride();
    advance(&mut engine, &clock, 1500);
    advance(&mut engine, &clock, 3000);

    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(gateway.writes_for("q7", VehicleStatus::Reserved), 0);
    assert_eq!(gateway.writes_for("q7", VehicleStatus::Available), 1);
}

#[test]
fn direct_clears_previous_log() {
    let (mut engine, _clock, _gateway) = build();

    engine.begin_rental(Vehicle {
        id: "v1".to_string(),
        title: "Car A".to_string(),
    });
    assert_eq!(engine.snapshot().logs.len(), 2);

    engine.start_direct_rental(quad());
    let snap = engine.snapshot();
    assert_eq!(snap.logs.len(), 2);
    assert!(snap.logs[1].message.contains("QR rental started"));
}
