//! Reserve-first rental path: begin → reserve → scan → ride → end,
//! with every timed transition and gateway write checked.

use rentquad_core::clock::ManualClock;
use rentquad_core::config::FlowConfig;
use rentquad_core::engine::RentalEngine;
use rentquad_core::event::LogSource;
use rentquad_core::gateway::RecordingGateway;
use rentquad_core::types::{Phase, Vehicle, VehicleStatus};
use std::sync::Arc;

fn build() -> (RentalEngine, ManualClock, Arc<RecordingGateway>) {
    let _ = env_logger::builder().is_test(true).try_init();
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

fn car_a() -> Vehicle {
    Vehicle {
        id: "v1".to_string(),
        title: "Car A".to_string(),
    }
}

#[test]
fn begin_sets_selecting_with_two_logs() {
    let (mut engine, _clock, _gateway) = build();

    engine.begin_rental(car_a());

    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Selecting);
    assert_eq!(snap.active_vehicle.as_ref().map(|v| v.id.as_str()), Some("v1"));
    assert_eq!(snap.logs.len(), 2);
    assert!(snap.flow_in_progress);
    assert!(snap.capabilities.can_reserve);
    // Newest first: the server GPS line was appended last.
    assert_eq!(snap.logs[0].source, LogSource::Server);
    assert!(snap.logs[1].message.contains("Car A"));
}

#[test]
fn reserve_confirms_after_delay() {
    let (mut engine, clock, gateway) = build();

    engine.begin_rental(car_a());
    engine.reserve_vehicle();
    assert_eq!(engine.phase(), Phase::Reserving);

    advance(&mut engine, &clock, 1299);
    assert_eq!(engine.phase(), Phase::Reserving);
    assert!(gateway.writes().is_empty());

    advance(&mut engine, &clock, 1);
    assert_eq!(engine.phase(), Phase::Reserved);
    assert_eq!(gateway.writes_for("v1", VehicleStatus::Reserved), 1);

    // begin (2) + reserve request (1) + confirmation pair (2)
    assert_eq!(engine.snapshot().logs.len(), 5);
}

#[test]
fn full_reserve_path_reaches_riding() {
    let (mut engine, clock, gateway) = build();

    engine.begin_rental(car_a());
    engine.reserve_vehicle();
    advance(&mut engine, &clock, 1300);

    engine.scan_vehicle();
    assert_eq!(engine.phase(), Phase::Scanning);

    advance(&mut engine, &clock, 1100);
    assert_eq!(engine.phase(), Phase::RideStarting);
    // Reserve path only writes in_use once the ride actually starts.
    assert_eq!(gateway.writes_for("v1", VehicleStatus::InUse), 0);

    advance(&mut engine, &clock, 1200);
    assert_eq!(engine.phase(), Phase::Riding);
    assert_eq!(gateway.writes_for("v1", VehicleStatus::InUse), 1);
    assert_eq!(gateway.writes_for("v1", VehicleStatus::Reserved), 1);
}

#[test]
fn end_from_reserved_completes_and_returns_home() {
    let (mut engine, clock, gateway) = build();

    engine.begin_rental(car_a());
    engine.reserve_vehicle();
    advance(&mut engine, &clock, 1300);

    engine.end_ride();
    assert_eq!(engine.phase(), Phase::Ending);

    advance(&mut engine, &clock, 1500);
    assert_eq!(engine.phase(), Phase::Completed);
    assert_eq!(gateway.writes_for("v1", VehicleStatus::Available), 1);
    // Vehicle stays bound until the return-home timer fires.
    assert!(engine.snapshot().active_vehicle.is_some());
    assert!(!engine.flow_in_progress());

    advance(&mut engine, &clock, 3000);
    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Idle);
    assert!(snap.active_vehicle.is_none());
    assert_eq!(snap.logs[0].message, "Returned to home screen.");
}

#[test]
fn begin_restarts_a_completed_flow() {
    let (mut engine, clock, _gateway) = build();

    engine.begin_rental(car_a());
    engine.reserve_vehicle();
    advance(&mut engine, &clock, 1300);
    engine.end_ride();
    advance(&mut engine, &clock, 1500);
    assert_eq!(engine.phase(), Phase::Completed);

    // Starting again from completed cancels the pending return-home
    // timer and opens a fresh flow.
    engine.begin_rental(Vehicle {
        id: "v2".to_string(),
        title: "Car B".to_string(),
    });
    assert_eq!(engine.phase(), Phase::Selecting);
    assert_eq!(engine.snapshot().logs.len(), 2);

    advance(&mut engine, &clock, 3000);
    assert_eq!(engine.phase(), Phase::Selecting);
    assert_eq!(
        engine.snapshot().active_vehicle.map(|v| v.id),
        Some("v2".to_string())
    );
}
