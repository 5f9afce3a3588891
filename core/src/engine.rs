//! The rental lifecycle engine — the heart of the RentQuad client.
//!
//! PHASE GRAPH (trigger → delayed transition):
//!   idle/completed ─beginRental→ selecting ─reserveVehicle→ reserving
//!     ~1300ms→ reserved ─scanVehicle→ scanning ~1100ms→ rideStarting
//!     ~1200ms→ riding ─endRide→ ending ~1500ms→ completed ~3000ms→ idle
//!   findVehicle detours any mid-flow phase through finding and
//!   collapses back to reserved or riding after ~1000ms.
//!
//! RULES:
//!   - Operations mutate now and schedule future mutations; nothing
//!     blocks the caller.
//!   - Guards are permissive: the UI gates actions through the
//!     Capabilities projection, the engine only requires an active
//!     vehicle. See DESIGN.md for the stricter variant discussion.
//!   - Gateway writes never gate a transition. Failures are logged.
//!   - reset_flow() drops every pending timer before touching state,
//!     so a cancelled transition can never fire afterwards.

use crate::clock::Clock;
use crate::config::FlowConfig;
use crate::event::{EventLog, LogSource};
use crate::gateway::VehicleStatusGateway;
use crate::metrics;
use crate::snapshot::RentalSnapshot;
use crate::timer::{TimerAction, TimerId, TimerSet};
use crate::types::{Capabilities, Phase, RideStats, Vehicle, VehicleStatus};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct RentalEngine {
    config: FlowConfig,
    clock: Box<dyn Clock>,
    gateway: Arc<dyn VehicleStatusGateway>,
    phase: Phase,
    active_vehicle: Option<Vehicle>,
    log: EventLog,
    stats: RideStats,
    timers: TimerSet,
    phase_before_find: Phase,
    ride_started_at: Option<DateTime<Utc>>,
    gps_timer: Option<TimerId>,
    metrics_timer: Option<TimerId>,
}

impl RentalEngine {
    pub fn new(config: FlowConfig, clock: Box<dyn Clock>, gateway: Arc<dyn VehicleStatusGateway>) -> Self {
        let log = EventLog::new(config.log_limit);
        Self {
            config,
            clock,
            gateway,
            phase: Phase::Idle,
            active_vehicle: None,
            log,
            stats: RideStats::default(),
            timers: TimerSet::new(),
            phase_before_find: Phase::Idle,
            ride_started_at: None,
            gps_timer: None,
            metrics_timer: None,
        }
    }

    // ── Snapshot reads ───────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flow_in_progress(&self) -> bool {
        self.active_vehicle.is_some() && !matches!(self.phase, Phase::Idle | Phase::Completed)
    }

    /// Pending timers of any kind. Zero after reset_flow().
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Pending one-shot phase transitions. Repeating GPS/metrics
    /// ticks are excluded, so this reaches zero once a flow settles.
    pub fn pending_transitions(&self) -> usize {
        self.timers.pending_one_shots()
    }

    pub fn snapshot(&self) -> RentalSnapshot {
        RentalSnapshot {
            phase: self.phase,
            active_vehicle: self.active_vehicle.clone(),
            logs: self.log.to_vec(),
            ride_stats: self.stats,
            flow_in_progress: self.flow_in_progress(),
            capabilities: Capabilities::for_phase(self.phase),
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Start the reserve-first rental flow for `vehicle`.
    pub fn begin_rental(&mut self, vehicle: Vehicle) {
        let now = self.clock.now();
        self.drop_all_timers();
        self.active_vehicle = Some(vehicle);
        self.set_phase(Phase::Selecting);
        self.log.clear();
        let title = self.active_title();
        self.push_log(now, LogSource::Client, format!("Rental flow started for {title}."));
        self.push_log(
            now,
            LogSource::Server,
            "GPS module active: vehicle location will be tracked.",
        );
        self.reset_stats();
    }

    /// QR entry path: skips the reserve step and jumps straight to
    /// scanning. Unlike the reserve path, the in_use status write
    /// happens at the rideStarting transition, and no reserved write
    /// is ever issued. The asymmetry is shipped behaviour; see
    /// DESIGN.md.
    pub fn start_direct_rental(&mut self, vehicle: Vehicle) {
        let now = self.clock.now();
        self.drop_all_timers();
        self.active_vehicle = Some(vehicle);
        self.log.clear();
        let title = self.active_title();
        self.push_log(now, LogSource::Client, format!("QR rental started for {title}."));
        self.set_phase(Phase::Scanning);
        self.push_log(now, LogSource::Client, "QR scanned, ride start request sent.");
        self.timers.schedule_once(
            now,
            self.config.timing.scan_confirm_ms,
            TimerAction::AcceptScan { direct: true },
        );
    }

    pub fn reserve_vehicle(&mut self) {
        if self.active_vehicle.is_none() {
            return;
        }
        let now = self.clock.now();
        self.set_phase(Phase::Reserving);
        self.push_log(now, LogSource::Client, "Reservation request sent.");
        self.timers.schedule_once(
            now,
            self.config.timing.reserve_confirm_ms,
            TimerAction::ConfirmReservation,
        );
    }

    pub fn scan_vehicle(&mut self) {
        if self.active_vehicle.is_none() {
            return;
        }
        let now = self.clock.now();
        self.set_phase(Phase::Scanning);
        self.push_log(now, LogSource::Client, "QR scanned, ride start request sent.");
        self.timers.schedule_once(
            now,
            self.config.timing.scan_confirm_ms,
            TimerAction::AcceptScan { direct: false },
        );
    }

    /// Trigger the vehicle's horn/indicators to locate it. Resolves
    /// back to reserved only if invoked from reserved; every other
    /// prior phase collapses to riding.
    pub fn find_vehicle(&mut self) {
        if self.active_vehicle.is_none() {
            return;
        }
        let now = self.clock.now();
        self.phase_before_find = self.phase;
        self.push_log(now, LogSource::Client, "Find request sent.");
        self.set_phase(Phase::Finding);
        self.timers
            .schedule_once(now, self.config.timing.find_resolve_ms, TimerAction::ResolveFind);
    }

    pub fn end_ride(&mut self) {
        if self.active_vehicle.is_none() {
            return;
        }
        let now = self.clock.now();
        self.set_phase(Phase::Ending);
        self.push_log(now, LogSource::Client, "Ride end request sent.");
        self.timers
            .schedule_once(now, self.config.timing.end_confirm_ms, TimerAction::CompleteRide);
    }

    /// Escape hatch from any state: cancel every pending timer, stop
    /// GPS and metrics, clear the log and the active vehicle, return
    /// to idle. Also the teardown path on unmount.
    pub fn reset_flow(&mut self) {
        self.drop_all_timers();
        self.ride_started_at = None;
        self.set_phase(Phase::Idle);
        self.active_vehicle = None;
        self.log.clear();
        self.reset_stats();
    }

    /// Fire every timer whose deadline has passed. Call this from the
    /// host's run loop; each operation above only schedules.
    pub fn poll(&mut self) {
        let now = self.clock.now();
        for action in self.timers.due(now) {
            self.apply(now, action);
        }
    }

    // ── Timer firings ────────────────────────────────────────────────

    fn apply(&mut self, now: DateTime<Utc>, action: TimerAction) {
        match action {
            TimerAction::ConfirmReservation => {
                self.push_log(now, LogSource::Server, "Reserve module: vehicle set aside.");
                self.push_log(now, LogSource::Vehicle, "Reservation acknowledged (lights off).");
                self.set_phase(Phase::Reserved);
                self.push_status(VehicleStatus::Reserved);
            }
            TimerAction::AcceptScan { direct } => {
                self.push_log(now, LogSource::Server, "Start ride module processing request.");
                self.push_log(
                    now,
                    LogSource::Vehicle,
                    "Vehicle unlocked, lights flashed and horn sounded.",
                );
                self.set_phase(Phase::RideStarting);
                if direct {
                    self.push_status(VehicleStatus::InUse);
                }
                self.timers.schedule_once(
                    now,
                    self.config.timing.ride_start_ms,
                    TimerAction::StartRide { direct },
                );
            }
            TimerAction::StartRide { direct } => {
                self.set_phase(Phase::Riding);
                self.push_log(now, LogSource::Vehicle, "Ride started, GPS data streaming.");
                if !direct {
                    self.push_status(VehicleStatus::InUse);
                }
                self.start_gps(now);
                if self.metrics_timer.is_none() {
                    self.start_metrics(now);
                }
            }
            TimerAction::ResolveFind => {
                self.push_log(now, LogSource::Server, "Find module: vehicle signals triggered.");
                self.push_log(now, LogSource::Vehicle, "Horn and indicators flashed briefly.");
                // Deliberate collapse: only a reserved detour restores
                // reserved, everything else resumes riding.
                let resumed = if self.phase_before_find == Phase::Reserved {
                    Phase::Reserved
                } else {
                    Phase::Riding
                };
                self.set_phase(resumed);
            }
            TimerAction::CompleteRide => {
                self.push_log(now, LogSource::Server, "End ride module: lock confirmed.");
                self.push_log(now, LogSource::Vehicle, "Vehicle locked, lights off.");
                self.push_log(now, LogSource::Server, "Payment module: charge completed.");
                self.stop_gps();
                self.stop_metrics();
                self.set_phase(Phase::Completed);
                self.push_status(VehicleStatus::Available);
                self.timers
                    .schedule_once(now, self.config.timing.return_home_ms, TimerAction::ReturnHome);
            }
            TimerAction::ReturnHome => {
                self.push_log(now, LogSource::Client, "Returned to home screen.");
                self.set_phase(Phase::Idle);
                self.active_vehicle = None;
                self.reset_stats();
            }
            TimerAction::GpsPing => {
                self.push_log(now, LogSource::Vehicle, "GPS data sent.");
            }
            TimerAction::MetricsTick => {
                if let Some(started_at) = self.ride_started_at {
                    let elapsed = (now - started_at).num_seconds().max(0) as u64;
                    self.stats = metrics::stats_at(&self.config.metrics, elapsed);
                }
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
    }

    fn push_log(&mut self, now: DateTime<Utc>, source: LogSource, message: impl Into<String>) {
        self.log.push(now, source, message);
    }

    /// Best-effort status write. A failure is a warning, never a
    /// rollback.
    fn push_status(&mut self, status: VehicleStatus) {
        let Some(vehicle) = &self.active_vehicle else {
            return;
        };
        if let Err(err) = self.gateway.set_status(&vehicle.id, status) {
            log::warn!(
                "vehicle status update failed ({} -> {}): {err}",
                vehicle.id,
                status.as_str()
            );
        }
    }

    fn start_gps(&mut self, now: DateTime<Utc>) {
        self.stop_gps();
        self.gps_timer = Some(self.timers.schedule_repeating(
            now,
            self.config.timing.gps_ping_interval_ms,
            TimerAction::GpsPing,
        ));
    }

    fn stop_gps(&mut self) {
        if let Some(id) = self.gps_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn start_metrics(&mut self, now: DateTime<Utc>) {
        self.stop_metrics();
        self.reset_stats();
        self.ride_started_at = Some(now);
        self.metrics_timer = Some(self.timers.schedule_repeating(
            now,
            self.config.timing.metrics_tick_ms,
            TimerAction::MetricsTick,
        ));
    }

    fn stop_metrics(&mut self) {
        if let Some(id) = self.metrics_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn reset_stats(&mut self) {
        self.stats = RideStats::default();
    }

    fn drop_all_timers(&mut self) {
        self.timers.clear();
        self.gps_timer = None;
        self.metrics_timer = None;
    }

    fn active_title(&self) -> String {
        self.active_vehicle
            .as_ref()
            .map(|v| v.title.clone())
            .unwrap_or_default()
    }
}
