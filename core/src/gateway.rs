//! Vehicle status gateway — the remote "set vehicle {id} status"
//! mutation endpoint.
//!
//! RULE: fire-and-forget. The engine logs a failed write and carries
//! on; the local phase is authoritative, the backend record is
//! best-effort synchronized. Implementations must not block the
//! caller for long (push to a queue or worker if the transport is
//! slow) and must never be retried by the engine.

use crate::types::VehicleStatus;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("status update rejected: {0}")]
    Rejected(String),

    #[error("status endpoint unreachable: {0}")]
    Unreachable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub trait VehicleStatusGateway: Send {
    fn set_status(&self, vehicle_id: &str, status: VehicleStatus) -> Result<(), GatewayError>;
}

/// Drops every update. Used when running fully offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGateway;

impl VehicleStatusGateway for NoopGateway {
    fn set_status(&self, vehicle_id: &str, status: VehicleStatus) -> Result<(), GatewayError> {
        log::debug!("dropping status write: {vehicle_id} -> {}", status.as_str());
        Ok(())
    }
}

/// Records every status write, optionally simulating an outage.
/// For tests and tooling only.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    writes: Mutex<Vec<(String, VehicleStatus)>>,
    failing: AtomicBool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// While failing, every write returns `Unreachable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<(String, VehicleStatus)> {
        self.writes
            .lock()
            .expect("gateway writes mutex poisoned")
            .clone()
    }

    /// Count of writes for one vehicle/status pair.
    pub fn writes_for(&self, vehicle_id: &str, status: VehicleStatus) -> usize {
        self.writes()
            .iter()
            .filter(|(id, s)| id == vehicle_id && *s == status)
            .count()
    }
}

impl VehicleStatusGateway for RecordingGateway {
    fn set_status(&self, vehicle_id: &str, status: VehicleStatus) -> Result<(), GatewayError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Unreachable("simulated outage".into()));
        }
        self.writes
            .lock()
            .expect("gateway writes mutex poisoned")
            .push((vehicle_id.to_string(), status));
        Ok(())
    }
}
