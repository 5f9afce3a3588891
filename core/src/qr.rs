//! QR payload format shared by the scanner screen and the batch code
//! generators.
//!
//! A scanned code is valid iff it is an ASCII string of the exact
//! form `RENTQUAD_VEHICLE:<vehicleId>`. Anything else is rejected at
//! the UI boundary before the engine is involved.

pub const QR_PREFIX: &str = "RENTQUAD_VEHICLE:";

/// Payload printed on a vehicle's QR sticker.
pub fn encode(vehicle_id: &str) -> String {
    format!("{QR_PREFIX}{vehicle_id}")
}

/// Extract the vehicle id from a scanned payload, or `None` if the
/// payload is not a valid RentQuad code.
pub fn decode(payload: &str) -> Option<&str> {
    if !payload.is_ascii() {
        return None;
    }
    let vehicle_id = payload.strip_prefix(QR_PREFIX)?;
    if vehicle_id.is_empty() {
        return None;
    }
    Some(vehicle_id)
}
