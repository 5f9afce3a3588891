//! Fleet vehicle records as returned by the backend, and the display
//! title rules the screens share.

use crate::types::{Vehicle, VehicleStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status: Option<VehicleStatus>,
}

impl VehicleRecord {
    /// Display title for lists and log messages.
    ///
    /// Prefers a non-generic display name (a name equal to the model
    /// is treated as generic), annotated with the fleet code when
    /// both exist and differ. Falls back to code, then model, then
    /// `Vehicle #<id>`.
    pub fn title(&self) -> String {
        let name = self.display_name.as_deref().unwrap_or("").trim();
        let model = self.model.as_deref().unwrap_or("").trim();
        let code = self.code.as_deref().unwrap_or("").trim();

        let generic_name =
            name.is_empty() || (!model.is_empty() && name.eq_ignore_ascii_case(model));
        let usable_name = if generic_name { "" } else { name };

        if !usable_name.is_empty() && !code.is_empty() && !usable_name.eq_ignore_ascii_case(code) {
            return format!("{usable_name} ({code})");
        }
        if !usable_name.is_empty() {
            return usable_name.to_string();
        }
        if !code.is_empty() {
            return code.to_string();
        }
        if !model.is_empty() {
            return model.to_string();
        }
        if self.id.is_empty() {
            "Vehicle".to_string()
        } else {
            format!("Vehicle #{}", self.id)
        }
    }

    /// The active-vehicle shape the engine binds to.
    pub fn to_active(&self) -> Vehicle {
        Vehicle {
            id: self.id.clone(),
            title: self.title(),
        }
    }
}
