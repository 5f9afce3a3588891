//! Display-title fallback chain for fleet vehicle records.

use rentquad_core::vehicle::VehicleRecord;

fn record(name: &str, model: &str, code: &str, id: &str) -> VehicleRecord {
    let opt = |s: &str| {
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    };
    VehicleRecord {
        id: id.to_string(),
        display_name: opt(name),
        model: opt(model),
        code: opt(code),
        status: None,
    }
}

#[test]
fn name_annotated_with_code() {
    assert_eq!(record("Scout", "TRX-250", "Q-04", "9").title(), "Scout (Q-04)");
}

#[test]
fn name_equal_to_code_is_not_annotated() {
    assert_eq!(record("Q-04", "TRX-250", "q-04", "9").title(), "Q-04");
}

#[test]
fn name_matching_model_is_generic() {
    // A display name equal to the model carries no information; the
    // fleet code wins.
    assert_eq!(record("trx-250", "TRX-250", "Q-04", "9").title(), "Q-04");
    assert_eq!(record("trx-250", "TRX-250", "", "9").title(), "TRX-250");
}

#[test]
fn falls_back_to_code_then_model_then_id() {
    assert_eq!(record("", "", "Q-04", "9").title(), "Q-04");
    assert_eq!(record("", "TRX-250", "", "9").title(), "TRX-250");
    assert_eq!(record("", "", "", "9").title(), "Vehicle #9");
    assert_eq!(record("", "", "", "").title(), "Vehicle");
}

#[test]
fn whitespace_only_fields_are_empty() {
    assert_eq!(record("   ", "", "", "9").title(), "Vehicle #9");
}

#[test]
fn to_active_binds_id_and_title() {
    let active = record("Scout", "", "Q-04", "9").to_active();
    assert_eq!(active.id, "9");
    assert_eq!(active.title, "Scout (Q-04)");
}
