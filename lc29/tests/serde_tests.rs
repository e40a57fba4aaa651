#![cfg(feature = "serde")]

use lc29::{Constellations, DriverConfig, DriverState, FieldParsing};

#[test]
fn test_driver_state_json_round_trip() {
    let state = DriverState::default();
    let json = serde_json::to_string(&state).unwrap();
    let back: DriverState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, back);
}

#[test]
fn test_config_defaults_fill_missing_fields() {
    let config: DriverConfig = serde_json::from_str(r#"{"field_parsing":"Strict"}"#).unwrap();
    assert_eq!(
        config,
        DriverConfig::default().with_field_parsing(FieldParsing::Strict)
    );
    assert!(config.verify_checksum);
}

#[test]
fn test_constellations_serialize() {
    let json = serde_json::to_string(&(Constellations::GPS | Constellations::QZSS)).unwrap();
    let back: Constellations = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Constellations::GPS | Constellations::QZSS);
}
