use super::*;
use rstest::rstest;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = OrganizationId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = CreditTransferId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_uuid_conversions() {
    let uuid = Uuid::new_v4();
    let id: SalesSubmissionId = uuid.into();
    let back: Uuid = id.into();
    assert_eq!(back, uuid);
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = VehicleId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = OrganizationId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[rstest]
#[case::word("invalid")]
#[case::empty("")]
#[case::truncated("0190a1b2-c3d4-7e5f")]
#[case::bad_hex("0190a1b2-c3d4-7e5f-8a6b-zzzzzzzzzzzz")]
fn test_typed_id_from_str_error(#[case] input: &str) {
    assert!(DeficitId::from_str(input).is_err());
}

#[rstest]
#[case::hyphenated("0190a1b2-c3d4-7e5f-8a6b-1c2d3e4f5a6b")]
#[case::simple("0190a1b2c3d47e5f8a6b1c2d3e4f5a6b")]
#[case::uppercase("0190A1B2-C3D4-7E5F-8A6B-1C2D3E4F5A6B")]
fn test_typed_id_from_str_formats(#[case] input: &str) {
    let id = OrganizationId::from_str(input).unwrap();
    assert_eq!(id.into_inner(), Uuid::parse_str(input).unwrap());
}

