use super::*;

fn token_for(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

// =============================================================
// Subject normalization
// =============================================================

#[test]
fn numeric_subject_normalizes_to_decimal_string() {
    let token = token_for(&serde_json::json!({ "sub": 42 }));
    let claims = decode(&token).unwrap();
    assert_eq!(claims.subject(), Some("42".to_owned()));
}

#[test]
fn string_subject_passes_through() {
    let token = token_for(&serde_json::json!({ "sub": "42" }));
    let claims = decode(&token).unwrap();
    assert_eq!(claims.subject(), Some("42".to_owned()));
}

#[test]
fn numeric_and_string_subjects_compare_equal_after_normalization() {
    let numeric = decode(&token_for(&serde_json::json!({ "sub": 1007 }))).unwrap();
    let stringy = decode(&token_for(&serde_json::json!({ "sub": "1007" }))).unwrap();
    assert_eq!(numeric.subject(), stringy.subject());
}

#[test]
fn large_numeric_subject_keeps_full_precision() {
    let token = token_for(&serde_json::json!({ "sub": 9_007_199_254_740_993_u64 }));
    let claims = decode(&token).unwrap();
    assert_eq!(claims.subject(), Some("9007199254740993".to_owned()));
}

#[test]
fn missing_subject_is_none() {
    let token = token_for(&serde_json::json!({ "exp": 1_999_999_999 }));
    assert_eq!(decode(&token).unwrap().subject(), None);
}

#[test]
fn null_subject_is_none() {
    let token = token_for(&serde_json::json!({ "sub": null }));
    assert_eq!(decode(&token).unwrap().subject(), None);
}

// =============================================================
// Other claims
// =============================================================

#[test]
fn arbitrary_claims_are_retained() {
    let token = token_for(&serde_json::json!({ "sub": "7", "exp": 123, "role": "user" }));
    let claims = decode(&token).unwrap();
    assert_eq!(claims.get("exp"), Some(&serde_json::json!(123)));
    assert_eq!(claims.get("role"), Some(&serde_json::json!("user")));
    assert_eq!(claims.get("aud"), None);
}

// =============================================================
// Failure set
// =============================================================

#[test]
fn two_segments_rejected() {
    let err = decode("header.payload").unwrap_err();
    assert!(matches!(err, DecodeError::SegmentCount(2)));
}

#[test]
fn four_segments_rejected() {
    let err = decode("a.b.c.d").unwrap_err();
    assert!(matches!(err, DecodeError::SegmentCount(4)));
}

#[test]
fn empty_string_rejected() {
    let err = decode("").unwrap_err();
    assert!(matches!(err, DecodeError::SegmentCount(1)));
}

#[test]
fn invalid_base64_payload_rejected() {
    let err = decode("header.%%not-base64%%.signature").unwrap_err();
    assert!(matches!(err, DecodeError::Base64(_)));
}

#[test]
fn non_json_payload_rejected() {
    let payload = URL_SAFE_NO_PAD.encode(b"hello world");
    let err = decode(&format!("header.{payload}.signature")).unwrap_err();
    assert!(matches!(err, DecodeError::Payload(_)));
}

#[test]
fn non_object_json_payload_rejected() {
    let payload = URL_SAFE_NO_PAD.encode(b"42");
    let err = decode(&format!("header.{payload}.signature")).unwrap_err();
    assert!(matches!(err, DecodeError::Payload(_)));
}

// =============================================================
// Base64 alphabet tolerance
// =============================================================

#[test]
fn standard_padded_base64_payload_accepted() {
    // Some issuers emit the standard alphabet with padding.
    let body = STANDARD.encode(br#"{"sub":"abc"}"#);
    assert!(body.ends_with('='), "fixture should exercise padding");
    let claims = decode(&format!("header.{body}.signature")).unwrap();
    assert_eq!(claims.subject(), Some("abc".to_owned()));
}
