//! Tests for decoder module

use super::*;
use crate::types::{DocumentFormat, ValueType};
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Wire Decoder Tests
// ============================================================================

#[test_case(json!({"integerValue": "42"}), ValueType::Number ; "integer")]
#[test_case(json!({"doubleValue": 3.5}), ValueType::Number ; "double")]
#[test_case(json!({"bytesValue": "AAE="}), ValueType::Number ; "bytes count as number")]
#[test_case(json!({"stringValue": "abc"}), ValueType::String ; "string")]
#[test_case(json!({"booleanValue": true}), ValueType::Boolean ; "boolean")]
#[test_case(json!({"arrayValue": {"values": []}}), ValueType::Array ; "array")]
#[test_case(json!({"timestampValue": "2024-01-15T10:30:00Z"}), ValueType::Timestamp ; "timestamp")]
#[test_case(json!({"geoPointValue": {"latitude": 1.0, "longitude": 2.0}}), ValueType::Geopoint ; "geopoint")]
#[test_case(json!({"referenceValue": "projects/p/databases/(default)/documents/users/a"}), ValueType::Reference ; "reference")]
#[test_case(json!({"mapValue": {"fields": {}}}), ValueType::Map ; "map")]
#[test_case(json!({"nullValue": null}), ValueType::Null ; "null envelope")]
fn test_wire_classify(value: serde_json::Value, expected: ValueType) {
    assert_eq!(WireDecoder::new().classify(&value), expected);
}

#[test]
fn test_wire_classify_falsy_payloads() {
    let decoder = WireDecoder::new();
    assert_eq!(
        decoder.classify(&json!({"booleanValue": false})),
        ValueType::Boolean
    );
    assert_eq!(decoder.classify(&json!({"doubleValue": 0.0})), ValueType::Number);
    assert_eq!(decoder.classify(&json!({"stringValue": ""})), ValueType::String);
}

#[test]
fn test_wire_classify_unrecognized() {
    let decoder = WireDecoder::new();
    assert_eq!(decoder.classify(&json!({})), ValueType::Null);
    assert_eq!(decoder.classify(&json!({"weirdValue": 1})), ValueType::Null);
    assert_eq!(decoder.classify(&json!({"stringValue": null})), ValueType::Null);
    assert_eq!(decoder.classify(&json!("plain")), ValueType::Null);
    assert_eq!(decoder.classify(&json!(null)), ValueType::Null);
}

#[test]
fn test_wire_classify_precedence() {
    // Numeric envelopes win over everything else present
    let value = json!({"stringValue": "x", "integerValue": "1"});
    assert_eq!(WireDecoder::new().classify(&value), ValueType::Number);

    let value = json!({"mapValue": {}, "arrayValue": {}});
    assert_eq!(WireDecoder::new().classify(&value), ValueType::Array);
}

#[test]
fn test_wire_map_entries() {
    let value = json!({
        "mapValue": {
            "fields": {
                "city": {"stringValue": "Berlin"},
                "zip": {"integerValue": "10115"}
            }
        }
    });

    let decoder = WireDecoder::new();
    let keys: Vec<&str> = decoder.map_entries(&value).map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["city", "zip"]);
}

#[test]
fn test_wire_empty_containers() {
    let decoder = WireDecoder::new();
    assert_eq!(decoder.map_entries(&json!({"mapValue": {}})).count(), 0);
    assert!(decoder.array_elements(&json!({"arrayValue": {}})).is_empty());
    assert!(decoder.array_elements(&json!({"stringValue": "x"})).is_empty());
}

#[test]
fn test_wire_array_elements() {
    let value = json!({"arrayValue": {"values": [{"stringValue": "a"}, {"integerValue": "2"}]}});
    let elements = WireDecoder::new().array_elements(&value);
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0]["stringValue"], "a");
}

#[test]
fn test_wire_document_fields() {
    let document = json!({
        "name": "projects/p/databases/(default)/documents/users/alice",
        "fields": {"name": {"stringValue": "Alice"}}
    });
    let decoder = WireDecoder::new();
    assert_eq!(decoder.document_fields(&document).count(), 1);
    assert_eq!(decoder.document_fields(&json!({"name": "x"})).count(), 0);
    assert_eq!(decoder.format(), DocumentFormat::Wire);
}

// ============================================================================
// Native Decoder Tests
// ============================================================================

#[test]
fn test_native_classify() {
    let decoder = NativeDecoder::new();
    assert_eq!(decoder.classify(&NativeValue::from(42_i64)), ValueType::Number);
    assert_eq!(decoder.classify(&NativeValue::from(4.2)), ValueType::Number);
    assert_eq!(decoder.classify(&NativeValue::from("x")), ValueType::String);
    assert_eq!(decoder.classify(&NativeValue::from(false)), ValueType::Boolean);
    assert_eq!(
        decoder.classify(&NativeValue::from(vec!["a", "b"])),
        ValueType::Array
    );
    assert_eq!(
        decoder.classify(&NativeValue::GeoPoint(GeoPoint {
            latitude: 0.0,
            longitude: 0.0
        })),
        ValueType::Geopoint
    );
    assert_eq!(
        decoder.classify(&NativeValue::Reference(DocumentReference::new("users/a"))),
        ValueType::Reference
    );
    assert_eq!(
        decoder.classify(&NativeValue::map([("a", NativeValue::Null)])),
        ValueType::Map
    );
    assert_eq!(decoder.classify(&NativeValue::Null), ValueType::Null);
    assert_eq!(decoder.format(), DocumentFormat::Native);
}

#[test]
fn test_native_from_json_wrappers() {
    let value = NativeValue::from(json!({
        "created": {"_seconds": 1_700_000_000, "_nanoseconds": 500},
        "location": {"_latitude": 52.52, "_longitude": 13.40},
        "owner": {"_path": {"segments": ["users", "alice"]}},
        "meta": {"_seconds": "not a number"}
    }));

    let map = value.as_map().unwrap();
    assert!(matches!(map["created"], NativeValue::Timestamp(_)));
    assert_eq!(
        map["location"],
        NativeValue::GeoPoint(GeoPoint {
            latitude: 52.52,
            longitude: 13.40
        })
    );
    assert_eq!(
        map["owner"],
        NativeValue::Reference(DocumentReference::new("users/alice"))
    );
    assert!(matches!(map["meta"], NativeValue::Map(_)));
}

#[test]
fn test_native_wrapper_shapes_need_exact_keys() {
    let value = NativeValue::from(json!({
        "place": {"label": "HQ", "_latitude": 51.5, "_longitude": -0.1},
        "when": {"_seconds": 1, "_nanoseconds": 0, "zone": "UTC"},
        "link": {"_path": {"segments": ["users", "a"]}, "note": "x"},
        "sdk_ref": {
            "_firestore": {"projectId": "demo"},
            "_path": {"segments": ["users", "a"]},
            "_converter": {}
        }
    }));

    let map = value.as_map().unwrap();
    let place = map["place"].as_map().unwrap();
    assert_eq!(place.len(), 3);
    assert!(matches!(map["when"], NativeValue::Map(_)));
    assert!(matches!(map["link"], NativeValue::Map(_)));
    assert_eq!(
        map["sdk_ref"],
        NativeValue::Reference(DocumentReference::new("users/a"))
    );
}

#[test]
fn test_native_document_root_stays_map() {
    let decoder = NativeDecoder::new();
    let shapes = [
        json!({"_latitude": 51.5, "_longitude": -0.1}),
        json!({"_seconds": 1_700_000_000, "_nanoseconds": 0}),
        json!({"_path": {"segments": ["users", "a"]}}),
    ];

    for shape in &shapes {
        let document = NativeValue::from_document(shape);
        assert_eq!(decoder.classify(&document), ValueType::Map);
        let keys: Vec<&str> = decoder.document_fields(&document).map(|(k, _)| k).collect();
        let expected: Vec<&str> = shape.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, expected);
    }
}

#[test]
fn test_native_from_json_preserves_field_order() {
    let value = NativeValue::from(json!({"b": 1, "a": 2, "c": 3}));
    let keys: Vec<&String> = value.as_map().unwrap().keys().collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_native_from_json_numbers() {
    assert_eq!(NativeValue::from(json!(7)), NativeValue::Integer(7));
    assert_eq!(NativeValue::from(json!(7.5)), NativeValue::Double(7.5));
}

#[test]
fn test_document_reference_collection() {
    let reference = DocumentReference::from_segments(&["users", "alice", "posts", "p1"]);
    assert_eq!(reference.path, "users/alice/posts/p1");
    assert_eq!(reference.collection_id(), Some("posts"));
    assert_eq!(DocumentReference::new("single").collection_id(), None);
}

// ============================================================================
// Input Loading Tests
// ============================================================================

#[test]
fn test_parse_list_response() {
    let body = r#"{
        "documents": [
            {
                "name": "projects/demo/databases/(default)/documents/users/alice",
                "fields": {"name": {"stringValue": "Alice"}},
                "createTime": "2024-01-01T00:00:00Z",
                "updateTime": "2024-01-01T00:00:00Z"
            }
        ],
        "nextPageToken": "abc"
    }"#;

    let batch = parse_batch(body, InputFormat::Auto, "users.json").unwrap();
    assert_eq!(batch.format, DocumentFormat::Wire);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.documents[0]["fields"]["name"]["stringValue"], "Alice");
}

#[test]
fn test_parse_empty_list_response() {
    let batch = parse_batch("{}", InputFormat::Auto, "empty.json").unwrap();
    assert!(batch.is_empty());
    assert_eq!(batch.format, DocumentFormat::Wire);
}

#[test]
fn test_parse_list_response_as_native_is_rejected() {
    let err = parse_batch(r#"{"documents": []}"#, InputFormat::Native, "x.json").unwrap_err();
    assert!(err.to_string().contains("always wire encoded"));
}

#[test]
fn test_parse_array_auto_detect() {
    let wire = parse_batch(
        r#"[{"fields": {"a": {"stringValue": "x"}}}]"#,
        InputFormat::Auto,
        "wire.json",
    )
    .unwrap();
    assert_eq!(wire.format, DocumentFormat::Wire);

    let native = parse_batch(r#"[{"a": "x"}]"#, InputFormat::Auto, "native.json").unwrap();
    assert_eq!(native.format, DocumentFormat::Native);
}

#[test]
fn test_parse_explicit_format_wins() {
    let batch = parse_batch(r#"[{"fields": "text"}]"#, InputFormat::Wire, "x.json").unwrap();
    assert_eq!(batch.format, DocumentFormat::Wire);

    let batch = parse_batch(r#"[{"fields": {}}]"#, InputFormat::Native, "x.json").unwrap();
    assert_eq!(batch.format, DocumentFormat::Native);
}

#[test]
fn test_parse_rejects_non_documents() {
    let err = parse_batch("42", InputFormat::Auto, "n.json").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input 'n.json': expected a JSON array of documents or a listDocuments response, found a number"
    );

    let err = parse_batch(r#"[{"a": 1}, "oops"]"#, InputFormat::Auto, "m.json").unwrap_err();
    assert!(err.to_string().contains("index 1 is not an object"));

    assert!(parse_batch("{not json", InputFormat::Auto, "bad.json").is_err());
}

#[test]
fn test_detect_format_empty() {
    assert_eq!(detect_format(&[]), DocumentFormat::Wire);
}

#[test]
fn test_wire_document_paths() {
    let doc = WireDocument {
        name: "projects/demo/databases/(default)/documents/users/alice/posts/p1".to_string(),
        ..Default::default()
    };
    assert_eq!(doc.path(), Some("users/alice/posts/p1"));
    assert_eq!(doc.collection_id(), Some("posts"));
    assert_eq!(WireDocument::default().collection_id(), None);
}
