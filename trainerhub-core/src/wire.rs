//! Conversion of stored documents into the JSON returned to callers.
//!
//! Stored documents carry BSON-only types that have no natural JSON form. Every
//! outbound document goes through [`to_wire_json`], which renders ObjectIds as
//! their 24 character hex string and datetimes as RFC 3339 strings, at any depth.

use bson::{Bson, Document};
use chrono::SecondsFormat;
use serde_json::{Map, Number, Value};

use crate::{
    document::{Record, Stored},
    error::DocumentStoreResult,
};

/// Converts a stored BSON document into its wire representation.
pub fn to_wire_json(document: &Document) -> Value {
    Value::Object(
        document
            .iter()
            .map(|(key, value)| (key.clone(), bson_to_wire(value)))
            .collect::<Map<_, _>>(),
    )
}

/// Converts a single BSON value into its wire representation.
pub fn bson_to_wire(value: &Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(value) => Value::Bool(*value),
        Bson::Int32(value) => Value::from(*value),
        Bson::Int64(value) => Value::from(*value),
        // NaN and infinities have no JSON form.
        Bson::Double(value) => Number::from_f64(*value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(value) => Value::String(value.clone()),
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(value) => Value::String(
            value
                .to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Bson::Array(values) => Value::Array(values.iter().map(bson_to_wire).collect()),
        Bson::Document(document) => to_wire_json(document),
        other => Value::String(other.to_string()),
    }
}

/// Builds the wire form of a stored record: its fields plus `_id` and timestamps.
///
/// # Errors
///
/// Returns an error if the record does not serialize to a document.
pub fn stored_to_wire<D: Record>(stored: &Stored<D>) -> DocumentStoreResult<Value> {
    Ok(to_wire_json(&stored.to_document()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[test]
    fn stringifies_ids_at_every_depth() {
        let id = ObjectId::new();
        let nested = ObjectId::new();
        let wire = to_wire_json(&doc! {
            "_id": id,
            "name": "Jane",
            "refs": [nested],
            "meta": { "owner": nested },
        });

        assert_eq!(
            wire,
            json!({
                "_id": id.to_hex(),
                "name": "Jane",
                "refs": [nested.to_hex()],
                "meta": { "owner": nested.to_hex() },
            })
        );
    }

    #[test]
    fn renders_datetimes_as_rfc3339() {
        let wire = to_wire_json(&doc! { "created_at": bson::DateTime::from_millis(0) });
        assert_eq!(wire, json!({ "created_at": "1970-01-01T00:00:00.000Z" }));
    }

    #[test]
    fn keeps_numbers_and_nulls() {
        let wire = to_wire_json(&doc! { "sets": 3_i64, "weight_kg": 81.5, "phase": Bson::Null });
        assert_eq!(wire, json!({ "sets": 3, "weight_kg": 81.5, "phase": null }));
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Tag {
        label: String,
    }

    impl Record for Tag {
        fn collection_name() -> &'static str {
            "tag"
        }
    }

    #[test]
    fn stored_wire_includes_hex_id_and_timestamps() {
        let id = ObjectId::new();
        let stored = Stored {
            id,
            created_at: Some(bson::DateTime::from_millis(0)),
            updated_at: None,
            record: Tag { label: "strength".to_string() },
        };

        let wire = stored_to_wire(&stored).unwrap();

        assert_eq!(
            wire,
            json!({
                "_id": id.to_hex(),
                "label": "strength",
                "created_at": "1970-01-01T00:00:00.000Z",
            })
        );
        assert_eq!(wire["_id"].as_str().map(str::len), Some(24));
    }
}
