use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

use crate::utils::error::AppError;

/// Renders a BSON value the way the website expects it: ObjectIds as hex
/// strings, datetimes as RFC 3339, everything else as relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(dt.try_to_rfc3339_string().unwrap_or_default()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

/// Turns a request body into a storable document. The body must be a JSON
/// object; a caller-supplied `_id` is dropped.
pub fn payload_to_document(payload: Value) -> Result<Document, AppError> {
    let mut fields = match payload {
        Value::Object(fields) => fields,
        _ => return Err(AppError::validation("Request body must be a JSON object")),
    };
    fields.remove("_id");

    bson::to_document(&fields).map_err(|e| AppError::validation(format!("Unsupported value: {}", e)))
}
