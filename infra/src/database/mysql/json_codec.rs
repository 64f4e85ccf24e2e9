//! Mapping between document fields and the JSON stored in MySQL
//!
//! Timestamps are written as integer microseconds since the epoch so that
//! `JSON_EXTRACT` ordering matches chronological ordering. They come back
//! as integers; [`FieldValue::as_timestamp`] accepts both forms.

use serde_json::{Map, Number, Value};

use hm_core::domain::value_objects::{Document, FieldValue, Fields};
use hm_core::errors::StoreError;

pub fn field_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Boolean(b) => Value::Bool(*b),
        FieldValue::Integer(n) => Value::Number((*n).into()),
        FieldValue::Double(d) => Number::from_f64(*d).map_or(Value::Null, Value::Number),
        FieldValue::Timestamp(ts) => Value::Number(ts.timestamp_micros().into()),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Array(items) => Value::Array(items.iter().map(field_to_json).collect()),
    }
}

pub fn json_to_field(value: Value) -> Result<FieldValue, StoreError> {
    Ok(match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Boolean(b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => FieldValue::Integer(i),
            (None, Some(f)) => FieldValue::Double(f),
            (None, None) => return Err(StoreError::decode(format!("unsupported number {}", n))),
        },
        Value::String(s) => FieldValue::String(s),
        Value::Array(items) => FieldValue::Array(
            items
                .into_iter()
                .map(json_to_field)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(_) => return Err(StoreError::decode("nested objects are not supported")),
    })
}

pub fn fields_to_json(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(name, value)| (name.clone(), field_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn document_from_json(id: String, data: Value) -> Result<Document, StoreError> {
    let Value::Object(map) = data else {
        return Err(StoreError::decode(format!("document {} is not a JSON object", id)));
    };

    let mut fields = Fields::new();
    for (name, value) in map {
        let value = json_to_field(value)
            .map_err(|e| StoreError::decode(format!("document {} field '{}': {}", id, name, e)))?;
        fields.insert(name, value);
    }
    Ok(Document::with_fields(id, fields))
}

/// JSON path selecting a top-level field, e.g. `$."userRef"`
pub fn field_path(field: &str) -> Result<String, StoreError> {
    if field.is_empty() || field.contains(['"', '\\']) {
        return Err(StoreError::invalid_query(format!("unsupported field name '{}'", field)));
    }
    Ok(format!("$.\"{}\"", field))
}
