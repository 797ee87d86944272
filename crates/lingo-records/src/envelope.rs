//! Versioned record envelope
//!
//! Stored form: `{"schemaVersion": 1, "payload": <record>}`.
//! Values written before the envelope existed are bare payloads and are
//! read as schema version 0.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const SCHEMA_VERSION: u32 = 1;

const VERSION_FIELD: &str = "schemaVersion";
const PAYLOAD_FIELD: &str = "payload";

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    #[serde(rename = "schemaVersion")]
    schema_version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "schemaVersion")]
    schema_version: u32,
    payload: Value,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("stored value is not JSON: {0}")]
    Malformed(serde_json::Error),

    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u32),

    #[error("payload does not match record shape: {0}")]
    Shape(serde_json::Error),
}

pub fn encode<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(&EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        payload: value,
    })
}

/// Wrap an already-stored bare payload in the current envelope.
pub fn rewrap(raw: &str) -> serde_json::Result<String> {
    let payload: Value = serde_json::from_str(raw)?;
    encode(&payload)
}

/// Decode a stored value, upgrading a bare legacy payload if needed.
///
/// Returns the record and the schema version it was stored with.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<(T, u32), DecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(DecodeError::Malformed)?;

    let (version, payload) = if is_envelope(&value) {
        let envelope: RawEnvelope = serde_json::from_value(value).map_err(DecodeError::Shape)?;
        (envelope.schema_version, envelope.payload)
    } else {
        (0, value)
    };

    if version > SCHEMA_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    // v0 -> v1 only added the envelope; field defaults on the record
    // types cover shapes that predate optional fields.
    let record = serde_json::from_value(payload).map_err(DecodeError::Shape)?;
    Ok((record, version))
}

fn is_envelope(value: &Value) -> bool {
    match value.as_object() {
        Some(map) => map.len() == 2 && map.contains_key(VERSION_FIELD) && map.contains_key(PAYLOAD_FIELD),
        None => false,
    }
}
