// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Tolerant JSON decoding for endpoint payloads
//!
//! Endpoint payloads drift: members are added, dropped or sent as `null`. The
//! decoder accepts all three. Unknown members are ignored, missing members keep
//! the model's default, and object members explicitly set to `null` are removed
//! before decoding so they never overwrite a default.
//!
//! Models are expected to carry `#[serde(default)]` at the container level.
//! Syntax errors are not tolerated and surface as [`DecodeError::Syntax`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Failure to turn a response body into a model
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body is not valid JSON
    #[error("malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Body is valid JSON but cannot be mapped onto the model
    #[error("payload does not match model: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Decode `body` into `T`, ignoring unknown members and explicit nulls
///
/// # Errors
///
/// Returns [`DecodeError::Syntax`] for malformed JSON and [`DecodeError::Shape`]
/// when a present value has an incompatible type.
pub fn decode_tolerant<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    let mut value: Value = serde_json::from_slice(body).map_err(DecodeError::Syntax)?;
    strip_null_members(&mut value);
    serde_json::from_value(value).map_err(DecodeError::Shape)
}

// Array elements are left alone; only object members are treated as omittable.
fn strip_null_members(value: &mut Value) {
    match value {
        Value::Object(members) => {
            members.retain(|_, member| !member.is_null());
            members.values_mut().for_each(strip_null_members);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_null_members),
        _ => {}
    }
}
