//! Sensor frame payload checks.
//!
//! The payload is opaque to the system; only its outer shape is enforced.

use serde_json::Value;

use crate::error::CoreError;

/// Maximum serialized size of a single frame payload, in bytes.
pub const MAX_FRAME_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Validate a sensor frame payload: a JSON object or array, at most
/// [`MAX_FRAME_PAYLOAD_BYTES`] once serialized.
pub fn validate_frame_payload(data: &Value) -> Result<(), CoreError> {
    if !(data.is_object() || data.is_array()) {
        return Err(CoreError::Validation(
            "Sensor frame data must be a JSON object or array".to_string(),
        ));
    }
    let size = data.to_string().len();
    if size > MAX_FRAME_PAYLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "Sensor frame data is {size} bytes, maximum is {MAX_FRAME_PAYLOAD_BYTES}"
        )));
    }
    Ok(())
}
