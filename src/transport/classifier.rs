//! Response decoding and classification.
//!
//! Classification order: a non-200 status wins over anything in the body,
//! then an absent result, then a fault object, and only then is the body a
//! success value.

use serde_json::Value;

use crate::errors::{EncosionError, EncosionResult};

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// The API returned `null`: there is no result.
    Absent,
    /// Any other JSON document.
    Json(Value),
}

/// Decodes a read response. A trimmed body of exactly `null` is the
/// absent-result sentinel and is not handed to the JSON parser.
///
/// Bytes are always read as UTF-8 regardless of any charset the server
/// advertises. Invalid UTF-8 is a `Serialization` error.
pub fn decode_get_body(body: &[u8]) -> EncosionResult<DecodedBody> {
    let text = utf8(body)?.trim();
    if text == "null" {
        return Ok(DecodedBody::Absent);
    }
    Ok(DecodedBody::Json(serde_json::from_str(text)?))
}

/// Decodes a write response. The body is always parsed.
pub fn decode_post_body(body: &[u8]) -> EncosionResult<DecodedBody> {
    Ok(DecodedBody::Json(serde_json::from_str(utf8(body)?.trim())?))
}

fn utf8(body: &[u8]) -> EncosionResult<&str> {
    std::str::from_utf8(body).map_err(|err| EncosionError::Serialization {
        message: format!("Response body is not valid UTF-8: {}", err),
    })
}

/// Fails with `Http` unless the status is 200.
pub fn check_status(status: u16) -> EncosionResult<()> {
    if status == 200 {
        Ok(())
    } else {
        Err(EncosionError::Http { status })
    }
}

/// Classifies a decoded body from a 200 response.
pub fn check_body(body: DecodedBody) -> EncosionResult<Value> {
    let value = match body {
        DecodedBody::Absent | DecodedBody::Json(Value::Null) => {
            return Err(EncosionError::not_found("The API returned no result"));
        }
        DecodedBody::Json(value) => value,
    };

    match fault(&value) {
        Some(error) => Err(error),
        None => Ok(value),
    }
}

/// Classifies a status code and decoded body.
pub fn classify(status: u16, body: DecodedBody) -> EncosionResult<Value> {
    check_status(status)?;
    check_body(body)
}

/// Extracts a fault from a body carrying a non-blank `error` member.
///
/// Two shapes are recognised: `{"error": "text", "code": 103}` from the
/// read service and `{"error": {"name", "message", "code"}, "result": ...}`
/// from the write service.
fn fault(value: &Value) -> Option<EncosionError> {
    let error = value.get("error")?;
    if is_blank(error) {
        return None;
    }

    let (message, nested_code) = match error {
        Value::Object(detail) => {
            let message = detail
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| detail.get("name").and_then(Value::as_str))
                .map_or_else(|| error.to_string(), str::to_string);
            (message, detail.get("code").and_then(parse_code))
        }
        Value::String(text) => (text.clone(), None),
        other => (other.to_string(), None),
    };

    let code = nested_code.or_else(|| value.get("code").and_then(parse_code));
    Some(EncosionError::from_fault(code, message))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Fault codes arrive as numbers or as numeric strings.
fn parse_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
