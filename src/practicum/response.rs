//! Shape checks for review API responses.

use serde_json::Value;
use tracing::{error, warn};

use crate::error::PollError;

/// Checks the top-level shape and returns the `homeworks` records in order.
///
/// The records themselves are not inspected here.
pub fn validate_response(response: &Value) -> Result<&[Value], PollError> {
    let Some(object) = response.as_object() else {
        error!("Review API response is not an object: {}", type_name(response));
        return Err(PollError::NotAnObject);
    };

    let Some(homeworks) = object.get("homeworks") else {
        error!("Review API response has no \"homeworks\" key");
        return Err(PollError::MissingHomeworks);
    };

    let Some(homeworks) = homeworks.as_array() else {
        error!("\"homeworks\" is not a list: {}", type_name(homeworks));
        return Err(PollError::HomeworksNotList);
    };

    Ok(homeworks.as_slice())
}

/// Reads the server-reported `current_date`, if it is usable as a cursor.
pub fn current_date(response: &Value) -> Option<i64> {
    let value = response.get("current_date")?;
    if value.is_null() {
        return None;
    }
    let date = value.as_i64();
    if date.is_none() {
        warn!("Ignoring non-integer current_date: {}", value);
    }
    date
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
