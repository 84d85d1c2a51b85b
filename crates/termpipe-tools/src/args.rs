//! Argument extraction for tool calls.

use serde_json::Value;

use crate::ToolError;

/// A required string argument.
pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidArguments(format!("{key} is required")))
}

/// A required string argument that may not be empty.
pub(crate) fn required_text<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    let value = required_str(args, key)?;
    if value.is_empty() {
        return Err(ToolError::InvalidArguments(format!("{key} must not be empty")));
    }
    Ok(value)
}

/// A required integer. Numeric strings are accepted since models send them.
pub(crate) fn required_i64(args: &Value, key: &str) -> Result<i64, ToolError> {
    optional_i64(args, key)?
        .ok_or_else(|| ToolError::InvalidArguments(format!("{key} is required")))
}

/// An optional integer; `null` counts as absent.
pub(crate) fn optional_i64(args: &Value, key: &str) -> Result<Option<i64>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| ToolError::InvalidArguments(format!("{key} must be an integer"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ToolError::InvalidArguments(format!("{key} must be an integer, got {s:?}"))),
        Some(other) => Err(ToolError::InvalidArguments(format!(
            "{key} must be an integer, got {other}"
        ))),
    }
}

/// An optional non-negative integer.
pub(crate) fn optional_usize(args: &Value, key: &str) -> Result<Option<usize>, ToolError> {
    optional_i64(args, key)?
        .map(|n| {
            usize::try_from(n)
                .map_err(|_| ToolError::InvalidArguments(format!("{key} must not be negative")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let args = json!({"path": "a.txt", "empty": ""});
        assert_eq!(required_str(&args, "path").unwrap(), "a.txt");
        assert!(required_str(&args, "missing").is_err());
        assert_eq!(required_str(&args, "empty").unwrap(), "");
        assert!(required_text(&args, "empty").is_err());
    }

    #[test]
    fn test_integers_accept_numeric_strings() {
        let args = json!({"a": 3, "b": "7", "c": " -2 ", "d": null, "e": 1.5, "f": "x"});
        assert_eq!(required_i64(&args, "a").unwrap(), 3);
        assert_eq!(required_i64(&args, "b").unwrap(), 7);
        assert_eq!(required_i64(&args, "c").unwrap(), -2);
        assert_eq!(optional_i64(&args, "d").unwrap(), None);
        assert!(optional_i64(&args, "e").is_err());
        assert!(optional_i64(&args, "f").is_err());
        assert!(required_i64(&args, "missing").is_err());
    }

    #[test]
    fn test_optional_usize_rejects_negative() {
        let args = json!({"n": -1, "m": 4});
        assert!(optional_usize(&args, "n").is_err());
        assert_eq!(optional_usize(&args, "m").unwrap(), Some(4));
        assert_eq!(optional_usize(&args, "z").unwrap(), None);
    }
}
