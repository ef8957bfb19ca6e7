//! Query-string building for list and search endpoints

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Flatten a parameter struct into query pairs.
///
/// `null`, empty strings and empty arrays are dropped, arrays are joined with
/// commas, everything else is rendered as text. Encoding happens when the
/// pairs are appended to the URL.
pub fn to_query_pairs<T: Serialize + ?Sized>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params)?;
    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(Error::validation(format!(
                "query parameters must serialize to an object, got {}",
                other
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        if let Some(text) = render(&value) {
            pairs.push((key, text));
        }
    }
    Ok(pairs)
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(render).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        Value::Object(_) => Some(value.to_string()),
    }
}
