use crate::errors::RunError;
use crate::utils::uri::{decode_uri_component, encode_uri_component};
use serde_json::{Map, Number, Value};

fn encode_query_param_v2(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(encode_query_param_v2).collect();
            format!("List({})", inner.join(","))
        }
        Value::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(key, entry)| format!("{}:{}", key, encode_query_param_v2(entry)))
                .collect();
            format!("({})", pairs.join(","))
        }
        Value::Bool(flag) => flag.to_string(),
        Value::String(text) => escape_scalar(text),
        Value::Number(num) => escape_scalar(&num.to_string()),
        Value::Null => escape_scalar("null"),
    }
}

// Parentheses survive percent-encoding, so the structural ones must be
// re-escaped. The platform only rewrites the first occurrence of each.
fn escape_scalar(text: &str) -> String {
    encode_uri_component(text)
        .replacen('(', "%28", 1)
        .replacen(')', "%29", 1)
}

/// Platform API dialect: maps as `(k:v,...)`, arrays as `List(...)`.
pub fn encode_query_params_v2(params: &Map<String, Value>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_query_param_v2(&Value::String(key.clone())),
                encode_query_param_v2(value)
            )
        })
        .collect::<Vec<String>>()
        .join("&")
}

/// Splits on top-level commas only; commas inside nested `(...)` groups are
/// part of the current item.
fn split_top_level(inner: &str, keep_empty: bool) -> Vec<String> {
    let mut items = Vec::new();
    let mut nested_level = 0i32;
    let mut current = String::new();
    for ch in inner.chars() {
        if ch == ',' && nested_level == 0 {
            if keep_empty || !current.is_empty() {
                items.push(current.clone());
            }
            current.clear();
        } else {
            current.push(ch);
            if ch == '(' {
                nested_level += 1;
            } else if ch == ')' {
                nested_level -= 1;
            }
        }
    }
    if !current.is_empty() {
        items.push(current);
    }
    items
}

fn decode_list_v2(value: &str) -> Result<Value, RunError> {
    let inner = &value["List(".len()..value.len() - 1];
    let items: Result<Vec<Value>, RunError> = split_top_level(inner, false)
        .iter()
        .map(|item| decode_string_v2(item.trim()))
        .collect();
    Ok(Value::Array(items?))
}

fn decode_dict_v2(encoded: &str) -> Result<Value, RunError> {
    if !(encoded.starts_with('(') && encoded.ends_with(')')) {
        return Err(RunError::config(format!(
            "Invalid dictionary format {}",
            encoded
        )));
    }
    let inner = &encoded[1..encoded.len() - 1];
    let mut result = Map::new();
    for pair in split_top_level(inner, false) {
        let (key, value) = match pair.split_once(':') {
            Some((key, value)) => (key, value),
            None => (pair.as_str(), ""),
        };
        result.insert(key.trim().to_string(), decode_string_v2(value.trim())?);
    }
    Ok(Value::Object(result))
}

fn decode_string_v2(value: &str) -> Result<Value, RunError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(parsed) = value.parse::<i64>() {
            return Ok(Value::Number(Number::from(parsed)));
        }
        return Ok(Value::String(value.to_string()));
    }
    if value.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if value.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }
    if value.starts_with('(') && value.ends_with(')') {
        return decode_dict_v2(value);
    }
    if value.starts_with("List(") && value.ends_with(')') {
        return decode_list_v2(value);
    }
    Ok(Value::String(
        decode_uri_component(value).unwrap_or_else(|_| value.to_string()),
    ))
}

pub fn decode_query_string_v2(query_string: &str) -> Result<Map<String, Value>, RunError> {
    let mut result = Map::new();
    for part in query_string.split('&') {
        if part.is_empty() {
            continue;
        }
        let mut segments = part.split('=');
        let key = segments.next().unwrap_or("").to_string();
        let value = segments.next().unwrap_or("");
        result.insert(key, decode_string_v2(value)?);
    }
    Ok(result)
}
