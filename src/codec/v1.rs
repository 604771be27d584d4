use crate::constants::dialects::V1_LIST_KEYS;
use crate::errors::RunError;
use crate::utils::uri::{decode_uri_component, encode_uri_component};
use serde_json::{Map, Number, Value};

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        _ => value.to_string(),
    }
}

fn encode_query_param_v1(value: &Value) -> Result<String, RunError> {
    match value {
        Value::Array(items) => {
            let encoded: Result<Vec<String>, RunError> =
                items.iter().map(encode_query_param_v1).collect();
            Ok(encoded?.join("%2C"))
        }
        Value::Object(_) => Err(RunError::config(format!(
            "Invalid dictionary value detected: {}",
            value
        ))),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => {
            // A literal '+' becomes a space before encoding. This asymmetry
            // mirrors the platform's own query convention.
            let text = scalar_to_string(value).replacen('+', " ", 1);
            Ok(encode_uri_component(&text))
        }
    }
}

/// Legacy job-search dialect: flat values, comma-joined arrays.
pub fn encode_query_params_v1(params: &Map<String, Value>) -> Result<String, RunError> {
    let mut parts = Vec::with_capacity(params.len());
    for (key, value) in params {
        let encoded_key = encode_query_param_v1(&Value::String(key.clone()))?;
        let encoded_value = encode_query_param_v1(value)?;
        parts.push(format!("{}={}", encoded_key, encoded_value));
    }
    Ok(parts.join("&"))
}

fn convert_to_int_if_possible(value: &str) -> Value {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.parse::<f64>().is_err() {
        return Value::String(value.to_string());
    }
    // parseInt semantics: the leading integer part only.
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Value::String(value.to_string());
    }
    match digits.parse::<i64>() {
        Ok(parsed) => Value::Number(Number::from(sign * parsed)),
        Err(_) => Value::String(value.to_string()),
    }
}

fn decode_string_v1(value: &str, key: &str) -> Value {
    let value = value.replacen('+', " ", 1);
    if V1_LIST_KEYS.contains(&key) {
        let items: Vec<Value> = value.split(',').map(convert_to_int_if_possible).collect();
        Value::Array(items)
    } else {
        convert_to_int_if_possible(&value)
    }
}

fn decode_form_component(raw: &str) -> String {
    let unplussed = raw.replace('+', " ");
    decode_uri_component(&unplussed).unwrap_or(unplussed)
}

/// Decodes a V1 query string. Keys on the facet allow-list always yield
/// arrays, even for a single value.
pub fn decode_query_string_v1(query_string: &str) -> Map<String, Value> {
    let mut result = Map::new();
    for part in query_string.split('&') {
        if part.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match part.split_once('=') {
            Some((key, value)) => (key, value),
            None => (part, ""),
        };
        let key = decode_form_component(raw_key);
        let value = decode_form_component(raw_value);
        result.insert(key.clone(), decode_string_v1(&value, &key));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{decode_query_string_v1, encode_query_params_v1};
    use serde_json::{json, Map, Value};

    fn to_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn encode_joins_arrays_with_encoded_comma() {
        let params = to_map(json!({"f_JT": ["F", "P"], "keywords": "rust"}));
        assert_eq!(
            encode_query_params_v1(&params).unwrap(),
            "f_JT=F%2CP&keywords=rust"
        );
    }

    #[test]
    fn encode_renders_booleans_as_literals() {
        let params = to_map(json!({"remote": true, "hybrid": false}));
        assert_eq!(
            encode_query_params_v1(&params).unwrap(),
            "remote=true&hybrid=false"
        );
    }

    #[test]
    fn encode_rejects_nested_dictionaries() {
        let params = to_map(json!({"query": {"a": 1}}));
        let err = encode_query_params_v1(&params).unwrap_err();
        assert!(err.message.contains("Invalid dictionary value"));
    }

    #[test]
    fn encode_turns_first_plus_into_space() {
        let params = to_map(json!({"q": "c++rust"}));
        let encoded = encode_query_params_v1(&params).unwrap();
        assert_eq!(encoded, "q=c%20%2Brust");
    }

    #[test]
    fn decode_coerces_numeric_strings() {
        let decoded = decode_query_string_v1("start=25&keywords=rust");
        assert_eq!(Value::Object(decoded), json!({"start": 25, "keywords": "rust"}));
    }

    #[test]
    fn decode_always_lists_facet_keys() {
        let decoded = decode_query_string_v1("f_C=1024&f_JT=F%2CP");
        assert_eq!(
            Value::Object(decoded),
            json!({"f_C": [1024], "f_JT": ["F", "P"]})
        );
    }

    #[test]
    fn decode_reverses_encode_for_flat_values() {
        let params = to_map(json!({"keywords": "senior rust engineer", "start": 0}));
        let encoded = encode_query_params_v1(&params).unwrap();
        let decoded = decode_query_string_v1(&encoded);
        assert_eq!(
            Value::Object(decoded),
            json!({"keywords": "senior rust engineer", "start": 0})
        );
    }
}
