mod prune;
mod v1;
mod v2;

pub use prune::prune_empty_values;
pub use v1::{decode_query_string_v1, encode_query_params_v1};
pub use v2::{decode_query_string_v2, encode_query_params_v2};

use crate::constants::dialects;
use crate::errors::RunError;
use serde_json::{Map, Value};
use url::Url;

/// The two query-string grammars spoken by different endpoint families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEncodingSchema {
    V1,
    V2,
}

/// Picks the grammar from the target URL. Endpoints outside the known
/// families are a configuration error, not a guess.
pub fn get_list_encoding_schema(url: &str) -> Result<ListEncodingSchema, RunError> {
    if dialects::V2_URL_PREFIXES.iter().any(|p| url.contains(p)) {
        return Ok(ListEncodingSchema::V2);
    }
    if dialects::V1_URL_PREFIXES.iter().any(|p| url.contains(p)) {
        return Ok(ListEncodingSchema::V1);
    }
    Err(RunError::config(format!(
        "Unknown URL for determining list encoding schema: {}",
        url
    )))
}

/// Splits a URL into its bare path and decoded query parameters.
pub fn parse_url(
    url: &str,
    schema: Option<ListEncodingSchema>,
) -> Result<(String, Map<String, Value>), RunError> {
    let parsed = Url::parse(url)
        .map_err(|err| RunError::config(format!("Invalid URL '{}': {}", url, err)))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| RunError::config(format!("URL '{}' has no host", url)))?;
    let path = match parsed.port() {
        Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, parsed.path()),
        None => format!("{}://{}{}", parsed.scheme(), host, parsed.path()),
    };
    let query = parsed.query().unwrap_or("");

    let schema = match schema {
        Some(schema) => schema,
        None => get_list_encoding_schema(url)?,
    };
    let params = match schema {
        ListEncodingSchema::V1 => decode_query_string_v1(query),
        ListEncodingSchema::V2 => decode_query_string_v2(query)?,
    };
    Ok((path, params))
}

/// Builds a URL from a path and structured query parameters, pruning empty
/// values before encoding. No `?` is appended when nothing survives pruning.
pub fn build_url(
    path: &str,
    query_params: &Map<String, Value>,
    schema: Option<ListEncodingSchema>,
) -> Result<String, RunError> {
    let schema = match schema {
        Some(schema) => schema,
        None => get_list_encoding_schema(path)?,
    };
    let pruned = match prune_empty_values(&Value::Object(query_params.clone())) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let query_string = match schema {
        ListEncodingSchema::V1 => encode_query_params_v1(&pruned)?,
        ListEncodingSchema::V2 => encode_query_params_v2(&pruned),
    };
    if query_string.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, query_string))
    }
}
