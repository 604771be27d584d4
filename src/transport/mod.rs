pub mod direct;
pub mod tab;

use crate::errors::RunError;
use crate::request::inputs::ResolvedRequestInputs;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized response shape shared by every dispatch path, so the parser
/// never cares which transport produced it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub ok: bool,
    pub status_code: u16,
    #[serde(default)]
    pub status_text: String,
    pub body: Value,
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    #[serde(default)]
    pub redirected: bool,
    #[serde(rename = "type", default)]
    pub response_type: String,
    #[serde(default)]
    pub url: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, inputs: &ResolvedRequestInputs) -> Result<RequestResponse, RunError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_round_trips_through_the_wire_shape() {
        let raw = serde_json::json!({
            "ok": true,
            "statusCode": 200,
            "statusText": "OK",
            "body": { "title": "Engineer" },
            "headers": { "content-type": "application/json" },
            "redirected": false,
            "type": "basic",
            "url": "https://www.linkedin.com/voyager/api/graphql"
        });
        let response: RequestResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.response_type, "basic");
        assert_eq!(response.body["title"], "Engineer");
    }

    #[test]
    fn response_tolerates_missing_optional_fields() {
        let raw = serde_json::json!({
            "ok": false,
            "statusCode": 404,
            "body": null
        });
        let response: RequestResponse = serde_json::from_value(raw).unwrap();
        assert!(!response.ok);
        assert!(response.headers.is_empty());
        assert_eq!(response.response_type, "");
    }
}
