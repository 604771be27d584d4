use crate::constants::network;
use crate::errors::RunError;
use crate::request::definition::RequestMethodType;
use crate::request::inputs::ResolvedRequestInputs;
use crate::services::logger::Logger;
use crate::transport::{RequestResponse, Transport};
use async_trait::async_trait;
use base64::Engine;
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

/// Sends requests straight from this process. The two method types mirror
/// the historical `fetch` and `XMLHttpRequest` paths and keep their distinct
/// body-decoding and error behavior.
pub struct DirectTransport {
    logger: Logger,
    client: Client,
}

impl DirectTransport {
    pub fn new(logger: &Logger) -> Result<Self, RunError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|err| {
                RunError::internal(format!("Failed to build HTTP client: {}", err))
            })?;
        Ok(Self {
            logger: logger.child("direct"),
            client,
        })
    }

    async fn send_fetch(&self, inputs: &ResolvedRequestInputs) -> Result<RequestResponse, RunError> {
        let response = self
            .prepare(inputs, network::TIMEOUT_DIRECT_REQUEST_MS)?
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let requested_url = inputs.url.clone();
        let final_url = response.url().to_string();
        let headers = collect_headers(response.headers());
        let content_type = headers
            .get("content-type")
            .cloned()
            .unwrap_or_default()
            .to_lowercase();

        let bytes = response.bytes().await.map_err(map_send_error)?;
        let body = decode_body(&content_type, &bytes);

        Ok(RequestResponse {
            ok: status.is_success(),
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
            headers,
            redirected: final_url != requested_url,
            response_type: "basic".to_string(),
            url: final_url,
        })
    }

    async fn send_xhr(&self, inputs: &ResolvedRequestInputs) -> Result<RequestResponse, RunError> {
        let response = self
            .prepare(inputs, network::TIMEOUT_XHR_DEFAULT_MS)?
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    RunError::timeout(format!(
                        "Request timed out after {}ms",
                        network::TIMEOUT_XHR_DEFAULT_MS
                    ))
                } else if err.is_connect() || err.is_request() {
                    RunError::transport(format!("Network error occurred: {}", err))
                } else {
                    RunError::transport(format!("Failed to send request: {}", err))
                }
            })?;

        let status = response.status();
        let final_url = response.url().to_string();
        let headers = collect_headers(response.headers());
        let content_type = headers
            .get("content-type")
            .cloned()
            .unwrap_or_default()
            .to_lowercase();

        let bytes = response.bytes().await.map_err(map_send_error)?;
        let body = decode_body(&content_type, &bytes);

        Ok(RequestResponse {
            ok: status.is_success(),
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
            headers,
            redirected: final_url != inputs.url,
            response_type: String::new(),
            url: final_url,
        })
    }

    fn prepare(
        &self,
        inputs: &ResolvedRequestInputs,
        timeout_ms: u64,
    ) -> Result<reqwest::RequestBuilder, RunError> {
        let method = Method::from_bytes(inputs.method.as_bytes()).map_err(|_| {
            RunError::config(format!("Invalid HTTP method: {}", inputs.method))
        })?;

        let mut headers = HeaderMap::new();
        for (key, value) in &inputs.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                RunError::config(format!("Invalid header name: {}", key))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                RunError::config(format!("Invalid header value for {}", key))
            })?;
            headers.insert(name, value);
        }

        self.logger.debug(
            &format!("{} {}", inputs.method, inputs.url),
            None,
        );

        let mut builder = self
            .client
            .request(method, &inputs.url)
            .headers(headers)
            .timeout(Duration::from_millis(timeout_ms));
        if let Some(body) = inputs.body.as_ref() {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }
}

#[async_trait]
impl Transport for DirectTransport {
    async fn send(&self, inputs: &ResolvedRequestInputs) -> Result<RequestResponse, RunError> {
        match inputs.request_method_type {
            RequestMethodType::Fetch => self.send_fetch(inputs).await,
            RequestMethodType::Xhr => self.send_xhr(inputs).await,
        }
    }
}

fn map_send_error(err: reqwest::Error) -> RunError {
    if err.is_timeout() {
        return RunError::timeout(format!(
            "Request timed out after {}ms",
            network::TIMEOUT_DIRECT_REQUEST_MS
        ));
    }
    RunError::transport(format!("Network error occurred: {}", err))
}

fn collect_headers(headers: &HeaderMap) -> IndexMap<String, String> {
    let mut out = IndexMap::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            out.insert(name.as_str().to_string(), value.to_string());
        }
    }
    out
}

/// Decodes the body by content type first; absent or unrecognized types fall
/// back to JSON, then UTF-8 text, then base64.
fn decode_body(content_type: &str, bytes: &[u8]) -> Value {
    if content_type.contains("application/json") {
        if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
            return value;
        }
    } else if content_type.starts_with("text/")
        || content_type.contains("multipart/form-data")
        || content_type.contains("xml")
    {
        if let Ok(text) = std::str::from_utf8(bytes) {
            return Value::String(text.to_string());
        }
    } else if content_type.contains("application/octet-stream") || content_type.starts_with("image/")
    {
        return Value::String(base64::engine::general_purpose::STANDARD.encode(bytes));
    }

    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        return value;
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Value::String(text.to_string());
    }
    Value::String(base64::engine::general_purpose::STANDARD.encode(bytes))
}
