use crate::constants::tab;
use crate::errors::RunError;
use crate::request::definition::{QueryTab, RequestMethodType};
use crate::request::inputs::ResolvedRequestInputs;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The request as the target-tab side expects it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRequest {
    pub url: String,
    pub method: String,
    pub headers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub request_method_type: RequestMethodType,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub request: TabRequest,
    pub tab_query: QueryTab,
}

/// Envelope handed to the relay extension. The id lets replies be matched
/// back to their request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TabMessage {
    pub id: String,
    pub status: String,
    pub action: String,
    pub payload: RequestPayload,
}

impl TabMessage {
    pub fn from_inputs(inputs: &ResolvedRequestInputs) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status: "pending".to_string(),
            action: tab::ACTION_FETCH_ON_TARGET.to_string(),
            payload: RequestPayload {
                request: TabRequest {
                    url: inputs.url.clone(),
                    method: inputs.method.clone(),
                    headers: inputs.headers.clone(),
                    body: inputs.body.clone(),
                    request_method_type: inputs.request_method_type,
                },
                tab_query: inputs.tab_query.clone(),
            },
        }
    }
}

/// Delivery channel to the relay extension. Implementations own the actual
/// messaging; a string reply is a relay-side failure sentinel.
#[async_trait]
pub trait TabChannel: Send + Sync {
    async fn send(&self, message: &TabMessage) -> Result<Value, RunError>;
}

/// Turns a relay failure sentinel into an error the caller can act on,
/// naming the tab pattern that needs attention.
pub fn translate_tab_failure(reply: &str, tab_pattern: &str) -> RunError {
    if reply == tab::SENTINEL_NO_CONNECTION {
        return RunError::transport(format!(
            "Could not establish connection. You might need to refresh the tab(s) matching {} .",
            tab_pattern
        ));
    }
    if reply == tab::SENTINEL_NO_ACTIVE_TAB {
        return RunError::transport(format!(
            "No active tab found. You might need to open a tab matching {} .",
            tab_pattern
        ));
    }
    RunError::transport(reply)
}
