use async_trait::async_trait;
use indexmap::IndexMap;
use reqrunner::errors::RunError;
use reqrunner::request::inputs::ResolvedRequestInputs;
use reqrunner::transport::{RequestResponse, Transport};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

/// Definition tree rooted in a unique temp directory.
pub struct DefinitionTree {
    pub root: PathBuf,
}

impl DefinitionTree {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("reqrunner-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn write(&self, relative: &str, definition: &Value) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, serde_json::to_string_pretty(definition).unwrap()).unwrap();
    }
}

impl Drop for DefinitionTree {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.root).ok();
    }
}

/// Transport double that replies from a canned table keyed on a URL
/// substring and records every dispatched URL.
pub struct MockTransport {
    replies: Vec<(String, Value)>,
    pub seen_urls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new(replies: Vec<(&str, Value)>) -> Self {
        Self {
            replies: replies
                .into_iter()
                .map(|(fragment, body)| (fragment.to_string(), body))
                .collect(),
            seen_urls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, inputs: &ResolvedRequestInputs) -> Result<RequestResponse, RunError> {
        self.seen_urls.lock().unwrap().push(inputs.url.clone());
        let body = self
            .replies
            .iter()
            .find(|(fragment, _)| inputs.url.contains(fragment))
            .map(|(_, body)| body.clone())
            .unwrap_or(Value::Null);
        Ok(RequestResponse {
            ok: true,
            status_code: 200,
            status_text: "OK".to_string(),
            body,
            headers: IndexMap::new(),
            redirected: false,
            response_type: "basic".to_string(),
            url: inputs.url.clone(),
        })
    }
}
