use crate::constants::network;
use crate::errors::RunError;
use crate::request::definition::RequestDefinitionFile;
use crate::services::logger::Logger;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Loads request definitions from disk or over HTTP. Definitions are
/// re-read on every load; callers cache if they need to.
pub struct DefinitionStore {
    logger: Logger,
    base_dir: Option<PathBuf>,
    client: Client,
}

impl DefinitionStore {
    pub fn new(logger: &Logger, base_dir: Option<PathBuf>) -> Self {
        Self {
            logger: logger.child("definitions"),
            base_dir,
            client: Client::new(),
        }
    }

    pub async fn load(&self, path: &str) -> Result<RequestDefinitionFile, RunError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return self.load_remote(path).await;
        }
        self.load_local(path).await
    }

    async fn load_remote(&self, url: &str) -> Result<RequestDefinitionFile, RunError> {
        self.logger.debug(&format!("Fetching definition {}", url), None);
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(network::TIMEOUT_DEFINITION_FETCH_MS))
            .send()
            .await
            .map_err(|err| {
                RunError::config(format!("Failed to fetch definition from {}: {}", url, err))
            })?;
        if !response.status().is_success() {
            return Err(RunError::config(format!(
                "Failed to fetch definition from {}: status {}",
                url,
                response.status().as_u16()
            )));
        }
        let raw = response.text().await.map_err(|err| {
            RunError::config(format!("Failed to fetch definition from {}: {}", url, err))
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            RunError::config(format!("Failed to parse definition from {}: {}", url, err))
        })
    }

    async fn load_local(&self, path: &str) -> Result<RequestDefinitionFile, RunError> {
        // Definition references use URL-style absolute paths; resolve them
        // under the configured base directory.
        let relative = path.trim_start_matches('/');
        let resolved = match self.base_dir.as_ref() {
            Some(base) => base.join(relative),
            None => PathBuf::from(path),
        };
        self.logger
            .debug(&format!("Loading definition {}", resolved.display()), None);
        let raw = tokio::fs::read_to_string(&resolved).await.map_err(|err| {
            RunError::config(format!(
                "Failed to load definition {}: {}",
                resolved.display(),
                err
            ))
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            RunError::config(format!(
                "Failed to parse definition {}: {}",
                resolved.display(),
                err
            ))
        })
    }
}
