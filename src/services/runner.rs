use crate::errors::RunError;
use crate::request::definition::{
    PreprocessRule, RequestDefinitionFile, RequestInitiator,
};
use crate::request::inputs::{build_request_inputs, ResolvedRequestInputs};
use crate::request::parser::{parse_response, ParsedResponse};
use crate::request::template::fill_template_with_params;
use crate::services::definitions::DefinitionStore;
use crate::services::logger::Logger;
use crate::transport::tab::{translate_tab_failure, TabChannel, TabMessage};
use crate::transport::{RequestResponse, Transport};
use crate::utils::data_path::get_path_required;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// Executes request definitions end to end: parameter resolution with
/// preprocessing, input construction, dispatch, and response parsing.
pub struct Runner {
    logger: Logger,
    store: Arc<DefinitionStore>,
    direct: Arc<dyn Transport>,
    tab_channel: Option<Arc<dyn TabChannel>>,
}

impl Runner {
    pub fn new(
        logger: &Logger,
        store: Arc<DefinitionStore>,
        direct: Arc<dyn Transport>,
        tab_channel: Option<Arc<dyn TabChannel>>,
    ) -> Self {
        Self {
            logger: logger.child("runner"),
            store,
            direct,
            tab_channel,
        }
    }

    pub async fn run_path(
        &self,
        path: &str,
        supplied: &IndexMap<String, String>,
    ) -> Result<ParsedResponse, RunError> {
        let definition = self.store.load(path).await?;
        self.run(&definition, supplied).await
    }

    pub async fn run(
        &self,
        definition: &RequestDefinitionFile,
        supplied: &IndexMap<String, String>,
    ) -> Result<ParsedResponse, RunError> {
        self.run_with_stack(definition, supplied, Vec::new()).await
    }

    /// The stack carries the chain of definition ids currently being
    /// preprocessed, so a definition that reaches itself again fails fast
    /// instead of recursing forever.
    fn run_with_stack<'a>(
        &'a self,
        definition: &'a RequestDefinitionFile,
        supplied: &'a IndexMap<String, String>,
        stack: Vec<String>,
    ) -> BoxFuture<'a, Result<ParsedResponse, RunError>> {
        Box::pin(async move {
            if stack.contains(&definition.id) {
                let chain = stack
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(definition.id.as_str()))
                    .collect::<Vec<&str>>()
                    .join(" -> ");
                return Err(RunError::config(format!(
                    "Circular preprocessing detected: {}",
                    chain
                )));
            }
            let mut stack = stack;
            stack.push(definition.id.clone());

            let params = self
                .resolve_params(definition, supplied, &stack)
                .await?;
            let inputs = build_request_inputs(definition, &params)?;

            self.logger.info(
                &format!("Executing {}", definition.id),
                Some(&serde_json::json!({ "url": inputs.url })),
            );

            let response = match definition.request.request_initiator {
                RequestInitiator::Tab => self.send_on_tab(&inputs).await?,
                RequestInitiator::Direct => self.direct.send(&inputs).await?,
            };

            Ok(parse_response(&self.logger, definition, response))
        })
    }

    /// Walks declared parameters in order. A supplied value wins over the
    /// default; a supplied value on a preprocessed parameter only triggers
    /// the preprocess and is not itself passed along.
    async fn resolve_params(
        &self,
        definition: &RequestDefinitionFile,
        supplied: &IndexMap<String, String>,
        stack: &[String],
    ) -> Result<IndexMap<String, String>, RunError> {
        let mut resolved = IndexMap::new();

        for (key, spec) in &definition.params {
            let supplied_value = supplied.get(key).filter(|value| !value.is_empty());

            if let Some(value) = supplied_value {
                if let Some(rule) = spec.preprocess.as_ref() {
                    let (final_key, final_value) =
                        self.preprocess_param(key, rule, supplied, stack).await?;
                    resolved.insert(final_key, final_value);
                } else {
                    resolved.insert(key.clone(), value.clone());
                }
                continue;
            }

            if let Some(default) = spec.default.as_ref() {
                let value = stringify(default);
                if !value.is_empty() {
                    resolved.insert(key.clone(), value);
                    continue;
                }
            }

            if spec.required {
                return Err(RunError::param(format!(
                    "Required parameter '{}' is missing and has no default value",
                    key
                )));
            }
        }

        Ok(resolved)
    }

    /// Runs the rule's definition and extracts the replacement value from
    /// its parsed result.
    async fn preprocess_param(
        &self,
        key: &str,
        rule: &PreprocessRule,
        supplied: &IndexMap<String, String>,
        stack: &[String],
    ) -> Result<(String, String), RunError> {
        let inner = self.store.load(&format!("{}.json", rule.endpoint)).await?;

        let mut inner_params = IndexMap::new();
        for (name, template) in &rule.params {
            inner_params.insert(name.clone(), fill_template_with_params(template, supplied)?);
        }

        let outcome = self
            .run_with_stack(&inner, &inner_params, stack.to_vec())
            .await?;
        let parsed = outcome.parsed_string.ok_or_else(|| {
            RunError::param(format!(
                "Failed to preprocess request: {} produced no parsed result",
                rule.endpoint
            ))
        })?;
        let value: Value = serde_json::from_str(&parsed).map_err(|_| {
            RunError::param(format!("Failed to parse preprocess result: {}", parsed))
        })?;
        let extracted = get_path_required(&value, &rule.return_path)?;

        let final_key = rule.new_key.clone().unwrap_or_else(|| key.to_string());
        Ok((final_key, stringify(&extracted)))
    }

    async fn send_on_tab(
        &self,
        inputs: &ResolvedRequestInputs,
    ) -> Result<RequestResponse, RunError> {
        let channel = self.tab_channel.as_ref().ok_or_else(|| {
            RunError::transport(
                "Tab channel is not available; cannot delegate this request",
            )
        })?;

        let message = TabMessage::from_inputs(inputs);
        self.logger.debug(
            "Delegating request to tab",
            Some(&serde_json::json!({ "pattern": inputs.tab_query.url })),
        );

        let reply = channel.send(&message).await?;
        match reply {
            Value::String(text) => Err(translate_tab_failure(&text, &inputs.tab_query.url)),
            other => serde_json::from_value(other)
                .map_err(|err| RunError::transport(format!("Malformed tab reply: {}", err))),
        }
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        // Arrays flatten to comma-joined items, the way definition authors
        // write multi-valued defaults.
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<String>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringify_keeps_strings_bare() {
        assert_eq!(stringify(&Value::String("x".to_string())), "x");
        assert_eq!(stringify(&serde_json::json!(25)), "25");
    }

    #[test]
    fn stringify_comma_joins_arrays() {
        assert_eq!(stringify(&serde_json::json!(["R"])), "R");
        assert_eq!(stringify(&serde_json::json!([1, 2, [3, 4]])), "1,2,3,4");
        assert_eq!(stringify(&serde_json::json!(["a", null, "b"])), "a,,b");
    }
}
