use crate::request::definition::RequestDefinitionFile;
use crate::services::logger::Logger;
use crate::transport::RequestResponse;
use crate::utils::data_path::get_path;
use serde_json::{Map, Value};

/// A transport response plus its rendered projections. `parsed_string` is
/// only present when the definition declares response handling.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub original: RequestResponse,
    pub response_string: String,
    pub parsed_string: Option<String>,
}

/// Projects a response through the definition's parsing config. Parsing
/// never fails the execution; problems are rendered into the parsed string.
pub fn parse_response(
    logger: &Logger,
    definition: &RequestDefinitionFile,
    response: RequestResponse,
) -> ParsedResponse {
    let response_string = pretty(&serde_json::to_value(&response).unwrap_or(Value::Null));

    let parsed_string = definition
        .response
        .as_ref()
        .map(|spec| {
            if let Some(codes) = spec.successful_status_codes.as_ref() {
                if !codes.contains(&response.status_code) {
                    return format!("Unexpected status code: {}", response.status_code);
                }
            }

            if spec.parsing_js.is_some() {
                logger.error(
                    "parsingJs is no longer supported; returning an empty result",
                    Some(&serde_json::json!({ "definition": definition.id })),
                );
                return pretty(&Value::Object(Map::new()));
            }

            // An absent parsing config behaves like an empty one.
            let mut out = Map::new();
            if let Some(config) = spec.parsing_config.as_ref() {
                for (field, path) in config {
                    let value = get_path(&response.body, path).unwrap_or(Value::Null);
                    out.insert(field.clone(), value);
                }
            }
            pretty(&Value::Object(out))
        });

    ParsedResponse {
        original: response,
        response_string,
        parsed_string,
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("Error parsing: {}", err))
}
