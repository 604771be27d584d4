use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One callable API: parameters, request template, response handling.
/// Authored externally as JSON and treated as read-only at run time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestDefinitionFile {
    pub id: String,
    /// Declaration order drives resolution order, so the map is ordered.
    #[serde(default)]
    pub params: IndexMap<String, ParamSpec>,
    pub request: RequestSpec,
    #[serde(default)]
    pub response: Option<ResponseSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParamSpec {
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub preprocess: Option<PreprocessRule>,
}

/// Derives a parameter by executing another definition and extracting a
/// field from its parsed result.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessRule {
    pub endpoint: String,
    #[serde(default)]
    pub params: IndexMap<String, String>,
    #[serde(rename = "return")]
    pub return_path: String,
    #[serde(default)]
    pub new_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestInitiator {
    Tab,
    #[default]
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethodType {
    #[default]
    Fetch,
    Xhr,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub method: String,
    pub domain: String,
    pub endpoint: String,
    #[serde(default)]
    pub query_parameters: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub query_string_builder: Option<String>,
    #[serde(default)]
    pub headers: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub query_tab: Option<QueryTab>,
    #[serde(default)]
    pub request_initiator: RequestInitiator,
    #[serde(default)]
    pub request_method_type: RequestMethodType,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryTab {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSpec {
    #[serde(default)]
    pub successful_status_codes: Option<Vec<u16>>,
    #[serde(default)]
    pub parsing_config: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub parsing_js: Option<DynamicParserConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DynamicParserConfig {
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_deserializes_with_defaults() {
        let raw = serde_json::json!({
            "id": "typeahead-locations",
            "params": {
                "query": {
                    "type": "string",
                    "description": "Location name",
                    "required": true
                }
            },
            "request": {
                "name": "Typeahead Locations",
                "method": "GET",
                "domain": "https://www.linkedin.com",
                "endpoint": "/voyager/api/graphql",
                "queryParameters": { "keywords": "{{query}}" }
            }
        });
        let definition: RequestDefinitionFile = serde_json::from_value(raw).unwrap();
        assert_eq!(definition.id, "typeahead-locations");
        assert_eq!(definition.request.request_initiator, RequestInitiator::Direct);
        assert_eq!(definition.request.request_method_type, RequestMethodType::Fetch);
        assert!(definition.params["query"].required);
        assert!(definition.response.is_none());
    }

    #[test]
    fn params_preserve_declaration_order() {
        let raw = serde_json::json!({
            "id": "ordered",
            "params": {
                "third": { "type": "string", "description": "" },
                "first": { "type": "string", "description": "" },
                "second": { "type": "string", "description": "" }
            },
            "request": {
                "name": "Ordered",
                "method": "GET",
                "domain": "https://www.linkedin.com",
                "endpoint": "/jobs/search"
            }
        });
        let definition: RequestDefinitionFile = serde_json::from_value(raw).unwrap();
        let keys: Vec<&String> = definition.params.keys().collect();
        assert_eq!(keys, vec!["third", "first", "second"]);
    }

    #[test]
    fn preprocess_rule_reads_return_path() {
        let raw = serde_json::json!({
            "endpoint": "/linkedin.com/single-step/typeahead-locations",
            "params": { "query": "{{location}}" },
            "return": "firstResult.targetUrn",
            "newKey": "locationId"
        });
        let rule: PreprocessRule = serde_json::from_value(raw).unwrap();
        assert_eq!(rule.return_path, "firstResult.targetUrn");
        assert_eq!(rule.new_key.as_deref(), Some("locationId"));
    }
}
