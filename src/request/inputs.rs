use crate::builders::QueryStringBuilder;
use crate::errors::RunError;
use crate::request::definition::{QueryTab, RequestDefinitionFile, RequestMethodType};
use crate::request::template::fill_template_with_params;
use indexmap::IndexMap;
use serde_json::Value;
use url::Url;

/// Everything the transport needs for one dispatch. Produced per execution
/// and never persisted.
#[derive(Debug, Clone)]
pub struct ResolvedRequestInputs {
    pub url: String,
    pub method: String,
    pub headers: IndexMap<String, String>,
    pub body: Option<String>,
    pub request_method_type: RequestMethodType,
    pub tab_query: QueryTab,
}

#[derive(Debug, Clone)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    pub equal_sign: bool,
}

/// Joins a base URL with already-encoded query parameters. Keys without an
/// equal sign render bare.
pub fn encode_url(base_url: &str, query_params: &[QueryParam]) -> String {
    let query_string = query_params
        .iter()
        .map(|param| {
            if !param.key.is_empty() && param.equal_sign {
                format!("{}={}", param.key, param.value)
            } else {
                param.key.clone()
            }
        })
        .collect::<Vec<String>>()
        .join("&");

    if query_string.is_empty() {
        base_url.to_string()
    } else {
        format!("{}?{}", base_url, query_string)
    }
}

/// Collapses a concrete URL to a tab match pattern: any subdomain of the
/// registrable domain, any scheme. Unparseable input yields an empty string.
pub fn convert_url_to_pattern(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };
    let hostname = match parsed.host_str() {
        Some(host) => host,
        None => return String::new(),
    };

    // Browsers reject port-qualified localhost patterns.
    if hostname == "localhost" {
        return "http://localhost/*".to_string();
    }

    let labels: Vec<&str> = hostname.split('.').collect();
    if labels.len() == 2 {
        return format!("*://{}/*", hostname);
    }
    let domain = labels[labels.len().saturating_sub(2)..].join(".");
    format!("*://*.{}/*", domain)
}

/// Resolves a definition plus final parameters into concrete request inputs.
pub fn build_request_inputs(
    definition: &RequestDefinitionFile,
    params: &IndexMap<String, String>,
) -> Result<ResolvedRequestInputs, RunError> {
    let request = &definition.request;

    let url = if let Some(builder_key) = request.query_string_builder.as_deref() {
        let builder = QueryStringBuilder::from_key(builder_key)?;
        let builder_params: serde_json::Map<String, Value> = params
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        let query_string = builder.build(&builder_params);
        format!("{}{}?{}", request.domain, request.endpoint, query_string)
    } else {
        let base_url = fill_template_with_params(
            &format!("{}{}", request.domain, request.endpoint),
            params,
        )?;
        let mut query_params = Vec::new();
        if let Some(declared) = request.query_parameters.as_ref() {
            for (key, template) in declared {
                query_params.push(QueryParam {
                    key: key.clone(),
                    value: fill_template_with_params(template, params)?,
                    equal_sign: true,
                });
            }
        }
        encode_url(&base_url, &query_params)
    };

    let mut headers = IndexMap::new();
    if let Some(declared) = request.headers.as_ref() {
        for (key, template) in declared {
            headers.insert(key.clone(), fill_template_with_params(template, params)?);
        }
    }

    let body = match request.body.as_ref() {
        Some(body) => {
            let serialized = serde_json::to_string(body)?;
            Some(fill_template_with_params(&serialized, params)?)
        }
        None => None,
    };

    let tab_query = request.query_tab.clone().unwrap_or_else(|| QueryTab {
        url: convert_url_to_pattern(&url),
    });

    Ok(ResolvedRequestInputs {
        url,
        method: request.method.clone(),
        headers,
        body,
        request_method_type: request.request_method_type,
        tab_query,
    })
}
