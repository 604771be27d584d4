use super::{param_i64, param_raw, param_str};
use crate::codec::{encode_query_params_v2, prune_empty_values};
use serde_json::{json, Map, Value};

const QUERY_ID: &str = "voyagerSearchDashClusters.9c3177ca40ed191b452e1074f52445a8";
const SEARCH_PEOPLE_PATH: &str = "https://www.linkedin.com/voyager/api/graphql";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    FirstConnection,
    SecondConnection,
    ThirdConnection,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::FirstConnection => "F",
            Network::SecondConnection => "S",
            Network::ThirdConnection => "O",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileLanguage {
    English,
    Spanish,
    Chinese,
}

impl ProfileLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileLanguage::English => "en",
            ProfileLanguage::Spanish => "es",
            ProfileLanguage::Chinese => "zh",
        }
    }
}

fn facet(key: &str, value: Option<Value>) -> Option<Value> {
    value.map(|value| json!({ "key": key, "value": [value] }))
}

/// Builds the people-search GraphQL query string. Each selected facet becomes
/// a `{key, value:[..]}` entry; unset facets never appear.
pub fn build_search_people_query_string(params: &Map<String, Value>) -> String {
    let keywords = param_str(params, "keywords").unwrap_or_default();

    let mut query_parameters: Vec<Value> = vec![json!({ "key": "resultType", "value": ["PEOPLE"] })];
    let facets = [
        facet("geoUrn", param_raw(params, "locationId")),
        facet("connectionOf", param_raw(params, "connectionOf")),
        facet("followerOf", param_raw(params, "followerOf")),
        facet("network", param_raw(params, "network")),
        facet("currentCompany", param_raw(params, "currentCompanyId")),
        facet("pastCompany", param_raw(params, "pastCompanyId")),
        facet("schoolFilter", param_raw(params, "schoolId")),
        facet("industry", param_raw(params, "industryId")),
        facet("openToVolunteer", param_raw(params, "openToVolunteer")),
        facet("profileLanguage", param_raw(params, "profileLanguage")),
        facet("serviceCategory", param_raw(params, "serviceCategoryId")),
        facet("firstName", param_raw(params, "firstName")),
        facet("lastName", param_raw(params, "lastName")),
        facet("title", param_raw(params, "title")),
        facet("company", param_raw(params, "company")),
        facet("schoolFreetext", param_raw(params, "school")),
    ];
    query_parameters.extend(facets.into_iter().flatten());

    let query_params = json!({
        "variables": {
            "start": param_i64(params, "start"),
            "origin": "FACETED_SEARCH",
            "query": {
                "keywords": keywords,
                "flagshipSearchIntent": "SEARCH_SRP",
                "queryParameters": query_parameters,
                "includeFiltersInResponse": false,
            },
        },
        "queryId": QUERY_ID,
    });

    let pruned = prune_empty_values(&query_params);
    match pruned {
        Value::Object(map) => encode_query_params_v2(&map),
        _ => String::new(),
    }
}

pub fn build_search_people_url(params: &Map<String, Value>) -> String {
    let query_string = build_search_people_query_string(params);
    if query_string.is_empty() {
        SEARCH_PEOPLE_PATH.to_string()
    } else {
        format!("{}?{}", SEARCH_PEOPLE_PATH, query_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_query_string_v2;
    use crate::utils::data_path::get_path;

    fn params(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect()
    }

    #[test]
    fn result_type_facet_is_always_first() {
        let qs = build_search_people_query_string(&params(&[("keywords", "jane")]));
        let decoded = Value::Object(decode_query_string_v2(&qs).unwrap());
        assert_eq!(
            get_path(&decoded, "variables.query.queryParameters[0].key"),
            Some(Value::String("resultType".to_string()))
        );
        assert_eq!(
            get_path(&decoded, "variables.query.queryParameters[0].value"),
            Some(serde_json::json!(["PEOPLE"]))
        );
    }

    #[test]
    fn unset_facets_never_appear() {
        let qs = build_search_people_query_string(&params(&[("keywords", "jane")]));
        let decoded = Value::Object(decode_query_string_v2(&qs).unwrap());
        let facets = get_path(&decoded, "variables.query.queryParameters").unwrap();
        assert_eq!(facets.as_array().map(|a| a.len()), Some(1));
        // start was not supplied, so variables.start is pruned away.
        assert_eq!(get_path(&decoded, "variables.start"), None);
    }

    #[test]
    fn selected_facets_keep_declaration_order() {
        let qs = build_search_people_query_string(&params(&[
            ("keywords", "jane"),
            ("network", Network::SecondConnection.as_str()),
            ("profileLanguage", ProfileLanguage::English.as_str()),
        ]));
        let decoded = Value::Object(decode_query_string_v2(&qs).unwrap());
        assert_eq!(
            get_path(&decoded, "variables.query.queryParameters[1].key"),
            Some(Value::String("network".to_string()))
        );
        assert_eq!(
            get_path(&decoded, "variables.query.queryParameters[2].key"),
            Some(Value::String("profileLanguage".to_string()))
        );
    }

    #[test]
    fn query_id_is_pinned() {
        let qs = build_search_people_query_string(&params(&[("keywords", "jane")]));
        let decoded = Value::Object(decode_query_string_v2(&qs).unwrap());
        assert_eq!(
            get_path(&decoded, "queryId"),
            Some(Value::String(super::QUERY_ID.to_string()))
        );
    }
}
