mod search_jobs;
mod search_people;
mod timestamp;

pub use search_jobs::{
    build_search_jobs_query_string, build_search_jobs_url, Commitment, ExpLevel, JobType, Salary,
    SortBy, WorkplaceType,
};
pub use search_people::{
    build_search_people_query_string, build_search_people_url, Network, ProfileLanguage,
};
pub use timestamp::relative_timestamp_secs;

use crate::errors::RunError;
use serde_json::{Map, Value};

/// Closed set of structured query-string builders a definition may reference
/// by literal key. Unknown keys are a configuration error, never ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStringBuilder {
    SearchPeople,
    SearchJobs,
}

impl QueryStringBuilder {
    pub fn from_key(key: &str) -> Result<Self, RunError> {
        match key {
            "{{linkedin.com/search-people.buildSearchPeopleQueryString()}}" => {
                Ok(QueryStringBuilder::SearchPeople)
            }
            "{{linkedin.com/search-jobs.buildSearchJobsQueryString()}}" => {
                Ok(QueryStringBuilder::SearchJobs)
            }
            _ => Err(RunError::config(format!(
                "Unknown queryStringBuilder: {}",
                key
            ))),
        }
    }

    pub fn build(&self, params: &Map<String, Value>) -> String {
        match self {
            QueryStringBuilder::SearchPeople => build_search_people_query_string(params),
            QueryStringBuilder::SearchJobs => build_search_jobs_query_string(params),
        }
    }
}

pub(crate) fn param_str(params: &Map<String, Value>, key: &str) -> Option<String> {
    match params.get(key) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        Some(Value::Number(num)) => Some(num.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    }
}

pub(crate) fn param_i64(params: &Map<String, Value>, key: &str) -> Option<i64> {
    match params.get(key) {
        Some(Value::Number(num)) => num.as_i64(),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub(crate) fn param_f64(params: &Map<String, Value>, key: &str) -> Option<f64> {
    match params.get(key) {
        Some(Value::Number(num)) => num.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn param_bool(params: &Map<String, Value>, key: &str) -> bool {
    match params.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Facet ids may arrive as strings or numbers; pass them through untouched.
pub(crate) fn param_raw(params: &Map<String, Value>, key: &str) -> Option<Value> {
    match params.get(key) {
        Some(Value::String(text)) if text.is_empty() => None,
        Some(Value::Null) | None => None,
        Some(value) => Some(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::QueryStringBuilder;

    #[test]
    fn registry_resolves_known_keys() {
        assert_eq!(
            QueryStringBuilder::from_key(
                "{{linkedin.com/search-jobs.buildSearchJobsQueryString()}}"
            )
            .unwrap(),
            QueryStringBuilder::SearchJobs
        );
        assert_eq!(
            QueryStringBuilder::from_key(
                "{{linkedin.com/search-people.buildSearchPeopleQueryString()}}"
            )
            .unwrap(),
            QueryStringBuilder::SearchPeople
        );
    }

    #[test]
    fn registry_rejects_unknown_keys() {
        let err = QueryStringBuilder::from_key("{{linkedin.com/other.build()}}").unwrap_err();
        assert!(err.message.contains("Unknown queryStringBuilder"));
    }
}
