use super::{param_bool, param_f64, param_i64, param_raw, param_str};
use crate::codec::{encode_query_params_v2, prune_empty_values};
use crate::builders::timestamp::relative_timestamp_secs;
use serde_json::{json, Map, Value};

const DEFAULT_DECORATION_ID: &str =
    "com.linkedin.voyager.dash.deco.jobs.search.JobSearchCardsCollection-213";
const SEARCH_JOBS_PATH: &str = "https://www.linkedin.com/voyager/api/voyagerJobsDashJobCards";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    MostRecent,
    MostRelevant,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::MostRecent => "DD",
            SortBy::MostRelevant => "R",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpLevel {
    Internship = 1,
    EntryLevel = 2,
    Associate = 3,
    MidSeniorLevel = 4,
    Director = 5,
    Executive = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Volunteer,
    Internship,
    Other,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "F",
            JobType::PartTime => "P",
            JobType::Contract => "C",
            JobType::Temporary => "T",
            JobType::Volunteer => "V",
            JobType::Internship => "I",
            JobType::Other => "O",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkplaceType {
    OnSite = 1,
    Remote = 2,
    Hybrid = 3,
}

/// Buckets are lower salary bounds, 40k through 200k USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Salary {
    Usd40000Plus = 1,
    Usd60000Plus = 2,
    Usd80000Plus = 3,
    Usd100000Plus = 4,
    Usd120000Plus = 5,
    Usd140000Plus = 6,
    Usd160000Plus = 7,
    Usd180000Plus = 8,
    Usd200000Plus = 9,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    DiversityEquityAndInclusion = 1,
    EnvironmentalSustainability = 2,
    WorkLifeBalance = 3,
    SocialImpact = 4,
    CareerGrowthAndLearning = 5,
}

fn singleton(value: Option<Value>) -> Value {
    match value {
        Some(value) => Value::Array(vec![value]),
        None => Value::Null,
    }
}

fn flag(params: &Map<String, Value>, key: &str) -> Value {
    if param_bool(params, key) {
        Value::Array(vec![Value::Bool(true)])
    } else {
        Value::Null
    }
}

/// Builds the jobs-search query string from loosely typed user parameters.
/// Unset filters render as nulls and are pruned before encoding.
pub fn build_search_jobs_query_string(params: &Map<String, Value>) -> String {
    let keywords = param_str(params, "keywords").unwrap_or_default();
    let sort_by = param_str(params, "sortBy").unwrap_or_else(|| SortBy::MostRelevant.as_str().to_string());
    let start = param_i64(params, "start").unwrap_or(0);
    let count = param_i64(params, "count").unwrap_or(25);
    let decoration_id =
        param_str(params, "decorationId").unwrap_or_else(|| DEFAULT_DECORATION_ID.to_string());

    // Distance arrives in miles; the platform facet wants kilometers.
    let distance = param_f64(params, "distance")
        .map(|miles| Value::from((miles * 5.0 / 8.0).round() as i64));
    let time_posted = param_str(params, "timePostedRange")
        .map(|range| Value::String(format!("r{}", relative_timestamp_secs(&range))));

    let query_params = json!({
        "decorationId": decoration_id,
        "q": "jobSearch",
        "query": {
            "origin": "JOB_SEARCH_PAGE_JOB_FILTER",
            "keywords": keywords,
            "locationUnion": { "geoId": param_raw(params, "locationId") },
            "selectedFilters": {
                "company": singleton(param_raw(params, "companyId")),
                "sortBy": Value::Array(vec![Value::String(sort_by)]),
                "applyWithLinkedIn": flag(params, "applyWithLinkedIn"),
                "commitment": singleton(param_raw(params, "commitment")),
                "experience": singleton(param_raw(params, "expLevel")),
                "earlyApplicant": flag(params, "earlyApplicant"),
                "distance": singleton(distance),
                "function": singleton(param_raw(params, "functionId")),
                "industry": singleton(param_raw(params, "industryId")),
                "jobType": singleton(param_raw(params, "jobType")),
                "inYourNetwork": flag(params, "inYourNetwork"),
                "populatedPlace": singleton(param_raw(params, "populatedPlaceGeoId")),
                "salaryBucketV2": singleton(param_raw(params, "salaryBucketV2")),
                "title": singleton(param_raw(params, "titleId")),
                "timePostedRange": singleton(time_posted),
                "workplaceType": singleton(param_raw(params, "workplaceType")),
            },
            "spellCorrectionEnabled": true,
        },
        "count": count,
        "start": start,
    });

    let pruned = prune_empty_values(&query_params);
    match pruned {
        Value::Object(map) => encode_query_params_v2(&map),
        _ => String::new(),
    }
}

pub fn build_search_jobs_url(params: &Map<String, Value>) -> String {
    let query_string = build_search_jobs_query_string(params);
    if query_string.is_empty() {
        SEARCH_JOBS_PATH.to_string()
    } else {
        format!("{}?{}", SEARCH_JOBS_PATH, query_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_query_string_v2;
    use crate::utils::data_path::get_path;

    fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn unset_filters_vanish_from_the_query() {
        let qs = build_search_jobs_query_string(&params(&[(
            "keywords",
            Value::String("rust".to_string()),
        )]));
        let decoded = Value::Object(decode_query_string_v2(&qs).unwrap());
        assert_eq!(
            get_path(&decoded, "query.keywords"),
            Some(Value::String("rust".to_string()))
        );
        assert_eq!(get_path(&decoded, "query.selectedFilters.company"), None);
        assert_eq!(get_path(&decoded, "query.locationUnion"), None);
    }

    #[test]
    fn defaults_apply_for_paging_and_sorting() {
        let qs = build_search_jobs_query_string(&params(&[(
            "keywords",
            Value::String("rust".to_string()),
        )]));
        let decoded = Value::Object(decode_query_string_v2(&qs).unwrap());
        assert_eq!(get_path(&decoded, "count"), Some(Value::from(25)));
        assert_eq!(get_path(&decoded, "start"), Some(Value::from(0)));
        assert_eq!(
            get_path(&decoded, "query.selectedFilters.sortBy"),
            Some(serde_json::json!(["R"]))
        );
    }

    #[test]
    fn filters_render_as_single_element_lists() {
        let qs = build_search_jobs_query_string(&params(&[
            ("keywords", Value::String("rust".to_string())),
            ("jobType", Value::String(JobType::Contract.as_str().to_string())),
            ("companyId", Value::String("1337".to_string())),
            ("applyWithLinkedIn", Value::String("true".to_string())),
        ]));
        let decoded = Value::Object(decode_query_string_v2(&qs).unwrap());
        assert_eq!(
            get_path(&decoded, "query.selectedFilters.jobType"),
            Some(serde_json::json!(["C"]))
        );
        assert_eq!(
            get_path(&decoded, "query.selectedFilters.applyWithLinkedIn"),
            Some(serde_json::json!([true]))
        );
    }

    #[test]
    fn time_posted_becomes_a_relative_facet() {
        let qs = build_search_jobs_query_string(&params(&[
            ("keywords", Value::String("rust".to_string())),
            ("timePostedRange", Value::String("1d".to_string())),
        ]));
        let decoded = Value::Object(decode_query_string_v2(&qs).unwrap());
        assert_eq!(
            get_path(&decoded, "query.selectedFilters.timePostedRange"),
            Some(serde_json::json!(["r86400"]))
        );
    }

    #[test]
    fn url_prepends_the_job_cards_path() {
        let url = build_search_jobs_url(&params(&[(
            "keywords",
            Value::String("rust".to_string()),
        )]));
        assert!(url.starts_with(
            "https://www.linkedin.com/voyager/api/voyagerJobsDashJobCards?"
        ));
    }
}
