pub mod network {
    pub const TIMEOUT_DIRECT_REQUEST_MS: u64 = 30_000;
    pub const TIMEOUT_XHR_DEFAULT_MS: u64 = 30_000;
    pub const TIMEOUT_DEFINITION_FETCH_MS: u64 = 10_000;
}

pub mod dialects {
    /// Endpoints carrying the nested `List(...)` query grammar.
    pub const V2_URL_PREFIXES: &[&str] = &["https://www.linkedin.com/voyager/api"];
    /// Legacy job-search endpoints with comma-joined flat lists.
    pub const V1_URL_PREFIXES: &[&str] = &[
        "https://www.linkedin.com/jobs/search",
        "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search",
    ];
    /// Query keys whose decoded V1 value is always a list, even for one element.
    pub const V1_LIST_KEYS: &[&str] = &["f_C", "f_JT", "f_E", "f_PP", "f_WT"];
}

pub mod tab {
    pub const EXTENSION_ID: &str = "gbjmofioeokcjcpmdpcpoelpkljihdjg";
    pub const ACTION_FETCH_ON_TARGET: &str = "fetch-api-on-target-website";
    pub const SENTINEL_NO_CONNECTION: &str =
        "Error: Could not establish connection. Receiving end does not exist.";
    pub const SENTINEL_NO_ACTIVE_TAB: &str = "Error: No active tab found.";
}

pub mod template {
    /// Placeholders with this prefix are resolved later by the privileged
    /// tab context, not by the local filler.
    pub const CONTENT_SCRIPT_PREFIX: &str = "{{cs_";
}
