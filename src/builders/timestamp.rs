use once_cell::sync::Lazy;
use regex::Regex;

static RELATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)y|(\d+)mo|(\d+)w|(\d+)d|(\d+)h|(\d+)min").expect("valid regex"));

/// Parses a relative duration like "2w3d" or "-1mo" into signed seconds.
/// Months count as 30 days, years as 365. Unrecognized input yields 0.
pub fn relative_timestamp_secs(relative: &str) -> i64 {
    let sign: i64 = if relative.starts_with('-') { -1 } else { 1 };
    let mut total: i64 = 0;

    for caps in RELATIVE_RE.captures_iter(relative) {
        let amount = |idx: usize| -> i64 {
            caps.get(idx)
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .unwrap_or(0)
        };
        total += amount(1) * 365 * 24 * 60 * 60;
        total += amount(2) * 30 * 24 * 60 * 60;
        total += amount(3) * 7 * 24 * 60 * 60;
        total += amount(4) * 24 * 60 * 60;
        total += amount(5) * 60 * 60;
        total += amount(6) * 60;
    }

    sign * total
}
