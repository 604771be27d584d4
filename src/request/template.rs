use crate::constants::template::CONTENT_SCRIPT_PREFIX;
use crate::errors::RunError;
use crate::utils::uri::{decode_uri_component, encode_uri_component};
use indexmap::IndexMap;

// A value that decodes to something different is already percent-encoded;
// encoding it again would double-encode.
fn encode_once(value: &str) -> String {
    match decode_uri_component(value) {
        Ok(decoded) if decoded != value => value.to_string(),
        _ => encode_uri_component(value),
    }
}

/// Replaces every `{{name}}` with the percent-encoded parameter value.
/// `{{cs_name}}` placeholders are rewritten to `{{name}}` and left for the
/// privileged tab context; any other leftover placeholder is a hard error.
pub fn fill_template_with_params(
    template: &str,
    params: &IndexMap<String, String>,
) -> Result<String, RunError> {
    let mut value = template.to_string();
    for (name, raw) in params {
        let placeholder = format!("{{{{{}}}}}", name);
        if value.contains(&placeholder) {
            value = value.replace(&placeholder, &encode_once(raw));
        }
    }

    let mut rest = value.as_str();
    while let Some(start) = rest.find("{{") {
        if !rest[start..].starts_with(CONTENT_SCRIPT_PREFIX) {
            return Err(RunError::config(format!("Invalid template: {}", value)));
        }
        rest = &rest[start + CONTENT_SCRIPT_PREFIX.len()..];
    }

    Ok(value.replace(CONTENT_SCRIPT_PREFIX, "{{"))
}

#[cfg(test)]
mod tests {
    use super::fill_template_with_params;
    use indexmap::IndexMap;

    fn params(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn fill_is_a_noop_without_placeholders() {
        let out = fill_template_with_params("/voyager/api/graphql", &params(&[])).unwrap();
        assert_eq!(out, "/voyager/api/graphql");
    }

    #[test]
    fn fill_percent_encodes_plain_values() {
        let out = fill_template_with_params("{{a}}-{{b}}", &params(&[("a", "x y"), ("b", "z")]))
            .unwrap();
        assert_eq!(out, "x%20y-z");
    }

    #[test]
    fn fill_does_not_double_encode() {
        let out = fill_template_with_params("q={{a}}", &params(&[("a", "x%20y")])).unwrap();
        assert_eq!(out, "q=x%20y");
    }

    #[test]
    fn fill_replaces_every_occurrence() {
        let out =
            fill_template_with_params("{{a}}/{{a}}", &params(&[("a", "7")])).unwrap();
        assert_eq!(out, "7/7");
    }

    #[test]
    fn unresolved_placeholder_is_an_error() {
        let err = fill_template_with_params("q={{missing}}", &params(&[])).unwrap_err();
        assert!(err.message.contains("Invalid template"));
    }

    #[test]
    fn content_script_placeholders_pass_through_renamed() {
        let out = fill_template_with_params(
            "csrf={{cs_csrfToken}}&q={{a}}",
            &params(&[("a", "rust")]),
        )
        .unwrap();
        assert_eq!(out, "csrf={{csrfToken}}&q=rust");
    }
}
