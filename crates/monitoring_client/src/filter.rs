//! Builders for Cloud Monitoring filter expressions.

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

/// Build a filter selecting metric descriptors whose type contains `substring`.
///
/// Backslashes and double quotes in `substring` are escaped so the result is
/// always a single well-formed string literal.
///
/// # Examples
///
/// ```
/// use monitoring_client::filter::metric_type_has_substring;
///
/// assert_eq!(
///     metric_type_has_substring("unused_metric"),
///     r#"metric.type = has_substring("unused_metric")"#
/// );
/// ```
pub fn metric_type_has_substring(substring: &str) -> String {
    format!(
        "metric.type = has_substring(\"{}\")",
        escape_string_literal(substring)
    )
}

fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
