use super::*;

#[test]
fn test_plain_substring() {
    assert_eq!(
        metric_type_has_substring("unused_metric"),
        "metric.type = has_substring(\"unused_metric\")"
    );
}

#[test]
fn test_substring_with_path_characters() {
    assert_eq!(
        metric_type_has_substring("custom.googleapis.com/opencensus/"),
        "metric.type = has_substring(\"custom.googleapis.com/opencensus/\")"
    );
}

#[test]
fn test_double_quote_is_escaped() {
    assert_eq!(
        metric_type_has_substring("a\"b"),
        r#"metric.type = has_substring("a\"b")"#
    );
}

#[test]
fn test_backslash_is_escaped() {
    assert_eq!(
        metric_type_has_substring(r"a\b"),
        r#"metric.type = has_substring("a\\b")"#
    );
}

#[test]
fn test_trailing_backslash_cannot_escape_closing_quote() {
    let filter = metric_type_has_substring("x\\");

    assert!(filter.ends_with(r#"("x\\")"#));
}
