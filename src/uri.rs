//! Links into the dashboard's chart pages and URL argument coercion.

use crate::config::{Config, DEFAULT_CHART_LABEL};
use serde_json::Value;

/// Build an `<a>` tag pointing at the chart page for a datapoint.
///
/// `secondsago` of `None` or `0` means "use the configured default window".
/// Neither `id` nor `label` is escaped; callers pass trusted values.
pub fn chart_link(
    config: &Config,
    id: &str,
    label: Option<&str>,
    secondsago: Option<i64>,
) -> String {
    let window = match secondsago {
        Some(seconds) if seconds != 0 => seconds.to_string(),
        _ => config.default_chart_seconds.to_string(),
    };

    format!(
        r#"<a href="{}/chart/datapoint/{}?secondsago={}">{}</a>"#,
        config.site_prefix,
        id,
        window,
        label.unwrap_or(DEFAULT_CHART_LABEL)
    )
}

/// Convert a value received as a URL argument to an integer.
///
/// Flags (`true`/`false`), `null`, containers and anything that does not
/// convert cleanly yield `None` rather than an error.
pub fn integerize_arg(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
        Value::String(s) => integerize_str(s),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(f64::trunc)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
    }
}

/// String-only form of [`integerize_arg`] for raw query parameters.
pub fn integerize_str(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}
