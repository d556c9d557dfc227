pub mod pages;
pub mod panels;
pub mod plot;
pub mod results;

/// Format an optional value, `—` when undefined.
pub(crate) fn fmt_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "—".to_string(),
    }
}
