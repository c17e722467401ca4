/// Decimal places used when no precision is configured (as C's `%f`).
pub const DEFAULT_PRECISION: usize = 6;

/// Format a resolved value for output with a fixed number of decimals.
pub fn format_number(n: f64, precision: usize) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{:.*}", precision, n)
    }
}
