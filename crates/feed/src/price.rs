use serde_json::Value;
use ticker_core::{FetchError, Sample};

/// Parse a localised price string such as `"9.123,45 €"`.
///
/// Keeps ASCII digits and `decimal_separator`, drops everything else
/// (currency symbols, thousands separators, whitespace) and parses the rest
/// with `.` as the decimal point.
pub fn parse_localized_price(text: &str, decimal_separator: char) -> Result<Sample, FetchError> {
    let normalised: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == decimal_separator)
        .map(|c| if c == decimal_separator { '.' } else { c })
        .collect();

    if normalised.is_empty() {
        return Err(FetchError::Parse(text.to_string()));
    }

    normalised
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FetchError::Parse(text.to_string()))
}

/// Pull the price out of a JSON object by top-level field name.
///
/// The field may hold a number or a localised string.
pub fn extract_price(body: &Value, field: &str, decimal_separator: char) -> Result<Sample, FetchError> {
    match body.get(field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FetchError::Payload(format!("field '{field}' is not a finite number"))),
        Some(Value::String(s)) => parse_localized_price(s, decimal_separator),
        Some(other) => Err(FetchError::Payload(format!(
            "field '{field}' has unexpected value {other}"
        ))),
        None => Err(FetchError::Payload(format!("missing field '{field}'"))),
    }
}
