use ticker_core::Sample;

/// Format a price as `"<value> <currency>"` with a fixed number of decimals.
pub fn format_price(value: Sample, decimals: usize, currency: &str) -> String {
    if currency.is_empty() {
        format!("{value:.decimals$}")
    } else {
        format!("{value:.decimals$} {currency}")
    }
}
