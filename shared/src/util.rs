/// Format a price for display with two decimals.
///
/// # Examples
///
/// ```
/// use shared::util::format_price;
///
/// assert_eq!(format_price(12.5), "12.50");
/// assert_eq!(format_price(0.0), "0.00");
/// ```
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}
