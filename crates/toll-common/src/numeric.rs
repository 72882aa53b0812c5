//! Decimal rounding.

/// Round to `decimals` places, resolving ties to the even neighbour.
///
/// Ties are judged on the scaled value, so `0.25` rounds to `0.2` and
/// `0.35` rounds to `0.4` as in NumPy-style rounding.
///
/// # Examples
///
/// ```
/// use toll_common::round_to_decimals;
///
/// assert_eq!(round_to_decimals(22.5, 1), 22.5);
/// assert_eq!(round_to_decimals(12.345, 1), 12.3);
/// assert_eq!(round_to_decimals(0.25, 1), 0.2);
/// ```
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}
