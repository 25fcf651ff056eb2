//! Decimal rounding for reported averages and ratios.

/// Mean of `total` over `count`, rounded to one decimal place.
///
/// Returns `None` when `count` is zero.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "reported averages are decimal values rounded to one place"
)]
pub(crate) fn mean_to_tenth(total: i64, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let mean = total as f64 / count as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Change from `previous` to `current` in percent, rounded to one decimal
/// place.
///
/// A rise from zero reports 100; no activity in either period reports 0.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "month-over-month change is a decimal percentage"
)]
pub(crate) fn change_percent(current: usize, previous: usize) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    let ratio = (current as f64 - previous as f64) / previous as f64;
    (ratio * 1000.0).round() / 10.0
}
