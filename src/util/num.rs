/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: i64 = 9_007_199_254_740_991;

/// Converts an `i64` to `f64` if and only if the conversion is lossless.
///
/// # Errors
/// Returns `Err(error)` if the magnitude exceeds [`MAX_SAFE_INT`].
///
/// # Example
/// ```
/// use geoscript::util::num::{MAX_SAFE_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big"), Ok(42.0));
/// assert!(i64_to_f64_checked(MAX_SAFE_INT + 1, "too big").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_INT.unsigned_abs() {
        return Err(error);
    }
    Ok(value as f64)
}

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// # Errors
/// Returns `Err(error)` if the value is not finite or the truncated result
/// does not fit in an `i64`.
///
/// # Example
/// ```
/// use geoscript::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(2.9, "out of range"), Ok(2));
/// assert_eq!(f64_to_i64_truncated(-2.9, "out of range"), Ok(-2));
/// assert!(f64_to_i64_truncated(f64::INFINITY, "out of range").is_err());
/// ```
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn f64_to_i64_truncated<E>(value: f64, error: E) -> Result<i64, E> {
    let truncated = value.trunc();
    // The exact i64 bounds are not representable as f64; comparing against
    // 2^63 directly keeps the check free of rounding surprises.
    if !truncated.is_finite() || truncated >= 9_223_372_036_854_775_808.0
       || truncated < -9_223_372_036_854_775_808.0
    {
        return Err(error);
    }
    Ok(truncated as i64)
}
