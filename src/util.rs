/// Checked numeric conversions.
///
/// Conversions between `i64` and `f64` silently lose precision outside the
/// 53-bit mantissa range, so every place the interpreter crosses between the
/// two numeric types goes through these helpers.
pub mod num;
