/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Rounds a double to the nearest integer, halves away from zero.
///
/// Values beyond the `i64` range saturate and `NaN` becomes `0`, so the
/// conversion never fails. This is the rounding used by `eq`, `neq`, `case`
/// and `if`.
///
/// ## Example
/// ```
/// use sythin::util::num::round_to_i64;
///
/// assert_eq!(round_to_i64(2.6), 3);
/// assert_eq!(round_to_i64(-2.5), -3);
/// assert_eq!(round_to_i64(f64::INFINITY), i64::MAX);
/// assert_eq!(round_to_i64(f64::NAN), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}

/// Converts a sample index or sample rate to `f64`.
///
/// Exact for values up to `MAX_SAFE_U64_INT`, which covers any table that
/// fits in memory.
///
/// ## Example
/// ```
/// use sythin::util::num::usize_to_f64;
///
/// assert_eq!(usize_to_f64(48_000), 48_000.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Number of samples covering `seconds` at `sample_rate`, rounded down.
///
/// Negative and `NaN` durations yield `0`.
///
/// ## Example
/// ```
/// use sythin::util::num::sample_count;
///
/// assert_eq!(sample_count(0.5, 48_000), 24_000);
/// assert_eq!(sample_count(-1.0, 48_000), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sample_count(seconds: f64, sample_rate: u32) -> usize {
    let samples = (seconds * f64::from(sample_rate)).floor();
    if samples.is_nan() || samples <= 0.0 {
        return 0;
    }
    samples as usize
}
