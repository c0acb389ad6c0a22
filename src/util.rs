/// Numeric conversion helpers.
///
/// This module provides the rounding used by integer comparisons in the
/// language and the index-to-time conversions used when rendering sample
/// tables. Every conversion states its behavior for out-of-range input.
pub mod num;
