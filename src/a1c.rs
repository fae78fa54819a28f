//! A1C Range Generator
//!
//! Produces the selectable A1C levels (%) for the diabetes lookup. Values are
//! `Decimal` and are computed as `start + i * step` by integer step counting,
//! so no error accumulates and every emitted value compares exactly equal to
//! the same level read from the diabetes table.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Lowest selectable A1C level (6.0 %)
pub const A1C_START: Decimal = Decimal::from_parts(60, 0, 0, false, 1);
/// Highest selectable A1C level (9.9 %)
pub const A1C_STOP: Decimal = Decimal::from_parts(99, 0, 0, false, 1);
/// Step between selectable levels (0.1 %)
pub const A1C_STEP: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Decimal places every emitted value is rounded to
const LEVEL_SCALE: u32 = 1;

/// Finite, ordered sequence of decimal levels.
///
/// Cloning yields an independent iterator positioned at the same place, so a
/// fresh clone of an unstarted range restarts the sequence.
#[derive(Debug, Clone)]
pub struct A1cRange {
    start: Decimal,
    step: Decimal,
    next_index: u32,
    len: u32,
}

impl Iterator for A1cRange {
    type Item = Decimal;

    fn next(&mut self) -> Option<Decimal> {
        if self.next_index >= self.len {
            return None;
        }
        let value = self.start + self.step * Decimal::from(self.next_index);
        self.next_index += 1;
        Some(value.round_dp(LEVEL_SCALE))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.next_index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for A1cRange {}

/// Generate `start, start + step, ...` up to and including `stop`.
///
/// The last value is the largest one `<= stop` reachable from `start` in
/// whole steps. A non-positive `step`, `start > stop`, or a span whose step
/// count overflows gives an empty range.
pub fn generate_range(start: Decimal, stop: Decimal, step: Decimal) -> A1cRange {
    let len = if step <= Decimal::ZERO || start > stop {
        0
    } else {
        stop.checked_sub(start)
            .and_then(|span| span.checked_div(step))
            .and_then(|steps| steps.floor().to_u32())
            .and_then(|steps| steps.checked_add(1))
            .unwrap_or(0)
    };

    A1cRange {
        start,
        step,
        next_index: 0,
        len,
    }
}

/// The selectable A1C levels: 6.0 to 9.9 in 0.1 steps
pub fn a1c_options() -> A1cRange {
    generate_range(A1C_START, A1C_STOP, A1C_STEP)
}
