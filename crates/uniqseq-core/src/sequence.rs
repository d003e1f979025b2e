use num_integer::Integer;

use crate::error::{Result, SequenceError};
use crate::step::find_step_u64;

/// Unique index generator over `[offset, offset + size)`.
///
/// Every `size` consecutive draws return each value of the range once, in a
/// fixed shuffled-looking order, after which the cycle repeats identically.
/// Exhaustion is reported by [`BijectiveGenerator::can_next`]; drawing past it
/// never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BijectiveGenerator {
    size: u64,
    step: u64,
    offset: i64,
    counter: u64,
    cursor: u64,
}

impl BijectiveGenerator {
    /// Builds a generator with a searched step and no offset.
    pub fn new(size: u64) -> Self {
        Self::with_options(size, None, 0)
    }

    /// Builds a generator from a desired (not guaranteed) step and an offset.
    ///
    /// `size` is clamped so that every output fits in an `i64`.
    pub fn with_options(size: u64, desired_step: Option<u64>, offset: i64) -> Self {
        let size = size.min(max_size(offset));
        let step = find_step_u64(size, desired_step);
        Self {
            size,
            step,
            offset,
            counter: 0,
            cursor: 0,
        }
    }

    /// Builds a generator from a precomputed `(size, step)` pair.
    pub fn from_parts(size: u64, step: u64, offset: i64) -> Result<Self> {
        if size > max_size(offset) {
            return Err(SequenceError::RangeOverflow { size, offset });
        }
        match size {
            0 if step != 0 => return Err(SequenceError::StepOutOfRange { size, step }),
            1 if step > 1 => return Err(SequenceError::StepOutOfRange { size, step }),
            0 | 1 => {}
            _ => {
                if step >= size {
                    return Err(SequenceError::StepOutOfRange { size, step });
                }
                if step.gcd(&size) != 1 {
                    return Err(SequenceError::NotCoprime { size, step });
                }
            }
        }
        Ok(Self {
            size,
            step,
            offset,
            counter: 0,
            cursor: 0,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Draws consumed since the last reset, capped at `size`.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Whether the next draw is still unique within the current cycle.
    pub fn can_next(&self) -> bool {
        self.size > 0 && self.counter < self.size
    }

    /// Returns the value the next draw yields without advancing.
    pub fn peek(&self) -> i64 {
        if self.size < 2 {
            return self.offset;
        }
        let index = (u128::from(self.step) * u128::from(self.cursor)) % u128::from(self.size);
        // index < size <= u64::MAX
        let index = u64::try_from(index).unwrap_or_default();
        self.offset.saturating_add_unsigned(index)
    }

    /// Draws a value and advances the generator.
    pub fn next(&mut self) -> i64 {
        let value = self.peek();
        if self.size > 0 {
            self.counter = self.counter.saturating_add(1).min(self.size);
            self.cursor += 1;
            if self.cursor == self.size {
                self.cursor = 0;
            }
        }
        value
    }

    /// Draws an index relative to the offset, suitable for slice access.
    pub fn next_index(&mut self) -> usize {
        let value = self.next();
        usize::try_from(value.saturating_sub(self.offset)).unwrap_or_default()
    }

    /// Rewinds the generator to its first value.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.cursor = 0;
    }
}

/// Largest size whose last value `offset + size - 1` still fits in an `i64`.
fn max_size(offset: i64) -> u64 {
    i64::MAX.abs_diff(offset).saturating_add(1)
}
