// crates/shared-kernel/src/value_objects/counts.rs
use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Number of line terminator bytes (`\n`) observed.
///
/// This is a byte count, not a record count: a final record without a
/// trailing terminator does not contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineCount(u64);

impl LineCount {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Renders the count with `,` thousands separators (`1234567` -> `1,234,567`).
    pub fn to_grouped(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

impl Default for LineCount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Zero for LineCount {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for LineCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<u64> for LineCount {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl AddAssign for LineCount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl AddAssign<u64> for LineCount {
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl Sum for LineCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a LineCount> for LineCount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<u64> for LineCount {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<LineCount> for u64 {
    fn from(count: LineCount) -> Self {
        count.value()
    }
}

impl PartialEq<u64> for LineCount {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

mod display {
    use std::fmt;

    use super::LineCount;

    impl fmt::Display for LineCount {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if f.alternate() {
                write!(f, "{}", self.to_grouped())
            } else {
                write!(f, "{}", self.value())
            }
        }
    }
}
