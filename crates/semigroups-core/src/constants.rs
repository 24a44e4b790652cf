// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Extended Integers and Three-Valued Logic
//!
//! Native combinatorics libraries commonly reserve the top few bit patterns of
//! an integer type as markers: `UNDEFINED` is `MAX`, `POSITIVE_INFINITY` is
//! `MAX - 1`, `LIMIT_MAX` is `MAX - 2`, and (for signed types)
//! `NEGATIVE_INFINITY` is `MIN`. Passing such values around as plain integers
//! makes it easy to confuse a marker with a real quantity.
//!
//! `Extended<T>` lifts these markers into a tagged sum type so that a position,
//! a size or a limit can only be read after matching on it.
//!
//! ## Ordering
//!
//! The variants are totally ordered, with the exception of `Undefined`:
//!
//! `NegativeInfinity < Finite(_) < LimitMax < PositiveInfinity`
//!
//! Finite values compare by value. `Undefined` equals itself and is
//! incomparable with every other variant (`partial_cmp` returns `None`).
//!
//! ## Usage
//!
//! ```rust
//! use semigroups_core::constants::Extended;
//!
//! let a = Extended::Finite(10u32);
//! assert!(a < Extended::LimitMax);
//! assert!(Extended::<u32>::LimitMax < Extended::PositiveInfinity);
//! assert_eq!(Extended::<u32>::Undefined.partial_cmp(&a), None);
//!
//! // Round-trip through the native bit patterns.
//! assert_eq!(Extended::from_raw(u32::MAX), Extended::Undefined);
//! assert_eq!(Extended::<u32>::PositiveInfinity.to_raw(), u32::MAX - 1);
//! ```

use num_traits::PrimInt;
use std::cmp::Ordering;

/// An integer extended with out-of-band markers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Extended<T> {
    /// An ordinary value.
    Finite(T),
    /// No value, e.g. the position of an element that is not present.
    Undefined,
    /// Larger than every finite value and than `LimitMax`.
    PositiveInfinity,
    /// Smaller than every finite value.
    NegativeInfinity,
    /// The largest admissible limit; used as "no limit" by bounded requests.
    LimitMax,
}

impl<T> Extended<T> {
    #[inline]
    pub const fn undefined() -> Self {
        Extended::Undefined
    }

    #[inline]
    pub const fn positive_infinity() -> Self {
        Extended::PositiveInfinity
    }

    #[inline]
    pub const fn negative_infinity() -> Self {
        Extended::NegativeInfinity
    }

    #[inline]
    pub const fn limit_max() -> Self {
        Extended::LimitMax
    }

    #[inline]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Extended::Finite(_))
    }

    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Extended::Undefined)
    }

    /// Returns the finite value, if any.
    #[inline]
    pub fn finite(self) -> Option<T> {
        match self {
            Extended::Finite(value) => Some(value),
            _ => None,
        }
    }

    /// Rank used for cross-variant comparison; `None` for `Undefined`.
    #[inline]
    const fn rank(&self) -> Option<u8> {
        match self {
            Extended::NegativeInfinity => Some(0),
            Extended::Finite(_) => Some(1),
            Extended::LimitMax => Some(2),
            Extended::PositiveInfinity => Some(3),
            Extended::Undefined => None,
        }
    }
}

impl<T> Extended<T>
where
    T: PrimInt,
{
    /// Interprets a native bit pattern.
    ///
    /// `MAX` is `Undefined`, `MAX - 1` is `PositiveInfinity`, `MAX - 2` is
    /// `LimitMax`, and `MIN` of a signed type is `NegativeInfinity`.
    pub fn from_raw(value: T) -> Self {
        let max = T::max_value();
        if value == max {
            Extended::Undefined
        } else if value == max - T::one() {
            Extended::PositiveInfinity
        } else if value == max - (T::one() + T::one()) {
            Extended::LimitMax
        } else if Self::is_signed() && value == T::min_value() {
            Extended::NegativeInfinity
        } else {
            Extended::Finite(value)
        }
    }

    /// Encodes the value using the native bit patterns of `T`.
    ///
    /// The three largest values of `T` (and `MIN` of a signed type) are
    /// reserved for the sentinels, so `Finite` of one of them does not
    /// survive a round trip through `from_raw`.
    ///
    /// # Panics
    ///
    /// Panics when called on `NegativeInfinity` for an unsigned `T`, which has
    /// no representation. In debug builds, also panics when called on `Finite`
    /// of a reserved value.
    pub fn to_raw(self) -> T {
        let max = T::max_value();
        match self {
            Extended::Finite(value) => {
                debug_assert!(
                    matches!(Self::from_raw(value), Extended::Finite(_)),
                    "called `Extended::to_raw` on `Finite` of a reserved sentinel value"
                );
                value
            }
            Extended::Undefined => max,
            Extended::PositiveInfinity => max - T::one(),
            Extended::LimitMax => max - (T::one() + T::one()),
            Extended::NegativeInfinity => {
                assert!(
                    Self::is_signed(),
                    "called `Extended::to_raw` on `NegativeInfinity` for an unsigned type"
                );
                T::min_value()
            }
        }
    }

    #[inline]
    fn is_signed() -> bool {
        T::min_value() < T::zero()
    }
}

impl<T> PartialOrd for Extended<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Extended::Undefined, Extended::Undefined) => Some(Ordering::Equal),
            (Extended::Finite(a), Extended::Finite(b)) => a.partial_cmp(b),
            _ => {
                let lhs = self.rank()?;
                let rhs = other.rank()?;
                Some(lhs.cmp(&rhs))
            }
        }
    }
}

impl<T> From<T> for Extended<T> {
    #[inline]
    fn from(value: T) -> Self {
        Extended::Finite(value)
    }
}

impl<T> From<Option<T>> for Extended<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Extended::Finite(value),
            None => Extended::Undefined,
        }
    }
}

impl<T> std::fmt::Display for Extended<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extended::Finite(value) => write!(f, "{}", value),
            Extended::Undefined => write!(f, "UNDEFINED"),
            Extended::PositiveInfinity => write!(f, "+∞"),
            Extended::NegativeInfinity => write!(f, "-∞"),
            Extended::LimitMax => write!(f, "LIMIT_MAX"),
        }
    }
}

/// Three-valued logic: a question may be answered, or not yet known.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Tril {
    False,
    True,
    #[default]
    Unknown,
}

impl Tril {
    /// Returns `None` for `Unknown`.
    #[inline]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Tril::False => Some(false),
            Tril::True => Some(true),
            Tril::Unknown => None,
        }
    }

    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Tril::Unknown)
    }
}

impl From<bool> for Tril {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Tril::True } else { Tril::False }
    }
}

impl From<Option<bool>> for Tril {
    #[inline]
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(value) => Tril::from(value),
            None => Tril::Unknown,
        }
    }
}

impl std::fmt::Display for Tril {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tril::False => write!(f, "false"),
            Tril::True => write!(f, "true"),
            Tril::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_finite_values_compare_by_value() {
        let a = Extended::Finite(3 as IntegerType);
        let b = Extended::Finite(7 as IntegerType);
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));
    }

    #[test]
    fn test_cross_variant_ordering() {
        let finite = Extended::Finite(IntegerType::MAX - 10);
        assert!(Extended::NegativeInfinity < finite);
        assert!(finite < Extended::LimitMax);
        assert!(Extended::<IntegerType>::LimitMax < Extended::PositiveInfinity);
        assert!(Extended::<IntegerType>::NegativeInfinity < Extended::PositiveInfinity);
    }

    #[test]
    fn test_undefined_is_incomparable() {
        let u = Extended::<IntegerType>::Undefined;
        assert_eq!(u.partial_cmp(&Extended::Finite(0)), None);
        assert_eq!(u.partial_cmp(&Extended::PositiveInfinity), None);
        assert_eq!(Extended::Finite(0).partial_cmp(&u), None);
        assert_eq!(u.partial_cmp(&u), Some(Ordering::Equal));
        assert!(!(u < Extended::PositiveInfinity));
        assert!(!(u > Extended::NegativeInfinity));
    }

    #[test]
    fn test_from_raw_unsigned() {
        assert_eq!(Extended::from_raw(u8::MAX), Extended::Undefined);
        assert_eq!(Extended::from_raw(u8::MAX - 1), Extended::PositiveInfinity);
        assert_eq!(Extended::from_raw(u8::MAX - 2), Extended::LimitMax);
        assert_eq!(Extended::from_raw(0u8), Extended::Finite(0));
        assert_eq!(Extended::from_raw(17u8), Extended::Finite(17));
    }

    #[test]
    fn test_from_raw_signed_negative_infinity() {
        assert_eq!(
            Extended::from_raw(IntegerType::MIN),
            Extended::NegativeInfinity
        );
        assert_eq!(Extended::from_raw(-1 as IntegerType), Extended::Finite(-1));
    }

    #[test]
    fn test_to_raw_matches_native_layout() {
        assert_eq!(Extended::<u32>::Undefined.to_raw(), u32::MAX);
        assert_eq!(Extended::<u32>::PositiveInfinity.to_raw(), u32::MAX - 1);
        assert_eq!(Extended::<u32>::LimitMax.to_raw(), u32::MAX - 2);
        assert_eq!(
            Extended::<IntegerType>::NegativeInfinity.to_raw(),
            IntegerType::MIN
        );
        assert_eq!(Extended::Finite(5u16).to_raw(), 5);
    }

    #[test]
    #[should_panic(expected = "unsigned type")]
    fn test_to_raw_negative_infinity_unsigned_panics() {
        let _ = Extended::<u64>::NegativeInfinity.to_raw();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "reserved sentinel value")]
    fn test_to_raw_reserved_finite_value_panics() {
        let _ = Extended::Finite(u8::MAX - 1).to_raw();
    }

    #[test]
    fn test_largest_unreserved_value_round_trips() {
        let value = u8::MAX - 3;
        assert_eq!(
            Extended::from_raw(Extended::Finite(value).to_raw()),
            Extended::Finite(value)
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Extended::from(Some(4usize)), Extended::Finite(4));
        assert_eq!(Extended::<usize>::from(None), Extended::Undefined);
        assert_eq!(Extended::Finite(4usize).finite(), Some(4));
        assert_eq!(Extended::<usize>::LimitMax.finite(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Extended::Finite(12 as IntegerType)), "12");
        assert_eq!(format!("{}", Extended::<IntegerType>::Undefined), "UNDEFINED");
        assert_eq!(format!("{}", Extended::<IntegerType>::LimitMax), "LIMIT_MAX");
        assert_eq!(format!("{}", Extended::<IntegerType>::PositiveInfinity), "+∞");
        assert_eq!(format!("{}", Extended::<IntegerType>::NegativeInfinity), "-∞");
    }

    #[test]
    fn test_tril_conversions() {
        assert_eq!(Tril::from(true), Tril::True);
        assert_eq!(Tril::from(false), Tril::False);
        assert_eq!(Tril::from(None), Tril::Unknown);
        assert_eq!(Tril::True.to_bool(), Some(true));
        assert_eq!(Tril::False.to_bool(), Some(false));
        assert_eq!(Tril::Unknown.to_bool(), None);
        assert!(!Tril::default().is_known());
        assert_eq!(format!("{}", Tril::Unknown), "unknown");
    }
}
