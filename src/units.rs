//! This module defines the unit types used for monetary and dimensionless quantities.
use serde::Deserialize;

macro_rules! unit_struct {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Default,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
            derive_more::Display,
        )]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the value is finite and not negative
            pub fn is_finite_non_negative(self) -> bool {
                self.0.is_finite() && self.0 >= 0.0
            }
        }

        impl From<f64> for $name {
            fn from(val: f64) -> Self {
                Self(val)
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                $name(iter.map(|x| x.0).sum())
            }
        }

        impl float_cmp::ApproxEq for $name {
            type Margin = float_cmp::F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                float_cmp::ApproxEq::approx_eq(self.0, other.0, margin)
            }
        }
    };
}

unit_struct!(
    /// Represents a dimensionless quantity, such as a rate or a fraction.
    Dimensionless
);
unit_struct!(
    /// Represents an amount of money, in the value unit of the data it belongs to.
    Money
);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_money_arithmetic() {
        let total: Money = [Money(1.0), Money(2.5)].into_iter().sum();
        assert_approx_eq!(Money, total, Money(3.5));
        assert_approx_eq!(Money, total * Dimensionless(2.0), Money(7.0));
        assert_approx_eq!(Money, total / Dimensionless(2.0), Money(1.75));
        assert_eq!(Money(3.0) - Money(1.0), Money(2.0));
        assert_eq!(Dimensionless(0.5) * Dimensionless(0.5), Dimensionless(0.25));
    }

    #[test]
    fn test_is_finite_non_negative() {
        assert!(Money(0.0).is_finite_non_negative());
        assert!(!Money(-1.0).is_finite_non_negative());
        assert!(!Money(f64::NAN).is_finite_non_negative());
        assert!(!Money(f64::INFINITY).is_finite_non_negative());
    }
}
