use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Количество фишек. Обёртка над f64, чтобы не путать с обычными числами.
///
/// Фишки физические, сумма за столом дробная (например, 2.5 при блайнде 5%),
/// поэтому точность – обычная точность f64, без денежной арифметики.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Chips(pub f64);

impl Chips {
    pub const ZERO: Chips = Chips(0.0);

    pub fn new(amount: f64) -> Self {
        Chips(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    pub fn abs(self) -> Chips {
        Chips(self.0.abs())
    }

    /// Меньшее из двух значений.
    pub fn min(self, other: Chips) -> Chips {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }

    /// Большее из двух значений.
    pub fn max(self, other: Chips) -> Chips {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }
}

impl From<f64> for Chips {
    fn from(amount: f64) -> Self {
        Chips(amount)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0 + rhs.0)
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 += rhs.0;
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Self::Output {
        Chips(self.0 - rhs.0)
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        self.0 -= rhs.0;
    }
}

impl Neg for Chips {
    type Output = Chips;

    fn neg(self) -> Self::Output {
        Chips(-self.0)
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a Chips> for Chips {
    fn sum<I: Iterator<Item = &'a Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + *c)
    }
}

// GraphQL видит фишки как обычное число.
#[cfg(not(target_arch = "wasm32"))]
async_graphql::scalar!(Chips);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_and_sum() {
        let a = Chips(10.0);
        let b = Chips(2.5);
        assert_eq!(a.min(b), b);
        assert_eq!(a.max(b), a);

        let total: Chips = [a, b, Chips(0.5)].iter().sum();
        assert_eq!(total, Chips(13.0));
    }

    #[test]
    fn negation_and_abs() {
        let net = Chips(50.0) - Chips(100.0);
        assert_eq!(net, Chips(-50.0));
        assert_eq!(net.abs(), Chips(50.0));
        assert_eq!(-net, Chips(50.0));
        assert!(!net.is_positive());
    }
}
