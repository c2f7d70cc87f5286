use std::fmt::{Debug, Display, Formatter};

use crate::quantity::{consumption::KilowattHoursPerKilometre, energy::KilowattHours};

quantity!(Kilometres);

impl Kilometres {
    pub const fn abs(mut self) -> Self {
        self.0 = self.0.abs();
        self
    }

    /// Round to 0.1 km, the resolution the routing engine is asked for.
    pub fn round_to_tenth(self) -> Self {
        Self((self.0 * 10.0).round() / 10.0)
    }
}

impl Display for Kilometres {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} km", self.0)
    }
}

impl Debug for Kilometres {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}km", self.0)
    }
}

impl std::ops::Mul<KilowattHoursPerKilometre> for Kilometres {
    type Output = KilowattHours;

    fn mul(self, rhs: KilowattHoursPerKilometre) -> Self::Output {
        KilowattHours(self.0 * rhs.0)
    }
}

quantity!(Miles);

impl From<Kilometres> for Miles {
    fn from(kilometres: Kilometres) -> Self {
        Self(kilometres.0 * 0.621_371)
    }
}

impl Display for Miles {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} mi", self.0)
    }
}

impl Debug for Miles {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}mi", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn miles_from_kilometres_ok() {
        assert_relative_eq!(Miles::from(Kilometres(100.0)).0, 62.1371);
    }

    #[test]
    fn round_to_tenth_ok() {
        assert_eq!(Kilometres(482.915_136).round_to_tenth(), Kilometres(482.9));
    }
}
