use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use crate::quantity::{consumption::KilowattHoursPerKilometre, speed::KilometresPerHour};

quantity!(Kilowatts);

impl Display for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kW", self.0)
    }
}

impl Debug for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}kW", self.0)
    }
}

/// Power sustained at a constant speed spreads out over the distance covered.
impl Div<KilometresPerHour> for Kilowatts {
    type Output = KilowattHoursPerKilometre;

    fn div(self, rhs: KilometresPerHour) -> Self::Output {
        KilowattHoursPerKilometre(self.0 / rhs.0)
    }
}
