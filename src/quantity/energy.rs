use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use crate::quantity::{consumption::KilowattHoursPerKilometre, distance::Kilometres};

quantity!(KilowattHours);

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}kWh", self.0)
    }
}

impl Div<KilowattHoursPerKilometre> for KilowattHours {
    type Output = Kilometres;

    fn div(self, rhs: KilowattHoursPerKilometre) -> Self::Output {
        Kilometres(self.0 / rhs.0)
    }
}
