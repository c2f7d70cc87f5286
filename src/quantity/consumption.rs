use std::fmt::{Debug, Display, Formatter};

quantity!(KilowattHoursPerKilometre);

impl Display for KilowattHoursPerKilometre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} kWh/km", self.0)
    }
}

impl Debug for KilowattHoursPerKilometre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}kWh/km", self.0)
    }
}
