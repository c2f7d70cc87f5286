use std::fmt::{Debug, Display, Formatter};

quantity!(KilometresPerHour);

impl Display for KilometresPerHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} km/h", self.0)
    }
}

impl Debug for KilometresPerHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}km/h", self.0)
    }
}

quantity!(MetresPerSecond);

impl From<KilometresPerHour> for MetresPerSecond {
    fn from(speed: KilometresPerHour) -> Self {
        Self(speed.0 / 3.6)
    }
}

impl Display for MetresPerSecond {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} m/s", self.0)
    }
}

impl Debug for MetresPerSecond {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}m/s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn linear_velocity_ok() {
        assert_relative_eq!(MetresPerSecond::from(KilometresPerHour(36.0)).0, 10.0);
    }
}
