use std::fmt::{Debug, Display, Formatter};

quantity!(Percent);

impl Percent {
    pub const fn to_proportion(self) -> f64 {
        0.01 * self.0
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} %", self.0)
    }
}

impl Debug for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn to_proportion_ok() {
        assert_relative_eq!(Percent(95.0).to_proportion(), 0.95);
    }
}
