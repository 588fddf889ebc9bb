use crate::math::pow;
use alloc::vec::Vec;

/// How the value travels from the previous breakpoint to this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Jump to the value at the breakpoint time; hold the previous value until then.
    Set,
    /// Exponential approach. A ramp between values of opposite sign (or from 0)
    /// holds the previous value until the ramp's end.
    Exponential,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    /// Seconds, relative to whatever clock the owner of the automation uses.
    pub time: f64,
    pub value: f64,
    pub segment: Segment,
}

/// A scheduled parameter curve built from breakpoints.
///
/// Breakpoints must be added in non-decreasing time order. Before the first
/// breakpoint the curve sits at its initial value; after the last one it holds
/// the last value.
///
/// ```text
/// value
///   ^      ___________
///   |     /           \___
///   |    /                \
///   +---+------------------+---> time
///     attack decay sustain release
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Automation {
    initial: f64,
    points: Vec<Breakpoint>,
}

impl Automation {
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Automation {
            initial,
            points: Vec::new(),
        }
    }

    fn push(
        &mut self,
        value: f64,
        time: f64,
        segment: Segment,
    ) -> Result<&mut Self, &'static str> {
        if !value.is_finite() || !time.is_finite() || time < 0.0 {
            return Err("Invalid automation breakpoint.");
        }
        if self.points.last().is_some_and(|p| time < p.time) {
            return Err("Automation breakpoints must be in time order.");
        }
        self.points.push(Breakpoint {
            time,
            value,
            segment,
        });
        Ok(self)
    }

    /// # Errors
    ///
    /// Fails for non-finite input or a time earlier than the last breakpoint.
    pub fn set_value_at(&mut self, value: f64, time: f64) -> Result<&mut Self, &'static str> {
        self.push(value, time, Segment::Set)
    }

    /// # Errors
    ///
    /// Fails for a zero target, non-finite input or a time earlier than the last breakpoint.
    // fine for us because only an exact zero has no logarithm
    #[allow(clippy::float_cmp)]
    pub fn exponential_ramp_to(
        &mut self,
        value: f64,
        end_time: f64,
    ) -> Result<&mut Self, &'static str> {
        if value == 0.0 {
            return Err("Exponential ramp target must be non-zero.");
        }
        self.push(value, end_time, Segment::Exponential)
    }

    #[must_use]
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Time of the last breakpoint, or 0 for a constant curve.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time)
    }

    /// Largest value the curve ever takes.
    #[must_use]
    pub fn peak(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.value)
            .fold(self.initial, f64::max)
    }

    /// Evaluates the curve at time `t`.
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        let idx = self.points.partition_point(|p| p.time <= t);
        let (t0, v0) = match idx.checked_sub(1) {
            Some(i) => (self.points[i].time, self.points[i].value),
            None => (0.0, self.initial),
        };
        let Some(next) = self.points.get(idx) else {
            return v0;
        };
        let span = next.time - t0;
        if span <= 0.0 {
            return v0;
        }
        let progress = ((t - t0) / span).clamp(0.0, 1.0);
        match next.segment {
            Segment::Set => v0,
            Segment::Exponential => {
                if v0 * next.value <= 0.0 {
                    v0
                } else {
                    v0 * pow(next.value / v0, progress)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_initial_value_before_first_breakpoint() {
        let mut a = Automation::new(0.25);
        a.set_value_at(1.0, 2.0).unwrap();
        assert_eq!(a.value_at(0.0), 0.25);
        assert_eq!(a.value_at(1.99), 0.25);
        assert_eq!(a.value_at(2.0), 1.0);
        assert_eq!(a.value_at(10.0), 1.0);
    }

    #[test]
    fn exponential_ramp_is_geometric() {
        let mut a = Automation::new(100.0);
        a.set_value_at(100.0, 0.0).unwrap();
        a.exponential_ramp_to(400.0, 1.0).unwrap();
        assert!((a.value_at(0.5) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn exponential_ramp_from_zero_holds() {
        let mut a = Automation::new(0.0);
        a.set_value_at(0.0, 0.0).unwrap();
        a.exponential_ramp_to(0.5, 1.0).unwrap();
        assert_eq!(a.value_at(0.9), 0.0);
        assert_eq!(a.value_at(1.0), 0.5);
    }

    #[test]
    fn rejects_out_of_order_breakpoints() {
        let mut a = Automation::new(0.0);
        a.set_value_at(1.0, 1.0).unwrap();
        assert!(a.set_value_at(0.0, 0.5).is_err());
        assert!(a.exponential_ramp_to(0.0, 2.0).is_err());
    }
}
