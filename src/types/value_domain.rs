// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Legal range and step quantum of a continuous control.
//!
//! A [`ValueDomain`] is validated once at construction. Afterwards every
//! operation is a pure function of its input; callers must not pass NaN or
//! infinite values (checked in debug builds only).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Relative tolerance used when comparing quantized values.
const STEP_EPSILON: f64 = 1e-6;

/// Range `[min, max]` and quantization step of a control value.
///
/// # Examples
///
/// ```
/// use tactile_lib::types::ValueDomain;
///
/// let domain = ValueDomain::new(16.0, 32.0, 0.5).unwrap();
/// assert_eq!(domain.clamp(40.0), 32.0);
/// assert_eq!(domain.quantize(21.3), 21.5);
/// assert_eq!(domain.from_normalized(0.5), 24.0);
///
/// // Invalid domains are rejected
/// assert!(ValueDomain::new(10.0, 10.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDomain", into = "RawDomain")]
pub struct ValueDomain {
    min: f64,
    max: f64,
    step: f64,
}

impl ValueDomain {
    /// Setpoint domain of the thermostat knob: 16-32 in half degrees.
    pub const THERMOSTAT: Self = Self {
        min: 16.0,
        max: 32.0,
        step: 0.5,
    };

    /// Position domain of the shutter slider: 0-100 in whole percent.
    pub const POSITION: Self = Self {
        min: 0.0,
        max: 100.0,
        step: 1.0,
    };

    /// Creates a new domain.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if any bound is not finite, if `min >= max`, or
    /// if `step` is not strictly positive.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ValueError> {
        for (field, actual) in [("min", min), ("max", max), ("step", step)] {
            if !actual.is_finite() {
                return Err(ValueError::NonFinite { field, actual });
            }
        }
        if min >= max {
            return Err(ValueError::EmptyRange { min, max });
        }
        if step <= 0.0 {
            return Err(ValueError::NonPositiveStep(step));
        }
        Ok(Self { min, max, step })
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns the quantization step.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Returns the midpoint of the range, quantized.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.quantize(f64::midpoint(self.min, self.max))
    }

    /// Bounds `value` to `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        debug_assert!(value.is_finite(), "clamp called with {value}");
        value.clamp(self.min, self.max)
    }

    /// Rounds `value` to the nearest multiple of `step` above `min`.
    ///
    /// Halfway offsets round away from zero. The result is always inside the
    /// domain; when `max - min` is not a whole number of steps, the largest
    /// reachable value is the last full step below `max`.
    #[must_use]
    pub fn quantize(&self, value: f64) -> f64 {
        debug_assert!(value.is_finite(), "quantize called with {value}");
        let steps = ((value - self.min) / self.step).round();
        let steps = steps.clamp(0.0, self.max_steps());
        self.min + steps * self.step
    }

    /// Maps `value` to its position in `[0, 1]`.
    #[must_use]
    pub fn to_normalized(&self, value: f64) -> f64 {
        debug_assert!(value.is_finite(), "to_normalized called with {value}");
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Maps a position in `[0, 1]` back to a value in the domain.
    ///
    /// Positions outside `[0, 1]` are clamped first. The result is not
    /// quantized; pass it through [`quantize`](Self::quantize) for that.
    #[must_use]
    pub fn from_normalized(&self, position: f64) -> f64 {
        debug_assert!(position.is_finite(), "from_normalized called with {position}");
        self.min + position.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Maps a normalized position straight to a quantized value.
    #[must_use]
    pub fn value_at(&self, position: f64) -> f64 {
        self.quantize(self.from_normalized(position))
    }

    /// Returns `true` if `a` and `b` are the same value within quantization
    /// tolerance.
    #[must_use]
    pub fn same_value(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.step * STEP_EPSILON
    }

    /// Returns `true` if `value` is inside the range and on the step grid.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && value >= self.min
            && value <= self.max
            && self.same_value(self.quantize(value), value)
    }

    fn max_steps(&self) -> f64 {
        ((self.max - self.min) / self.step + STEP_EPSILON).floor()
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] step {}", self.min, self.max, self.step)
    }
}

#[derive(Serialize, Deserialize)]
struct RawDomain {
    min: f64,
    max: f64,
    step: f64,
}

impl TryFrom<RawDomain> for ValueDomain {
    type Error = ValueError;

    fn try_from(raw: RawDomain) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max, raw.step)
    }
}

impl From<ValueDomain> for RawDomain {
    fn from(domain: ValueDomain) -> Self {
        Self {
            min: domain.min,
            max: domain.max,
            step: domain.step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn new_rejects_invalid_domains() {
        assert!(matches!(
            ValueDomain::new(f64::NAN, 1.0, 1.0),
            Err(ValueError::NonFinite { field: "min", .. })
        ));
        assert!(matches!(
            ValueDomain::new(0.0, f64::INFINITY, 1.0),
            Err(ValueError::NonFinite { field: "max", .. })
        ));
        assert!(matches!(
            ValueDomain::new(5.0, 5.0, 1.0),
            Err(ValueError::EmptyRange { .. })
        ));
        assert!(matches!(
            ValueDomain::new(0.0, 1.0, 0.0),
            Err(ValueError::NonPositiveStep(_))
        ));
        assert!(matches!(
            ValueDomain::new(0.0, 1.0, -0.5),
            Err(ValueError::NonPositiveStep(_))
        ));
    }

    #[test]
    fn presets_are_valid() {
        let t = ValueDomain::THERMOSTAT;
        assert_eq!(ValueDomain::new(t.min(), t.max(), t.step()).unwrap(), t);
        let p = ValueDomain::POSITION;
        assert_eq!(ValueDomain::new(p.min(), p.max(), p.step()).unwrap(), p);
    }

    #[test]
    fn clamp_bounds_value() {
        let d = ValueDomain::THERMOSTAT;
        assert!(approx(d.clamp(10.0), 16.0));
        assert!(approx(d.clamp(40.0), 32.0));
        assert!(approx(d.clamp(20.3), 20.3));
    }

    #[test]
    fn quantize_rounds_to_step() {
        let d = ValueDomain::THERMOSTAT;
        assert!(approx(d.quantize(21.2), 21.0));
        assert!(approx(d.quantize(21.3), 21.5));
        assert!(approx(d.quantize(21.74), 21.5));
    }

    #[test]
    fn quantize_rounds_half_away_from_zero() {
        let d = ValueDomain::POSITION;
        assert!(approx(d.quantize(2.5), 3.0));
        assert!(approx(d.quantize(3.5), 4.0));
        let t = ValueDomain::THERMOSTAT;
        assert!(approx(t.quantize(16.25), 16.5));
    }

    #[test]
    fn quantize_stays_in_range() {
        let d = ValueDomain::THERMOSTAT;
        assert!(approx(d.quantize(-100.0), 16.0));
        assert!(approx(d.quantize(100.0), 32.0));
    }

    #[test]
    fn quantize_with_uneven_range_stays_on_grid() {
        let d = ValueDomain::new(0.0, 10.0, 3.0).unwrap();
        assert!(approx(d.quantize(10.0), 9.0));
        assert!(approx(d.quantize(4.4), 3.0));
    }

    #[test]
    fn quantize_is_idempotent() {
        let d = ValueDomain::THERMOSTAT;
        for i in 0..=1000 {
            let p = f64::from(i) / 1000.0;
            let once = d.quantize(d.from_normalized(p));
            assert_eq!(d.quantize(once), once, "p = {p}");
            assert!(d.contains(once), "p = {p}");
        }
    }

    #[test]
    fn normalized_mapping_round_trips_on_grid() {
        let d = ValueDomain::THERMOSTAT;
        let mut v = d.min();
        while v <= d.max() {
            let back = d.value_at(d.to_normalized(v));
            assert!(approx(back, v), "v = {v}, back = {back}");
            v += d.step();
        }
    }

    #[test]
    fn from_normalized_clamps_position() {
        let d = ValueDomain::POSITION;
        assert!(approx(d.from_normalized(-0.5), 0.0));
        assert!(approx(d.from_normalized(1.5), 100.0));
        assert!(approx(d.from_normalized(0.25), 25.0));
    }

    #[test]
    fn midpoint_of_presets() {
        assert!(approx(ValueDomain::THERMOSTAT.midpoint(), 24.0));
        assert!(approx(ValueDomain::POSITION.midpoint(), 50.0));
    }

    #[test]
    fn contains_checks_range_and_grid() {
        let d = ValueDomain::THERMOSTAT;
        assert!(d.contains(22.5));
        assert!(!d.contains(22.3));
        assert!(!d.contains(33.0));
        assert!(!d.contains(f64::NAN));
    }

    #[test]
    fn deserialize_validates() {
        let ok: ValueDomain = serde_json::from_str(r#"{"min":0,"max":10,"step":1}"#).unwrap();
        assert!(approx(ok.max(), 10.0));
        let bad = serde_json::from_str::<ValueDomain>(r#"{"min":10,"max":0,"step":1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(ValueDomain::THERMOSTAT.to_string(), "[16, 32] step 0.5");
    }
}
