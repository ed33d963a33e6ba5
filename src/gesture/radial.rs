// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Radial mapping for rotary knobs.

use crate::error::InputError;
use crate::types::{Bounds, PointerSample};

use super::GestureMapper;

/// Total sweep of the knob arc in degrees.
pub const ARC_SWEEP_DEGREES: f64 = 270.0;

/// Half of the arc: the knob travels from `-135°` to `+135°` around the top.
pub const ARC_HALF_SWEEP_DEGREES: f64 = ARC_SWEEP_DEGREES / 2.0;

/// Maps the pointer angle around the bounds center onto a 270° arc.
///
/// Straight up is the zero reference. The bottom 90° of the circle is a
/// dead zone: samples there clamp to whichever end of the arc they are
/// past, they never wrap around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RadialMapper;

impl RadialMapper {
    /// Creates a radial mapper.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the pointer angle relative to straight up, in `(-180, 180]`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFinite` for non-finite coordinates and
    /// `InputError::DegenerateVector` when the sample is on the center.
    pub fn effective_angle(sample: &PointerSample, bounds: &Bounds) -> Result<f64, InputError> {
        if !sample.is_finite() {
            return Err(InputError::NonFinite);
        }
        let (cx, cy) = bounds.center();
        let dx = sample.x - cx;
        let dy = sample.y - cy;
        if !dx.is_finite() || !dy.is_finite() {
            return Err(InputError::NonFinite);
        }
        if dx == 0.0 && dy == 0.0 {
            return Err(InputError::DegenerateVector);
        }

        let angle = dy.atan2(dx).to_degrees() + 90.0;
        Ok(if angle > 180.0 { angle - 360.0 } else { angle })
    }

    /// Clamps an effective angle onto the arc.
    #[must_use]
    pub fn clamp_to_arc(angle: f64) -> f64 {
        angle.clamp(-ARC_HALF_SWEEP_DEGREES, ARC_HALF_SWEEP_DEGREES)
    }

    /// Returns the arc angle, in degrees, of a normalized position.
    #[must_use]
    pub fn angle_at(position: f64) -> f64 {
        -ARC_HALF_SWEEP_DEGREES + position.clamp(0.0, 1.0) * ARC_SWEEP_DEGREES
    }
}

impl GestureMapper for RadialMapper {
    fn normalize(&self, sample: &PointerSample, bounds: &Bounds) -> Result<f64, InputError> {
        let angle = Self::clamp_to_arc(Self::effective_angle(sample, bounds)?);
        Ok((angle + ARC_HALF_SWEEP_DEGREES) / ARC_SWEEP_DEGREES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOB: Bounds = Bounds::new(-100.0, -100.0, 200.0, 200.0);

    fn at(x: f64, y: f64) -> PointerSample {
        PointerSample::new(x, y, 0)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn top_is_zero_degrees() {
        let angle = RadialMapper::effective_angle(&at(0.0, -50.0), &KNOB).unwrap();
        assert!(approx(angle, 0.0));
    }

    #[test]
    fn right_is_ninety_degrees() {
        let angle = RadialMapper::effective_angle(&at(50.0, 0.0), &KNOB).unwrap();
        assert!(approx(angle, 90.0));
    }

    #[test]
    fn left_is_minus_ninety_degrees() {
        let angle = RadialMapper::effective_angle(&at(-50.0, 0.0), &KNOB).unwrap();
        assert!(approx(angle, -90.0));
    }

    #[test]
    fn bottom_wraps_to_one_eighty() {
        let angle = RadialMapper::effective_angle(&at(0.0, 50.0), &KNOB).unwrap();
        assert!(approx(angle, 180.0));
    }

    #[test]
    fn diagonals_hit_arc_ends() {
        let lower_left = RadialMapper::effective_angle(&at(-50.0, 50.0), &KNOB).unwrap();
        let lower_right = RadialMapper::effective_angle(&at(50.0, 50.0), &KNOB).unwrap();
        assert!(approx(lower_left, -135.0));
        assert!(approx(lower_right, 135.0));
    }

    #[test]
    fn normalize_arc_positions() {
        let m = RadialMapper::new();
        assert!(approx(m.normalize(&at(0.0, -50.0), &KNOB).unwrap(), 0.5));
        assert!(approx(m.normalize(&at(-50.0, 50.0), &KNOB).unwrap(), 0.0));
        assert!(approx(m.normalize(&at(50.0, 50.0), &KNOB).unwrap(), 1.0));
    }

    #[test]
    fn dead_zone_clamps_instead_of_wrapping() {
        let m = RadialMapper::new();
        // Just left of straight down: -170°
        let left = m.normalize(&at(-10.0, 57.0), &KNOB).unwrap();
        // Just right of straight down: +170°
        let right = m.normalize(&at(10.0, 57.0), &KNOB).unwrap();
        assert!(approx(left, 0.0));
        assert!(approx(right, 1.0));
    }

    #[test]
    fn every_angle_stays_in_unit_range() {
        let m = RadialMapper::new();
        for deg in 0..360 {
            let rad = f64::from(deg).to_radians();
            let p = m
                .normalize(&at(80.0 * rad.cos(), 80.0 * rad.sin()), &KNOB)
                .unwrap();
            assert!((0.0..=1.0).contains(&p), "deg = {deg}, p = {p}");
        }
    }

    #[test]
    fn center_sample_is_degenerate() {
        let m = RadialMapper::new();
        assert_eq!(
            m.normalize(&at(0.0, 0.0), &KNOB),
            Err(InputError::DegenerateVector)
        );
    }

    #[test]
    fn non_finite_sample_is_rejected() {
        let m = RadialMapper::new();
        assert_eq!(
            m.normalize(&at(f64::NAN, 0.0), &KNOB),
            Err(InputError::NonFinite)
        );
    }

    #[test]
    fn angle_at_inverts_normalize() {
        assert!(approx(RadialMapper::angle_at(0.0), -135.0));
        assert!(approx(RadialMapper::angle_at(0.5), 0.0));
        assert!(approx(RadialMapper::angle_at(1.0), 135.0));
    }
}
