// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linear mapping for slider tracks.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::types::{Bounds, PointerSample};

use super::GestureMapper;

/// Direction in which a slider track grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Left edge is 0, right edge is 1.
    #[default]
    Horizontal,
    /// Bottom edge is 0, top edge is 1.
    Vertical,
}

/// Maps the pointer position along a track to its fraction of the length.
///
/// Positions past either end of the track clamp to 0 or 1.
///
/// # Examples
///
/// ```
/// use tactile_lib::gesture::{GestureMapper, LinearMapper};
/// use tactile_lib::types::{Bounds, PointerSample};
///
/// let track = Bounds::new(10.0, 0.0, 100.0, 8.0);
/// let mapper = LinearMapper::horizontal();
/// let p = mapper.normalize(&PointerSample::new(35.0, 4.0, 0), &track).unwrap();
/// assert_eq!(p, 0.25);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearMapper {
    axis: Axis,
}

impl LinearMapper {
    /// Creates a mapper for a track along `axis`.
    #[must_use]
    pub const fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// Creates a mapper for a left-to-right track.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Creates a mapper for a bottom-to-top track.
    #[must_use]
    pub const fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Returns the track axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Converts a reading of a native range input (such as a 0-100 range
    /// element) into a normalized position.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFinite` for non-finite input and
    /// `InputError::EmptyBounds` when the native range is empty.
    pub fn native_fraction(raw: f64, range_min: f64, range_max: f64) -> Result<f64, InputError> {
        if !raw.is_finite() || !range_min.is_finite() || !range_max.is_finite() {
            return Err(InputError::NonFinite);
        }
        let span = range_max - range_min;
        if span <= 0.0 {
            return Err(InputError::EmptyBounds);
        }
        Ok(((raw - range_min) / span).clamp(0.0, 1.0))
    }
}

impl GestureMapper for LinearMapper {
    fn normalize(&self, sample: &PointerSample, bounds: &Bounds) -> Result<f64, InputError> {
        if !sample.is_finite() {
            return Err(InputError::NonFinite);
        }
        let fraction = match self.axis {
            Axis::Horizontal => {
                if bounds.width <= 0.0 {
                    return Err(InputError::EmptyBounds);
                }
                (sample.x - bounds.left) / bounds.width
            }
            Axis::Vertical => {
                if bounds.height <= 0.0 {
                    return Err(InputError::EmptyBounds);
                }
                (bounds.top + bounds.height - sample.y) / bounds.height
            }
        };
        if !fraction.is_finite() {
            return Err(InputError::NonFinite);
        }
        Ok(fraction.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: Bounds = Bounds::new(0.0, 0.0, 200.0, 20.0);

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn horizontal_fraction() {
        let m = LinearMapper::horizontal();
        let p = m.normalize(&PointerSample::new(50.0, 10.0, 0), &TRACK).unwrap();
        assert!(approx(p, 0.25));
    }

    #[test]
    fn horizontal_clamps_outside_track() {
        let m = LinearMapper::horizontal();
        let before = m.normalize(&PointerSample::new(-40.0, 90.0, 0), &TRACK).unwrap();
        let after = m.normalize(&PointerSample::new(400.0, -90.0, 0), &TRACK).unwrap();
        assert!(approx(before, 0.0));
        assert!(approx(after, 1.0));
    }

    #[test]
    fn vertical_grows_upwards() {
        let track = Bounds::new(0.0, 0.0, 20.0, 200.0);
        let m = LinearMapper::vertical();
        let bottom = m.normalize(&PointerSample::new(10.0, 200.0, 0), &track).unwrap();
        let upper = m.normalize(&PointerSample::new(10.0, 50.0, 0), &track).unwrap();
        assert!(approx(bottom, 0.0));
        assert!(approx(upper, 0.75));
    }

    #[test]
    fn empty_track_is_rejected() {
        let m = LinearMapper::horizontal();
        let flat = Bounds::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(
            m.normalize(&PointerSample::new(0.0, 0.0, 0), &flat),
            Err(InputError::EmptyBounds)
        );
    }

    #[test]
    fn non_finite_sample_is_rejected() {
        let m = LinearMapper::horizontal();
        assert_eq!(
            m.normalize(&PointerSample::new(f64::INFINITY, 0.0, 0), &TRACK),
            Err(InputError::NonFinite)
        );
    }

    #[test]
    fn native_range_fraction() {
        assert!(approx(LinearMapper::native_fraction(40.0, 0.0, 100.0).unwrap(), 0.4));
        assert!(approx(LinearMapper::native_fraction(140.0, 0.0, 100.0).unwrap(), 1.0));
        assert_eq!(
            LinearMapper::native_fraction(1.0, 5.0, 5.0),
            Err(InputError::EmptyBounds)
        );
    }
}
