// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion of raw pointer samples into normalized control positions.
//!
//! Every control owns one [`GestureMapper`]. The mapper only answers "where
//! along my travel is this sample?" as a number in `[0, 1]`; turning that
//! position into a value is the job of the control's
//! [`ValueDomain`](crate::types::ValueDomain).
//!
//! | Mapper | Control | Geometry |
//! |--------|---------|----------|
//! | [`RadialMapper`] | Thermostat knob | 270° arc around the bounds center |
//! | [`LinearMapper`] | Shutter slider | Fraction of the track length |
//!
//! # Examples
//!
//! ```
//! use tactile_lib::gesture::{GestureMapper, RadialMapper};
//! use tactile_lib::types::{Bounds, PointerSample};
//!
//! let knob = Bounds::new(0.0, 0.0, 200.0, 200.0);
//! // Straight above the center is the middle of the arc
//! let top = PointerSample::new(100.0, 0.0, 0);
//! assert_eq!(RadialMapper::new().normalize(&top, &knob).unwrap(), 0.5);
//! ```

mod linear;
mod radial;

pub use linear::{Axis, LinearMapper};
pub use radial::{ARC_HALF_SWEEP_DEGREES, ARC_SWEEP_DEGREES, RadialMapper};

use crate::error::InputError;
use crate::types::{Bounds, PointerSample};

/// Maps a pointer sample to a normalized position in `[0, 1]`.
///
/// Implementations must never return a value outside `[0, 1]`; samples that
/// cannot be mapped yield an [`InputError`] and are dropped by the caller.
pub trait GestureMapper: Send + Sync {
    /// Returns the normalized position of `sample` relative to `bounds`.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the sample has no meaningful position.
    fn normalize(&self, sample: &PointerSample, bounds: &Bounds) -> Result<f64, InputError>;
}

impl<M: GestureMapper + ?Sized> GestureMapper for Box<M> {
    fn normalize(&self, sample: &PointerSample, bounds: &Bounds) -> Result<f64, InputError> {
        (**self).normalize(sample, bounds)
    }
}
