// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pointer samples and control geometry, in screen coordinates.

use serde::{Deserialize, Serialize};

/// A single pointer or touch position.
///
/// Samples are ephemeral: produced per pointer event and consumed
/// immediately by a [`GestureMapper`](crate::gesture::GestureMapper).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Horizontal position (grows to the right).
    pub x: f64,
    /// Vertical position (grows downwards).
    pub y: f64,
    /// Event time in milliseconds.
    pub timestamp_ms: u64,
}

impl PointerSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Screen-space bounding box of a control.
///
/// # Examples
///
/// ```
/// use tactile_lib::types::Bounds;
///
/// let knob = Bounds::new(0.0, 0.0, 224.0, 224.0);
/// assert_eq!(knob.center(), (112.0, 112.0));
/// assert!(knob.contains(10.0, 200.0));
/// assert!(!knob.contains(-1.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width, never negative for a laid-out control.
    pub width: f64,
    /// Height, never negative for a laid-out control.
    pub height: f64,
}

impl Bounds {
    /// Creates a bounding box.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns the center point as `(x, y)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Returns `true` if the point lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }

    /// Returns `true` if the sample lies inside the box.
    #[must_use]
    pub fn contains_sample(&self, sample: &PointerSample) -> bool {
        self.contains(sample.x, sample.y)
    }
}
