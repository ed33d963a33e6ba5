// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read model for renderers.
//!
//! Nothing here touches markup: these are the numbers and strings a
//! renderer needs, derived purely from a [`ControlView`].

use serde::{Deserialize, Serialize};

use crate::config::ControlKind;
use crate::gesture::{ARC_HALF_SWEEP_DEGREES, ARC_SWEEP_DEGREES, RadialMapper};
use crate::session::SessionState;
use crate::types::ReadingSource;

/// Number of tick marks drawn around the knob (one every 270/32 degrees).
pub const SCALE_MARK_COUNT: usize = 33;

/// Snapshot of a control for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlView {
    /// Displayed value.
    pub value: f64,
    /// Displayed value mapped to `[0, 1]`.
    pub position: f64,
    /// `true` while a gesture is in progress.
    pub dragging: bool,
    /// Session phase at the time of the snapshot.
    pub state: SessionState,
    /// Origin of the displayed value.
    pub source: ReadingSource,
}

/// One tick on the knob scale ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMark {
    /// Angle from straight up, in degrees.
    pub angle: f64,
    /// `true` if the knob has swept past this mark.
    pub active: bool,
}

/// Geometry and text of the thermostat knob.
///
/// # Examples
///
/// ```
/// use tactile_lib::view::KnobFace;
///
/// let face = KnobFace::new(24.0, 0.5);
/// assert_eq!(face.rotation, 0.0);
/// assert_eq!(face.text, "24.0");
/// assert_eq!(face.marks.iter().filter(|m| m.active).count(), 17);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnobFace {
    /// Rotation of the knob handle in degrees, `-135` to `135`.
    pub rotation: f64,
    /// Counter-rotation that keeps the setpoint label upright.
    pub label_rotation: f64,
    /// Setpoint text with one decimal.
    pub text: String,
    /// Scale ring ticks.
    pub marks: Vec<ScaleMark>,
}

impl KnobFace {
    /// Builds the face for `value` at normalized `position`.
    #[must_use]
    pub fn new(value: f64, position: f64) -> Self {
        let rotation = RadialMapper::angle_at(position);
        Self {
            rotation,
            label_rotation: -rotation,
            text: format!("{value:.1}"),
            marks: scale_marks(rotation),
        }
    }

    /// Builds the face for a control snapshot.
    #[must_use]
    pub fn from_view(view: &ControlView) -> Self {
        Self::new(view.value, view.position)
    }
}

/// Angles of the scale ticks and whether each is lit at `rotation`.
#[allow(clippy::cast_precision_loss)]
fn scale_marks(rotation: f64) -> Vec<ScaleMark> {
    let last = (SCALE_MARK_COUNT - 1) as f64;
    (0..SCALE_MARK_COUNT)
        .map(|i| {
            let angle = i as f64 / last * ARC_SWEEP_DEGREES - ARC_HALF_SWEEP_DEGREES;
            ScaleMark {
                angle,
                active: angle <= rotation,
            }
        })
        .collect()
}

/// Fill bar and status text of the shutter slider.
///
/// # Examples
///
/// ```
/// use tactile_lib::view::SliderFace;
///
/// let face = SliderFace::new(35.0, 0.35);
/// assert_eq!(face.fill_percent, 35.0);
/// assert_eq!(face.status, "35% OPEN");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderFace {
    /// Width of the fill bar in percent of the track.
    pub fill_percent: f64,
    /// Status line, for example `"35% OPEN"`.
    pub status: String,
}

impl SliderFace {
    /// Builds the face for `value` at normalized `position`.
    #[must_use]
    pub fn new(value: f64, position: f64) -> Self {
        Self {
            fill_percent: position.clamp(0.0, 1.0) * 100.0,
            status: format!("{value:.0}% OPEN"),
        }
    }

    /// Builds the face for a control snapshot.
    #[must_use]
    pub fn from_view(view: &ControlView) -> Self {
        Self::new(view.value, view.position)
    }
}

/// Returns the card title: the configured name, else the entity's friendly
/// name, else the kind's default label, upper-cased.
#[must_use]
pub fn card_title(name: Option<&str>, friendly_name: Option<&str>, kind: ControlKind) -> String {
    let present = |n: &&str| !n.trim().is_empty();
    name.filter(present)
        .or(friendly_name.filter(present))
        .unwrap_or(kind.default_label())
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EntityState;

    #[test]
    fn knob_at_min_and_max() {
        let min = KnobFace::new(16.0, 0.0);
        assert!((min.rotation + 135.0).abs() < 1e-9);
        assert_eq!(min.marks.iter().filter(|m| m.active).count(), 1);

        let max = KnobFace::new(32.0, 1.0);
        assert!((max.rotation - 135.0).abs() < 1e-9);
        assert!(max.marks.iter().all(|m| m.active));
    }

    #[test]
    fn knob_label_counter_rotates() {
        let face = KnobFace::new(20.0, 0.25);
        assert!((face.rotation + face.label_rotation).abs() < 1e-9);
        assert_eq!(face.text, "20.0");
    }

    #[test]
    fn scale_marks_span_arc() {
        let marks = scale_marks(0.0);
        assert_eq!(marks.len(), SCALE_MARK_COUNT);
        assert!((marks[0].angle + 135.0).abs() < 1e-9);
        assert!((marks[32].angle - 135.0).abs() < 1e-9);
        assert!((marks[16].angle).abs() < 1e-9);
    }

    #[test]
    fn slider_face_text() {
        let face = SliderFace::new(100.0, 1.0);
        assert_eq!(face.status, "100% OPEN");
        assert!((face.fill_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn title_precedence() {
        let entity = EntityState::new("cover.a", "open").with_attribute("friendly_name", "Patio");
        let friendly = entity.friendly_name();
        assert_eq!(card_title(Some("Kitchen"), friendly, ControlKind::Shutter), "KITCHEN");
        assert_eq!(card_title(None, friendly, ControlKind::Shutter), "PATIO");
        assert_eq!(card_title(Some(" "), None, ControlKind::Shutter), "SHUTTER");
        assert_eq!(card_title(None, None, ControlKind::Thermostat), "THERMOSTAT");
    }
}
