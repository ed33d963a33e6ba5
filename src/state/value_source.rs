// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction of a control value from an entity state.

use serde::{Deserialize, Serialize};

use super::EntityState;

/// Where a control reads its value from.
///
/// Extraction never fails: when the entity does not carry the expected
/// data the documented fallback is returned instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSource {
    /// A numeric attribute, or `fallback` when it is absent.
    Attribute {
        /// Attribute name.
        name: String,
        /// Value used when the attribute is missing.
        fallback: f64,
    },
    /// A numeric attribute, else derived from the primary state string.
    PositionOrOpenState {
        /// Attribute name.
        name: String,
        /// State string meaning "fully open".
        open_state: String,
        /// Value used when the state is `open_state`.
        open_value: f64,
        /// Value used for any other state.
        closed_value: f64,
    },
}

impl ValueSource {
    /// Thermostat setpoint: `temperature`, defaulting to 22.
    #[must_use]
    pub fn climate_temperature() -> Self {
        Self::Attribute {
            name: "temperature".to_string(),
            fallback: 22.0,
        }
    }

    /// Shutter position: `current_position`, else 100 when `open`, else 0.
    #[must_use]
    pub fn cover_position() -> Self {
        Self::PositionOrOpenState {
            name: "current_position".to_string(),
            open_state: "open".to_string(),
            open_value: 100.0,
            closed_value: 0.0,
        }
    }

    /// Returns the value shown when nothing is known about the entity.
    #[must_use]
    pub fn fallback(&self) -> f64 {
        match self {
            Self::Attribute { fallback, .. } => *fallback,
            Self::PositionOrOpenState { closed_value, .. } => *closed_value,
        }
    }

    /// Reads the control value from `entity`.
    #[must_use]
    pub fn extract(&self, entity: &EntityState) -> f64 {
        match self {
            Self::Attribute { name, fallback } => entity.number(name).unwrap_or(*fallback),
            Self::PositionOrOpenState {
                name,
                open_state,
                open_value,
                closed_value,
            } => entity.number(name).unwrap_or(if entity.state == *open_state {
                *open_value
            } else {
                *closed_value
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climate_reads_temperature() {
        let entity = EntityState::new("climate.x", "heat").with_attribute("temperature", 19.5);
        assert_eq!(ValueSource::climate_temperature().extract(&entity), 19.5);
    }

    #[test]
    fn zero_setpoint_is_a_reading_not_a_gap() {
        let entity = EntityState::new("climate.x", "heat").with_attribute("temperature", 0);
        assert_eq!(ValueSource::climate_temperature().extract(&entity), 0.0);
    }

    #[test]
    fn climate_falls_back_to_default() {
        let entity = EntityState::new("climate.x", "off");
        let source = ValueSource::climate_temperature();
        assert_eq!(source.extract(&entity), 22.0);
        assert_eq!(source.fallback(), 22.0);
    }

    #[test]
    fn cover_prefers_position_attribute() {
        let entity = EntityState::new("cover.x", "open").with_attribute("current_position", 42);
        assert_eq!(ValueSource::cover_position().extract(&entity), 42.0);
    }

    #[test]
    fn cover_derives_from_state_string() {
        let source = ValueSource::cover_position();
        assert_eq!(source.extract(&EntityState::new("cover.x", "open")), 100.0);
        assert_eq!(source.extract(&EntityState::new("cover.x", "closed")), 0.0);
        assert_eq!(source.extract(&EntityState::new("cover.x", "unavailable")), 0.0);
    }

    #[test]
    fn serde_tagged_form() {
        let json = serde_json::to_value(ValueSource::climate_temperature()).unwrap();
        assert_eq!(json["kind"], "attribute");
        assert_eq!(json["name"], "temperature");
    }
}
