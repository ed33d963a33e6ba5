// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform state objects.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State of one platform entity as pushed by the state feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityState {
    /// Entity identifier, for example `climate.living_room`.
    pub entity_id: String,
    /// Primary state string, for example `"heat"` or `"open"`.
    #[serde(default)]
    pub state: String,
    /// Free-form attributes.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntityState {
    /// Creates a state with no attributes.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns a numeric attribute.
    ///
    /// Numeric strings such as `"21.5"` are accepted; anything that does not
    /// yield a finite number is treated as absent.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        let n = match self.attributes.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        n.is_finite().then_some(n)
    }

    /// Returns the friendly name attribute, if present.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(Value::as_str)
    }
}

/// All entity states known to the platform, keyed by entity id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot {
    states: HashMap<String, EntityState>,
}

impl StateSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a state.
    pub fn insert(&mut self, state: EntityState) {
        self.states.insert(state.entity_id.clone(), state);
    }

    /// Adds a state, builder style.
    #[must_use]
    pub fn with(mut self, state: EntityState) -> Self {
        self.insert(state);
        self
    }

    /// Returns the state of `entity_id`.
    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no entity is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<EntityState> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = EntityState>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for state in iter {
            snapshot.insert(state);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_accepts_numbers_and_numeric_strings() {
        let entity = EntityState::new("climate.x", "heat")
            .with_attribute("temperature", 21.5)
            .with_attribute("target_temp_high", "23.0")
            .with_attribute("hvac_modes", serde_json::json!(["heat", "off"]));
        assert_eq!(entity.number("temperature"), Some(21.5));
        assert_eq!(entity.number("target_temp_high"), Some(23.0));
        assert_eq!(entity.number("hvac_modes"), None);
        assert_eq!(entity.number("missing"), None);
    }

    #[test]
    fn number_rejects_non_finite_strings() {
        let entity = EntityState::new("climate.x", "heat").with_attribute("temperature", "NaN");
        assert_eq!(entity.number("temperature"), None);
    }

    #[test]
    fn deserialize_with_missing_attributes() {
        let entity: EntityState =
            serde_json::from_str(r#"{"entity_id": "cover.a", "state": "closed"}"#).unwrap();
        assert!(entity.attributes.is_empty());
        assert_eq!(entity.state, "closed");
    }

    #[test]
    fn friendly_name() {
        let entity = EntityState::new("cover.a", "open").with_attribute("friendly_name", "Patio");
        assert_eq!(entity.friendly_name(), Some("Patio"));
    }

    #[test]
    fn snapshot_lookup() {
        let snapshot: StateSnapshot = [
            EntityState::new("cover.a", "open"),
            EntityState::new("climate.b", "heat"),
        ]
        .into_iter()
        .collect();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("cover.a").map(|s| s.state.as_str()), Some("open"));
        assert!(snapshot.get("light.c").is_none());
    }

    #[test]
    fn snapshot_deserializes_from_map() {
        let json = r#"{"cover.a": {"entity_id": "cover.a", "state": "open"}}"#;
        let snapshot: StateSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.get("cover.a").is_some());
    }
}
