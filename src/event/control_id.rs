// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control instance identifier.

use std::fmt;

use uuid::Uuid;

/// Unique identifier of one mounted control instance.
///
/// Two cards bound to the same entity are still two controls with two ids.
///
/// # Examples
///
/// ```
/// use tactile_lib::event::ControlId;
///
/// let id = ControlId::new();
/// assert_ne!(id, ControlId::new());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ControlId(Uuid);

impl ControlId {
    /// Creates a new unique identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ControlId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.simple().to_string()[..8];
        write!(f, "ControlId({short})")
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ControlId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        assert_eq!(ControlId::from_uuid(uuid).as_uuid(), uuid);
        assert_eq!(ControlId::from(uuid), ControlId::from_uuid(uuid));
    }

    #[test]
    fn debug_is_short() {
        let uuid = Uuid::parse_str("a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8").unwrap();
        assert_eq!(format!("{:?}", ControlId::from_uuid(uuid)), "ControlId(a1a2a3a4)");
    }

    #[test]
    fn display_is_hyphenated() {
        let uuid = Uuid::parse_str("a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8").unwrap();
        assert_eq!(
            ControlId::from_uuid(uuid).to_string(),
            "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8"
        );
    }
}
