// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform service commands.
//!
//! Controls never talk to a device directly. They build a [`Command`],
//! turn it into a [`ServiceCall`] addressed at their entity, and hand it to
//! a [`CommandBus`](crate::bus::CommandBus).
//!
//! # Available Commands
//!
//! | Command Type | Service | Payload |
//! |-------------|---------|---------|
//! | [`ClimateCommand::SetTemperature`] | `climate.set_temperature` | `temperature` |
//! | [`CoverCommand::SetPosition`] | `cover.set_cover_position` | `position` |
//! | [`CoverCommand::Stop`] | `cover.stop_cover` | none |
//!
//! # Examples
//!
//! ```
//! use tactile_lib::command::{ClimateCommand, Command};
//!
//! let call = ClimateCommand::SetTemperature(21.5).to_service_call("climate.living_room");
//! assert_eq!(call.domain(), "climate");
//! assert_eq!(call.service(), "set_temperature");
//! assert_eq!(call.entity_id(), Some("climate.living_room"));
//! ```

mod climate;
mod cover;
mod emitter;

pub use climate::ClimateCommand;
pub use cover::CoverCommand;
pub use emitter::{CommandEmitter, EmissionPolicy, ValueCommand};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A command that can be sent to a platform entity.
pub trait Command {
    /// Returns the service domain, for example `"climate"`.
    fn domain(&self) -> &'static str;

    /// Returns the service name within the domain, for example
    /// `"set_temperature"`.
    fn service(&self) -> &'static str;

    /// Returns the service data, excluding the entity id.
    fn payload(&self) -> Map<String, Value>;

    /// Builds the full service call for `entity_id`.
    fn to_service_call(&self, entity_id: &str) -> ServiceCall {
        let mut data = Map::new();
        data.insert("entity_id".to_string(), Value::from(entity_id));
        data.extend(self.payload());
        ServiceCall {
            domain: self.domain().to_string(),
            service: self.service().to_string(),
            data,
        }
    }
}

/// A fully addressed service invocation, ready for the command bus.
///
/// Serializes as `{"domain": ..., "service": ..., "data": {"entity_id": ..., ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    domain: String,
    service: String,
    data: Map<String, Value>,
}

impl ServiceCall {
    /// Returns the service domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the service data, including `entity_id`.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns the target entity.
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.data.get("entity_id").and_then(Value::as_str)
    }

    /// Returns a numeric field of the service data.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        self.data.get(field).and_then(Value::as_f64)
    }
}
