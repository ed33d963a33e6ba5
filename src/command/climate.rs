// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate (thermostat) commands.

use serde_json::{Map, Value};

use crate::command::Command;

/// Command addressed at a `climate` entity.
///
/// # Examples
///
/// ```
/// use tactile_lib::command::{ClimateCommand, Command};
///
/// let cmd = ClimateCommand::SetTemperature(22.5);
/// assert_eq!(cmd.service(), "set_temperature");
/// assert_eq!(cmd.payload()["temperature"], 22.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimateCommand {
    /// Set the target temperature.
    SetTemperature(f64),
}

impl Command for ClimateCommand {
    fn domain(&self) -> &'static str {
        "climate"
    }

    fn service(&self) -> &'static str {
        match self {
            Self::SetTemperature(_) => "set_temperature",
        }
    }

    fn payload(&self) -> Map<String, Value> {
        let mut data = Map::new();
        match self {
            Self::SetTemperature(t) => {
                data.insert("temperature".to_string(), Value::from(*t));
            }
        }
        data
    }
}
