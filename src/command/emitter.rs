// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turning local values into outbound service calls.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bus::CommandBus;
use crate::command::{ClimateCommand, Command, CoverCommand, ServiceCall};
use crate::error::ValueError;
use crate::types::ValueDomain;

/// When a control sends its value to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionPolicy {
    /// One call when the gesture ends, nothing while dragging.
    ///
    /// Used for setpoints, where intermediate values are noise.
    OnRelease,
    /// One call per move while dragging, plus the final one on release.
    ///
    /// Used for position actuators that follow the pointer live.
    Continuous,
}

impl fmt::Display for EmissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnRelease => write!(f, "release-emit"),
            Self::Continuous => write!(f, "continuous-emit"),
        }
    }
}

/// Which service a control value is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueCommand {
    /// `climate.set_temperature` with the value as `temperature`.
    ClimateTemperature,
    /// `cover.set_cover_position` with the value as `position`.
    CoverPosition,
}

impl ValueCommand {
    /// Checks that every value of `domain` can be sent unchanged.
    ///
    /// Cover positions are whole percentages, so a cover domain must stay
    /// within 0-100 on a whole-number grid.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` or `ValueError::NotWhole` for a cover
    /// domain the service cannot represent.
    pub fn check_domain(self, domain: &ValueDomain) -> Result<(), ValueError> {
        match self {
            Self::ClimateTemperature => Ok(()),
            Self::CoverPosition => {
                let limits = (
                    f64::from(CoverCommand::CLOSED_POSITION),
                    f64::from(CoverCommand::OPEN_POSITION),
                );
                for (field, actual) in [("min", domain.min()), ("max", domain.max())] {
                    if actual < limits.0 || actual > limits.1 {
                        return Err(ValueError::OutOfRange {
                            field,
                            actual,
                            min: limits.0,
                            max: limits.1,
                        });
                    }
                }
                for (field, actual) in [("min", domain.min()), ("step", domain.step())] {
                    if actual.fract().abs() > f64::EPSILON {
                        return Err(ValueError::NotWhole { field, actual });
                    }
                }
                Ok(())
            }
        }
    }

    /// Builds the service call carrying `value` for `entity_id`.
    #[must_use]
    pub fn to_service_call(self, entity_id: &str, value: f64) -> ServiceCall {
        match self {
            Self::ClimateTemperature => {
                ClimateCommand::SetTemperature(value).to_service_call(entity_id)
            }
            Self::CoverPosition => CoverCommand::position(value).to_service_call(entity_id),
        }
    }
}

/// Sends control values to the command bus according to a policy.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tactile_lib::bus::RecordingBus;
/// use tactile_lib::command::{CommandEmitter, EmissionPolicy, ValueCommand};
///
/// let bus = Arc::new(RecordingBus::new());
/// let emitter = CommandEmitter::new(
///     "climate.living_room",
///     EmissionPolicy::OnRelease,
///     ValueCommand::ClimateTemperature,
///     bus.clone(),
/// );
///
/// assert!(emitter.on_move(23.0).is_none());
/// emitter.on_release(23.5);
/// assert_eq!(bus.len(), 1);
/// ```
#[derive(Clone)]
pub struct CommandEmitter {
    entity_id: String,
    policy: EmissionPolicy,
    command: ValueCommand,
    bus: Arc<dyn CommandBus>,
}

impl CommandEmitter {
    /// Creates an emitter for `entity_id`.
    #[must_use]
    pub fn new(
        entity_id: impl Into<String>,
        policy: EmissionPolicy,
        command: ValueCommand,
        bus: Arc<dyn CommandBus>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            policy,
            command,
            bus,
        }
    }

    /// Returns the target entity.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Returns the emission policy.
    #[must_use]
    pub fn policy(&self) -> EmissionPolicy {
        self.policy
    }

    /// Handles an intermediate value during a drag.
    ///
    /// Returns the call that was sent, if the policy sends on move.
    pub fn on_move(&self, value: f64) -> Option<ServiceCall> {
        match self.policy {
            EmissionPolicy::Continuous => Some(self.emit(value)),
            EmissionPolicy::OnRelease => None,
        }
    }

    /// Handles the final value of a gesture. Always sends.
    pub fn on_release(&self, value: f64) -> ServiceCall {
        self.emit(value)
    }

    /// Sends `value` regardless of policy.
    pub fn emit(&self, value: f64) -> ServiceCall {
        let call = self.command.to_service_call(&self.entity_id, value);
        self.send(call.clone());
        call
    }

    /// Sends an arbitrary command for this emitter's entity.
    pub fn emit_command(&self, command: &impl Command) -> ServiceCall {
        let call = command.to_service_call(&self.entity_id);
        self.send(call.clone());
        call
    }

    fn send(&self, call: ServiceCall) {
        tracing::debug!(
            entity = %self.entity_id,
            domain = %call.domain(),
            service = %call.service(),
            "Sending service call"
        );
        self.bus.send(call);
    }
}

impl fmt::Debug for CommandEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEmitter")
            .field("entity_id", &self.entity_id)
            .field("policy", &self.policy)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}
