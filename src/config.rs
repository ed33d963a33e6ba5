// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control configuration.
//!
//! [`ControlConfig`] is the validated, fully explicit form consumed by
//! [`Control::new`](crate::control::Control::new). [`CardConfig`] is the
//! loose form users write in their dashboard, merged onto a preset with
//! [`ControlConfig::from_card`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::{EmissionPolicy, ValueCommand};
use crate::error::ConfigError;
use crate::state::ValueSource;
use crate::types::ValueDomain;

/// Cooldown after a knob release, the estimated round trip of a setpoint
/// confirmation.
pub const THERMOSTAT_COOLDOWN: Duration = Duration::from_millis(2000);

/// The kinds of continuous control this crate drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Rotary setpoint knob for a `climate` entity.
    Thermostat,
    /// Position slider for a `cover` entity.
    Shutter,
}

impl ControlKind {
    /// Returns the entity domain this kind is meant for.
    #[must_use]
    pub const fn entity_domain(self) -> &'static str {
        match self {
            Self::Thermostat => "climate",
            Self::Shutter => "cover",
        }
    }

    /// Returns the default card label.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Thermostat => "Thermostat",
            Self::Shutter => "Shutter",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thermostat => write!(f, "thermostat"),
            Self::Shutter => write!(f, "shutter"),
        }
    }
}

/// Validated configuration of one control instance.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tactile_lib::config::ControlConfig;
/// use tactile_lib::types::ValueDomain;
///
/// let config = ControlConfig::thermostat("climate.bedroom")
///     .with_domain(ValueDomain::new(10.0, 30.0, 0.5).unwrap())
///     .with_cooldown(Duration::from_millis(3000))
///     .with_name("Bedroom");
/// assert!(config.validate().is_ok());
///
/// // The entity is mandatory
/// assert!(ControlConfig::shutter("  ").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Kind of control.
    pub kind: ControlKind,
    /// Target entity identifier.
    pub entity_id: String,
    /// Optional display name overriding the entity's friendly name.
    pub name: Option<String>,
    /// Legal range and step.
    pub domain: ValueDomain,
    /// Window after release during which pushes are suppressed.
    #[serde(with = "duration_ms")]
    pub cooldown: Duration,
    /// When values are sent to the device.
    pub emission: EmissionPolicy,
    /// Which service receives the value.
    pub command: ValueCommand,
    /// Where the value is read from in entity state.
    pub source: ValueSource,
}

impl ControlConfig {
    /// Thermostat knob preset: 16-32 in half degrees, release-emit, 2 s
    /// cooldown, `climate.set_temperature`.
    #[must_use]
    pub fn thermostat(entity_id: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Thermostat,
            entity_id: entity_id.into(),
            name: None,
            domain: ValueDomain::THERMOSTAT,
            cooldown: THERMOSTAT_COOLDOWN,
            emission: EmissionPolicy::OnRelease,
            command: ValueCommand::ClimateTemperature,
            source: ValueSource::climate_temperature(),
        }
    }

    /// Shutter slider preset: 0-100 in whole percent, continuous-emit, no
    /// cooldown, `cover.set_cover_position`.
    #[must_use]
    pub fn shutter(entity_id: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Shutter,
            entity_id: entity_id.into(),
            name: None,
            domain: ValueDomain::POSITION,
            cooldown: Duration::ZERO,
            emission: EmissionPolicy::Continuous,
            command: ValueCommand::CoverPosition,
            source: ValueSource::cover_position(),
        }
    }

    /// Returns the preset for `kind`.
    #[must_use]
    pub fn preset(kind: ControlKind, entity_id: impl Into<String>) -> Self {
        match kind {
            ControlKind::Thermostat => Self::thermostat(entity_id),
            ControlKind::Shutter => Self::shutter(entity_id),
        }
    }

    /// Builds a configuration from a user card on top of the `kind` preset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEntity` if the card names no entity and
    /// `ConfigError::InvalidDomain` if the bound overrides are inconsistent.
    pub fn from_card(kind: ControlKind, card: &CardConfig) -> Result<Self, ConfigError> {
        let entity = card
            .entity
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::MissingEntity)?;

        let mut config = Self::preset(kind, entity);
        let base = config.domain;
        config.domain = ValueDomain::new(
            card.min.unwrap_or(base.min()),
            card.max.unwrap_or(base.max()),
            card.step.unwrap_or(base.step()),
        )?;
        if let Some(ms) = card.cooldown_ms {
            config.cooldown = Duration::from_millis(ms);
        }
        config.name = card.name.clone().filter(|n| !n.trim().is_empty());
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON card and builds a configuration from it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed JSON, otherwise the same
    /// errors as [`from_card`](Self::from_card).
    pub fn from_card_json(kind: ControlKind, json: &str) -> Result<Self, ConfigError> {
        let card: CardConfig = serde_json::from_str(json)?;
        Self::from_card(kind, &card)
    }

    /// Sets the value domain.
    #[must_use]
    pub fn with_domain(mut self, domain: ValueDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the cooldown window.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Sets the emission policy.
    #[must_use]
    pub fn with_emission(mut self, emission: EmissionPolicy) -> Self {
        self.emission = emission;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets where the value is read from.
    #[must_use]
    pub fn with_source(mut self, source: ValueSource) -> Self {
        self.source = source;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEntity` if the entity id is blank and
    /// `ConfigError::InvalidDomain` if the target service cannot carry every
    /// value of the domain unchanged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entity_id.trim().is_empty() {
            return Err(ConfigError::MissingEntity);
        }
        self.command.check_domain(&self.domain)?;
        Ok(())
    }

    /// Returns the value shown before any state is known, inside the domain.
    #[must_use]
    pub fn initial_value(&self) -> f64 {
        let fallback = self.source.fallback();
        if fallback.is_finite() {
            self.domain.quantize(self.domain.clamp(fallback))
        } else {
            self.domain.midpoint()
        }
    }
}

/// Card configuration as written by the user.
///
/// Everything except `entity` is optional; unknown keys (styling, colors)
/// belong to the rendering layer and are ignored here.
///
/// # Examples
///
/// ```
/// use tactile_lib::config::{CardConfig, ControlConfig, ControlKind};
///
/// let card: CardConfig = serde_json::from_str(
///     r##"{"entity": "cover.patio", "name": "Patio", "color": "#fb923c"}"##,
/// ).unwrap();
/// let config = ControlConfig::from_card(ControlKind::Shutter, &card).unwrap();
/// assert_eq!(config.entity_id, "cover.patio");
/// assert_eq!(config.name.as_deref(), Some("Patio"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Target entity. Required.
    #[serde(default)]
    pub entity: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Lower bound override.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound override.
    #[serde(default)]
    pub max: Option<f64>,
    /// Step override.
    #[serde(default)]
    pub step: Option<f64>,
    /// Cooldown override in milliseconds.
    #[serde(default)]
    pub cooldown_ms: Option<u64>,
}

impl CardConfig {
    /// Returns the stub configuration offered by the card picker.
    #[must_use]
    pub fn stub(kind: ControlKind) -> Self {
        Self {
            entity: Some(format!("{}.example", kind.entity_domain())),
            name: (kind == ControlKind::Shutter).then(|| kind.default_label().to_string()),
            ..Self::default()
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
