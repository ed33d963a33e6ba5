// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cover (shutter/blind) commands.

use serde_json::{Map, Value};

use crate::command::Command;

/// Command addressed at a `cover` entity.
///
/// Fully open is position 100, fully closed is 0.
///
/// # Examples
///
/// ```
/// use tactile_lib::command::{Command, CoverCommand};
///
/// let open = CoverCommand::open();
/// assert_eq!(open, CoverCommand::SetPosition(100));
/// assert_eq!(open.service(), "set_cover_position");
///
/// let stop = CoverCommand::Stop;
/// assert_eq!(stop.service(), "stop_cover");
/// assert!(stop.payload().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverCommand {
    /// Move to a position in percent (0-100).
    SetPosition(u8),
    /// Halt any movement in progress.
    Stop,
}

impl CoverCommand {
    /// Fully open position.
    pub const OPEN_POSITION: u8 = 100;

    /// Fully closed position.
    pub const CLOSED_POSITION: u8 = 0;

    /// Creates a command that opens the cover fully.
    #[must_use]
    pub const fn open() -> Self {
        Self::SetPosition(Self::OPEN_POSITION)
    }

    /// Creates a command that closes the cover fully.
    #[must_use]
    pub const fn close() -> Self {
        Self::SetPosition(Self::CLOSED_POSITION)
    }

    /// Creates a position command, clamping to 0-100 and rounding to the
    /// nearest whole percent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn position(value: f64) -> Self {
        // Safe: clamped to 0-100 before the cast
        Self::SetPosition(value.clamp(0.0, 100.0).round() as u8)
    }
}

impl Command for CoverCommand {
    fn domain(&self) -> &'static str {
        "cover"
    }

    fn service(&self) -> &'static str {
        match self {
            Self::SetPosition(_) => "set_cover_position",
            Self::Stop => "stop_cover",
        }
    }

    fn payload(&self) -> Map<String, Value> {
        let mut data = Map::new();
        if let Self::SetPosition(p) = self {
            data.insert("position".to_string(), Value::from(*p));
        }
        data
    }
}
