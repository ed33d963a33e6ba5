// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The displayed value of a control and where it came from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Origin of the value currently shown by a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSource {
    /// Set by the user's gesture or a local action (optimistic echo).
    Local,
    /// Set by an authoritative state push from the platform.
    External,
}

impl fmt::Display for ReadingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::External => write!(f, "external"),
        }
    }
}

/// The authoritative "current displayed value" of one control instance.
///
/// Only the interaction session and the reconciler write it; it lives and
/// dies with the control that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlReading {
    value: f64,
    source: ReadingSource,
}

impl ControlReading {
    /// Creates a reading.
    #[must_use]
    pub const fn new(value: f64, source: ReadingSource) -> Self {
        Self { value, source }
    }

    /// Returns the displayed value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns where the displayed value came from.
    #[must_use]
    pub const fn source(&self) -> ReadingSource {
        self.source
    }

    pub(crate) fn set_local(&mut self, value: f64) {
        self.value = value;
        self.source = ReadingSource::Local;
    }

    pub(crate) fn set_external(&mut self, value: f64) {
        self.value = value;
        self.source = ReadingSource::External;
    }
}
