// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arbitration between local edits and authoritative state pushes.
//!
//! While the user drags, and for a cooldown window after release, pushes
//! from the platform are dropped: the device has not confirmed the new
//! value yet, and applying its stale state would snap the control back.

use serde::{Deserialize, Serialize};

use crate::session::{InteractionSession, SessionState};
use crate::types::{ControlReading, ValueDomain};

/// A value pushed by the external state feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeState {
    /// The device's reported value.
    pub value: f64,
    /// When the push was received, in milliseconds.
    pub received_at_ms: u64,
}

impl AuthoritativeState {
    /// Creates a push.
    #[must_use]
    pub const fn new(value: f64, received_at_ms: u64) -> Self {
        Self {
            value,
            received_at_ms,
        }
    }
}

/// What the reconciler did with a push.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReconcileOutcome {
    /// The displayed value was overwritten; the control must refresh.
    Applied {
        /// Value shown before the push.
        previous: f64,
        /// Value shown now.
        value: f64,
    },
    /// The push matched the displayed value. The reading is marked as
    /// external, but nothing needs to be redrawn.
    Unchanged,
    /// The push arrived while the session was busy and was discarded.
    Suppressed(SessionState),
    /// The pushed value was not a finite number.
    Rejected,
}

impl ReconcileOutcome {
    /// Returns `true` if the displayed value changed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Decides whether an authoritative push may overwrite the display.
///
/// The reconciler holds no state of its own, so repeated and out-of-order
/// pushes are all judged against the same session and reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciler {
    domain: ValueDomain,
}

impl Reconciler {
    /// Creates a reconciler for values in `domain`.
    #[must_use]
    pub const fn new(domain: ValueDomain) -> Self {
        Self { domain }
    }

    /// Applies `push` to `reading` if the session accepts external state.
    ///
    /// Suppressed pushes leave both the session and the reading untouched.
    pub fn reconcile(
        &self,
        session: &InteractionSession,
        reading: &mut ControlReading,
        push: &AuthoritativeState,
    ) -> ReconcileOutcome {
        if !push.value.is_finite() {
            return ReconcileOutcome::Rejected;
        }

        let state = session.state(push.received_at_ms);
        if state != SessionState::Idle {
            return ReconcileOutcome::Suppressed(state);
        }

        let value = self.domain.quantize(self.domain.clamp(push.value));
        let previous = reading.value();
        if self.domain.same_value(previous, value) {
            // The device confirmed what is shown
            reading.set_external(previous);
            return ReconcileOutcome::Unchanged;
        }

        reading.set_external(value);
        ReconcileOutcome::Applied { previous, value }
    }
}
