// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drag/cooldown state machine of a single control.
//!
//! ```text
//!            gesture start              gesture end
//!   Idle ────────────────▶ Dragging ────────────────▶ Cooldown
//!    ▲                      ▲    │ move                   │
//!    │                      │    └──┘                     │
//!    │                      └──────── gesture start ──────┤
//!    └──────────────── now - released_at >= cooldown ─────┘
//! ```
//!
//! The `Cooldown → Idle` edge is evaluated lazily: no timer runs, the phase
//! is derived from the release timestamp whenever someone asks.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Observable phase of an [`InteractionSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No gesture in progress and no recent release.
    Idle,
    /// A gesture is in progress.
    Dragging,
    /// A gesture ended less than the cooldown window ago.
    Cooldown,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Dragging => write!(f, "dragging"),
            Self::Cooldown => write!(f, "cooldown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging,
    Released { at_ms: u64 },
}

/// Interaction state of one control instance.
///
/// All transitions go through [`begin`](Self::begin) and
/// [`end`](Self::end); nothing else mutates the session, and it is only
/// reset by dropping the control.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tactile_lib::session::{InteractionSession, SessionState};
///
/// let mut session = InteractionSession::new(Duration::from_millis(2000));
/// assert_eq!(session.state(0), SessionState::Idle);
///
/// session.begin();
/// assert_eq!(session.state(100), SessionState::Dragging);
///
/// session.end(1000);
/// assert_eq!(session.state(2999), SessionState::Cooldown);
/// assert_eq!(session.state(3000), SessionState::Idle);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionSession {
    phase: Phase,
    cooldown_ms: u64,
}

impl InteractionSession {
    /// Creates an idle session with the given cooldown window.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            cooldown_ms: u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns the cooldown window.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Returns the phase at time `now_ms`.
    #[must_use]
    pub fn state(&self, now_ms: u64) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Dragging => SessionState::Dragging,
            Phase::Released { at_ms } => {
                if now_ms.saturating_sub(at_ms) >= self.cooldown_ms {
                    SessionState::Idle
                } else {
                    SessionState::Cooldown
                }
            }
        }
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Returns when the last gesture ended, if any.
    #[must_use]
    pub fn last_interaction_at_ms(&self) -> Option<u64> {
        match self.phase {
            Phase::Released { at_ms } => Some(at_ms),
            Phase::Idle | Phase::Dragging => None,
        }
    }

    /// Returns `true` if authoritative state may overwrite the display at
    /// `now_ms`.
    #[must_use]
    pub fn accepts_external(&self, now_ms: u64) -> bool {
        self.state(now_ms) == SessionState::Idle
    }

    /// Starts a gesture. Cancels any running cooldown.
    ///
    /// Returns `false` if a gesture was already in progress.
    pub fn begin(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.phase = Phase::Dragging;
        !was_dragging
    }

    /// Ends the gesture and stamps the release time.
    ///
    /// Returns `false` (and changes nothing) if no gesture was in progress.
    pub fn end(&mut self, now_ms: u64) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.phase = Phase::Released { at_ms: now_ms };
        true
    }
}
