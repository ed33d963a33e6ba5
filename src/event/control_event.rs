// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control event types.

use crate::command::ServiceCall;
use crate::session::SessionState;
use crate::types::ReadingSource;

use super::ControlId;

/// Events emitted by a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The displayed value changed and the control should be redrawn.
    ValueChanged {
        /// The control that changed.
        control_id: ControlId,
        /// The new displayed value.
        value: f64,
        /// Whether the change came from the user or the device.
        source: ReadingSource,
    },

    /// A gesture started.
    DragStarted {
        /// The control being dragged.
        control_id: ControlId,
        /// Displayed value when the gesture began.
        value: f64,
    },

    /// A gesture ended and its value was committed.
    DragEnded {
        /// The control that was released.
        control_id: ControlId,
        /// The committed value.
        value: f64,
    },

    /// A service call was handed to the command bus.
    CommandSent {
        /// The control that sent it.
        control_id: ControlId,
        /// The call itself.
        call: ServiceCall,
    },

    /// An authoritative push was discarded because the user was busy.
    PushSuppressed {
        /// The control that discarded it.
        control_id: ControlId,
        /// The discarded value.
        value: f64,
        /// Session phase at the time of the push.
        state: SessionState,
    },
}

impl ControlEvent {
    /// Returns the control this event belongs to.
    #[must_use]
    pub fn control_id(&self) -> ControlId {
        match self {
            Self::ValueChanged { control_id, .. }
            | Self::DragStarted { control_id, .. }
            | Self::DragEnded { control_id, .. }
            | Self::CommandSent { control_id, .. }
            | Self::PushSuppressed { control_id, .. } => *control_id,
        }
    }

    /// Returns `true` if the event means the control must be redrawn.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        matches!(
            self,
            Self::ValueChanged { .. } | Self::DragStarted { .. } | Self::DragEnded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_id_for_all_variants() {
        let id = ControlId::new();
        let events = [
            ControlEvent::ValueChanged {
                control_id: id,
                value: 1.0,
                source: ReadingSource::Local,
            },
            ControlEvent::DragStarted {
                control_id: id,
                value: 1.0,
            },
            ControlEvent::DragEnded {
                control_id: id,
                value: 1.0,
            },
            ControlEvent::PushSuppressed {
                control_id: id,
                value: 1.0,
                state: SessionState::Cooldown,
            },
        ];
        for event in events {
            assert_eq!(event.control_id(), id);
        }
    }

    #[test]
    fn suppressed_push_needs_no_render() {
        let event = ControlEvent::PushSuppressed {
            control_id: ControlId::new(),
            value: 1.0,
            state: SessionState::Dragging,
        };
        assert!(!event.needs_render());
    }
}
