// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notifications for rendering collaborators.
//!
//! Controls publish a [`ControlEvent`] on every visible change. A renderer
//! subscribes to the [`EventBus`] instead of polling
//! [`Control::view`](crate::control::Control::view).
//!
//! # Examples
//!
//! ```
//! use tactile_lib::event::{ControlEvent, ControlId, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! let control_id = ControlId::new();
//! bus.publish(ControlEvent::DragStarted { control_id, value: 22.0 });
//! assert_eq!(rx.try_recv().unwrap().control_id(), control_id);
//! ```

mod control_event;
mod control_id;
mod event_bus;

pub use control_event::ControlEvent;
pub use control_id::ControlId;
pub use event_bus::{ControlSubscription, EventBus};
