// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound command bus.
//!
//! The bus is fire-and-forget from the control's point of view: `send`
//! never blocks, returns nothing and is never retried. Delivery belongs to
//! whatever sits behind the bus.
//!
//! # Examples
//!
//! ```
//! use tactile_lib::bus::{ChannelBus, CommandBus};
//! use tactile_lib::command::{Command, CoverCommand};
//!
//! let (bus, mut rx) = ChannelBus::new();
//! bus.send(CoverCommand::Stop.to_service_call("cover.kitchen"));
//!
//! let call = rx.try_recv().unwrap();
//! assert_eq!(call.service(), "stop_cover");
//! ```

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::command::ServiceCall;

/// Destination for service calls produced by controls.
pub trait CommandBus: Send + Sync {
    /// Sends a call without waiting for any acknowledgement.
    fn send(&self, call: ServiceCall);
}

impl<F> CommandBus for F
where
    F: Fn(ServiceCall) + Send + Sync,
{
    fn send(&self, call: ServiceCall) {
        self(call);
    }
}

/// Command bus backed by an unbounded tokio channel.
///
/// The receiving half is typically drained by an async task that forwards
/// calls to the platform connection.
#[derive(Debug, Clone)]
pub struct ChannelBus {
    sender: mpsc::UnboundedSender<ServiceCall>,
}

impl ChannelBus {
    /// Creates a bus and the receiver that drains it.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ServiceCall>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Returns `true` if the receiving half has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl CommandBus for ChannelBus {
    fn send(&self, call: ServiceCall) {
        if let Err(e) = self.sender.send(call) {
            tracing::warn!(
                domain = %e.0.domain(),
                service = %e.0.service(),
                "Command bus receiver dropped, discarding call"
            );
        }
    }
}

/// Command bus that keeps every call in memory.
///
/// Useful for tests and for previews that must not reach a real device.
#[derive(Debug, Default)]
pub struct RecordingBus {
    calls: Mutex<Vec<ServiceCall>>,
}

impl RecordingBus {
    /// Creates an empty recording bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every call sent so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().clone()
    }

    /// Returns the number of calls sent so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns `true` if nothing has been sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Removes and returns every recorded call.
    pub fn take(&self) -> Vec<ServiceCall> {
        std::mem::take(&mut *self.calls.lock())
    }
}

impl CommandBus for RecordingBus {
    fn send(&self, call: ServiceCall) {
        self.calls.lock().push(call);
    }
}
