// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting control events.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use super::{ControlEvent, ControlId};

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Broadcasts control events to any number of subscribers.
///
/// Publishing never blocks. A subscriber that falls more than the channel
/// capacity behind loses the oldest events (`RecvError::Lagged`), which is
/// harmless for rendering: the latest [`ControlView`](crate::view::ControlView)
/// is always available from the control itself.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ControlEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering up to `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ControlEvent> {
        self.sender.subscribe()
    }

    /// Subscribes to the events of one control only.
    ///
    /// Useful when several controls share a bus through
    /// [`Control::with_event_bus`](crate::control::Control::with_event_bus).
    #[must_use]
    pub fn subscribe_control(&self, control_id: ControlId) -> ControlSubscription {
        ControlSubscription {
            control_id,
            receiver: self.sender.subscribe(),
        }
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event. Without subscribers the event is discarded.
    pub fn publish(&self, event: ControlEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver filtered to a single control.
#[derive(Debug)]
pub struct ControlSubscription {
    control_id: ControlId,
    receiver: broadcast::Receiver<ControlEvent>,
}

impl ControlSubscription {
    /// Returns the control this subscription follows.
    #[must_use]
    pub fn control_id(&self) -> ControlId {
        self.control_id
    }

    /// Waits for the next event of the control.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Closed` once every sender is gone and
    /// `RecvError::Lagged` if events were dropped for this receiver.
    pub async fn recv(&mut self) -> Result<ControlEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if event.control_id() == self.control_id {
                return Ok(event);
            }
        }
    }

    /// Returns the next buffered event of the control, if any.
    ///
    /// Lagged gaps are skipped.
    pub fn try_recv(&mut self) -> Option<ControlEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.control_id() == self.control_id => return Some(event),
                Ok(_) => {}
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::trace!(control = %self.control_id, missed, "Subscriber lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(control_id: ControlId) -> ControlEvent {
        ControlEvent::DragStarted {
            control_id,
            value: 22.0,
        }
    }

    #[test]
    fn new_bus_has_no_subscribers() {
        assert_eq!(EventBus::new().subscriber_count(), 0);
    }

    #[test]
    fn drop_subscriber_decrements_count() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        EventBus::new().publish(started(ControlId::new()));
    }

    #[tokio::test]
    async fn publish_delivers_to_multiple_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let id = ControlId::new();
        bus.publish(started(id));

        assert_eq!(rx1.recv().await.unwrap().control_id(), id);
        assert_eq!(rx2.recv().await.unwrap().control_id(), id);
    }

    #[test]
    fn clones_share_one_channel() {
        let shared = EventBus::with_capacity(8);
        let knob_bus = shared.clone();
        let _rx = shared.subscribe();
        assert_eq!(knob_bus.subscriber_count(), 1);
    }

    #[test]
    fn control_subscription_filters_other_controls() {
        let bus = EventBus::new();
        let knob = ControlId::new();
        let slider = ControlId::new();
        let mut sub = bus.subscribe_control(slider);

        bus.publish(started(knob));
        bus.publish(started(slider));
        bus.publish(started(knob));

        assert_eq!(sub.try_recv().map(|e| e.control_id()), Some(slider));
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn control_subscription_waits_for_its_control() {
        let bus = EventBus::new();
        let knob = ControlId::new();
        let mut sub = bus.subscribe_control(knob);

        bus.publish(started(ControlId::new()));
        bus.publish(ControlEvent::DragEnded {
            control_id: knob,
            value: 24.0,
        });

        let event = sub.recv().await.unwrap();
        assert!(matches!(event, ControlEvent::DragEnded { value, .. } if value == 24.0));
    }
}
