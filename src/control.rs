// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A continuous control: gestures in, service calls out, device state
//! reconciled in between.
//!
//! [`Control`] owns one [`InteractionSession`], one [`ControlReading`] and
//! the mapper, reconciler and emitter that act on them. It is single
//! threaded and every operation is synchronous; the only writers of the
//! displayed value are gesture handlers and [`Control::apply_state`], and
//! the session decides which of them wins.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tactile_lib::bus::RecordingBus;
//! use tactile_lib::config::ControlConfig;
//! use tactile_lib::control::Control;
//! use tactile_lib::reconcile::AuthoritativeState;
//! use tactile_lib::types::{Bounds, PointerSample};
//!
//! let bus = Arc::new(RecordingBus::new());
//! let mut knob = Control::knob(ControlConfig::thermostat("climate.living_room"), bus.clone())?;
//! knob.set_bounds(Bounds::new(0.0, 0.0, 200.0, 200.0));
//!
//! // Press at the top of the arc, release: one call with the midpoint
//! knob.gesture_start(&PointerSample::new(100.0, 10.0, 1_000));
//! knob.gesture_end(1_100);
//! assert_eq!(bus.calls()[0].number("temperature"), Some(24.0));
//!
//! // The device still reports the old setpoint during the cooldown
//! knob.apply_state(AuthoritativeState::new(22.0, 1_500));
//! assert_eq!(knob.value(), 24.0);
//! # Ok::<(), tactile_lib::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::bus::CommandBus;
use crate::command::{CommandEmitter, CoverCommand, ServiceCall, ValueCommand};
use crate::config::{ControlConfig, ControlKind};
use crate::error::ConfigError;
use crate::event::{ControlEvent, ControlId, EventBus};
use crate::gesture::{GestureMapper, LinearMapper, RadialMapper};
use crate::reconcile::{AuthoritativeState, ReconcileOutcome, Reconciler};
use crate::session::{InteractionSession, SessionState};
use crate::state::StateSnapshot;
use crate::types::{Bounds, ControlReading, PointerSample, ReadingSource, ValueDomain};
use crate::view::{ControlView, card_title};

/// Rotary thermostat knob.
pub type Knob = Control<RadialMapper>;

/// Linear shutter slider.
pub type Slider = Control<LinearMapper>;

/// One interactive control instance.
pub struct Control<M = Box<dyn GestureMapper>> {
    id: ControlId,
    config: ControlConfig,
    mapper: M,
    bounds: Bounds,
    session: InteractionSession,
    reading: ControlReading,
    reconciler: Reconciler,
    emitter: CommandEmitter,
    events: EventBus,
    friendly_name: Option<String>,
}

impl Control<RadialMapper> {
    /// Creates a knob.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn knob(config: ControlConfig, bus: Arc<dyn CommandBus>) -> Result<Self, ConfigError> {
        Self::new(config, RadialMapper::new(), bus)
    }
}

impl Control<LinearMapper> {
    /// Creates a horizontal slider.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn slider(config: ControlConfig, bus: Arc<dyn CommandBus>) -> Result<Self, ConfigError> {
        Self::new(config, LinearMapper::horizontal(), bus)
    }
}

impl<M: GestureMapper> Control<M> {
    /// Creates a control. Fails fast on invalid configuration; a control
    /// that fails here never becomes interactive.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEntity` if no entity is configured.
    pub fn new(
        config: ControlConfig,
        mapper: M,
        bus: Arc<dyn CommandBus>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let id = ControlId::new();
        let initial = config.initial_value();
        tracing::debug!(
            control = %id,
            entity = %config.entity_id,
            kind = %config.kind,
            domain = %config.domain,
            policy = %config.emission,
            "Creating control"
        );
        Ok(Self {
            id,
            mapper,
            bounds: Bounds::default(),
            session: InteractionSession::new(config.cooldown),
            reading: ControlReading::new(initial, ReadingSource::External),
            reconciler: Reconciler::new(config.domain),
            emitter: CommandEmitter::new(
                config.entity_id.clone(),
                config.emission,
                config.command,
                bus,
            ),
            events: EventBus::new(),
            friendly_name: None,
            config,
        })
    }

    /// Publishes events on `events` instead of a private bus.
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Returns the instance identifier.
    #[must_use]
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Returns the value domain.
    #[must_use]
    pub fn domain(&self) -> &ValueDomain {
        &self.config.domain
    }

    /// Returns the event bus this control publishes on.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the screen-space bounds used to map gestures.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Updates the screen-space bounds after layout.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Returns the displayed value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.reading.value()
    }

    /// Returns the displayed value and its origin.
    #[must_use]
    pub fn reading(&self) -> ControlReading {
        self.reading
    }

    /// Returns the interaction session.
    #[must_use]
    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    /// Returns the session phase at `now_ms`.
    #[must_use]
    pub fn state(&self, now_ms: u64) -> SessionState {
        self.session.state(now_ms)
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// Returns the read model for renderers at `now_ms`.
    #[must_use]
    pub fn view(&self, now_ms: u64) -> ControlView {
        ControlView {
            value: self.reading.value(),
            position: self.config.domain.to_normalized(self.reading.value()),
            dragging: self.session.is_dragging(),
            state: self.session.state(now_ms),
            source: self.reading.source(),
        }
    }

    /// Returns the card title.
    #[must_use]
    pub fn title(&self) -> String {
        card_title(
            self.config.name.as_deref(),
            self.friendly_name.as_deref(),
            self.config.kind,
        )
    }

    // ========== Gestures ==========

    /// Handles pointer/touch down on the control surface.
    ///
    /// Maps the press position first. If it maps, enters `Dragging`
    /// (cancelling any cooldown) and shows the pressed value; no command is
    /// sent. A press that cannot be mapped, such as one exactly on the knob
    /// center, is dropped without a state transition. Returns `true` if a
    /// gesture started.
    pub fn gesture_start(&mut self, sample: &PointerSample) -> bool {
        if self.session.is_dragging() {
            tracing::trace!(control = %self.id, "Gesture already in progress");
            return false;
        }
        let Some(value) = self.map(sample) else {
            return false;
        };
        self.session.begin();
        tracing::debug!(
            control = %self.id,
            entity = %self.config.entity_id,
            value,
            "Gesture started"
        );
        self.events.publish(ControlEvent::DragStarted {
            control_id: self.id,
            value: self.reading.value(),
        });
        self.set_local(value);
        true
    }

    /// Handles pointer/touch movement anywhere on the surface.
    ///
    /// Ignored unless a gesture is running. Updates the displayed value
    /// immediately and, under continuous emission, sends it. Returns the
    /// new candidate, or `None` if the sample was ignored or dropped.
    pub fn gesture_move(&mut self, sample: &PointerSample) -> Option<f64> {
        if !self.session.is_dragging() {
            return None;
        }
        let value = self.map(sample)?;
        self.set_local(value);
        if let Some(call) = self.emitter.on_move(value) {
            self.command_sent(call);
        }
        Some(value)
    }

    /// Handles pointer/touch up anywhere on the surface, inside the control
    /// or not.
    ///
    /// Commits the last candidate: sends it under either policy and starts
    /// the cooldown. Returns the call, or `None` if no gesture was running.
    pub fn gesture_end(&mut self, now_ms: u64) -> Option<ServiceCall> {
        if !self.session.end(now_ms) {
            return None;
        }
        let value = self.reading.value();
        tracing::debug!(
            control = %self.id,
            entity = %self.config.entity_id,
            value,
            "Gesture ended"
        );
        self.events.publish(ControlEvent::DragEnded {
            control_id: self.id,
            value,
        });
        let call = self.emitter.on_release(value);
        self.command_sent(call.clone());
        Some(call)
    }

    /// Maps a sample to a candidate value, or `None` if it must be dropped.
    fn map(&self, sample: &PointerSample) -> Option<f64> {
        let position = match self.mapper.normalize(sample, &self.bounds) {
            Ok(p) => p,
            Err(e) => {
                tracing::trace!(control = %self.id, error = %e, "Dropping pointer sample");
                return None;
            }
        };
        Some(self.config.domain.value_at(position))
    }

    fn set_local(&mut self, value: f64) {
        let changed = !self.config.domain.same_value(self.reading.value(), value);
        self.reading.set_local(value);
        if changed {
            self.events.publish(ControlEvent::ValueChanged {
                control_id: self.id,
                value,
                source: ReadingSource::Local,
            });
        }
    }

    fn command_sent(&self, call: ServiceCall) {
        self.events.publish(ControlEvent::CommandSent {
            control_id: self.id,
            call,
        });
    }

    // ========== State feed ==========

    /// Handles an authoritative value pushed by the platform.
    ///
    /// While dragging or cooling down the push is discarded without
    /// touching the session or the displayed value.
    pub fn apply_state(&mut self, push: AuthoritativeState) -> ReconcileOutcome {
        let outcome = self
            .reconciler
            .reconcile(&self.session, &mut self.reading, &push);
        match outcome {
            ReconcileOutcome::Applied { previous, value } => {
                tracing::debug!(
                    control = %self.id,
                    entity = %self.config.entity_id,
                    previous,
                    value,
                    "Applied device state"
                );
                self.events.publish(ControlEvent::ValueChanged {
                    control_id: self.id,
                    value,
                    source: ReadingSource::External,
                });
            }
            ReconcileOutcome::Suppressed(state) => {
                tracing::trace!(
                    control = %self.id,
                    value = push.value,
                    state = %state,
                    "Suppressed device state"
                );
                self.events.publish(ControlEvent::PushSuppressed {
                    control_id: self.id,
                    value: push.value,
                    state,
                });
            }
            ReconcileOutcome::Rejected => {
                tracing::debug!(control = %self.id, value = push.value, "Ignoring non-finite state");
            }
            ReconcileOutcome::Unchanged => {}
        }
        outcome
    }

    /// Handles a full platform snapshot received at `now_ms`.
    ///
    /// Returns `None` when the snapshot does not contain the entity; the
    /// control then keeps showing its current (initially fallback) value.
    pub fn apply_snapshot(&mut self, snapshot: &StateSnapshot, now_ms: u64) -> Option<ReconcileOutcome> {
        let Some(entity) = snapshot.get(&self.config.entity_id) else {
            tracing::debug!(
                control = %self.id,
                entity = %self.config.entity_id,
                "Entity has no known state, keeping current value"
            );
            return None;
        };
        if let Some(name) = entity.friendly_name() {
            self.friendly_name = Some(name.to_string());
        }
        let value = self.config.source.extract(entity);
        Some(self.apply_state(AuthoritativeState::new(value, now_ms)))
    }

    // ========== One-shot actions ==========

    /// Jumps to `value` and sends it immediately, outside any gesture.
    ///
    /// Counts as a committed local edit, so a cooldown follows. Ignored
    /// while a gesture is running.
    pub fn set_value(&mut self, value: f64, now_ms: u64) -> Option<ServiceCall> {
        if self.session.is_dragging() || !value.is_finite() {
            return None;
        }
        let value = self.config.domain.quantize(self.config.domain.clamp(value));
        self.set_local(value);
        self.session.begin();
        self.session.end(now_ms);
        let call = self.emitter.emit(value);
        self.command_sent(call.clone());
        Some(call)
    }

    /// Drives the control to its maximum (fully open for a shutter).
    pub fn open(&mut self, now_ms: u64) -> Option<ServiceCall> {
        self.set_value(self.config.domain.max(), now_ms)
    }

    /// Drives the control to its minimum (fully closed for a shutter).
    pub fn close(&mut self, now_ms: u64) -> Option<ServiceCall> {
        self.set_value(self.config.domain.min(), now_ms)
    }

    /// Halts a moving cover. Only cover position controls can stop.
    pub fn stop(&self) -> Option<ServiceCall> {
        if self.config.command != ValueCommand::CoverPosition {
            tracing::debug!(control = %self.id, kind = %self.config.kind, "Stop is not supported");
            return None;
        }
        let call = self.emitter.emit_command(&CoverCommand::Stop);
        self.command_sent(call.clone());
        Some(call)
    }

    /// Returns the kind of control.
    #[must_use]
    pub fn kind(&self) -> ControlKind {
        self.config.kind
    }
}

impl<M> fmt::Debug for Control<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("id", &self.id)
            .field("entity_id", &self.config.entity_id)
            .field("reading", &self.reading)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::RecordingBus;

    const KNOB_BOUNDS: Bounds = Bounds::new(0.0, 0.0, 200.0, 200.0);
    const TRACK: Bounds = Bounds::new(0.0, 0.0, 100.0, 10.0);

    fn knob() -> (Knob, Arc<RecordingBus>) {
        let bus = Arc::new(RecordingBus::new());
        let mut knob = Control::knob(ControlConfig::thermostat("climate.test"), bus.clone()).unwrap();
        knob.set_bounds(KNOB_BOUNDS);
        (knob, bus)
    }

    fn slider() -> (Slider, Arc<RecordingBus>) {
        let bus = Arc::new(RecordingBus::new());
        let mut slider = Control::slider(ControlConfig::shutter("cover.test"), bus.clone()).unwrap();
        slider.set_bounds(TRACK);
        (slider, bus)
    }

    fn at(x: f64, y: f64, t: u64) -> PointerSample {
        PointerSample::new(x, y, t)
    }

    #[test]
    fn new_rejects_missing_entity() {
        let bus = Arc::new(RecordingBus::new());
        let result = Control::knob(ControlConfig::thermostat(""), bus);
        assert!(matches!(result, Err(ConfigError::MissingEntity)));
    }

    #[test]
    fn initial_value_is_fallback() {
        let (knob, _) = knob();
        assert!((knob.value() - 22.0).abs() < f64::EPSILON);
        assert_eq!(knob.state(0), SessionState::Idle);
    }

    #[test]
    fn start_maps_press_without_emitting() {
        let (mut knob, bus) = knob();
        assert!(knob.gesture_start(&at(100.0, 0.0, 0)));
        assert!((knob.value() - 24.0).abs() < f64::EPSILON);
        assert!(knob.is_dragging());
        assert!(bus.is_empty());
    }

    #[test]
    fn second_start_is_ignored() {
        let (mut knob, _) = knob();
        assert!(knob.gesture_start(&at(100.0, 0.0, 0)));
        assert!(!knob.gesture_start(&at(0.0, 100.0, 0)));
        assert!((knob.value() - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let (mut knob, bus) = knob();
        assert_eq!(knob.gesture_move(&at(100.0, 0.0, 0)), None);
        assert!((knob.value() - 22.0).abs() < f64::EPSILON);
        assert!(bus.is_empty());
    }

    #[test]
    fn malformed_sample_keeps_candidate() {
        let (mut knob, _) = knob();
        knob.gesture_start(&at(100.0, 0.0, 0));
        assert_eq!(knob.gesture_move(&at(100.0, 100.0, 10)), None);
        assert_eq!(knob.gesture_move(&at(f64::NAN, 0.0, 20)), None);
        assert!(knob.is_dragging());
        assert!((knob.value() - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn end_without_start_sends_nothing() {
        let (mut knob, bus) = knob();
        assert!(knob.gesture_end(100).is_none());
        assert!(bus.is_empty());
    }

    #[test]
    fn unmappable_press_starts_nothing() {
        let (mut knob, bus) = knob();
        // Exactly on the center: no angle
        assert!(!knob.gesture_start(&at(100.0, 100.0, 0)));
        assert!(!knob.gesture_start(&at(f64::NAN, 10.0, 0)));
        assert_eq!(knob.state(0), SessionState::Idle);
        assert!(knob.gesture_end(50).is_none());
        assert!(bus.is_empty());
        assert_eq!(knob.state(60), SessionState::Idle);
        assert!((knob.value() - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unmappable_press_keeps_accepting_device_state() {
        let (mut knob, _) = knob();
        knob.gesture_start(&at(100.0, 100.0, 0));
        knob.gesture_end(50);
        let outcome = knob.apply_state(AuthoritativeState::new(19.0, 100));
        assert!(outcome.is_applied());
    }

    #[test]
    fn set_value_quantizes_and_starts_cooldown() {
        let (mut knob, bus) = knob();
        let call = knob.set_value(25.3, 1_000).unwrap();
        assert_eq!(call.number("temperature"), Some(25.5));
        assert_eq!(knob.state(1_500), SessionState::Cooldown);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn set_value_is_ignored_while_dragging() {
        let (mut knob, bus) = knob();
        knob.gesture_start(&at(100.0, 0.0, 0));
        assert!(knob.set_value(30.0, 10).is_none());
        assert!(bus.is_empty());
    }

    #[test]
    fn shutter_buttons() {
        let (mut slider, bus) = slider();
        assert_eq!(slider.open(0).unwrap().number("position"), Some(100.0));
        assert!((slider.value() - 100.0).abs() < f64::EPSILON);
        assert_eq!(slider.close(10).unwrap().number("position"), Some(0.0));
        assert_eq!(slider.stop().unwrap().service(), "stop_cover");
        assert_eq!(bus.len(), 3);
    }

    #[test]
    fn knob_cannot_stop() {
        let (knob, bus) = knob();
        assert!(knob.stop().is_none());
        assert!(bus.is_empty());
    }

    #[test]
    fn snapshot_without_entity_keeps_value() {
        let (mut knob, _) = knob();
        assert!(knob.apply_snapshot(&StateSnapshot::new(), 0).is_none());
        assert!((knob.value() - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn snapshot_updates_value_and_title() {
        use crate::state::EntityState;

        let (mut slider, _) = slider();
        let snapshot = StateSnapshot::new().with(
            EntityState::new("cover.test", "open")
                .with_attribute("current_position", 60)
                .with_attribute("friendly_name", "Patio door"),
        );
        let outcome = slider.apply_snapshot(&snapshot, 0).unwrap();
        assert!(outcome.is_applied());
        assert!((slider.value() - 60.0).abs() < f64::EPSILON);
        assert_eq!(slider.title(), "PATIO DOOR");
    }

    #[test]
    fn view_reflects_drag() {
        let (mut knob, _) = knob();
        knob.gesture_start(&at(100.0, 0.0, 0));
        let view = knob.view(0);
        assert!(view.dragging);
        assert_eq!(view.state, SessionState::Dragging);
        assert_eq!(view.source, ReadingSource::Local);
        assert!((view.position - 0.5).abs() < 1e-9);
    }

    #[test]
    fn events_are_published() {
        let (mut knob, _) = knob();
        let mut rx = knob.events().subscribe();
        knob.gesture_start(&at(100.0, 0.0, 0));
        knob.gesture_end(10);

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event.control_id(), knob.id());
            kinds.push(match event {
                ControlEvent::DragStarted { .. } => "start",
                ControlEvent::ValueChanged { .. } => "value",
                ControlEvent::DragEnded { .. } => "end",
                ControlEvent::CommandSent { .. } => "command",
                ControlEvent::PushSuppressed { .. } => "suppressed",
            });
        }
        assert_eq!(kinds, vec!["start", "value", "end", "command"]);
    }
}
