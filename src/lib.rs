// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Tactile` Lib - Interaction core for smart-home knob and slider controls.
//!
//! This library turns pointer gestures into device commands and reconciles
//! the locally displayed value with state pushed by the home automation
//! platform, so a control never snaps back while the user is editing it.
//!
//! # Supported Controls
//!
//! - **Thermostat knob**: radial gesture over a 270° arc, commits the
//!   setpoint once on release, 2 s cooldown against stale pushes
//! - **Shutter slider**: linear gesture, sends the position continuously
//!   while dragging, plus open, close and stop buttons
//!
//! # Quick Start
//!
//! ## Knob
//!
//! ```
//! use std::sync::Arc;
//! use tactile_lib::{Control, ControlConfig, PointerSample, RecordingBus};
//! use tactile_lib::types::Bounds;
//!
//! # fn main() -> tactile_lib::Result<()> {
//! let bus = Arc::new(RecordingBus::new());
//! let mut knob = Control::knob(ControlConfig::thermostat("climate.office"), bus.clone())?;
//! knob.set_bounds(Bounds::new(0.0, 0.0, 200.0, 200.0));
//!
//! knob.gesture_start(&PointerSample::new(100.0, 10.0, 0));
//! knob.gesture_move(&PointerSample::new(190.0, 100.0, 40));
//! assert!(bus.is_empty());
//!
//! knob.gesture_end(80);
//! assert_eq!(bus.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Slider Mounted on a Surface
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use tactile_lib::{Control, ControlConfig, PointerEvent, PointerSample, PointerSurface, RecordingBus};
//! use tactile_lib::types::Bounds;
//!
//! # fn main() -> tactile_lib::Result<()> {
//! let bus = Arc::new(RecordingBus::new());
//! let mut slider = Control::slider(ControlConfig::shutter("cover.bedroom"), bus.clone())?;
//! slider.set_bounds(Bounds::new(0.0, 0.0, 100.0, 20.0));
//!
//! let surface = PointerSurface::new();
//! let _mount = tactile_lib::surface::mount(Arc::new(Mutex::new(slider)), &surface);
//!
//! surface.dispatch(&PointerEvent::Down(PointerSample::new(10.0, 10.0, 0)));
//! surface.dispatch(&PointerEvent::Move(PointerSample::new(50.0, 10.0, 16)));
//! surface.dispatch(&PointerEvent::Up(PointerSample::new(50.0, 10.0, 32)));
//!
//! // One call for the move and one at release
//! assert_eq!(bus.len(), 2);
//! assert_eq!(bus.calls()[1].number("position"), Some(50.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Receiving Device State
//!
//! ```
//! use std::sync::Arc;
//! use tactile_lib::{Control, ControlConfig, RecordingBus};
//! use tactile_lib::state::{EntityState, StateSnapshot};
//!
//! # fn main() -> tactile_lib::Result<()> {
//! let mut knob = Control::knob(
//!     ControlConfig::thermostat("climate.office"),
//!     Arc::new(RecordingBus::new()),
//! )?;
//!
//! let snapshot = StateSnapshot::new().with(
//!     EntityState::new("climate.office", "heat").with_attribute("temperature", 19.5),
//! );
//! knob.apply_snapshot(&snapshot, 1_000);
//! assert_eq!(knob.value(), 19.5);
//! # Ok(())
//! # }
//! ```

pub mod bus;
pub mod clock;
pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod gesture;
pub mod reconcile;
pub mod session;
pub mod state;
pub mod surface;
pub mod types;
pub mod view;

pub use bus::{ChannelBus, CommandBus, RecordingBus};
pub use command::{
    ClimateCommand, Command, CommandEmitter, CoverCommand, EmissionPolicy, ServiceCall,
    ValueCommand,
};
pub use config::{CardConfig, ControlConfig, ControlKind};
pub use control::{Control, Knob, Slider};
pub use error::{ConfigError, Error, InputError, Result, ValueError};
pub use event::{ControlEvent, ControlId, EventBus};
pub use gesture::{Axis, GestureMapper, LinearMapper, RadialMapper};
pub use reconcile::{AuthoritativeState, ReconcileOutcome};
pub use session::{InteractionSession, SessionState};
pub use surface::{ListenerGuard, Mount, PointerEvent, PointerSurface};
pub use types::{ControlReading, PointerSample, ReadingSource, ValueDomain};
