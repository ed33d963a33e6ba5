// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wiring a control to a pointer surface.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::control::Control;
use crate::event::ControlId;
use crate::gesture::GestureMapper;

use super::{ListenerGuard, PointerEvent, PointerSurface};

/// A control attached to a surface.
///
/// Dropping the mount (including during unwinding) detaches the control's
/// listeners from the surface.
#[derive(Debug)]
pub struct Mount {
    control_id: ControlId,
    guard: ListenerGuard,
}

impl Mount {
    /// Returns the mounted control's identifier.
    #[must_use]
    pub fn control_id(&self) -> ControlId {
        self.control_id
    }

    /// Returns `true` while the control still receives pointer events.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.guard.is_attached()
    }

    /// Detaches the control from the surface.
    pub fn unmount(self) {
        tracing::debug!(control = %self.control_id, "Unmounting control");
        drop(self);
    }
}

/// Attaches `control` to `surface`.
///
/// Presses start a gesture only inside the control's bounds; moves and
/// releases are handled wherever they happen, so a drag that leaves the
/// control still ends when the pointer goes up.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use tactile_lib::bus::RecordingBus;
/// use tactile_lib::config::ControlConfig;
/// use tactile_lib::control::Control;
/// use tactile_lib::surface::{PointerEvent, PointerSurface, mount};
/// use tactile_lib::types::{Bounds, PointerSample};
///
/// let surface = PointerSurface::new();
/// let mut slider = Control::slider(
///     ControlConfig::shutter("cover.patio"),
///     Arc::new(RecordingBus::new()),
/// )?;
/// slider.set_bounds(Bounds::new(0.0, 0.0, 100.0, 10.0));
/// let slider = Arc::new(Mutex::new(slider));
///
/// let mounted = mount(Arc::clone(&slider), &surface);
/// surface.dispatch(&PointerEvent::Down(PointerSample::new(40.0, 5.0, 0)));
/// surface.dispatch(&PointerEvent::Up(PointerSample::new(400.0, 300.0, 10)));
/// assert!(!slider.lock().is_dragging());
///
/// mounted.unmount();
/// assert_eq!(surface.listener_count(), 0);
/// # Ok::<(), tactile_lib::Error>(())
/// ```
pub fn mount<M>(control: Arc<Mutex<Control<M>>>, surface: &PointerSurface) -> Mount
where
    M: GestureMapper + 'static,
{
    let control_id = control.lock().id();
    tracing::debug!(control = %control_id, "Mounting control");

    let guard = surface.attach(move |event: &PointerEvent| {
        let mut control = control.lock();
        match event {
            PointerEvent::Down(sample) => {
                if control.bounds().contains_sample(sample) {
                    control.gesture_start(sample);
                }
            }
            PointerEvent::Move(sample) => {
                control.gesture_move(sample);
            }
            PointerEvent::Up(sample) => {
                control.gesture_end(sample.timestamp_ms);
            }
        }
    });

    Mount { control_id, guard }
}
