// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface-wide pointer listeners with scoped lifetimes.
//!
//! A drag that leaves a control before release must still end, so controls
//! listen on the whole interactive surface rather than on their own box.
//! Because such listeners outlive any single control's area, every
//! attachment returns a [`ListenerGuard`] that detaches on drop, and a
//! mounted control holds its guards in a [`Mount`].
//!
//! # Examples
//!
//! ```
//! use tactile_lib::surface::{PointerEvent, PointerSurface};
//! use tactile_lib::types::PointerSample;
//!
//! let surface = PointerSurface::new();
//! let guard = surface.attach(|event: &PointerEvent| {
//!     println!("{event:?}");
//! });
//! assert_eq!(surface.listener_count(), 1);
//!
//! surface.dispatch(&PointerEvent::Up(PointerSample::new(0.0, 0.0, 0)));
//!
//! drop(guard);
//! assert_eq!(surface.listener_count(), 0);
//! ```

mod listener;
mod mount;

pub use listener::{ListenerGuard, ListenerId, PointerSurface};
pub use mount::{Mount, mount};

use crate::types::PointerSample;

/// A pointer or touch event delivered to the whole surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Mouse button or finger went down.
    Down(PointerSample),
    /// Pointer moved, pressed or not.
    Move(PointerSample),
    /// Mouse button or finger went up, anywhere on the surface.
    Up(PointerSample),
}

impl PointerEvent {
    /// Returns the sample carried by the event.
    #[must_use]
    pub fn sample(&self) -> &PointerSample {
        match self {
            Self::Down(s) | Self::Move(s) | Self::Up(s) => s,
        }
    }
}
