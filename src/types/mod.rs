// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by every control.
//!
//! # Types
//!
//! - [`ValueDomain`] - Legal range and step quantum, validated at construction
//! - [`PointerSample`] - One pointer/touch position with its timestamp
//! - [`Bounds`] - Screen-space box of a control
//! - [`ControlReading`] - The displayed value and its [`ReadingSource`]

mod pointer;
mod reading;
mod value_domain;

pub use pointer::{Bounds, PointerSample};
pub use reading::{ControlReading, ReadingSource};
pub use value_domain::ValueDomain;
