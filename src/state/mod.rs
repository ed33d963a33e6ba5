// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound entity state from the platform.
//!
//! The platform pushes whole state objects; [`EntityState`] mirrors their
//! shape and a [`ValueSource`] pulls the one number a control cares about.
//!
//! # Examples
//!
//! ```
//! use tactile_lib::state::{EntityState, ValueSource};
//!
//! let json = r#"{
//!     "entity_id": "cover.kitchen",
//!     "state": "open",
//!     "attributes": {"current_position": 35}
//! }"#;
//! let entity: EntityState = serde_json::from_str(json).unwrap();
//!
//! let source = ValueSource::cover_position();
//! assert_eq!(source.extract(&entity), 35.0);
//! ```

mod entity_state;
mod value_source;

pub use entity_state::{EntityState, StateSnapshot};
pub use value_source::ValueSource;
