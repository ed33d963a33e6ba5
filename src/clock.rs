// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall-clock timestamps for hosts that do not supply their own.
//!
//! Every time-dependent operation in this crate takes an explicit
//! millisecond timestamp. These helpers stamp samples and pushes with the
//! current time.

use crate::reconcile::AuthoritativeState;
use crate::types::PointerSample;

/// Returns the current Unix time in milliseconds.
///
/// Times before the epoch read as `0`.
#[must_use]
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Creates a pointer sample stamped with the current time.
#[must_use]
pub fn sample_now(x: f64, y: f64) -> PointerSample {
    PointerSample::new(x, y, now_ms())
}

/// Creates an authoritative push stamped with the current time.
#[must_use]
pub fn push_now(value: f64) -> AuthoritativeState {
    AuthoritativeState::new(value, now_ms())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_2020() {
        assert!(now_ms() > 1_577_836_800_000);
    }

    #[test]
    fn now_is_monotonic_enough() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }

    #[test]
    fn stamped_helpers_use_current_time() {
        let before = now_ms();
        let sample = sample_now(1.0, 2.0);
        let push = push_now(21.5);
        assert!(sample.timestamp_ms >= before);
        assert!(push.received_at_ms >= before);
        assert!((push.value - 21.5).abs() < f64::EPSILON);
    }
}
