// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Listener registry and RAII guards.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::PointerEvent;

/// Unique identifier of an attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

type Handler = Arc<dyn Fn(&PointerEvent) + Send + Sync>;

struct Registry {
    next_id: AtomicU64,
    handlers: RwLock<HashMap<ListenerId, Handler>>,
}

impl Registry {
    fn remove(&self, id: ListenerId) -> bool {
        self.handlers.write().remove(&id).is_some()
    }
}

/// The interactive surface that pointer events are dispatched on.
///
/// Cloning shares the same listener set.
#[derive(Clone)]
pub struct PointerSurface {
    registry: Arc<Registry>,
}

impl PointerSurface {
    /// Creates a surface with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(1),
                handlers: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Attaches a handler for every pointer event on the surface.
    ///
    /// The handler stays attached until the returned guard is dropped.
    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn attach<F>(&self, handler: F) -> ListenerGuard
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        self.registry
            .handlers
            .write()
            .insert(id, Arc::new(handler));
        tracing::trace!(listener = %id, "Attached surface listener");
        ListenerGuard {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Returns the number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.handlers.read().len()
    }

    /// Delivers `event` to every listener. Returns how many were called.
    ///
    /// Handlers run outside the registry lock, so they may attach or detach
    /// listeners themselves.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let handlers: Vec<Handler> = self.registry.handlers.read().values().cloned().collect();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }
}

impl Default for PointerSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PointerSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerSurface")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a surface listener attached; detaches it on drop.
///
/// The guard holds the surface weakly: if the surface goes away first,
/// dropping the guard is a no-op.
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<Registry>,
}

impl ListenerGuard {
    /// Returns the listener's identifier.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns `true` while the listener is still attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.handlers.read().contains_key(&self.id))
    }

    /// Detaches the listener now.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade()
            && registry.remove(self.id)
        {
            tracing::trace!(listener = %self.id, "Detached surface listener");
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("attached", &self.is_attached())
            .finish()
    }
}
