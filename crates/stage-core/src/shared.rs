//! Thread-safe wrapper for hosts that touch the surface from several threads.
//!
//! Put one `SharedStage` in a `static` (e.g. behind a `LazyLock`) to get a
//! single process-wide surface.
//!
//! Lock order is always watchers → manager. `init` and `destroy` hold the
//! watchers lock across the flip and its notification, so no other flip can
//! land while listeners run and every listener sees the flag it was told
//! about. Listeners run after the manager lock has been released, so they
//! may read the stage; they must not call `init`, `destroy`, `subscribe` or
//! `unsubscribe` from inside the callback.

use crate::backend::GraphicsBackend;
use crate::surface::{InitOutcome, SharedSurfaceManager};
use crate::watch::{SubscriptionId, Subscribers};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Listener = Box<dyn FnMut(bool) + Send>;

pub struct SharedStage<B: GraphicsBackend> {
    manager: Mutex<SharedSurfaceManager<B>>,
    watchers: Mutex<Subscribers<Listener>>,
}

impl<B: GraphicsBackend + Default> Default for SharedStage<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: GraphicsBackend> SharedStage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            manager: Mutex::new(SharedSurfaceManager::new(backend)),
            watchers: Mutex::new(Subscribers::new()),
        }
    }

    // Every mutation is a single field assignment, so a poisoned lock still
    // guards a consistent manager.
    fn manager(&self) -> MutexGuard<'_, SharedSurfaceManager<B>> {
        self.manager.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn watchers(&self) -> MutexGuard<'_, Subscribers<Listener>> {
        self.watchers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_canvas_handle(&self, canvas: B::Canvas) {
        self.manager().set_canvas_handle(canvas);
    }

    pub fn clear_canvas_handle(&self) -> Option<B::Canvas> {
        self.manager().clear_canvas_handle()
    }

    pub fn init(&self) -> InitOutcome {
        let mut watchers = self.watchers();
        let outcome = self.manager().init();
        if outcome.is_created() {
            watchers.notify(true);
        }
        outcome
    }

    pub fn destroy(&self) -> bool {
        let mut watchers = self.watchers();
        let destroyed = self.manager().destroy();
        if destroyed {
            watchers.notify(false);
        }
        destroyed
    }

    pub fn is_initialized(&self) -> bool {
        self.manager().is_initialized()
    }

    /// Run `f` against the live application while holding the lock.
    pub fn with_application<R>(&self, f: impl FnOnce(Option<&B::Application>) -> R) -> R {
        f(self.manager().shared_application())
    }

    /// A clone of the live application handle.
    pub fn shared_application(&self) -> Option<B::Application>
    where
        B::Application: Clone,
    {
        self.manager().shared_application().cloned()
    }

    /// Be told whenever the initialized flag flips.
    pub fn subscribe(&self, listener: impl FnMut(bool) + Send + 'static) -> SubscriptionId {
        self.watchers().subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.watchers().unsubscribe(id)
    }
}
