//! Single-threaded surface cell behind the JS exports.
//!
//! Listeners run with no borrow held, so a JS callback may call straight
//! back into `initApp`/`destroyApp`/`getSharedApp`. If a listener flips the
//! flag again, the rest of the outer round is dropped: those listeners get
//! the newer value from the nested round instead of a stale one.

use stage_core::{GraphicsBackend, SharedSurfaceManager, SubscriptionId, Subscribers};
use std::cell::{Cell, RefCell};

/// Something that wants to hear about initialized-flag flips.
pub trait FlagListener: Clone {
    fn call(&self, initialized: bool);
}

impl FlagListener for js_sys::Function {
    fn call(&self, initialized: bool) {
        let arg = wasm_bindgen::JsValue::from_bool(initialized);
        if let Err(err) = self.call1(&wasm_bindgen::JsValue::NULL, &arg) {
            log::warn!("initialized-change listener threw: {err:?}");
        }
    }
}

pub struct LocalStage<B: GraphicsBackend, L> {
    surface: RefCell<SharedSurfaceManager<B>>,
    watchers: RefCell<Subscribers<L>>,
    /// Bumped on every flip.
    generation: Cell<u64>,
}

impl<B: GraphicsBackend, L: FlagListener> LocalStage<B, L> {
    pub fn new(backend: B) -> Self {
        Self {
            surface: RefCell::new(SharedSurfaceManager::new(backend)),
            watchers: RefCell::new(Subscribers::new()),
            generation: Cell::new(0),
        }
    }

    pub fn set_canvas(&self, canvas: B::Canvas) {
        self.surface.borrow_mut().set_canvas_handle(canvas);
    }

    pub fn clear_canvas(&self) {
        self.surface.borrow_mut().clear_canvas_handle();
    }

    /// `true` iff this call created the application.
    pub fn init(&self) -> bool {
        let created = self.surface.borrow_mut().init().is_created();
        if created {
            self.flipped(true);
        }
        created
    }

    pub fn destroy(&self) -> bool {
        let destroyed = self.surface.borrow_mut().destroy();
        if destroyed {
            self.flipped(false);
        }
        destroyed
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.borrow().is_initialized()
    }

    pub fn shared_application(&self) -> Option<B::Application>
    where
        B::Application: Clone,
    {
        self.surface.borrow().shared_application().cloned()
    }

    pub fn subscribe(&self, listener: L) -> SubscriptionId {
        self.watchers.borrow_mut().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.watchers.borrow_mut().unsubscribe(id)
    }

    fn flipped(&self, initialized: bool) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let listeners: Vec<L> = self.watchers.borrow().listeners().cloned().collect();
        for listener in listeners {
            if self.generation.get() != generation {
                break;
            }
            listener.call(initialized);
        }
    }
}
