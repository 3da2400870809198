//! Lifecycle of the one shared rendering application.
//!
//! The owning UI component stores its canvas, calls [`SharedSurfaceManager::init`]
//! once the canvas exists, and [`SharedSurfaceManager::destroy`] on teardown.
//! Every character renderer in between reads the same application through
//! [`SharedSurfaceManager::shared_application`].
//!
//! Misuse (double init, init before a canvas exists, destroy while idle) is
//! absorbed as a no-op so UI remount churn can't tear the surface apart. The
//! initialized flag is derived from the stored application, so the two can
//! never disagree.

use crate::backend::{ApplicationOptions, DestroyOptions, GraphicsBackend};

/// What a call to [`SharedSurfaceManager::init`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new application was created by this call.
    Created,
    /// An application already existed; nothing changed.
    AlreadyInitialized,
    /// No canvas has been set; initialization is deferred.
    NoCanvas,
    /// The backend failed to create an application; state is unchanged.
    BackendFailed,
}

impl InitOutcome {
    /// `true` iff this call flipped the initialized flag.
    pub fn is_created(self) -> bool {
        self == InitOutcome::Created
    }
}

/// Owner of the shared application and the canvas it binds to.
pub struct SharedSurfaceManager<B: GraphicsBackend> {
    backend: B,
    canvas: Option<B::Canvas>,
    application: Option<B::Application>,
}

impl<B: GraphicsBackend + Default> Default for SharedSurfaceManager<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: GraphicsBackend> SharedSurfaceManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            canvas: None,
            application: None,
        }
    }

    /// Record the canvas the next `init` should bind to.
    /// A live application keeps the canvas it was created with.
    pub fn set_canvas_handle(&mut self, canvas: B::Canvas) {
        self.canvas = Some(canvas);
    }

    /// Forget the stored canvas, returning it.
    pub fn clear_canvas_handle(&mut self) -> Option<B::Canvas> {
        self.canvas.take()
    }

    pub fn canvas_handle(&self) -> Option<&B::Canvas> {
        self.canvas.as_ref()
    }

    /// Create the shared application if none exists and a canvas is set.
    pub fn init(&mut self) -> InitOutcome {
        if self.application.is_some() {
            log::debug!("shared application already initialized; ignoring init");
            return InitOutcome::AlreadyInitialized;
        }
        let Some(canvas) = self.canvas.as_ref() else {
            log::debug!("no canvas set; deferring shared application init");
            return InitOutcome::NoCanvas;
        };

        log::info!("initializing shared application");
        let options = ApplicationOptions::shared_surface(canvas);
        match self.backend.create(&options) {
            Ok(application) => {
                self.application = Some(application);
                log::info!("shared application initialized");
                InitOutcome::Created
            }
            Err(err) => {
                log::warn!("shared application init failed: {err}");
                InitOutcome::BackendFailed
            }
        }
    }

    /// Tear down the shared application, releasing its graphics context and
    /// view attachment. Returns `false` if there was nothing to destroy.
    pub fn destroy(&mut self) -> bool {
        match self.application.take() {
            Some(application) => {
                log::info!("destroying shared application");
                self.backend.destroy(application, DestroyOptions::FULL);
                true
            }
            None => {
                log::debug!("no shared application to destroy");
                false
            }
        }
    }

    /// The live application, if initialized. Never creates one.
    pub fn shared_application(&self) -> Option<&B::Application> {
        self.application.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.application.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: GraphicsBackend> Drop for SharedSurfaceManager<B> {
    fn drop(&mut self) {
        if let Some(application) = self.application.take() {
            log::debug!("manager dropped while initialized; destroying shared application");
            self.backend.destroy(application, DestroyOptions::FULL);
        }
    }
}
