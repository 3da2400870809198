//! The graphics capability the shared surface is built on.
//!
//! The rendering toolkit is opaque to this crate: it only needs to create an
//! application bound to a canvas and to tear one down again.

use thiserror::Error;

/// What the application tracks for its surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeTarget {
    /// Follow the browser window / host viewport.
    Window,
}

/// Presentation options passed to [`GraphicsBackend::create`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicationOptions<'a, C> {
    /// The externally owned canvas to draw into.
    pub view: &'a C,
    pub auto_start: bool,
    pub background_alpha: f64,
    pub antialias: bool,
    pub resize_to: ResizeTarget,
}

impl<'a, C> ApplicationOptions<'a, C> {
    /// The fixed options for the shared character surface: auto-started
    /// render loop, transparent background, antialiased, window-sized.
    pub fn shared_surface(view: &'a C) -> Self {
        Self {
            view,
            auto_start: true,
            background_alpha: 0.0,
            antialias: true,
            resize_to: ResizeTarget::Window,
        }
    }
}

/// Options passed to [`GraphicsBackend::destroy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyOptions {
    /// Release the underlying graphics context.
    pub release_context: bool,
    /// Remove any view attachment the application created.
    pub remove_view: bool,
}

impl DestroyOptions {
    pub const FULL: Self = Self {
        release_context: true,
        remove_view: true,
    };
}

/// The backend refused to create an application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("graphics backend error: {message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A rendering toolkit able to host the shared application.
pub trait GraphicsBackend {
    /// Handle to a drawable surface owned by the UI layer.
    type Canvas;
    /// Handle to a live rendering application.
    type Application;

    fn create(
        &mut self,
        options: &ApplicationOptions<'_, Self::Canvas>,
    ) -> Result<Self::Application, BackendError>;

    fn destroy(&mut self, application: Self::Application, options: DestroyOptions);
}
