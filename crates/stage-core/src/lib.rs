//! Stage core — the shared rendering surface and the per-character render table.
//!
//! One canvas-bound graphics application is shared by every on-screen
//! character. [`SharedSurfaceManager`] owns that application's lifecycle;
//! [`CharacterRenderConfig`] tells each character where and how large to draw.

pub mod backend;
pub mod config;
pub mod id;
pub mod placement;
pub mod shared;
pub mod surface;
pub mod watch;

pub use backend::{ApplicationOptions, BackendError, DestroyOptions, GraphicsBackend, ResizeTarget};
pub use config::{CharacterRenderConfig, CharacterRenderConfigEntry, ConfigError};
pub use id::CharacterId;
pub use placement::{Placement, Viewport};
pub use shared::SharedStage;
pub use surface::{InitOutcome, SharedSurfaceManager};
pub use watch::{SubscriptionId, Subscribers};

// Re-export kurbo geometry so consumers don't need a direct dependency
pub use kurbo::{Affine, Point, Rect, Size, Vec2};
