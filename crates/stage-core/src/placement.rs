//! Render entry → on-screen transform.
//!
//! Positions in the config table are fractions of the surface size. A
//! consumer resolves them against the current viewport, then maps asset
//! pixels onto the surface so the asset's anchor lands on the position.

use crate::config::CharacterRenderConfigEntry;
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// The shared surface dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// A character's resolved placement on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Where the anchor point lands, in surface pixels.
    pub position: Point,
    pub anchor: Vec2,
    pub scale: Vec2,
}

impl Placement {
    pub fn resolve(entry: &CharacterRenderConfigEntry, viewport: Viewport) -> Self {
        Self {
            position: Point::new(
                entry.position.x * viewport.width,
                entry.position.y * viewport.height,
            ),
            anchor: entry.anchor,
            scale: entry.scale,
        }
    }

    /// Asset-local → surface transform for an asset of `asset_size`.
    pub fn to_affine(&self, asset_size: Size) -> Affine {
        let pivot = Vec2::new(
            self.anchor.x * asset_size.width,
            self.anchor.y * asset_size.height,
        );
        Affine::translate(self.position.to_vec2())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-pivot)
    }

    /// Bounding box of the scaled asset on the surface.
    pub fn bounds(&self, asset_size: Size) -> Rect {
        self.to_affine(asset_size)
            .transform_rect_bbox(asset_size.to_rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CharacterRenderConfig;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn position_scales_with_viewport() {
        let aria = CharacterRenderConfig::builtin().lookup("aria").unwrap();
        let p = Placement::resolve(
            aria,
            Viewport {
                width: 1000.0,
                height: 500.0,
            },
        );
        assert!(close(p.position.x, 1500.0));
        assert!(close(p.position.y, 600.0));
        assert_eq!(p.scale, aria.scale);
        assert_eq!(p.anchor, aria.anchor);
    }

    #[test]
    fn anchor_lands_on_position() {
        let eidon = CharacterRenderConfig::builtin().lookup("eidon").unwrap();
        let p = Placement::resolve(eidon, Viewport::default());
        let asset = Size::new(1000.0, 2000.0);
        let pivot = Point::new(500.0, 2000.0);
        let mapped = p.to_affine(asset) * pivot;
        assert!(close(mapped.x, 400.0), "x = {}", mapped.x);
        assert!(close(mapped.y, 600.0), "y = {}", mapped.y);
    }

    #[test]
    fn bounds_are_scaled_around_anchor() {
        let eidon = CharacterRenderConfig::builtin().lookup("eidon").unwrap();
        let p = Placement::resolve(eidon, Viewport::default());
        let r = p.bounds(Size::new(1000.0, 2000.0));
        assert!(close(r.x0, 340.0), "x0 = {}", r.x0);
        assert!(close(r.x1, 460.0), "x1 = {}", r.x1);
        assert!(close(r.y0, 360.0), "y0 = {}", r.y0);
        assert!(close(r.y1, 600.0), "y1 = {}", r.y1);
    }
}
