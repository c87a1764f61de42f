//! Drawing surfaces and the coordinate spaces they use.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use euclid::{Point2D, Size2D, Vector2D};

use crate::color::Color;

mod display_list;
mod grid;

pub use display_list::{DisplayList, DrawCommand};
pub use grid::Grid;

/// Used to group units in the surface's own pixel system, starting from
/// (0, 0) at the top left with the Y-axis growing downward.
pub struct SurfaceSpace;

/// Used to group units in the coordinate system exposed to user programs:
/// the origin is at the surface center and the Y-axis grows upward.
pub struct UserSpace;

/// A position on the drawing surface, in pixels.
pub type SurfacePoint = Point2D<f64, SurfaceSpace>;

/// An offset between surface positions, in pixels.
pub type SurfaceVector = Vector2D<f64, SurfaceSpace>;

/// A width and height on the drawing surface, in pixels.
pub type SurfaceSize = Size2D<u32, SurfaceSpace>;

/// A position in the user's centered coordinate system.
pub type UserPoint = Point2D<f64, UserSpace>;

/// A 2D surface that agents draw on.
///
/// The agent only ever hands the surface complete paths; path construction
/// state (the current fill polygon, the segment being stroked) lives in the
/// agent itself.
pub trait Canvas {
    /// Pixel dimensions of the surface.
    fn size(&self) -> SurfaceSize;

    /// Strokes a polyline through the given points.
    fn stroke_path(&mut self, path: &[SurfacePoint], color: Color, width: f64);

    /// Fills the polygon described by the given points, closing it back to
    /// the first point if necessary.
    fn fill_path(&mut self, path: &[SurfacePoint], color: Color);

    /// Fills a circle centered on a point.
    fn fill_dot(&mut self, center: SurfacePoint, radius: f64, color: Color);
}

/// Shared handle to a canvas.
///
/// All drawing happens on a single logical thread of control, so canvases
/// are shared with `Rc<RefCell<_>>` rather than a synchronized wrapper.
pub type SharedCanvas = Rc<RefCell<dyn Canvas>>;

/// The named surfaces a host makes available to agents.
///
/// Agents bind to a surface by name at creation time; resolving an
/// unregistered name is a configuration error surfaced by
/// [`crate::Turtle::create`].
#[derive(Default)]
pub struct CanvasRegistry {
    canvases: HashMap<String, SharedCanvas>,
}

impl CanvasRegistry {
    pub fn new() -> Self {
        CanvasRegistry::default()
    }

    /// Registers a canvas under a name, returning a handle that retains
    /// access to the concrete type.
    pub fn register<C: Canvas + 'static>(
        &mut self,
        name: impl Into<String>,
        canvas: C,
    ) -> Rc<RefCell<C>> {
        let canvas = Rc::new(RefCell::new(canvas));
        self.insert(name, canvas.clone());
        canvas
    }

    /// Registers an already-shared canvas under a name.
    pub fn insert(&mut self, name: impl Into<String>, canvas: SharedCanvas) {
        self.canvases.insert(name.into(), canvas);
    }

    /// Looks up a canvas by name.
    pub fn resolve(&self, name: &str) -> Option<SharedCanvas> {
        self.canvases.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasRegistry, DisplayList, SurfaceSize};

    #[test]
    fn resolve_registered() {
        let mut registry = CanvasRegistry::new();
        registry.register("canvas", DisplayList::new(SurfaceSize::new(10, 10)));

        let canvas = registry.resolve("canvas").unwrap();
        assert_eq!(canvas.borrow().size(), SurfaceSize::new(10, 10));
    }

    #[test]
    fn resolve_unknown() {
        let registry = CanvasRegistry::new();
        assert!(registry.resolve("canvas").is_none());
    }
}
