//! The drawing agent itself.

use std::fmt;

use log::*;
use rand::Rng;
use thiserror::Error;

use crate::canvas::{
    CanvasRegistry, SharedCanvas, SurfacePoint, SurfaceSize, SurfaceVector, UserPoint,
};
use crate::color::Color;
use crate::events::{InputEvent, Key};

/// Dot radius used when a program doesn't ask for one.
pub const DEFAULT_DOT_RADIUS: f64 = 10.0;

/// Default scale applied to raw pointer offsets, matching a 2x
/// backing-store pixel ratio. Injectable through [`TurtleConfig`].
pub const DEFAULT_POINTER_SCALE: f64 = 2.0;

pub type KeyCallback = Box<dyn FnMut(Key)>;
pub type PointerCallback = Box<dyn FnMut(f64, f64)>;

/// Errors that can occur while binding an agent to its surface.
///
/// Nothing an agent does after construction can fail.
#[derive(Debug, Error)]
pub enum TurtleError {
    /// The named surface was never registered with the host's
    /// [`CanvasRegistry`].
    #[error("no canvas named `{0}` is registered")]
    CanvasNotFound(String),
}

/// Construction-time options for an agent: the surface to bind to and the
/// optional input callbacks.
pub struct TurtleConfig {
    /// Name of the registered canvas to draw on.
    pub canvas: String,

    /// Scale applied to raw pointer offsets before coordinate conversion.
    pub pointer_scale: f64,

    pub key_pressed: Option<KeyCallback>,
    pub mouse_clicked: Option<PointerCallback>,
    pub mouse_moved: Option<PointerCallback>,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        TurtleConfig::new("canvas")
    }
}

impl TurtleConfig {
    pub fn new(canvas: impl Into<String>) -> Self {
        TurtleConfig {
            canvas: canvas.into(),
            pointer_scale: DEFAULT_POINTER_SCALE,
            key_pressed: None,
            mouse_clicked: None,
            mouse_moved: None,
        }
    }

    pub fn pointer_scale(mut self, scale: f64) -> Self {
        self.pointer_scale = scale;
        self
    }

    /// Invoked with the key identifier of every key-down event.
    pub fn on_key_pressed(mut self, callback: impl FnMut(Key) + 'static) -> Self {
        self.key_pressed = Some(Box::new(callback));
        self
    }

    /// Invoked with the user-coordinate position of every click.
    pub fn on_mouse_clicked(mut self, callback: impl FnMut(f64, f64) + 'static) -> Self {
        self.mouse_clicked = Some(Box::new(callback));
        self
    }

    /// Invoked with the user-coordinate position of every pointer motion.
    pub fn on_mouse_moved(mut self, callback: impl FnMut(f64, f64) + 'static) -> Self {
        self.mouse_moved = Some(Box::new(callback));
        self
    }
}

/// A stateful drawing agent bound to one canvas.
///
/// The agent keeps its position in surface coordinates and converts to and
/// from the user's centered, y-up system at every public position boundary.
/// The heading is measured in degrees, 0 pointing up and increasing
/// clockwise, and is never normalized into any particular range.
pub struct Turtle {
    canvas: SharedCanvas,
    size: SurfaceSize,
    position: SurfacePoint,
    heading: f64,
    pen_down: bool,
    pen_color: Color,
    fill_color: Color,
    line_width: f64,

    /// Vertices of the polygon being accumulated for a fill, `None` until
    /// [`Turtle::start_path`] is called. Replaced, never cleared.
    fill_path: Option<Vec<SurfacePoint>>,

    pointer_scale: f64,
    key_pressed: Option<KeyCallback>,
    mouse_clicked: Option<PointerCallback>,
    mouse_moved: Option<PointerCallback>,
}

// The canvas handle and callbacks aren't printable; the drawing state is.
impl fmt::Debug for Turtle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Turtle")
            .field("position", &self.position)
            .field("heading", &self.heading)
            .field("pen_down", &self.pen_down)
            .field("pen_color", &self.pen_color)
            .field("fill_color", &self.fill_color)
            .field("line_width", &self.line_width)
            .finish()
    }
}

impl Turtle {
    /// Binds a new agent to the canvas named in the config, starting at the
    /// surface center facing up, with the pen down.
    pub fn create(config: TurtleConfig, registry: &CanvasRegistry) -> Result<Turtle, TurtleError> {
        let canvas = registry
            .resolve(&config.canvas)
            .ok_or_else(|| TurtleError::CanvasNotFound(config.canvas.clone()))?;

        let size = canvas.borrow().size();
        let position = SurfacePoint::new(
            f64::from(size.width) / 2.0,
            f64::from(size.height) / 2.0,
        );

        debug!(
            "bound to canvas `{}` ({}x{})",
            config.canvas, size.width, size.height
        );

        Ok(Turtle {
            canvas,
            size,
            position,
            heading: 0.0,
            pen_down: true,
            pen_color: Color::BLUE,
            fill_color: Color::BLUE,
            line_width: 1.0,
            fill_path: None,
            pointer_scale: config.pointer_scale,
            key_pressed: config.key_pressed,
            mouse_clicked: config.mouse_clicked,
            mouse_moved: config.mouse_moved,
        })
    }

    /// Moves `distance` pixels along the current heading.
    ///
    /// The segment from the old to the new position is stroked only while
    /// the pen is down; an active fill path always receives the new vertex.
    pub fn forward(&mut self, distance: f64) {
        let rad = self.heading.to_radians();
        let old = self.position;
        let step = SurfaceVector::new(rad.sin() * distance, -rad.cos() * distance);
        let new = old + step;
        self.position = new;

        if let Some(path) = &mut self.fill_path {
            path.push(new);
        }

        if self.pen_down {
            self.canvas
                .borrow_mut()
                .stroke_path(&[old, new], self.pen_color, self.line_width);
        }

        debug!("moved to {:?}", self.position);
    }

    /// Moves `distance` pixels against the current heading.
    pub fn back(&mut self, distance: f64) {
        self.forward(-distance);
    }

    pub fn left(&mut self, degrees: f64) {
        self.heading -= degrees;
    }

    pub fn right(&mut self, degrees: f64) {
        self.heading += degrees;
    }

    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = degrees;
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Returns the heading that points the agent at a user-coordinate
    /// target.
    ///
    /// The quadrant arithmetic is kept exactly as originally shipped: a
    /// plain arctangent of the coordinate deltas, shifted by ±90° on the
    /// sign of the x delta. Targets straight above report 180 and targets
    /// straight below report 0 (IEEE division by zero feeding `atan`), and
    /// callers depend on those values.
    pub fn towards(&self, x: f64, y: f64) -> f64 {
        let target = self.to_surface(UserPoint::new(x, y));
        let pos = self.position;

        let angle = ((pos.y - target.y) / (pos.x - target.x)).atan().to_degrees();

        if target.x < pos.x && (target.y < pos.y || target.y > pos.y) {
            angle - 90.0
        } else {
            angle + 90.0
        }
    }

    /// Stops stroking on movement. Fill-path accumulation is unaffected.
    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    /// Resumes stroking on movement.
    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    pub fn set_pen_color(&mut self, color: Color) {
        self.pen_color = color;
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    /// Fills a circle at the current position.
    ///
    /// The dot is filled with the *pen* color, not the fill color.
    pub fn dot(&mut self, radius: f64) {
        self.canvas
            .borrow_mut()
            .fill_dot(self.position, radius, self.pen_color);
    }

    /// Fills a dot with the default radius of [`DEFAULT_DOT_RADIUS`].
    pub fn dot_default(&mut self) {
        self.dot(DEFAULT_DOT_RADIUS);
    }

    /// Begins accumulating a fill polygon at the current position,
    /// discarding any unfinished one.
    pub fn start_path(&mut self) {
        self.fill_path = Some(vec![self.position]);
    }

    /// Fills the accumulated polygon with the fill color.
    ///
    /// Silently ignored when no path was started. The path stays active:
    /// further movement keeps extending it and it can be filled again.
    pub fn fill_path(&mut self) {
        if let Some(path) = &self.fill_path {
            self.canvas.borrow_mut().fill_path(path, self.fill_color);
        }
    }

    /// Teleports to a user-coordinate position without drawing and without
    /// extending an active fill path.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = self.to_surface(UserPoint::new(x, y));
    }

    /// The current position in user coordinates.
    pub fn position(&self) -> UserPoint {
        self.to_user(self.position)
    }

    /// Teleports to a uniformly random point within the given
    /// user-coordinate rectangle.
    pub fn set_random_position(&mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
        let mut rng = rand::thread_rng();
        let x = x_min + rng.gen::<f64>() * (x_max - x_min);
        let y = y_min + rng.gen::<f64>() * (y_max - y_min);
        self.set_position(x, y);
    }

    /// Forwards a host event to the matching callback, if one was
    /// registered. Events without a callback are dropped.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                if let Some(callback) = &mut self.key_pressed {
                    callback(key);
                }
            }
            InputEvent::MouseClick { x, y } => {
                let p = self.pointer_to_user(x, y);
                if let Some(callback) = &mut self.mouse_clicked {
                    callback(p.x, p.y);
                }
            }
            InputEvent::MouseMove { x, y } => {
                let p = self.pointer_to_user(x, y);
                if let Some(callback) = &mut self.mouse_moved {
                    callback(p.x, p.y);
                }
            }
        }
    }

    /// Converts a raw pointer offset: scaled for the display's backing
    /// store, then mapped into user coordinates.
    fn pointer_to_user(&self, x: f64, y: f64) -> UserPoint {
        self.to_user(SurfacePoint::new(
            self.pointer_scale * x,
            self.pointer_scale * y,
        ))
    }

    fn half_extents(&self) -> (f64, f64) {
        (
            f64::from(self.size.width) / 2.0,
            f64::from(self.size.height) / 2.0,
        )
    }

    /// Maps the user's centered, y-up system onto surface pixels.
    fn to_surface(&self, p: UserPoint) -> SurfacePoint {
        let (half_width, half_height) = self.half_extents();
        SurfacePoint::new(half_width + p.x, half_height - p.y)
    }

    /// Maps surface pixels onto the user's centered, y-up system.
    fn to_user(&self, p: SurfacePoint) -> UserPoint {
        let (half_width, half_height) = self.half_extents();
        UserPoint::new(p.x - half_width, half_height - p.y)
    }
}
