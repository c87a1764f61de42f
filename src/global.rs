//! Free-function convenience API around a thread-local agent.
//!
//! The core [`Turtle`] is an ordinary value that can be owned and passed
//! around; programs that want the classic one-turtle style install an
//! instance here and call the free functions. Every function is a silent
//! no-op until [`make_turtle`] installs an agent.

use std::cell::RefCell;

use crate::color::Color;
use crate::events::InputEvent;
use crate::turtle::Turtle;

thread_local! {
    static TURTLE: RefCell<Option<Turtle>> = RefCell::new(None);
}

/// Installs an agent as this thread's turtle, replacing any prior one.
pub fn make_turtle(turtle: Turtle) {
    TURTLE.with(|slot| *slot.borrow_mut() = Some(turtle));
}

/// Removes and returns the installed agent, if any.
pub fn take_turtle() -> Option<Turtle> {
    TURTLE.with(|slot| slot.borrow_mut().take())
}

fn with_turtle<T>(f: impl FnOnce(&mut Turtle) -> T) -> Option<T> {
    TURTLE.with(|slot| slot.borrow_mut().as_mut().map(f))
}

pub fn forward(distance: f64) {
    with_turtle(|turtle| turtle.forward(distance));
}

pub fn back(distance: f64) {
    with_turtle(|turtle| turtle.back(distance));
}

pub fn left(degrees: f64) {
    with_turtle(|turtle| turtle.left(degrees));
}

pub fn right(degrees: f64) {
    with_turtle(|turtle| turtle.right(degrees));
}

pub fn set_heading(degrees: f64) {
    with_turtle(|turtle| turtle.set_heading(degrees));
}

pub fn towards(x: f64, y: f64) -> Option<f64> {
    with_turtle(|turtle| turtle.towards(x, y))
}

pub fn pen_up() {
    with_turtle(Turtle::pen_up);
}

pub fn pen_down() {
    with_turtle(Turtle::pen_down);
}

pub fn set_pen_color(color: Color) {
    with_turtle(|turtle| turtle.set_pen_color(color));
}

pub fn set_fill_color(color: Color) {
    with_turtle(|turtle| turtle.set_fill_color(color));
}

pub fn set_line_width(width: f64) {
    with_turtle(|turtle| turtle.set_line_width(width));
}

pub fn dot(radius: f64) {
    with_turtle(|turtle| turtle.dot(radius));
}

pub fn dot_default() {
    with_turtle(Turtle::dot_default);
}

pub fn start_path() {
    with_turtle(Turtle::start_path);
}

pub fn fill_path() {
    with_turtle(Turtle::fill_path);
}

pub fn set_position(x: f64, y: f64) {
    with_turtle(|turtle| turtle.set_position(x, y));
}

/// The installed turtle's position in user coordinates.
pub fn position() -> Option<(f64, f64)> {
    with_turtle(|turtle| {
        let p = turtle.position();
        (p.x, p.y)
    })
}

pub fn set_random_position(x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    with_turtle(|turtle| turtle.set_random_position(x_min, x_max, y_min, y_max));
}

pub fn handle_input(event: InputEvent) {
    with_turtle(|turtle| turtle.handle_input(event));
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::canvas::{CanvasRegistry, DisplayList, SharedCanvas, SurfaceSize};
    use crate::turtle::{Turtle, TurtleConfig};

    // Each test runs on its own thread, so the thread-local slot is
    // independent between tests.

    fn install() -> Rc<RefCell<DisplayList>> {
        let canvas = Rc::new(RefCell::new(DisplayList::new(SurfaceSize::new(500, 500))));
        let shared: SharedCanvas = canvas.clone();

        let mut registry = CanvasRegistry::new();
        registry.insert("canvas", shared);

        super::make_turtle(Turtle::create(TurtleConfig::default(), &registry).unwrap());
        canvas
    }

    #[test]
    fn no_ops_without_an_installed_turtle() {
        super::forward(100.0);
        super::fill_path();

        assert_eq!(super::position(), None);
        assert_eq!(super::towards(1.0, 1.0), None);
    }

    #[test]
    fn drives_the_installed_turtle() {
        let canvas = install();

        super::set_heading(90.0);
        super::forward(100.0);

        let (x, y) = super::position().unwrap();
        assert!((x - 100.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
        assert_eq!(canvas.borrow().commands().len(), 1);
    }

    #[test]
    fn make_turtle_replaces_the_prior_agent() {
        install();
        super::forward(100.0);

        install();
        let (x, y) = super::position().unwrap();
        assert_eq!((x, y), (0.0, 0.0));

        assert!(super::take_turtle().is_some());
        assert!(super::take_turtle().is_none());
    }
}
