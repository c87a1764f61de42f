//! A canvas that records draw commands instead of rasterizing them.

use super::{Canvas, SurfacePoint, SurfaceSize};
use crate::color::Color;

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    StrokePath {
        path: Vec<SurfacePoint>,
        color: Color,
        width: f64,
    },
    FillPath {
        path: Vec<SurfacePoint>,
        color: Color,
    },
    FillDot {
        center: SurfacePoint,
        radius: f64,
        color: Color,
    },
}

/// In-memory canvas that keeps every draw call verbatim, in issue order.
///
/// This is the reference backend: tests assert against the recorded
/// commands, and headless hosts can replay them onto a real surface.
pub struct DisplayList {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(size: SurfaceSize) -> Self {
        DisplayList {
            size,
            commands: Vec::new(),
        }
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Canvas for DisplayList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn stroke_path(&mut self, path: &[SurfacePoint], color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.to_vec(),
            color,
            width,
        });
    }

    fn fill_path(&mut self, path: &[SurfacePoint], color: Color) {
        self.commands.push(DrawCommand::FillPath {
            path: path.to_vec(),
            color,
        });
    }

    fn fill_dot(&mut self, center: SurfacePoint, radius: f64, color: Color) {
        self.commands
            .push(DrawCommand::FillDot { center, radius, color });
    }
}
