//! A character-cell canvas for drawing without a graphical display.
//!
//! `Grid` rasterizes draw commands into a row-major grid of cells, one cell
//! per pixel. Colors and line widths are dropped; strokes, fills, and dots
//! use distinct ink characters so a drawing stays readable as text.

use std::fmt::{self, Debug, Write};
use std::ops::{Index, IndexMut};

use super::{Canvas, SurfacePoint, SurfaceSize};
use crate::color::Color;

const STROKE_INK: char = '*';
const FILL_INK: char = '#';
const DOT_INK: char = 'o';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub c: char,
}

impl Default for Cell {
    fn default() -> Self {
        Cell { c: ' ' }
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Cell { c }
    }
}

pub struct Grid {
    size: SurfaceSize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: SurfaceSize) -> Self {
        Grid {
            size,
            cells: vec![Cell::default(); size.width as usize * size.height as usize],
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = impl Iterator<Item = &Cell>> {
        (0..self.size.height as usize).map(move |row| {
            let width = self.size.width as usize;
            let row_start = row * width;
            self.cells[row_start..row_start + width].iter()
        })
    }

    /// Paints the cell containing a point, ignoring points that fall
    /// outside the surface.
    fn paint(&mut self, point: SurfacePoint, ink: char) {
        let col = point.x.floor();
        let row = point.y.floor();

        if col < 0.0
            || row < 0.0
            || col >= f64::from(self.size.width)
            || row >= f64::from(self.size.height)
        {
            return;
        }

        self[(row as u32, col as u32)].c = ink;
    }

    /// Paints every cell along a straight segment by sampling it at
    /// one-cell steps.
    fn paint_segment(&mut self, from: SurfacePoint, to: SurfacePoint, ink: char) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as usize;

        if steps == 0 {
            self.paint(from, ink);
            return;
        }

        for i in 0..=steps {
            self.paint(from.lerp(to, i as f64 / steps as f64), ink);
        }
    }

    /// Paints every cell whose center lies inside the polygon, using the
    /// even-odd rule.
    fn fill_polygon(&mut self, path: &[SurfacePoint], ink: char) {
        if path.len() < 3 {
            return;
        }

        let clamp_col = |x: f64| (x.max(0.0) as u32).min(self.size.width.saturating_sub(1));
        let clamp_row = |y: f64| (y.max(0.0) as u32).min(self.size.height.saturating_sub(1));

        let min_col = clamp_col(path.iter().map(|p| p.x).fold(f64::INFINITY, f64::min));
        let max_col = clamp_col(path.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max));
        let min_row = clamp_row(path.iter().map(|p| p.y).fold(f64::INFINITY, f64::min));
        let max_row = clamp_row(path.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max));

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let center = SurfacePoint::new(f64::from(col) + 0.5, f64::from(row) + 0.5);
                if polygon_contains(path, center) {
                    self[(row, col)].c = ink;
                }
            }
        }
    }

    /// Returns the index in the underlying storage that corresponds to the
    /// given row and column.
    ///
    /// # Panics
    ///
    /// Panics if the row or column are out of bounds.
    fn idx(&self, (row, col): (u32, u32)) -> usize {
        assert!(
            row < self.size.height,
            "there are {} rows but the row is {}",
            self.size.height,
            row
        );
        assert!(
            col < self.size.width,
            "there are {} columns but the column is {}",
            self.size.width,
            col
        );

        row as usize * self.size.width as usize + col as usize
    }
}

/// Even-odd point-in-polygon test against the implicitly closed polygon.
fn polygon_contains(path: &[SurfacePoint], point: SurfacePoint) -> bool {
    let mut inside = false;
    let mut j = path.len() - 1;

    for i in 0..path.len() {
        let (a, b) = (path[i], path[j]);

        if (a.y > point.y) != (b.y > point.y) {
            let crossing = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < crossing {
                inside = !inside;
            }
        }

        j = i;
    }

    inside
}

impl Canvas for Grid {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn stroke_path(&mut self, path: &[SurfacePoint], _color: Color, _width: f64) {
        for pair in path.windows(2) {
            self.paint_segment(pair[0], pair[1], STROKE_INK);
        }
    }

    fn fill_path(&mut self, path: &[SurfacePoint], _color: Color) {
        self.fill_polygon(path, FILL_INK);
    }

    fn fill_dot(&mut self, center: SurfacePoint, radius: f64, _color: Color) {
        let min = center - SurfacePoint::new(radius, radius).to_vector();
        let max = center + SurfacePoint::new(radius, radius).to_vector();

        for row in min.y.floor() as i64..=max.y.ceil() as i64 {
            for col in min.x.floor() as i64..=max.x.ceil() as i64 {
                let cell_center = SurfacePoint::new(col as f64 + 0.5, row as f64 + 0.5);
                if (cell_center - center).length() <= radius {
                    self.paint(cell_center, DOT_INK);
                }
            }
        }
    }
}

impl Index<(u32, u32)> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): (u32, u32)) -> &Self::Output {
        &self.cells[self.idx((row, col))]
    }
}

impl IndexMut<(u32, u32)> for Grid {
    fn index_mut(&mut self, (row, col): (u32, u32)) -> &mut Self::Output {
        let idx = self.idx((row, col));
        &mut self.cells[idx]
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                f.write_char(cell.c)?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
