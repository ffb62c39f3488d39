/// ASCII painter for terminal rendering
use chart3d_core::{tools2d, Frame, Point2D, RenderedFace};
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use tracing::warn;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

const MARKER: char = 'o';

/// Paints frames into a grid of coloured characters.
///
/// Faces are painted in frame order, each over the ones before it, so there
/// is no depth buffer. Plane coordinates are centred on the grid with y up;
/// one plane unit is one row or half a column.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character at a cell, row 0 at the top
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn render_frame(&mut self, frame: &Frame) {
        for face in &frame.faces {
            self.render_face(face);
        }
        for marker in &frame.markers {
            let (x, y) = self.to_cell(&marker.point);
            if let Some(idx) = self.index(x.floor(), y.floor()) {
                self.char_buffer[idx] = MARKER;
                self.color_buffer[idx] = Color::Yellow;
            }
        }
    }

    fn render_face(&mut self, face: &RenderedFace) {
        let triangles = match tools2d::triangulate(&face.points) {
            Ok(triangles) => triangles,
            Err(e) => {
                warn!(object = face.object, face = face.face, error = %e, "Skipping face");
                return;
            }
        };

        let char_index = (face.shade * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];
        let shaded = face.shaded_color();
        let color = Color::Rgb {
            r: shaded.r,
            g: shaded.g,
            b: shaded.b,
        };

        for [a, b, c] in triangles {
            self.rasterize_triangle(
                [&face.points[a], &face.points[b], &face.points[c]],
                character,
                color,
            );
        }
    }

    fn rasterize_triangle(&mut self, points: [&Point2D; 3], character: char, color: Color) {
        let cells = points.map(|p| self.to_cell(p));

        // Bounding box, clipped to the grid
        let min_x = cells.iter().map(|c| c.0).fold(f64::INFINITY, f64::min).floor().max(0.0);
        let max_x = cells.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max).ceil();
        let min_y = cells.iter().map(|c| c.1).fold(f64::INFINITY, f64::min).floor().max(0.0);
        let max_y = cells.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max).ceil();
        let max_x = max_x.min(self.width as f64 - 1.0);
        let max_y = max_y.min(self.height as f64 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y as usize..=max_y as usize {
            for x in min_x as usize..=max_x as usize {
                // test the cell centre on the plane, where the triangle is counter-clockwise
                let p = self.to_plane(x as f64 + 0.5, y as f64 + 0.5);
                if tools2d::inside_triangle(points[0], points[1], points[2], &p) {
                    let idx = y * self.width + x;
                    self.char_buffer[idx] = character;
                    self.color_buffer[idx] = color;
                }
            }
        }
    }

    fn to_cell(&self, p: &Point2D) -> (f64, f64) {
        (
            self.width as f64 / 2.0 + p.x * CELL_ASPECT,
            self.height as f64 / 2.0 - p.y,
        )
    }

    fn to_plane(&self, x: f64, y: f64) -> Point2D {
        Point2D::new(
            (x - self.width as f64 / 2.0) / CELL_ASPECT,
            self.height as f64 / 2.0 - y,
        )
    }

    fn index(&self, x: f64, y: f64) -> Option<usize> {
        if x >= 0.0 && y >= 0.0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
