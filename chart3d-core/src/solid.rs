/// Solids described by their construction parameters
use std::ops::Range;

use crate::color::Color;
use crate::error::Result;
use crate::object::{BarColors, Object3D};
use crate::point::Point3D;

/// The kinds of solid a chart can put into a world.
///
/// Each variant carries what its `Object3D` factory needs; the geometry is
/// only built by [`Solid::to_vertices_and_faces`].
#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    Cube {
        size: f64,
        center: Point3D,
        color: Color,
    },
    Sphere {
        radius: f64,
        segments: usize,
        center: Point3D,
        primary: Color,
        secondary: Color,
    },
    PieSegment {
        radius: f64,
        explode_radius: f64,
        base: f64,
        height: f64,
        angles: Range<f64>,
        step: f64,
        color: Color,
    },
    Tetrahedron {
        size: f64,
        center: Point3D,
        color: Color,
    },
    Octahedron {
        size: f64,
        center: Point3D,
        color: Color,
    },
    Bar {
        x: f64,
        y: f64,
        x_width: f64,
        y_width: f64,
        zero: f64,
        value: f64,
        color: Color,
        base_color: Option<Color>,
        top_color: Option<Color>,
    },
    CustomMesh {
        vertices: Vec<Point3D>,
        faces: Vec<Vec<usize>>,
        color: Color,
    },
}

impl Solid {
    pub fn to_vertices_and_faces(&self) -> Result<Object3D> {
        match self {
            Solid::Cube {
                size,
                center,
                color,
            } => Object3D::cube(*size, *center, *color),
            Solid::Sphere {
                radius,
                segments,
                center,
                primary,
                secondary,
            } => Object3D::sphere(*radius, *segments, *center, *primary, *secondary),
            Solid::PieSegment {
                radius,
                explode_radius,
                base,
                height,
                angles,
                step,
                color,
            } => Object3D::pie_segment(
                *radius,
                *explode_radius,
                *base,
                *height,
                angles.clone(),
                *step,
                *color,
            ),
            Solid::Tetrahedron {
                size,
                center,
                color,
            } => Object3D::tetrahedron(*size, *center, *color),
            Solid::Octahedron {
                size,
                center,
                color,
            } => Object3D::octahedron(*size, *center, *color),
            Solid::Bar {
                x,
                y,
                x_width,
                y_width,
                zero,
                value,
                color,
                base_color,
                top_color,
            } => Object3D::bar(
                *x,
                *y,
                *x_width,
                *y_width,
                *zero,
                *value,
                BarColors::new(*color, *base_color, *top_color),
            ),
            Solid::CustomMesh {
                vertices,
                faces,
                color,
            } => Object3D::custom(vertices.clone(), faces.clone(), *color),
        }
    }
}
