/// Faces of 3D objects and their placement in a world
use nalgebra::Vector3;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::point::{Point2D, Point3D};
use crate::tools2d::signed_area2;

/// Normals shorter than this (before normalization) belong to degenerate faces
const NORMAL_EPSILON: f64 = 1e-12;

/// A planar polygon referencing vertices of its owning object.
///
/// The winding order matters: seen from outside the solid, the vertices run
/// counter-clockwise, so the right-hand normal points outwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    vertices: Vec<usize>,
    color: Color,
}

impl Face {
    pub fn new(vertices: Vec<usize>, color: Color) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::DegenerateFace(vertices.len()));
        }
        Ok(Self { vertices, color })
    }

    /// Local vertex indices, in winding order
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The unit normal in the frame of `points`, from the first three vertices.
    ///
    /// `offset` is the index in `points` where the owning object's vertices
    /// start. Returns `None` for faces whose first three vertices are
    /// collinear.
    pub fn calculate_normal(&self, points: &[Point3D], offset: usize) -> Option<Vector3<f64>> {
        let a = points[offset + self.vertices[0]].to_point();
        let b = points[offset + self.vertices[1]].to_point();
        let c = points[offset + self.vertices[2]].to_point();

        let edge1 = b - a;
        let edge2 = c - a;

        edge1.cross(&edge2).try_normalize(NORMAL_EPSILON)
    }

    /// Mean z over all vertices of the face.
    ///
    /// Used as the painter's-algorithm sort key; it is not an exact depth.
    pub fn calculate_average_z_value(&self, points: &[Point3D], offset: usize) -> f64 {
        let total: f64 = self.vertices.iter().map(|&i| points[offset + i].z).sum();
        total / self.vertices.len() as f64
    }
}

/// A face as seen from the world that holds its object.
///
/// `offset` is where the owning object's vertices begin in the world's
/// flattened vertex arrays, so local index `i` maps to `offset + i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRef<'a> {
    /// Index of the owning object in the world
    pub object: usize,
    /// Index of the face within its object
    pub index: usize,
    pub offset: usize,
    pub face: &'a Face,
}

impl<'a> FaceRef<'a> {
    /// Global index of the face's `i`-th vertex
    pub fn vertex_index(&self, i: usize) -> usize {
        self.offset + self.face.vertices[i]
    }

    pub fn vertex_indices(&self) -> impl Iterator<Item = usize> + 'a {
        let offset = self.offset;
        self.face.vertices.iter().map(move |&i| offset + i)
    }

    pub fn color(&self) -> Color {
        self.face.color
    }

    pub fn calculate_normal(&self, eye_points: &[Point3D]) -> Option<Vector3<f64>> {
        self.face.calculate_normal(eye_points, self.offset)
    }

    pub fn calculate_average_z_value(&self, eye_points: &[Point3D]) -> f64 {
        self.face.calculate_average_z_value(eye_points, self.offset)
    }

    /// True when the first three projected vertices run counter-clockwise.
    ///
    /// Degenerate (zero-area) faces count as back-facing.
    pub fn is_front_facing(&self, projected: &[Point2D]) -> bool {
        signed_area2(
            &projected[self.vertex_index(0)],
            &projected[self.vertex_index(1)],
            &projected[self.vertex_index(2)],
        ) > 0.0
    }

    /// The face's polygon on the viewing plane
    pub fn projected_polygon(&self, projected: &[Point2D]) -> Vec<Point2D> {
        self.vertex_indices().map(|i| projected[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square_points() -> Vec<Point3D> {
        vec![
            Point3D::new(9.0, 9.0, 9.0), // belongs to another object
            Point3D::new(0.0, 0.0, -2.0),
            Point3D::new(1.0, 0.0, -2.0),
            Point3D::new(1.0, 1.0, -4.0),
            Point3D::new(0.0, 1.0, -4.0),
        ]
    }

    #[test]
    fn test_face_needs_three_vertices() {
        assert_eq!(Face::new(vec![0, 1], Color::RED), Err(Error::DegenerateFace(2)));
        assert!(Face::new(vec![0, 1, 2], Color::RED).is_ok());
    }

    #[test]
    fn test_normal_follows_winding() {
        let points = vec![
            Point3D::ORIGIN,
            Point3D::UNIT_X,
            Point3D::UNIT_Y,
        ];
        let ccw = Face::new(vec![0, 1, 2], Color::RED).unwrap();
        let n = ccw.calculate_normal(&points, 0).unwrap();
        assert_abs_diff_eq!(n, Vector3::z(), epsilon = 1e-12);

        let cw = Face::new(vec![0, 2, 1], Color::RED).unwrap();
        let n = cw.calculate_normal(&points, 0).unwrap();
        assert_abs_diff_eq!(n, -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_face_has_no_normal() {
        let points = vec![
            Point3D::ORIGIN,
            Point3D::new(1.0, 1.0, 1.0),
            Point3D::new(2.0, 2.0, 2.0),
        ];
        let face = Face::new(vec![0, 1, 2], Color::RED).unwrap();
        assert_eq!(face.calculate_normal(&points, 0), None);
    }

    #[test]
    fn test_average_z_uses_offset() {
        let points = square_points();
        let face = Face::new(vec![0, 1, 2, 3], Color::BLUE).unwrap();
        assert_eq!(face.calculate_average_z_value(&points, 1), -3.0);
    }

    #[test]
    fn test_face_ref_indices() {
        let face = Face::new(vec![0, 1, 2, 3], Color::BLUE).unwrap();
        let face_ref = FaceRef {
            object: 1,
            index: 0,
            offset: 1,
            face: &face,
        };
        assert_eq!(face_ref.vertex_index(2), 3);
        assert_eq!(face_ref.vertex_indices().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(face_ref.calculate_average_z_value(&square_points()), -3.0);
    }

    #[test]
    fn test_front_facing() {
        let projected = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(2.0, 0.0),
        ];
        let ccw = Face::new(vec![0, 1, 2], Color::RED).unwrap();
        let cw = Face::new(vec![0, 2, 1], Color::RED).unwrap();
        let flat = Face::new(vec![0, 1, 3], Color::RED).unwrap();
        fn as_ref(face: &Face) -> FaceRef<'_> {
            FaceRef {
                object: 0,
                index: 0,
                offset: 0,
                face,
            }
        }
        assert!(as_ref(&ccw).is_front_facing(&projected));
        assert!(!as_ref(&cw).is_front_facing(&projected));
        assert!(!as_ref(&flat).is_front_facing(&projected));
    }
}
