/// A collection of solids rendered together
use crate::error::Result;
use crate::face::FaceRef;
use crate::object::{Marker, Object3D};
use crate::point::{Point2D, Point3D};
use crate::solid::Solid;
use crate::viewpoint::{project, ViewPoint3D};

/// A marker as seen from the world that holds its object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerRef {
    pub object: usize,
    pub offset: usize,
    pub marker: Marker,
}

impl MarkerRef {
    /// Index of the marker's vertex in the world's flattened arrays
    pub fn vertex_index(&self) -> usize {
        self.offset + self.marker.vertex
    }
}

/// An ordered set of objects.
///
/// All per-vertex results are *flattened*: objects in insertion order, each
/// object's vertices in local order. Object `k`'s local vertex `i` lands at
/// index `sum(vertex counts of objects before k) + i`, the same offset that
/// [`World::faces`] reports for `k`'s faces.
///
/// A world is meant to be used from one thread at a time. Face and marker
/// references borrow the world, so it cannot be changed while a render pass
/// holds them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    objects: Vec<Object3D>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object, returning its index
    pub fn add(&mut self, object: Object3D) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_all(&mut self, objects: impl IntoIterator<Item = Object3D>) {
        self.objects.extend(objects);
    }

    /// Build a solid and append it
    pub fn add_solid(&mut self, solid: &Solid) -> Result<usize> {
        Ok(self.add(solid.to_vertices_and_faces()?))
    }

    pub fn objects(&self) -> &[Object3D] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Total number of vertices over all objects
    pub fn vertex_count(&self) -> usize {
        self.objects.iter().map(Object3D::vertex_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Every vertex in eye coordinates, flattened
    pub fn calculate_eye_coordinates(&self, view_point: &ViewPoint3D) -> Vec<Point3D> {
        let transform = view_point.eye_transform();
        self.objects
            .iter()
            .flat_map(|object| object.vertices().iter())
            .map(|&v| transform.apply(v))
            .collect()
    }

    /// Every vertex projected onto the viewing plane at distance `d`, flattened
    pub fn calculate_projected_points(&self, view_point: &ViewPoint3D, d: f64) -> Vec<Point2D> {
        self.calculate_eye_coordinates(view_point)
            .into_iter()
            .map(|eye| project(eye, d))
            .collect()
    }

    /// Every face of every object, with the offset of its object.
    ///
    /// Offsets are computed on each call from the current objects.
    pub fn faces(&self) -> Vec<FaceRef<'_>> {
        let mut faces = Vec::new();
        for (object, offset, solid) in self.with_offsets() {
            faces.extend(solid.faces().iter().enumerate().map(|(index, face)| FaceRef {
                object,
                index,
                offset,
                face,
            }));
        }
        faces
    }

    /// Every label marker of every object, flattened like [`World::faces`]
    pub fn markers(&self) -> Vec<MarkerRef> {
        let mut markers = Vec::new();
        for (object, offset, solid) in self.with_offsets() {
            markers.extend(solid.markers().iter().map(|&marker| MarkerRef {
                object,
                offset,
                marker,
            }));
        }
        markers
    }

    fn with_offsets(&self) -> impl Iterator<Item = (usize, usize, &Object3D)> {
        self.objects
            .iter()
            .enumerate()
            .scan(0, |offset, (index, object)| {
                let start = *offset;
                *offset += object.vertex_count();
                Some((index, start, object))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::object::MarkerPosition;
    use std::f64::consts::FRAC_PI_2;

    fn sample_world() -> World {
        let mut world = World::new();
        world.add(Object3D::tetrahedron(1.0, Point3D::new(-3.0, 0.0, 0.0), Color::RED).unwrap());
        world.add(Object3D::cube(1.0, Point3D::ORIGIN, Color::GREEN).unwrap());
        world.add(Object3D::pie_label_markers(2.0, 0.0, 0.0, 1.0, 0.0..FRAC_PI_2).unwrap());
        world.add(Object3D::octahedron(1.0, Point3D::new(3.0, 0.0, 0.0), Color::BLUE).unwrap());
        world
    }

    #[test]
    fn test_add_returns_index() {
        let mut world = World::new();
        assert!(world.is_empty());
        let cube = Object3D::cube(1.0, Point3D::ORIGIN, Color::RED).unwrap();
        assert_eq!(world.add(cube.clone()), 0);
        assert_eq!(world.add(cube), 1);
        assert_eq!(world.object_count(), 2);
        assert_eq!(world.vertex_count(), 16);
        world.clear();
        assert!(world.is_empty());
    }

    #[test]
    fn test_add_solid() {
        let mut world = World::new();
        let index = world
            .add_solid(&Solid::Tetrahedron {
                size: 1.0,
                center: Point3D::ORIGIN,
                color: Color::RED,
            })
            .unwrap();
        assert_eq!(index, 0);
        assert!(world
            .add_solid(&Solid::Cube {
                size: -1.0,
                center: Point3D::ORIGIN,
                color: Color::RED,
            })
            .is_err());
        assert_eq!(world.object_count(), 1);
    }

    #[test]
    fn test_face_offsets_follow_flattening() {
        let world = sample_world();
        let faces = world.faces();
        assert_eq!(faces.len(), 4 + 6 + 8);

        let offsets: Vec<(usize, usize)> = faces.iter().map(|f| (f.object, f.offset)).collect();
        assert_eq!(offsets[0], (0, 0));
        assert_eq!(offsets[4], (1, 4));
        // the marker object has no faces but still owns two vertices
        assert_eq!(offsets[10], (3, 14));

        let markers = world.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].object, 2);
        assert_eq!(markers[0].vertex_index(), 12);
        assert_eq!(markers[1].marker.position, MarkerPosition::Top);
    }

    #[test]
    fn test_eye_coordinates_match_objects() {
        let world = sample_world();
        let view_point = ViewPoint3D::default();
        let eye = world.calculate_eye_coordinates(&view_point);
        assert_eq!(eye.len(), world.vertex_count());
        let per_object: Vec<Point3D> = world
            .objects()
            .iter()
            .flat_map(|o| o.calculate_eye_coordinates(&view_point))
            .collect();
        assert_eq!(eye, per_object);

        let projected = world.calculate_projected_points(&view_point, 500.0);
        assert_eq!(projected[5], view_point.world_to_screen(world.objects()[1].vertices()[1], 500.0));
    }

    #[test]
    fn test_empty_world() {
        let world = World::new();
        let view_point = ViewPoint3D::default();
        assert!(world.calculate_eye_coordinates(&view_point).is_empty());
        assert!(world.faces().is_empty());
        assert!(world.markers().is_empty());
    }
}
