/// Painter's-algorithm ordering of faces
use std::cmp::Ordering;

use crate::face::FaceRef;
use crate::point::Point3D;

/// Orders faces for drawing, first face drawn first
pub trait FaceSorter {
    fn sort<'a>(&self, faces: Vec<FaceRef<'a>>, eye_points: &[Point3D]) -> Vec<FaceRef<'a>>;
}

/// Compares faces by average eye-space z, farthest first.
///
/// Eye z decreases away from the camera, so this is ascending order of
/// average z. It is only a heuristic: faces of interpenetrating or badly
/// overlapping solids can still be drawn in the wrong order.
#[derive(Debug, Clone, Copy)]
pub struct ZOrderComparator<'p> {
    eye_points: &'p [Point3D],
}

impl<'p> ZOrderComparator<'p> {
    pub fn new(eye_points: &'p [Point3D]) -> Self {
        Self { eye_points }
    }

    pub fn compare(&self, a: &FaceRef<'_>, b: &FaceRef<'_>) -> Ordering {
        let za = a.calculate_average_z_value(self.eye_points);
        let zb = b.calculate_average_z_value(self.eye_points);
        za.total_cmp(&zb)
    }
}

/// Stable sort by [`ZOrderComparator`]; faces at equal depth keep their
/// world order
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFaceSorter;

impl FaceSorter for StandardFaceSorter {
    fn sort<'a>(&self, faces: Vec<FaceRef<'a>>, eye_points: &[Point3D]) -> Vec<FaceRef<'a>> {
        // decorate with the sort key
        let mut keyed: Vec<(f64, FaceRef<'a>)> = faces
            .into_iter()
            .map(|face| (face.calculate_average_z_value(eye_points), face))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        keyed.into_iter().map(|(_, face)| face).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::face::Face;

    /// One triangle per depth, each over its own three eye points
    fn setup(depths: &[f64]) -> (Vec<Face>, Vec<Point3D>) {
        let faces = (0..depths.len())
            .map(|i| Face::new(vec![3 * i, 3 * i + 1, 3 * i + 2], Color::WHITE).unwrap())
            .collect();
        let points = depths
            .iter()
            .flat_map(|&d| {
                [
                    Point3D::new(0.0, 0.0, -d),
                    Point3D::new(1.0, 0.0, -d),
                    Point3D::new(0.0, 1.0, -d),
                ]
            })
            .collect();
        (faces, points)
    }

    fn refs(faces: &[Face]) -> Vec<FaceRef<'_>> {
        faces
            .iter()
            .enumerate()
            .map(|(index, face)| FaceRef {
                object: 0,
                index,
                offset: 0,
                face,
            })
            .collect()
    }

    #[test]
    fn test_farthest_first_and_stable() {
        let (faces, points) = setup(&[3.0, 1.0, 2.0, 1.0]);
        let sorted = StandardFaceSorter.sort(refs(&faces), &points);
        let order: Vec<usize> = sorted.iter().map(|f| f.index).collect();
        assert_eq!(order, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_comparator() {
        let (faces, points) = setup(&[2.0, 1.0, 1.0]);
        let refs = refs(&faces);
        let comparator = ZOrderComparator::new(&points);
        assert_eq!(comparator.compare(&refs[0], &refs[1]), Ordering::Less);
        assert_eq!(comparator.compare(&refs[1], &refs[0]), Ordering::Greater);
        assert_eq!(comparator.compare(&refs[1], &refs[2]), Ordering::Equal);
    }

    #[test]
    fn test_empty() {
        assert!(StandardFaceSorter.sort(Vec::new(), &[]).is_empty());
    }
}
