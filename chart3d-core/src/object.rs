/// Solid objects built from vertices and faces
///
/// All factories author solids with the world Z axis pointing up and faces
/// wound counter-clockwise when seen from outside.
use std::f64::consts::PI;
use std::ops::Range;

use crate::color::Color;
use crate::error::{require_finite, require_positive, Error, Result};
use crate::face::Face;
use crate::point::{Point2D, Point3D};
use crate::viewpoint::{project, ViewPoint3D};

/// Most pieces a pie segment's arc may be split into
pub const MAX_PIE_PIECES: usize = 4096;

/// Most latitude bands a sphere may have
pub const MAX_SPHERE_SEGMENTS: usize = 1024;

/// Where a label marker sits on its pie segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerPosition {
    Base,
    Top,
}

/// A zero-volume anchor point used to place labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Local vertex index of the anchor
    pub vertex: usize,
    pub position: MarkerPosition,
}

/// Colours for a bar's faces.
///
/// `base` and `top` default to `side`. The base colour goes on the lower
/// end face and the top colour on the upper one, so for a bar hanging below
/// its zero line the two swap ends relative to `zero` and `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarColors {
    pub side: Color,
    pub base: Option<Color>,
    pub top: Option<Color>,
}

impl BarColors {
    pub fn new(side: Color, base: Option<Color>, top: Option<Color>) -> Self {
        Self { side, base, top }
    }
}

impl From<Color> for BarColors {
    fn from(side: Color) -> Self {
        Self::new(side, None, None)
    }
}

/// A solid: vertices in object-local space plus faces indexing them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object3D {
    vertices: Vec<Point3D>,
    faces: Vec<Face>,
    markers: Vec<Marker>,
}

impl Object3D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex, returning its local index
    pub fn add_vertex(&mut self, vertex: Point3D) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Add a face over existing vertices
    pub fn add_face(&mut self, vertices: Vec<usize>, color: Color) -> Result<()> {
        self.check_indices(&vertices)?;
        self.faces.push(Face::new(vertices, color)?);
        Ok(())
    }

    pub fn add_marker(&mut self, vertex: usize, position: MarkerPosition) -> Result<()> {
        self.check_indices(&[vertex])?;
        self.markers.push(Marker { vertex, position });
        Ok(())
    }

    fn check_indices(&self, indices: &[usize]) -> Result<()> {
        let count = self.vertices.len();
        match indices.iter().find(|&&i| i >= count) {
            Some(&index) => Err(Error::VertexIndexOutOfRange { index, count }),
            None => Ok(()),
        }
    }

    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn calculate_eye_coordinates(&self, view_point: &ViewPoint3D) -> Vec<Point3D> {
        let transform = view_point.eye_transform();
        self.vertices.iter().map(|&v| transform.apply(v)).collect()
    }

    pub fn calculate_projected_points(&self, view_point: &ViewPoint3D, d: f64) -> Vec<Point2D> {
        self.calculate_eye_coordinates(view_point)
            .into_iter()
            .map(|eye| project(eye, d))
            .collect()
    }

    /// A cube with edge length `size` centred on `center`
    pub fn cube(size: f64, center: Point3D, color: Color) -> Result<Self> {
        Self::cuboid(center, size, size, size, color)
    }

    /// An axis-aligned box centred on `center`
    pub fn cuboid(center: Point3D, xdim: f64, ydim: f64, zdim: f64, color: Color) -> Result<Self> {
        let dx = require_positive("x dimension", xdim)? / 2.0;
        let dy = require_positive("y dimension", ydim)? / 2.0;
        let dz = require_positive("z dimension", zdim)? / 2.0;
        Self::box_between(
            center - Point3D::new(dx, dy, dz),
            center + Point3D::new(dx, dy, dz),
            color.into(),
        )
    }

    fn box_between(min: Point3D, max: Point3D, colors: BarColors) -> Result<Self> {
        let color = colors.side;
        let mut solid = Self::new();
        solid.add_vertex(Point3D::new(min.x, min.y, min.z));
        solid.add_vertex(Point3D::new(max.x, min.y, min.z));
        solid.add_vertex(Point3D::new(max.x, min.y, max.z));
        solid.add_vertex(Point3D::new(min.x, min.y, max.z));
        solid.add_vertex(Point3D::new(min.x, max.y, min.z));
        solid.add_vertex(Point3D::new(max.x, max.y, min.z));
        solid.add_vertex(Point3D::new(max.x, max.y, max.z));
        solid.add_vertex(Point3D::new(min.x, max.y, max.z));
        solid.add_face(vec![4, 5, 1, 0], colors.base.unwrap_or(color))?; // -z
        solid.add_face(vec![5, 6, 2, 1], color)?; // +x
        solid.add_face(vec![6, 7, 3, 2], colors.top.unwrap_or(color))?; // +z
        solid.add_face(vec![3, 7, 4, 0], color)?; // -x
        solid.add_face(vec![7, 6, 5, 4], color)?; // +y
        solid.add_face(vec![0, 1, 2, 3], color)?; // -y
        Ok(solid)
    }

    /// A vertical bar standing on the XY plane at `(x, y)`, spanning `zero` to `value`.
    ///
    /// Negative bars (`value < zero`) hang below the base line. A bar with
    /// `value == zero` is flat. A plain [`Color`] paints every face alike;
    /// pass [`BarColors`] to give the end faces their own colours.
    pub fn bar(
        x: f64,
        y: f64,
        x_width: f64,
        y_width: f64,
        zero: f64,
        value: f64,
        colors: impl Into<BarColors>,
    ) -> Result<Self> {
        let dx = require_positive("bar x width", x_width)? / 2.0;
        let dy = require_positive("bar y width", y_width)? / 2.0;
        let zero = require_finite("bar base", zero)?;
        let value = require_finite("bar value", value)?;
        let x = require_finite("bar x", x)?;
        let y = require_finite("bar y", y)?;
        Self::box_between(
            Point3D::new(x - dx, y - dy, zero.min(value)),
            Point3D::new(x + dx, y + dy, zero.max(value)),
            colors.into(),
        )
    }

    /// A regular tetrahedron inscribed in the cube `center ± size`
    pub fn tetrahedron(size: f64, center: Point3D, color: Color) -> Result<Self> {
        let s = require_positive("size", size)?;
        let mut tetra = Self::new();
        tetra.add_vertex(center + Point3D::new(s, -s, -s));
        tetra.add_vertex(center + Point3D::new(-s, s, -s));
        tetra.add_vertex(center + Point3D::new(s, s, s));
        tetra.add_vertex(center + Point3D::new(-s, -s, s));
        tetra.add_face(vec![0, 1, 2], color)?;
        tetra.add_face(vec![1, 3, 2], color)?;
        tetra.add_face(vec![0, 3, 1], color)?;
        tetra.add_face(vec![0, 2, 3], color)?;
        Ok(tetra)
    }

    /// A regular octahedron with vertices at distance `size` along each axis
    pub fn octahedron(size: f64, center: Point3D, color: Color) -> Result<Self> {
        let s = require_positive("size", size)?;
        let mut octa = Self::new();
        octa.add_vertex(center + Point3D::new(s, 0.0, 0.0));
        octa.add_vertex(center + Point3D::new(0.0, s, 0.0));
        octa.add_vertex(center + Point3D::new(-s, 0.0, 0.0));
        octa.add_vertex(center + Point3D::new(0.0, -s, 0.0));
        octa.add_vertex(center + Point3D::new(0.0, 0.0, -s));
        octa.add_vertex(center + Point3D::new(0.0, 0.0, s));
        for &[a, b, c] in &[
            [0, 1, 5],
            [1, 2, 5],
            [2, 3, 5],
            [3, 0, 5],
            [1, 0, 4],
            [2, 1, 4],
            [3, 2, 4],
            [0, 3, 4],
        ] {
            octa.add_face(vec![a, b, c], color)?;
        }
        Ok(octa)
    }

    /// A UV sphere with poles on the Z axis.
    ///
    /// `segments` latitude bands and `2 * segments` longitude slices; the
    /// faces alternate between `primary` and `secondary` in a checker
    /// pattern. Caps are triangles, the rest quadrilaterals.
    pub fn sphere(
        radius: f64,
        segments: usize,
        center: Point3D,
        primary: Color,
        secondary: Color,
    ) -> Result<Self> {
        let radius = require_positive("radius", radius)?;
        if segments < 3 {
            return Err(Error::TooFewSegments(segments));
        }
        if segments > MAX_SPHERE_SEGMENTS {
            return Err(Error::invalid(
                "sphere segments",
                format!("at most {MAX_SPHERE_SEGMENTS} allowed, got {segments}"),
            ));
        }
        let slices = segments * 2;
        let step = PI / segments as f64;

        let mut sphere = Self::new();
        let top = sphere.add_vertex(center + Point3D::new(0.0, 0.0, radius));
        for ring in 1..segments {
            for slice in 0..slices {
                let p = Point3D::from_spherical(slice as f64 * step, ring as f64 * step, radius);
                sphere.add_vertex(center + p);
            }
        }
        let bottom = sphere.add_vertex(center - Point3D::new(0.0, 0.0, radius));

        // vertex at ring 1..segments-1, any slice (wrapping)
        let at = |ring: usize, slice: usize| 1 + (ring - 1) * slices + slice % slices;
        let color = |band: usize, slice: usize| {
            if (band + slice) % 2 == 0 {
                primary
            } else {
                secondary
            }
        };

        for slice in 0..slices {
            sphere.add_face(vec![top, at(1, slice), at(1, slice + 1)], color(0, slice))?;
        }
        for ring in 1..segments - 1 {
            for slice in 0..slices {
                sphere.add_face(
                    vec![
                        at(ring, slice),
                        at(ring + 1, slice),
                        at(ring + 1, slice + 1),
                        at(ring, slice + 1),
                    ],
                    color(ring, slice),
                )?;
            }
        }
        let last = segments - 1;
        for slice in 0..slices {
            sphere.add_face(
                vec![at(last, slice), bottom, at(last, slice + 1)],
                color(last, slice),
            )?;
        }
        Ok(sphere)
    }

    /// A wedge of a pie, lying in the XY plane between `base` and `base + height`.
    ///
    /// `angles` runs counter-clockwise seen from above (from +X towards +Y).
    /// The arc is split into `ceil(angle span / step)` equal pieces, at most
    /// [`MAX_PIE_PIECES`]. A
    /// non-zero `explode_radius` moves the wedge outwards along its
    /// bisector.
    pub fn pie_segment(
        radius: f64,
        explode_radius: f64,
        base: f64,
        height: f64,
        angles: Range<f64>,
        step: f64,
        color: Color,
    ) -> Result<Self> {
        let radius = require_positive("radius", radius)?;
        let height = require_positive("height", height)?;
        let step = require_positive("angular step", step)?;
        let base = require_finite("base", base)?;
        let explode_radius = require_finite("explode radius", explode_radius)?;
        let span = check_angles(&angles)?;
        let pieces = (span / step).ceil().max(1.0);
        if pieces > MAX_PIE_PIECES as f64 {
            return Err(Error::invalid(
                "angular step",
                format!("gives {pieces} pieces, at most {MAX_PIE_PIECES} allowed"),
            ));
        }
        let pieces = pieces as usize;

        let centre = bisector_offset(explode_radius, &angles);
        let rim = |theta: f64, z: f64| {
            Point3D::new(
                centre.x + radius * theta.cos(),
                centre.y + radius * theta.sin(),
                z,
            )
        };

        let mut segment = Self::new();
        let centre_base = segment.add_vertex(Point3D::new(centre.x, centre.y, base));
        let centre_top = segment.add_vertex(Point3D::new(centre.x, centre.y, base + height));
        for i in 0..=pieces {
            let theta = if i == pieces {
                angles.end
            } else {
                angles.start + span * i as f64 / pieces as f64
            };
            segment.add_vertex(rim(theta, base));
            segment.add_vertex(rim(theta, base + height));
        }
        let rim_base = |i: usize| 2 + 2 * i;
        let rim_top = |i: usize| 3 + 2 * i;

        // side at the start angle
        segment.add_face(
            vec![centre_base, rim_base(0), rim_top(0), centre_top],
            color,
        )?;
        for i in 0..pieces {
            // outer band
            segment.add_face(
                vec![rim_base(i), rim_base(i + 1), rim_top(i + 1), rim_top(i)],
                color,
            )?;
            segment.add_face(vec![centre_top, rim_top(i), rim_top(i + 1)], color)?;
            segment.add_face(vec![centre_base, rim_base(i + 1), rim_base(i)], color)?;
        }
        // side at the end angle
        segment.add_face(
            vec![centre_base, centre_top, rim_top(pieces), rim_base(pieces)],
            color,
        )?;
        Ok(segment)
    }

    /// Label anchors for a pie segment built with the same arguments.
    ///
    /// Two markers sit on the segment's bisector at 90% of the radius, one
    /// on the base and one on the top.
    pub fn pie_label_markers(
        radius: f64,
        explode_radius: f64,
        base: f64,
        height: f64,
        angles: Range<f64>,
    ) -> Result<Self> {
        let radius = require_positive("radius", radius)?;
        let height = require_positive("height", height)?;
        let base = require_finite("base", base)?;
        let explode_radius = require_finite("explode radius", explode_radius)?;
        check_angles(&angles)?;

        let centre = bisector_offset(explode_radius, &angles);
        let angle = (angles.start + angles.end) / 2.0;
        let r = radius * 0.9;
        let x = centre.x + r * angle.cos();
        let y = centre.y + r * angle.sin();

        let mut markers = Self::new();
        let below = markers.add_vertex(Point3D::new(x, y, base));
        let above = markers.add_vertex(Point3D::new(x, y, base + height));
        markers.add_marker(below, MarkerPosition::Base)?;
        markers.add_marker(above, MarkerPosition::Top)?;
        Ok(markers)
    }

    /// A square in the plane `y = center.y`, facing -Y (or +Y when inverted)
    pub fn y_sheet(size: f64, center: Point3D, color: Color, invert: bool) -> Result<Self> {
        let d = require_positive("size", size)? / 2.0;
        let mut sheet = Self::new();
        sheet.add_vertex(center + Point3D::new(d, 0.0, -d));
        sheet.add_vertex(center + Point3D::new(d, 0.0, d));
        sheet.add_vertex(center + Point3D::new(-d, 0.0, d));
        sheet.add_vertex(center + Point3D::new(-d, 0.0, -d));
        if invert {
            sheet.add_face(vec![3, 2, 1, 0], color)?;
        } else {
            sheet.add_face(vec![0, 1, 2, 3], color)?;
        }
        Ok(sheet)
    }

    /// A square in the plane `z = center.z`, facing +Z
    pub fn z_sheet(size: f64, center: Point3D, color: Color) -> Result<Self> {
        let d = require_positive("size", size)? / 2.0;
        let mut sheet = Self::new();
        sheet.add_vertex(center + Point3D::new(d, -d, 0.0));
        sheet.add_vertex(center + Point3D::new(d, d, 0.0));
        sheet.add_vertex(center + Point3D::new(-d, d, 0.0));
        sheet.add_vertex(center + Point3D::new(-d, -d, 0.0));
        sheet.add_face(vec![0, 1, 2, 3], color)?;
        Ok(sheet)
    }

    /// An arbitrary mesh; every face must have at least three valid indices
    pub fn custom(vertices: Vec<Point3D>, faces: Vec<Vec<usize>>, color: Color) -> Result<Self> {
        let mut mesh = Self {
            vertices,
            ..Self::default()
        };
        for face in faces {
            mesh.add_face(face, color)?;
        }
        Ok(mesh)
    }
}

fn check_angles(angles: &Range<f64>) -> Result<f64> {
    let start = require_finite("start angle", angles.start)?;
    let end = require_finite("end angle", angles.end)?;
    if end <= start {
        return Err(Error::invalid(
            "angle range",
            format!("end ({end}) must be greater than start ({start})"),
        ));
    }
    Ok(end - start)
}

fn bisector_offset(explode_radius: f64, angles: &Range<f64>) -> Point3D {
    let angle = (angles.start + angles.end) / 2.0;
    Point3D::new(explode_radius * angle.cos(), explode_radius * angle.sin(), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    /// Every face normal must point away from the solid's interior point
    fn assert_outward(solid: &Object3D, inside: Point3D) {
        for (i, face) in solid.faces().iter().enumerate() {
            let normal = face
                .calculate_normal(solid.vertices(), 0)
                .unwrap_or_else(|| panic!("face {i} is degenerate"));
            let centroid = face
                .vertices()
                .iter()
                .fold(Point3D::ORIGIN, |acc, &v| acc + solid.vertices()[v])
                * (1.0 / face.vertex_count() as f64);
            let outward = (centroid - inside).to_vector();
            assert!(normal.dot(&outward) > 0.0, "face {i} points inwards");
        }
    }

    #[test]
    fn test_cube() {
        let cube = Object3D::cube(2.0, Point3D::new(1.0, 2.0, 3.0), Color::RED).unwrap();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 6);
        assert!(cube.faces().iter().all(|f| f.vertex_count() == 4 && f.color() == Color::RED));
        assert!(cube.vertices().contains(&Point3D::new(0.0, 1.0, 2.0)));
        assert!(cube.vertices().contains(&Point3D::new(2.0, 3.0, 4.0)));
        assert_outward(&cube, Point3D::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert!(Object3D::cube(0.0, Point3D::ORIGIN, Color::RED).is_err());
        assert!(Object3D::cuboid(Point3D::ORIGIN, 1.0, -1.0, 1.0, Color::RED).is_err());
        assert!(Object3D::tetrahedron(f64::NAN, Point3D::ORIGIN, Color::RED).is_err());
        assert!(Object3D::octahedron(-2.0, Point3D::ORIGIN, Color::RED).is_err());
    }

    #[test]
    fn test_bars() {
        let up = Object3D::bar(1.0, 2.0, 0.5, 0.5, 0.0, 3.0, Color::BLUE).unwrap();
        assert_outward(&up, Point3D::new(1.0, 2.0, 1.5));
        let down = Object3D::bar(1.0, 2.0, 0.5, 0.5, 0.0, -3.0, Color::BLUE).unwrap();
        assert_outward(&down, Point3D::new(1.0, 2.0, -1.5));
        let z: Vec<f64> = down.vertices().iter().map(|v| v.z).collect();
        assert!(z.iter().all(|&z| z == 0.0 || z == -3.0));
        assert!(Object3D::bar(0.0, 0.0, 0.0, 1.0, 0.0, 1.0, Color::BLUE).is_err());
    }

    /// Colour of the face whose vertices all lie at height `z`
    fn end_face_color(bar: &Object3D, z: f64) -> Color {
        bar.faces()
            .iter()
            .find(|f| f.vertices().iter().all(|&v| bar.vertices()[v].z == z))
            .map(|f| f.color())
            .unwrap_or_else(|| panic!("no face at z = {z}"))
    }

    #[test]
    fn test_bar_end_colors() {
        let colors = BarColors::new(Color::BLUE, Some(Color::RED), Some(Color::GREEN));
        let up = Object3D::bar(0.0, 0.0, 1.0, 1.0, 0.0, 2.0, colors).unwrap();
        assert_eq!(end_face_color(&up, 0.0), Color::RED);
        assert_eq!(end_face_color(&up, 2.0), Color::GREEN);
        let sides = up.faces().iter().filter(|f| f.color() == Color::BLUE).count();
        assert_eq!(sides, 4);

        // hanging below zero, the top colour moves to the zero end
        let down = Object3D::bar(0.0, 0.0, 1.0, 1.0, 0.0, -2.0, colors).unwrap();
        assert_eq!(end_face_color(&down, 0.0), Color::GREEN);
        assert_eq!(end_face_color(&down, -2.0), Color::RED);

        let plain = BarColors::new(Color::BLUE, None, Some(Color::GREEN));
        let bar = Object3D::bar(0.0, 0.0, 1.0, 1.0, 0.0, 2.0, plain).unwrap();
        assert_eq!(end_face_color(&bar, 0.0), Color::BLUE);
        assert_eq!(end_face_color(&bar, 2.0), Color::GREEN);
    }

    #[test]
    fn test_tetrahedron_and_octahedron() {
        let centre = Point3D::new(-1.0, 4.0, 0.5);
        let tetra = Object3D::tetrahedron(1.0, centre, Color::GREEN).unwrap();
        assert_eq!((tetra.vertex_count(), tetra.face_count()), (4, 4));
        assert_outward(&tetra, centre);
        let octa = Object3D::octahedron(1.0, centre, Color::GREEN).unwrap();
        assert_eq!((octa.vertex_count(), octa.face_count()), (6, 8));
        assert_outward(&octa, centre);
    }

    #[test]
    fn test_sphere() {
        let centre = Point3D::new(0.0, 0.0, 2.0);
        let sphere = Object3D::sphere(1.5, 4, centre, Color::RED, Color::WHITE).unwrap();
        // two poles plus 3 rings of 8
        assert_eq!(sphere.vertex_count(), 2 + 3 * 8);
        // two caps of 8 triangles plus 2 bands of 8 quads
        assert_eq!(sphere.face_count(), 8 * 4);
        for v in sphere.vertices() {
            assert_abs_diff_eq!((*v - centre).length(), 1.5, epsilon = 1e-12);
        }
        assert_outward(&sphere, centre);
        let reds = sphere.faces().iter().filter(|f| f.color() == Color::RED).count();
        assert_eq!(reds, sphere.face_count() / 2);
    }

    #[test]
    fn test_sphere_needs_three_segments() {
        assert_eq!(
            Object3D::sphere(1.0, 2, Point3D::ORIGIN, Color::RED, Color::RED),
            Err(Error::TooFewSegments(2))
        );
    }

    #[test]
    fn test_sphere_segment_count_is_bounded() {
        let sphere = |segments| {
            Object3D::sphere(1.0, segments, Point3D::ORIGIN, Color::RED, Color::RED)
        };
        assert!(sphere(MAX_SPHERE_SEGMENTS + 1).is_err());
        assert!(sphere(usize::MAX).is_err());
        assert!(matches!(
            sphere(usize::MAX / 2 + 1),
            Err(Error::InvalidArgument { name: "sphere segments", .. })
        ));
    }

    #[test]
    fn test_pie_segment() {
        let segment =
            Object3D::pie_segment(2.0, 0.0, 0.0, 0.5, 0.0..FRAC_PI_2, 0.1, Color::ORANGE).unwrap();
        let pieces = (FRAC_PI_2 / 0.1).ceil() as usize;
        assert_eq!(segment.vertex_count(), 2 + 2 * (pieces + 1));
        assert_eq!(segment.face_count(), 2 + 3 * pieces);
        assert_outward(&segment, Point3D::new(0.5, 0.5, 0.25));

        let last = segment.vertices()[segment.vertex_count() - 1];
        assert_abs_diff_eq!(last.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(last.y, 2.0, epsilon = 1e-12);
        assert_eq!(last.z, 0.5);
    }

    #[test]
    fn test_exploded_pie_segment_moves_along_bisector() {
        let angles = 0.0..FRAC_PI_2;
        let segment =
            Object3D::pie_segment(2.0, 1.0, 0.0, 0.5, angles.clone(), 0.2, Color::ORANGE).unwrap();
        let centre = segment.vertices()[0];
        assert_abs_diff_eq!(centre.x, (std::f64::consts::FRAC_PI_4).cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(centre.y, (std::f64::consts::FRAC_PI_4).sin(), epsilon = 1e-12);
        assert_outward(&segment, centre + Point3D::new(0.5, 0.5, 0.25));
    }

    #[test]
    fn test_pie_segment_rejects_bad_angles() {
        assert!(Object3D::pie_segment(1.0, 0.0, 0.0, 1.0, 1.0..1.0, 0.1, Color::RED).is_err());
        assert!(Object3D::pie_segment(1.0, 0.0, 0.0, 1.0, 0.0..1.0, 0.0, Color::RED).is_err());
    }

    #[test]
    fn test_pie_segment_piece_count_is_bounded() {
        let segment = |step| Object3D::pie_segment(1.0, 0.0, 0.0, 1.0, 0.0..1.0, step, Color::RED);
        assert!(matches!(
            segment(f64::MIN_POSITIVE),
            Err(Error::InvalidArgument { name: "angular step", .. })
        ));
        assert!(segment(1e-6).is_err());
        // exactly at the limit is still accepted
        let at_limit = segment(1.0 / MAX_PIE_PIECES as f64).unwrap();
        assert_eq!(at_limit.face_count(), 2 + 3 * MAX_PIE_PIECES);
        assert!(Object3D::pie_segment(1.0, 0.0, 0.0, 1.0, 0.0..1e300, 1.0, Color::RED).is_err());
    }

    #[test]
    fn test_factories_are_deterministic() {
        let a = Object3D::pie_segment(3.0, 0.2, 1.0, 0.4, 0.3..2.0, 0.05, Color::CYAN).unwrap();
        let b = Object3D::pie_segment(3.0, 0.2, 1.0, 0.4, 0.3..2.0, 0.05, Color::CYAN).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pie_label_markers() {
        let markers = Object3D::pie_label_markers(2.0, 0.0, 0.0, 0.5, 0.0..FRAC_PI_2).unwrap();
        assert_eq!(markers.face_count(), 0);
        assert_eq!(markers.vertex_count(), 2);
        let positions: Vec<_> = markers.markers().iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![MarkerPosition::Base, MarkerPosition::Top]);
        let top = markers.vertices()[markers.markers()[1].vertex];
        let r = 1.8 * std::f64::consts::FRAC_PI_4.cos();
        assert_abs_diff_eq!(top.x, r, epsilon = 1e-12);
        assert_abs_diff_eq!(top.y, r, epsilon = 1e-12);
        assert_eq!(top.z, 0.5);
    }

    #[test]
    fn test_pie_label_markers_need_positive_height() {
        assert!(Object3D::pie_label_markers(2.0, 0.0, 0.0, 0.0, 0.0..1.0).is_err());
        assert!(Object3D::pie_label_markers(2.0, 0.0, 0.0, -0.5, 0.0..1.0).is_err());
    }

    #[test]
    fn test_sheets() {
        let y = Object3D::y_sheet(2.0, Point3D::ORIGIN, Color::GRAY, false).unwrap();
        let n = y.faces()[0].calculate_normal(y.vertices(), 0).unwrap();
        assert_abs_diff_eq!(n.y, -1.0, epsilon = 1e-12);
        let inverted = Object3D::y_sheet(2.0, Point3D::ORIGIN, Color::GRAY, true).unwrap();
        let n = inverted.faces()[0].calculate_normal(inverted.vertices(), 0).unwrap();
        assert_abs_diff_eq!(n.y, 1.0, epsilon = 1e-12);
        let z = Object3D::z_sheet(2.0, Point3D::ORIGIN, Color::GRAY).unwrap();
        let n = z.faces()[0].calculate_normal(z.vertices(), 0).unwrap();
        assert_abs_diff_eq!(n.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_custom_mesh_validates_indices() {
        let vertices = vec![Point3D::ORIGIN, Point3D::UNIT_X, Point3D::UNIT_Y];
        assert!(Object3D::custom(vertices.clone(), vec![vec![0, 1, 2]], Color::RED).is_ok());
        assert_eq!(
            Object3D::custom(vertices.clone(), vec![vec![0, 1, 3]], Color::RED),
            Err(Error::VertexIndexOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(
            Object3D::custom(vertices, vec![vec![0, 1]], Color::RED),
            Err(Error::DegenerateFace(2))
        );
    }

    #[test]
    fn test_marker_index_checked() {
        let mut object = Object3D::new();
        object.add_vertex(Point3D::ORIGIN);
        assert!(object.add_marker(0, MarkerPosition::Top).is_ok());
        assert!(object.add_marker(1, MarkerPosition::Top).is_err());
    }
}
