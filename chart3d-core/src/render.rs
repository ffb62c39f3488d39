/// Turning a world and a view point into an ordered list of 2D polygons
use nalgebra::{Unit, Vector3};
use tracing::{debug, trace};

use crate::color::Color;
use crate::error::{require_positive, Error, Result};
use crate::object::MarkerPosition;
use crate::point::Point2D;
use crate::sort::{FaceSorter, StandardFaceSorter};
use crate::viewpoint::{project, ViewPoint3D};
use crate::world::World;

/// A directional light, fixed relative to the camera.
///
/// The direction points from the scene towards the light, in eye
/// coordinates (x right, y up, z towards the viewer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    direction: Unit<Vector3<f64>>,
}

impl Light {
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        let direction = Unit::try_new(Vector3::new(x, y, z), 0.0)
            .filter(|d| d.iter().all(|c| c.is_finite()))
            .ok_or(Error::ZeroLengthVector("light direction"))?;
        Ok(Self { direction })
    }

    pub fn direction(&self) -> Vector3<f64> {
        self.direction.into_inner()
    }

    /// Shade factor in [0, 1] for a unit face normal: 1 when the face looks
    /// straight at the light, 0 when it looks straight away
    pub fn shade(&self, normal: &Vector3<f64>) -> f64 {
        ((normal.dot(&self.direction) + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Unit::new_normalize(Vector3::new(-1.0, -1.0, 1.0)),
        }
    }
}

/// Settings of a render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Distance from the eye to the viewing plane, in screen units
    pub projection_distance: f64,
    pub light: Light,
    /// Faces with any vertex closer to the eye plane than this are dropped
    pub near_depth: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            projection_distance: 1000.0,
            light: Light::default(),
            near_depth: 1e-3,
        }
    }
}

/// A visible face, ready to be filled
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFace {
    pub object: usize,
    pub face: usize,
    /// Counter-clockwise polygon on the viewing plane, y up
    pub points: Vec<Point2D>,
    pub color: Color,
    pub shade: f64,
}

impl RenderedFace {
    pub fn shaded_color(&self) -> Color {
        self.color.shade(self.shade)
    }
}

/// A label marker in front of the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedMarker {
    pub object: usize,
    pub position: MarkerPosition,
    pub point: Point2D,
    /// Eye-space z of the marker
    pub depth: f64,
}

/// The output of one render pass.
///
/// `faces` is in drawing order: painting them one after another, each over
/// the previous ones, gives the picture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub faces: Vec<RenderedFace>,
    pub markers: Vec<ProjectedMarker>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.markers.is_empty()
    }
}

/// Projects, culls, sorts and shades the faces of a world
#[derive(Debug, Clone)]
pub struct Renderer<S: FaceSorter = StandardFaceSorter> {
    config: RenderConfig,
    sorter: S,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        Self::with_sorter(config, StandardFaceSorter)
    }
}

impl<S: FaceSorter> Renderer<S> {
    pub fn with_sorter(config: RenderConfig, sorter: S) -> Result<Self> {
        require_positive("projection distance", config.projection_distance)?;
        require_positive("near depth", config.near_depth)?;
        Ok(Self { config, sorter })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, world: &World, view_point: &ViewPoint3D) -> Frame {
        let d = self.config.projection_distance;
        let near = -self.config.near_depth;

        let eye = world.calculate_eye_coordinates(view_point);
        let projected: Vec<Point2D> = eye.iter().map(|&p| project(p, d)).collect();

        let faces = world.faces();
        let total = faces.len();
        let in_front: Vec<_> = faces
            .into_iter()
            .filter(|f| f.vertex_indices().all(|i| eye[i].z < near))
            .collect();
        let behind = total - in_front.len();
        let visible: Vec<_> = in_front
            .into_iter()
            .filter(|f| f.is_front_facing(&projected))
            .collect();
        let culled = total - behind - visible.len();

        let faces: Vec<RenderedFace> = self
            .sorter
            .sort(visible, &eye)
            .into_iter()
            .map(|f| {
                let shade = f
                    .calculate_normal(&eye)
                    .map_or(0.5, |n| self.config.light.shade(&n));
                RenderedFace {
                    object: f.object,
                    face: f.index,
                    points: f.projected_polygon(&projected),
                    color: f.color(),
                    shade,
                }
            })
            .collect();

        let markers: Vec<ProjectedMarker> = world
            .markers()
            .into_iter()
            .filter_map(|m| {
                let i = m.vertex_index();
                (eye[i].z < near).then(|| ProjectedMarker {
                    object: m.object,
                    position: m.marker.position,
                    point: projected[i],
                    depth: eye[i].z,
                })
            })
            .collect();

        debug!(
            objects = world.object_count(),
            vertices = eye.len(),
            faces = total,
            drawn = faces.len(),
            back_facing = culled,
            behind_eye = behind,
            markers = markers.len(),
            "Rendered frame"
        );
        trace!(%view_point, "View point");

        Frame { faces, markers }
    }
}
