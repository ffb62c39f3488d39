/// chart3d Core Library - Solids, view points and face ordering for 3D charts
///
/// This library turns chart solids (bars, pie segments, spheres, meshes) and a
/// camera position into an ordered list of shaded 2D polygons. Painting
/// those polygons is left to the host.

pub mod color;
pub mod error;
pub mod face;
pub mod object;
pub mod point;
pub mod render;
pub mod rotate;
pub mod solid;
pub mod sort;
pub mod stl;
pub mod tools2d;
pub mod viewpoint;
pub mod world;

// Re-export commonly used types
pub use color::Color;
pub use error::{Error, Result};
pub use face::{Face, FaceRef};
pub use object::{BarColors, Marker, MarkerPosition, Object3D};
pub use point::{Point2D, Point3D};
pub use render::{Frame, Light, ProjectedMarker, RenderConfig, RenderedFace, Renderer};
pub use rotate::Rotate3D;
pub use solid::Solid;
pub use sort::{FaceSorter, StandardFaceSorter, ZOrderComparator};
pub use viewpoint::{EyeTransform, ViewPoint3D};
pub use world::{MarkerRef, World};
