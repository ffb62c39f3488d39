/// Rotation about an arbitrary axis
use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::error::{require_finite, Error, Result};
use crate::point::Point3D;

/// A rotation by `angle` radians about an axis through `origin`.
///
/// The rotation follows the right-hand rule: looking from the tip of the
/// axis towards `origin`, positive angles turn points counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotate3D {
    origin: Point3<f64>,
    axis: Unit<Vector3<f64>>,
    angle: f64,
    rotation: Rotation3<f64>,
}

impl Rotate3D {
    /// Create a rotation about `axis` (any non-zero length) through `origin`
    pub fn new(origin: Point3D, axis: Point3D, angle: f64) -> Result<Self> {
        require_finite("angle", angle)?;
        let axis = Unit::try_new(axis.to_vector(), 0.0)
            .filter(|a| a.iter().all(|c| c.is_finite()))
            .ok_or(Error::ZeroLengthVector("rotation axis"))?;
        Ok(Self::about_unit_axis(origin, axis, angle))
    }

    pub(crate) fn about_unit_axis(origin: Point3D, axis: Unit<Vector3<f64>>, angle: f64) -> Self {
        Self {
            origin: origin.to_point(),
            axis,
            angle,
            rotation: Rotation3::from_axis_angle(&axis, angle),
        }
    }

    pub fn origin(&self) -> Point3D {
        self.origin.into()
    }

    /// The unit-length rotation axis
    pub fn axis(&self) -> Point3D {
        self.axis.into_inner().into()
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Same origin and axis, different angle
    #[must_use]
    pub fn with_angle(&self, angle: f64) -> Self {
        Self::about_unit_axis(self.origin(), self.axis, angle)
    }

    /// Rotate `point` about the axis.
    ///
    /// The offset from the origin is split into a component along the axis,
    /// which is kept, and a perpendicular component, which turns by the
    /// angle in the plane orthogonal to the axis.
    pub fn apply_rotation(&self, point: Point3D) -> Point3D {
        let offset = point.to_point() - self.origin;
        (self.origin + self.rotation * offset).into()
    }
}
