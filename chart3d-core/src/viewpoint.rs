/// Camera placement and the world-to-eye transform
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use nalgebra::{Matrix3, Unit, Vector3};

use crate::error::{require_finite, require_positive, Result};
use crate::point::{Point2D, Point3D};
use crate::rotate::Rotate3D;

/// Below this distance from the Z axis, a camera position has no meaningful azimuth
const POLE_TOLERANCE: f64 = 1e-6;

/// A camera on a sphere around the origin, always looking at the origin.
///
/// The position is given in spherical coordinates: `theta` is the azimuth in
/// the XY plane, `phi` the polar angle from the Z axis and `rho` the distance
/// from the origin. `roll` turns the image about the viewing axis.
///
/// In eye space the camera sits at the origin looking down the negative Z
/// axis, with X to the right and Y up. Points further away from the camera
/// therefore have *smaller* (more negative) eye z values.
///
/// Construction keeps phi within `[0, pi]`. A polar angle outside that range
/// is folded back by turning theta and roll half a turn, which leaves the
/// camera position and the image unchanged.
///
/// Mutators return a new view point, leaving the original untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint3D {
    theta: f64,
    phi: f64,
    rho: f64,
    roll: f64,
}

impl ViewPoint3D {
    pub fn new(theta: f64, phi: f64, rho: f64, roll: f64) -> Result<Self> {
        let theta = require_finite("theta", theta)?;
        let phi = require_finite("phi", phi)?.rem_euclid(TAU);
        let rho = require_positive("rho", rho)?;
        let roll = require_finite("roll", roll)?;
        if phi > PI {
            // (theta + pi, -phi) is the same position with right and up reversed
            Ok(Self {
                theta: theta + PI,
                phi: TAU - phi,
                rho,
                roll: roll + PI,
            })
        } else {
            Ok(Self {
                theta,
                phi,
                rho,
                roll,
            })
        }
    }

    /// Create a view point from the camera's Cartesian position.
    ///
    /// A position on the Z axis has no azimuth; theta is then fixed at pi/2.
    pub fn from_point(point: Point3D, roll: f64) -> Result<Self> {
        let rho = require_positive("rho", point.rho())?;
        let theta = if point.x.hypot(point.y) > POLE_TOLERANCE {
            point.theta()
        } else {
            FRAC_PI_2
        };
        Self::new(theta, point.phi(), rho, roll)
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// The roll angle about the viewing axis
    pub fn calc_roll_angle(&self) -> f64 {
        self.roll
    }

    /// The camera position in world coordinates
    pub fn point(&self) -> Point3D {
        Point3D::from_spherical(self.theta, self.phi, self.rho)
    }

    /// The world direction that appears as "up" on screen
    pub fn up(&self) -> Point3D {
        let (right, up, _) = self.base_axes();
        let (sin, cos) = self.roll.sin_cos();
        (right * sin + up * cos).into()
    }

    /// Axis perpendicular to both the viewing direction and the camera's up
    /// direction; rotating the camera about it tilts it up or down.
    pub fn horizontal_rotation_axis(&self) -> Point3D {
        self.horizontal_axis().into_inner().into()
    }

    fn horizontal_axis(&self) -> Unit<Vector3<f64>> {
        // position and up are orthogonal, so the cross product has length rho
        let (_, _, toward_camera) = self.base_axes();
        Unit::new_normalize(toward_camera.cross(&self.up().to_vector()))
    }

    /// Tilt the camera along its local vertical by `delta` radians.
    ///
    /// Positive values move the camera towards its up direction. When the
    /// camera passes over a pole the roll angle compensates, so the image
    /// does not flip.
    #[must_use]
    pub fn move_up_down(&self, delta: f64) -> Self {
        let r = Rotate3D::about_unit_axis(Point3D::ORIGIN, self.horizontal_axis(), delta);
        let position = r.apply_rotation(self.point());
        let up = r.apply_rotation(self.up());
        self.reoriented(position, up)
    }

    /// Rotate the camera about the world Z axis by `delta` radians
    #[must_use]
    pub fn pan_left_right(&self, delta: f64) -> Self {
        Self {
            theta: self.theta + delta,
            ..*self
        }
    }

    /// Turn the image about the viewing axis by `delta` radians
    #[must_use]
    pub fn roll(&self, delta: f64) -> Self {
        Self {
            roll: self.roll + delta,
            ..*self
        }
    }

    /// Same direction, different viewing distance
    pub fn with_rho(&self, rho: f64) -> Result<Self> {
        Ok(Self {
            rho: require_positive("rho", rho)?,
            ..*self
        })
    }

    /// Rebuild spherical coordinates from a (rotated) position and up vector
    fn reoriented(&self, position: Point3D, up: Point3D) -> Self {
        let theta = if position.x.hypot(position.y) > POLE_TOLERANCE {
            position.theta()
        } else {
            self.theta
        };
        let mut result = Self {
            theta,
            phi: (position.z / self.rho).clamp(-1.0, 1.0).acos(),
            rho: self.rho,
            roll: 0.0,
        };
        let (right, base_up, _) = result.base_axes();
        let up = up.to_vector();
        result.roll = up.dot(&right).atan2(up.dot(&base_up));
        result
    }

    /// Eye-space axes (right, up, towards camera) in world coordinates, before roll
    fn base_axes(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        (
            Vector3::new(-sin_theta, cos_theta, 0.0),
            Vector3::new(-cos_phi * cos_theta, -cos_phi * sin_theta, sin_phi),
            Vector3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi),
        )
    }

    /// The world-to-eye transform for this view point
    pub fn eye_transform(&self) -> EyeTransform {
        let (right, up, toward_camera) = self.base_axes();
        let (sin, cos) = self.roll.sin_cos();
        let rolled_right = right * cos - up * sin;
        let rolled_up = right * sin + up * cos;
        EyeTransform {
            rotation: Matrix3::from_rows(&[
                rolled_right.transpose(),
                rolled_up.transpose(),
                toward_camera.transpose(),
            ]),
            rho: self.rho,
        }
    }

    pub fn world_to_eye(&self, point: Point3D) -> Point3D {
        self.eye_transform().apply(point)
    }

    /// Project a world point onto the viewing plane at distance `d`
    pub fn world_to_screen(&self, point: Point3D, d: f64) -> Point2D {
        project(self.world_to_eye(point), d)
    }
}

impl Default for ViewPoint3D {
    /// Front right of the origin and slightly above, with world Z up on screen
    fn default() -> Self {
        Self {
            theta: -1.2,
            phi: 1.15,
            rho: 25.0,
            roll: 0.0,
        }
    }
}

impl fmt::Display for ViewPoint3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[theta={}, phi={}, rho={}, roll={}]",
            self.theta, self.phi, self.rho, self.roll
        )
    }
}

/// A precomputed world-to-eye transform: rotate into the camera frame, then
/// move the camera (at distance rho) to the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeTransform {
    rotation: Matrix3<f64>,
    rho: f64,
}

impl EyeTransform {
    pub fn apply(&self, point: Point3D) -> Point3D {
        let mut eye = self.rotation * point.to_vector();
        eye.z -= self.rho;
        eye.into()
    }
}

/// Perspective projection of an eye-space point onto the plane `z = -d`.
///
/// Only points in front of the camera (`eye.z < 0`) give meaningful results;
/// the renderer drops faces that reach behind the eye before projecting.
pub fn project(eye: Point3D, d: f64) -> Point2D {
    Point2D::new(-d * eye.x / eye.z, -d * eye.y / eye.z)
}
