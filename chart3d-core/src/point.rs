/// Points and vectors in 3D space
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::{Point2, Point3, Vector3};

use crate::error::{Error, Result};

/// A point on the 2D viewing plane (y axis pointing up)
pub type Point2D = Point2<f64>;

/// An immutable point (or direction vector) in 3D space.
///
/// Equality is exact: two points are equal only when all three coordinates
/// compare equal as `f64`. Coordinates are expected to be finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const ORIGIN: Point3D = Point3D::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Point3D = Point3D::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Point3D = Point3D::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Point3D = Point3D::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a point from spherical coordinates.
    ///
    /// `theta` is the azimuth measured from the X axis in the XY plane,
    /// `phi` the polar angle measured from the Z axis.
    pub fn from_spherical(theta: f64, phi: f64, rho: f64) -> Self {
        Self::new(
            rho * phi.sin() * theta.cos(),
            rho * phi.sin() * theta.sin(),
            rho * phi.cos(),
        )
    }

    pub fn theta(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn phi(&self) -> f64 {
        (self.z / self.rho()).clamp(-1.0, 1.0).acos()
    }

    /// Distance from the origin
    pub fn rho(&self) -> f64 {
        self.length()
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Point3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit vector in the same direction
    pub fn normalize(&self) -> Result<Point3D> {
        let length = self.length();
        if length > 0.0 && length.is_finite() {
            Ok(*self * (1.0 / length))
        } else {
            Err(Error::ZeroLengthVector("vector"))
        }
    }

    /// Angle in radians between two vectors, `acos(a.b / |a||b|)`.
    ///
    /// Neither vector may have zero length.
    pub fn angle(&self, other: &Point3D) -> f64 {
        let cos = self.dot(other) / (self.length() * other.length());
        cos.clamp(-1.0, 1.0).acos()
    }

    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn to_point(self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

impl Eq for Point3D {}

impl Hash for Point3D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 0.0 == -0.0, so both must hash alike
        for v in [self.x, self.y, self.z] {
            let v = if v == 0.0 { 0.0 } else { v };
            v.to_bits().hash(state);
        }
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl Add for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Point3D;

    fn sub(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point3D {
    type Output = Point3D;

    fn neg(self) -> Point3D {
        Point3D::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Point3D {
    type Output = Point3D;

    fn mul(self, rhs: f64) -> Point3D {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<Vector3<f64>> for Point3D {
    fn from(v: Vector3<f64>) -> Self {
        Point3D::new(v.x, v.y, v.z)
    }
}

impl From<Point3<f64>> for Point3D {
    fn from(p: Point3<f64>) -> Self {
        Point3D::new(p.x, p.y, p.z)
    }
}

impl From<Point3D> for Point3<f64> {
    fn from(p: Point3D) -> Self {
        p.to_point()
    }
}

impl From<Point3D> for Vector3<f64> {
    fn from(p: Point3D) -> Self {
        p.to_vector()
    }
}
