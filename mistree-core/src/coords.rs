//! Point coordinates and the distance used between branch and path ends.
//!
//! Points are stored column-wise, indexed by node id. The [`Mode`] decides
//! how the distance between two points is measured: Euclidean in the plane or
//! in space, or the great-circle angle on the unit sphere.

use std::f64::consts::PI;

use crate::error::{MistreeError, Result};

/// Geometry of a point set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Cartesian points in two dimensions.
    Planar,
    /// Cartesian points in three dimensions.
    Spatial,
    /// Points on the unit sphere, stored as unit vectors.
    UnitSphere,
}

impl Mode {
    /// Returns the short tag used in logs (`2D`, `3D` or `usphere`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planar => "2D",
            Self::Spatial => "3D",
            Self::UnitSphere => "usphere",
        }
    }
}

/// Units for spherical angles.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AngleUnits {
    /// Angles in radians.
    #[default]
    Radians,
    /// Angles in degrees.
    Degrees,
}

impl AngleUnits {
    const fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => value.to_radians(),
        }
    }

    const fn half_turn(self) -> f64 {
        match self {
            Self::Radians => PI,
            Self::Degrees => 180.0,
        }
    }
}

/// Coordinates for every node of a graph.
///
/// # Examples
/// ```
/// use mistree_core::coords::{Mode, Points};
///
/// let points = Points::planar(vec![0.0, 3.0], vec![0.0, 4.0]).expect("valid points");
/// assert_eq!(points.mode(), Mode::Planar);
/// assert_eq!(points.distance(0, 1), Some(5.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Points {
    mode: Mode,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl Points {
    /// Builds a planar point set.
    ///
    /// # Errors
    /// Returns [`MistreeError::LengthMismatch`] when the columns differ in
    /// length and [`MistreeError::NonFiniteCoordinate`] for NaN or infinite
    /// values.
    pub fn planar(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        check_column("y", &y, x.len())?;
        check_finite("x", &x)?;
        check_finite("y", &y)?;
        Ok(Self {
            mode: Mode::Planar,
            x,
            y,
            z: Vec::new(),
        })
    }

    /// Builds a three-dimensional point set.
    ///
    /// # Errors
    /// Returns [`MistreeError::LengthMismatch`] when the columns differ in
    /// length and [`MistreeError::NonFiniteCoordinate`] for NaN or infinite
    /// values.
    pub fn spatial(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        Self::cartesian(Mode::Spatial, x, y, z)
    }

    /// Builds a unit-sphere point set from unit vectors.
    ///
    /// The vectors are taken as given; they are expected to have unit length.
    ///
    /// # Errors
    /// Same conditions as [`Points::spatial`].
    pub fn unit_sphere_cartesian(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        Self::cartesian(Mode::UnitSphere, x, y, z)
    }

    /// Builds a unit-sphere point set from longitude `phi` in `[0, 2π]` and
    /// colatitude `theta` in `[0, π]` (or the degree equivalents).
    ///
    /// # Errors
    /// Returns [`MistreeError::LengthMismatch`] when the columns differ in
    /// length, [`MistreeError::NonFiniteCoordinate`] for NaN or infinite
    /// angles and [`MistreeError::AngleOutOfRange`] when an angle falls outside
    /// its range.
    #[expect(
        clippy::float_arithmetic,
        reason = "spherical to Cartesian conversion is trigonometric"
    )]
    pub fn unit_sphere(phi: &[f64], theta: &[f64], units: AngleUnits) -> Result<Self> {
        check_column("theta", theta, phi.len())?;
        check_finite("phi", phi)?;
        check_finite("theta", theta)?;
        check_range("phi", phi, 2.0 * units.half_turn())?;
        check_range("theta", theta, units.half_turn())?;

        let mut x = Vec::with_capacity(phi.len());
        let mut y = Vec::with_capacity(phi.len());
        let mut z = Vec::with_capacity(phi.len());
        for (&phi_value, &theta_value) in phi.iter().zip(theta) {
            let longitude = units.to_radians(phi_value);
            let colatitude = units.to_radians(theta_value);
            x.push(longitude.cos() * colatitude.sin());
            y.push(longitude.sin() * colatitude.sin());
            z.push(colatitude.cos());
        }
        Ok(Self {
            mode: Mode::UnitSphere,
            x,
            y,
            z,
        })
    }

    fn cartesian(mode: Mode, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        check_column("y", &y, x.len())?;
        check_column("z", &z, x.len())?;
        check_finite("x", &x)?;
        check_finite("y", &y)?;
        check_finite("z", &z)?;
        Ok(Self { mode, x, y, z })
    }

    /// Returns the geometry of the point set.
    #[must_use]
    #[rustfmt::skip]
    pub const fn mode(&self) -> Mode { self.mode }

    /// Returns the number of points.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.x.len() }

    /// Returns `true` when there are no points.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Returns the Cartesian coordinates of `point`, with `z = 0` in the plane.
    #[must_use]
    pub fn position(&self, point: usize) -> Option<[f64; 3]> {
        let x = *self.x.get(point)?;
        let y = *self.y.get(point)?;
        let z = match self.mode {
            Mode::Planar => 0.0,
            Mode::Spatial | Mode::UnitSphere => *self.z.get(point)?,
        };
        Some([x, y, z])
    }

    /// Returns the number of axes used for spatial bucketing.
    pub(crate) const fn dimensions(&self) -> usize {
        match self.mode {
            Mode::Planar => 2,
            Mode::Spatial | Mode::UnitSphere => 3,
        }
    }

    /// Measures the distance between two points.
    ///
    /// Planar and spatial points use the Euclidean distance. Unit-sphere points
    /// use the angle `2·asin(chord / 2)` subtended by their chord.
    ///
    /// Returns `None` when either index is out of range.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "Euclidean distance needs arithmetic on coordinates")]
    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        let [ax, ay, az] = self.position(a)?;
        let [bx, by, bz] = self.position(b)?;
        let chord = ((ax - bx).powi(2) + (ay - by).powi(2) + (az - bz).powi(2)).sqrt();
        Some(match self.mode {
            Mode::Planar | Mode::Spatial => chord,
            Mode::UnitSphere => chord_to_angle(chord),
        })
    }
}

/// Converts a chord length on the unit sphere to the angle it subtends.
///
/// # Examples
/// ```
/// use mistree_core::coords::chord_to_angle;
///
/// let angle = chord_to_angle(2.0);
/// assert!((angle - std::f64::consts::PI).abs() < 1e-12);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "the chord subtends twice the half-chord arcsine")]
pub fn chord_to_angle(chord: f64) -> f64 {
    2.0 * (chord / 2.0).clamp(-1.0, 1.0).asin()
}

const fn check_column(what: &'static str, column: &[f64], expected: usize) -> Result<()> {
    if column.len() == expected {
        Ok(())
    } else {
        Err(MistreeError::LengthMismatch {
            what,
            expected,
            got: column.len(),
        })
    }
}

fn check_finite(axis: &'static str, column: &[f64]) -> Result<()> {
    column
        .iter()
        .position(|value| !value.is_finite())
        .map_or(Ok(()), |point| Err(MistreeError::NonFiniteCoordinate { point, axis }))
}

fn check_range(angle: &'static str, column: &[f64], max: f64) -> Result<()> {
    column
        .iter()
        .copied()
        .enumerate()
        .find(|&(_, value)| value < 0.0 || value > max)
        .map_or(Ok(()), |(point, value)| {
            Err(MistreeError::AngleOutOfRange {
                point,
                angle,
                value,
                max,
            })
        })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use rstest::rstest;

    use super::*;

    #[test]
    #[expect(clippy::float_arithmetic, reason = "test compares distances via subtraction")]
    fn measures_planar_distance() {
        let points = Points::planar(vec![0.0, 2.0], vec![0.0, 1.0]).expect("valid points");
        let distance = points.distance(0, 1).expect("indices in range");
        assert!((distance - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn measures_spatial_distance() {
        let points = Points::spatial(vec![0.0, 1.0], vec![0.0, 2.0], vec![0.0, 2.0])
            .expect("valid points");
        assert_eq!(points.distance(0, 1), Some(3.0));
    }

    #[test]
    #[expect(clippy::float_arithmetic, reason = "test compares angles via subtraction")]
    fn measures_great_circle_angle() {
        let points = Points::unit_sphere(&[0.0, FRAC_PI_2], &[FRAC_PI_2, FRAC_PI_2], AngleUnits::Radians)
            .expect("valid angles");
        let angle = points.distance(0, 1).expect("indices in range");
        assert!((angle - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    #[expect(clippy::float_arithmetic, reason = "test compares coordinates via subtraction")]
    fn accepts_degrees() {
        let radians = Points::unit_sphere(&[PI], &[FRAC_PI_2], AngleUnits::Radians)
            .expect("valid angles");
        let degrees =
            Points::unit_sphere(&[180.0], &[90.0], AngleUnits::Degrees).expect("valid angles");
        let [rx, ry, rz] = radians.position(0).expect("point exists");
        let [dx, dy, dz] = degrees.position(0).expect("point exists");
        assert!((rx - dx).abs() < 1e-12);
        assert!((ry - dy).abs() < 1e-12);
        assert!((rz - dz).abs() < 1e-12);
    }

    #[rstest]
    #[case(&[-0.1], &[0.5], "phi")]
    #[case(&[7.0], &[0.5], "phi")]
    #[case(&[1.0], &[3.5], "theta")]
    fn rejects_out_of_range_angles(
        #[case] phi: &[f64],
        #[case] theta: &[f64],
        #[case] expected: &'static str,
    ) {
        let err = Points::unit_sphere(phi, theta, AngleUnits::Radians)
            .expect_err("angle must be rejected");
        assert!(matches!(err, MistreeError::AngleOutOfRange { angle, .. } if angle == expected));
    }

    #[test]
    fn rejects_mismatched_columns() {
        let err = Points::planar(vec![0.0, 1.0], vec![0.0]).expect_err("lengths differ");
        assert_eq!(
            err,
            MistreeError::LengthMismatch {
                what: "y",
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let err = Points::spatial(vec![0.0], vec![f64::NAN], vec![0.0])
            .expect_err("NaN must be rejected");
        assert_eq!(
            err,
            MistreeError::NonFiniteCoordinate {
                point: 0,
                axis: "y"
            }
        );
    }

    #[test]
    fn reports_out_of_range_points() {
        let points = Points::planar(vec![0.0], vec![0.0]).expect("valid points");
        assert_eq!(points.distance(0, 1), None);
    }
}
