//! Oriented bounding boxes fitted to point clouds.

use crate::math::{Isometry, Point, Real, Rotation, Translation, Vector, DEFAULT_EPSILON};
use crate::shape::Plane;

/// Angular step, in degrees, of the brute-force search of [`Obb::from_best_fit_plane`].
pub const BRUTE_FORCE_ANGLE_STEP: u32 = 10;

/// An oriented bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obb {
    /// The position and orientation of the box. Its translation is the box center.
    pub pose: Isometry<Real>,
    /// Half of the box extents along each of its local axes.
    pub half_extents: Vector<Real>,
}

/// The frame attached to `plane`: its local `y` axis is the plane normal, and its origin
/// is the point of the plane closest to the world origin.
pub fn plane_frame(plane: &Plane) -> Isometry<Real> {
    let rotation = Rotation::rotation_between(&Vector::y(), &plane.normal).unwrap_or_else(|| {
        // The normal points toward -y.
        Rotation::from_axis_angle(&Vector::x_axis(), core::f64::consts::PI as Real)
    });
    let origin = rotation * Vector::new(0.0, -plane.offset, 0.0);

    Isometry::from_parts(Translation::from(origin), rotation)
}

impl Obb {
    /// The smallest box with the orientation of `frame` enclosing all the `points`.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn from_frame(points: &[Point<Real>], frame: &Isometry<Real>) -> Self {
        assert!(!points.is_empty(), "Cannot fit a box to an empty point set.");

        let mut mins = Vector::repeat(Real::MAX);
        let mut maxs = Vector::repeat(-Real::MAX);

        for pt in points {
            let local = frame.inverse_transform_point(pt);
            mins = mins.inf(&local.coords);
            maxs = maxs.sup(&local.coords);
        }

        let local_center = (mins + maxs) * 0.5;

        Self {
            pose: frame * Translation::from(local_center),
            half_extents: (maxs - mins) * 0.5,
        }
    }

    /// Fits a box to `points` in the frame of their best-fit plane.
    ///
    /// The box is aligned with the plane normal. If `brute_force` is `true`, rotations
    /// about that normal by multiples of [`BRUTE_FORCE_ANGLE_STEP`] degrees are tried as
    /// well, and the box with the smallest volume is kept.
    ///
    /// Returns `None` if `points` is empty.
    pub fn from_best_fit_plane(points: &[Point<Real>], brute_force: bool) -> Option<Self> {
        let plane = crate::utils::best_fit_plane(points, None)?;
        let frame = plane_frame(&plane);
        let mut best = Self::from_frame(points, &frame);

        if brute_force {
            let mut best_volume = best.volume();

            for degrees in (BRUTE_FORCE_ANGLE_STEP..180).step_by(BRUTE_FORCE_ANGLE_STEP as usize) {
                let angle = (degrees as Real).to_radians();
                let candidate_frame = frame * Rotation::from_axis_angle(&Vector::y_axis(), angle);
                let candidate = Self::from_frame(points, &candidate_frame);
                let volume = candidate.volume();

                if volume < best_volume {
                    best_volume = volume;
                    best = candidate;
                }
            }
        }

        Some(best)
    }

    /// Checks that the pose and the extents of this box are all finite.
    pub fn is_finite(&self) -> bool {
        self.half_extents.iter().all(|e| e.is_finite())
            && self.pose.translation.vector.iter().all(|e| e.is_finite())
            && self.pose.rotation.coords.iter().all(|e| e.is_finite())
    }

    /// The center of this box.
    pub fn center(&self) -> Point<Real> {
        Point::from(self.pose.translation.vector)
    }

    /// The full extents of this box along each of its local axes.
    pub fn extents(&self) -> Vector<Real> {
        self.half_extents * 2.0
    }

    /// The volume of this box.
    pub fn volume(&self) -> Real {
        let e = self.extents();
        e.x * e.y * e.z
    }

    /// The index of the local axis along which this box is the longest.
    ///
    /// Ties are resolved in favor of the smallest index.
    pub fn longest_axis(&self) -> usize {
        let e = self.half_extents;
        let mut axis = 0;

        if e.y > e.x {
            axis = 1;
        }
        if e.z > e.x && e.z > e.y {
            axis = 2;
        }

        axis
    }

    /// The world-space direction of the `i`-th local axis of this box.
    pub fn axis(&self, i: usize) -> Vector<Real> {
        self.pose.rotation * Vector::ith(i, 1.0)
    }

    /// The plane cutting this box in two halves across its longest axis.
    pub fn split_plane(&self) -> Plane {
        Plane::from_point_and_normal(&self.center(), self.axis(self.longest_axis()))
    }
}

/// Computes the plane used to cut a point cloud in two.
///
/// This is the plane through the center of the best-fit oriented bounding box of the
/// points, perpendicular to its longest axis. Returns `None` if `points` is empty, if
/// they are all (almost) coincident, or if no finite box could be fitted to them.
pub fn compute_split_plane(points: &[Point<Real>]) -> Option<Plane> {
    let obb = Obb::from_best_fit_plane(points, false)?;

    if !obb.is_finite() || obb.half_extents.max() <= DEFAULT_EPSILON {
        return None;
    }

    let plane = obb.split_plane();
    (plane.normal.iter().all(|e| e.is_finite()) && plane.offset.is_finite()).then_some(plane)
}

#[cfg(test)]
mod test {
    use super::*;

    fn box_corners(half_extents: Vector<Real>, pose: &Isometry<Real>) -> Vec<Point<Real>> {
        (0..8)
            .map(|i| {
                let sign = |bit: usize| if i & (1 << bit) == 0 { -1.0 } else { 1.0 };
                pose * Point::new(
                    sign(0) * half_extents.x,
                    sign(1) * half_extents.y,
                    sign(2) * half_extents.z,
                )
            })
            .collect()
    }

    #[test]
    fn plane_frame_maps_up_to_the_normal() {
        let plane = Plane::from_point_and_normal(
            &Point::new(1.0, 2.0, 3.0),
            Vector::new(1.0, 1.0, 0.0).normalize(),
        );
        let frame = plane_frame(&plane);
        assert_relative_eq!(frame * Vector::y(), plane.normal, epsilon = 1.0e-6);
        assert_relative_eq!(
            plane.signed_distance(&(frame * Point::origin())),
            0.0,
            epsilon = 1.0e-5
        );

        let down = Plane::new(-Vector::y(), 2.0);
        let frame = plane_frame(&down);
        assert_relative_eq!(frame * Vector::y(), -Vector::y(), epsilon = 1.0e-6);
        assert_relative_eq!(down.signed_distance(&(frame * Point::origin())), 0.0, epsilon = 1.0e-6);
    }

    #[test]
    fn obb_of_a_flat_slab() {
        // A 4 x 0.5 x 2 box, rotated and translated.
        let pose = Isometry::new(Vector::new(1.0, -2.0, 0.5), Vector::new(0.3, -0.2, 0.7));
        let points = box_corners(Vector::new(2.0, 0.25, 1.0), &pose);
        let obb = Obb::from_best_fit_plane(&points, false).unwrap();

        assert_relative_eq!(obb.center(), pose * Point::origin(), epsilon = 1.0e-4);
        assert_relative_eq!(obb.half_extents.y, 0.25, epsilon = 1.0e-4);
        // The in-plane orientation is arbitrary, so the box may be larger than the slab.
        assert!(obb.volume() >= 4.0 * 0.5 * 2.0 - 1.0e-3);
        assert!(points.iter().all(|p| {
            let local = obb.pose.inverse_transform_point(p);
            (local.coords.abs() - obb.half_extents).max() <= 1.0e-4
        }));
    }

    #[test]
    fn brute_force_never_increases_the_volume() {
        let mut rng = oorandom::Rand32::new(3);
        let points: Vec<_> = (0..64)
            .map(|_| {
                Point::new(
                    rng.rand_float() as Real * 3.0,
                    rng.rand_float() as Real * 0.2,
                    rng.rand_float() as Real,
                )
            })
            .collect();

        let plain = Obb::from_best_fit_plane(&points, false).unwrap();
        let searched = Obb::from_best_fit_plane(&points, true).unwrap();
        assert!(searched.volume() <= plain.volume() + 1.0e-5);
    }

    #[test]
    fn split_plane_cuts_the_longest_axis_in_half() {
        let points = box_corners(Vector::new(5.0, 0.5, 1.0), &Isometry::identity());
        let plane = compute_split_plane(&points).unwrap();

        assert_relative_eq!(plane.normal.x.abs(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(plane.offset, 0.0, epsilon = 1.0e-5);
    }

    #[test]
    fn split_plane_of_nearly_coincident_points() {
        let points: Vec<_> = (0..8)
            .map(|i| {
                let d = i as Real * 1.0e-13;
                Point::new(1.0 + d, 2.0 - d * 0.5, 3.0 + d * 0.25)
            })
            .collect();

        // Either no plane, or a finite one.
        if let Some(plane) = compute_split_plane(&points) {
            assert!(plane.normal.iter().all(|e| e.is_finite()));
            assert!(plane.offset.is_finite());
        }

        let obb = Obb::from_best_fit_plane(&points, false).unwrap();
        assert!(obb.is_finite());
    }

    #[test]
    fn non_finite_box_is_detected() {
        let mut obb = Obb::from_frame(
            &box_corners(Vector::new(1.0, 2.0, 3.0), &Isometry::identity()),
            &Isometry::identity(),
        );
        assert!(obb.is_finite());
        obb.half_extents.y = Real::NAN;
        assert!(!obb.is_finite());
    }

    #[test]
    fn split_plane_of_coincident_points() {
        let points = [Point::new(1.0, 1.0, 1.0); 5];
        assert!(compute_split_plane(&points).is_none());
        assert!(compute_split_plane(&[]).is_none());
    }
}
