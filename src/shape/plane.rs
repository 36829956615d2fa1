//! Definition of the plane used to cut mesh fragments.

use crate::math::{Point, Real, Vector};

/// Position of a point relative to a [`Plane`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// The point lies on the side the plane normal points to.
    Front,
    /// The point lies on the side opposite to the plane normal.
    Back,
    /// The point is closer to the plane than the classification epsilon.
    OnPlane,
}

/// A plane in implicit form: `normal.dot(p) + offset = 0`.
///
/// The normal is expected to be unit-length. Planes built by this crate always are,
/// except for the zero normal returned for degenerate inputs where explicitly
/// documented.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
    /// The plane unit normal.
    pub normal: Vector<Real>,
    /// The signed offset `D` of the implicit equation.
    pub offset: Real,
}

impl Plane {
    /// Creates a plane from its unit normal and its offset.
    #[inline]
    pub fn new(normal: Vector<Real>, offset: Real) -> Self {
        Self { normal, offset }
    }

    /// Creates the plane with the given unit normal and passing through `point`.
    #[inline]
    pub fn from_point_and_normal(point: &Point<Real>, normal: Vector<Real>) -> Self {
        Self {
            normal,
            offset: -normal.dot(&point.coords),
        }
    }

    /// The plane containing the triangle `(a, b, c)`, oriented by its counter-clockwise normal.
    ///
    /// Returns `None` if the triangle is degenerate.
    pub fn from_triangle(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a)).try_normalize(1.0e-6)?;
        Some(Self::from_point_and_normal(a, normal))
    }

    /// The signed distance from `pt` to this plane.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) + self.offset
    }

    /// Classifies `pt` against this plane, with an `epsilon`-thick band considered
    /// on-plane.
    #[inline]
    pub fn side_of_point(&self, pt: &Point<Real>, epsilon: Real) -> PlaneSide {
        let d = self.signed_distance(pt);

        if d.abs() <= epsilon {
            PlaneSide::OnPlane
        } else if d > 0.0 {
            PlaneSide::Front
        } else {
            PlaneSide::Back
        }
    }

    /// The orthogonal projection of `pt` on this plane.
    #[inline]
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        pt - self.normal * self.signed_distance(pt)
    }

    /// The same plane with its normal reversed.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self::new(-self.normal, -self.offset)
    }

    /// The point where the segment `[a, b]` crosses this plane.
    ///
    /// The parameter along the segment is computed from the signed distances of both
    /// endpoints, so it is only meaningful if they lie on opposite sides. If both
    /// distances are equal, `a` is returned.
    pub fn segment_intersection(&self, a: &Point<Real>, b: &Point<Real>) -> Point<Real> {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        let denom = da - db;

        if denom == 0.0 {
            return *a;
        }

        a + (b - a) * (da / denom)
    }

    /// Tests whether `self` and `other` describe, for practical purposes, the same plane.
    ///
    /// The offsets must differ by less than `offset_epsilon`, and the normals dot product
    /// must lie within `normal_epsilon` of `1`. If `double_sided` is `true`, planes with
    /// opposite orientations are considered identical too.
    pub fn is_coincident_with(
        &self,
        other: &Plane,
        normal_epsilon: Real,
        offset_epsilon: Real,
        double_sided: bool,
    ) -> bool {
        let mut dot = self.normal.dot(&other.normal);
        let mut other_offset = other.offset;

        if double_sided && dot < 0.0 {
            dot = -dot;
            other_offset = -other_offset;
        }

        (self.offset - other_offset).abs() < offset_epsilon
            && dot >= 1.0 - normal_epsilon
            && dot <= 1.0 + normal_epsilon
    }
}
