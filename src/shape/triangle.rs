//! Definition of the triangle helper used by the hull builder and the concavity estimator.

use crate::math::{Point, Real, Vector};

/// A triangle given by its three vertices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The cross product of `b - a` and `c - a`.
    ///
    /// Its norm is twice the triangle area and it points toward the side from which
    /// the vertices appear counter-clockwise.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// The unit counter-clockwise normal of this triangle, if it is not degenerate.
    #[inline]
    pub fn normal(&self) -> Option<Vector<Real>> {
        self.scaled_normal()
            .try_normalize(crate::math::DEFAULT_EPSILON)
    }

    /// The area of this triangle.
    pub fn area(&self) -> Real {
        // Kahan's formula, with the edge lengths sorted so that a >= b >= c.
        let mut edges = [
            na::distance(&self.a, &self.b),
            na::distance(&self.b, &self.c),
            na::distance(&self.c, &self.a),
        ];
        edges.sort_by(|x, y| y.total_cmp(x));
        let [a, b, c] = edges;

        let sqr = (a + (b + c)) * (c - (a - b)) * (c + (a - b)) * (a + (b - c));

        // Almost-degenerate triangles can yield a slightly negative value.
        sqr.max(0.0).sqrt() * 0.25
    }

    /// Checks that the three vertices of this triangle are (almost) collinear.
    #[inline]
    pub fn is_affinely_dependent(&self) -> bool {
        const EPS: Real = crate::math::DEFAULT_EPSILON * 100.0;
        relative_eq!(self.scaled_normal().norm_squared(), 0.0, epsilon = EPS * EPS)
    }
}
