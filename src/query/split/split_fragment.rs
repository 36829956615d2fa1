use crate::math::{Point, Real};
use crate::partitioning::VertexIndex;
use crate::shape::{MeshFragment, Plane, PlaneSide};
use arrayvec::ArrayVec;

/// Half-thickness of the band around a cutting plane where vertices are considered on-plane.
///
/// This is also the welding tolerance of the fragments produced by [`split_fragment`].
pub const SPLIT_EPSILON: Real = 1.0e-5;

/// A convex polygon resulting from clipping a triangle. It never has more than four vertices.
pub type ClippedPolygon = ArrayVec<Point<Real>, 4>;

/// The result of classifying a triangle against a plane.
#[derive(Clone, Debug, PartialEq)]
pub enum TriangleSplit {
    /// The triangle lies on the front side of the plane (or on the plane itself).
    Front,
    /// The triangle lies on the back side of the plane.
    Back,
    /// The triangle crosses the plane. Both polygons share the intersection points and
    /// keep the winding of the original triangle.
    Split {
        /// The part of the triangle on the front side of the plane.
        front: ClippedPolygon,
        /// The part of the triangle on the back side of the plane.
        back: ClippedPolygon,
    },
}

/// Classifies a triangle against `plane`, clipping it if it crosses the plane.
///
/// Vertices closer than `epsilon` to the plane are on-plane. A triangle with all its
/// vertices on-plane is classified as `Front`. Otherwise on-plane vertices adopt the side
/// of the first off-plane vertex, and the triangle is only clipped if that leaves
/// vertices on both sides. A clipped part with less than three vertices is dropped and
/// the result collapses to the other side.
pub fn classify_triangle(plane: &Plane, tri: &[Point<Real>; 3], epsilon: Real) -> TriangleSplit {
    let sides = tri.map(|pt| plane.side_of_point(&pt, epsilon));

    let resolved = match sides.iter().find(|s| **s != PlaneSide::OnPlane) {
        None => return TriangleSplit::Front,
        Some(first) => sides.map(|s| if s == PlaneSide::OnPlane { *first } else { s }),
    };

    if resolved.iter().all(|s| *s == PlaneSide::Front) {
        return TriangleSplit::Front;
    }
    if resolved.iter().all(|s| *s == PlaneSide::Back) {
        return TriangleSplit::Back;
    }

    let mut front = ClippedPolygon::new();
    let mut back = ClippedPolygon::new();

    for i in 0..3 {
        let j = (i + 1) % 3;

        match sides[i] {
            PlaneSide::Front => front.push(tri[i]),
            PlaneSide::Back => back.push(tri[i]),
            PlaneSide::OnPlane => {
                front.push(tri[i]);
                back.push(tri[i]);
            }
        }

        let crossing = matches!(
            (sides[i], sides[j]),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );

        if crossing {
            let inter = plane.segment_intersection(&tri[i], &tri[j]);
            front.push(inter);
            back.push(inter);
        }
    }

    match (front.len() >= 3, back.len() >= 3) {
        (true, true) => TriangleSplit::Split { front, back },
        (false, _) => TriangleSplit::Back,
        (true, false) => TriangleSplit::Front,
    }
}

struct FragmentBuilder {
    index: VertexIndex,
    triangles: Vec<[u32; 3]>,
}

impl FragmentBuilder {
    fn new(capacity: usize) -> Self {
        Self {
            index: VertexIndex::new(SPLIT_EPSILON),
            triangles: Vec::with_capacity(capacity),
        }
    }

    fn push_polygon(&mut self, poly: &[Point<Real>]) {
        let ids: ArrayVec<u32, 4> = poly.iter().map(|pt| self.index.weld(pt).0).collect();

        for k in 1..ids.len() - 1 {
            let tri = [ids[0], ids[k], ids[k + 1]];

            // Welding may collapse slivers produced by clipping near a vertex.
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[2] != tri[0] {
                self.triangles.push(tri);
            }
        }
    }

    fn build(self) -> MeshFragment {
        MeshFragment::new(self.index.into_vertices(), self.triangles)
    }
}

/// Cuts `fragment` with `plane`, returning its front and back parts, in that order.
///
/// Triangles crossing the plane are clipped and the resulting polygons fan-triangulated.
/// Each part is re-indexed through its own [`VertexIndex`] with a tolerance of
/// [`SPLIT_EPSILON`], so the intersection points shared by neighboring triangles are
/// welded. A fragment lying entirely on the plane ends up in the front part.
pub fn split_fragment(fragment: &MeshFragment, plane: &Plane) -> (MeshFragment, MeshFragment) {
    let mut front = FragmentBuilder::new(fragment.num_triangles());
    let mut back = FragmentBuilder::new(fragment.num_triangles());
    let mut num_clipped = 0;

    for tri in fragment.triangle_points() {
        match classify_triangle(plane, &tri, SPLIT_EPSILON) {
            TriangleSplit::Front => front.push_polygon(&tri),
            TriangleSplit::Back => back.push_polygon(&tri),
            TriangleSplit::Split {
                front: front_poly,
                back: back_poly,
            } => {
                num_clipped += 1;
                front.push_polygon(&front_poly);
                back.push_polygon(&back_poly);
            }
        }
    }

    log::trace!(
        "split {} triangles ({} clipped) into {} front and {} back triangles",
        fragment.num_triangles(),
        num_clipped,
        front.triangles.len(),
        back.triangles.len()
    );

    (front.build(), back.build())
}
