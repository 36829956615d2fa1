use crate::math::{Point, Real};
use crate::shape::{ConvexHull, MeshFragment};
use crate::transformation::decomposition::ConvexDecomposition;
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

fn obj_object(name: String, triangles: &[[u32; 3]], first_vertex: usize) -> Object {
    Object {
        groups: vec![Group {
            polys: triangles
                .iter()
                .map(|tri| {
                    SimplePolygon(
                        tri.iter()
                            .map(|i| IndexTuple(first_vertex + *i as usize, None, None))
                            .collect(),
                    )
                })
                .collect(),
            name: name.clone(),
            index: 0,
            material: None,
        }],
        name,
    }
}

#[allow(clippy::unnecessary_cast)]
fn obj_positions<'a>(vertices: impl IntoIterator<Item = &'a Point<Real>>) -> Vec<[f32; 3]> {
    vertices
        .into_iter()
        .map(|v| [v.x as f32, v.y as f32, v.z as f32])
        .collect()
}

fn write_obj_file(path: &Path, data: ObjData) -> Result<(), ObjError> {
    let mut file = std::fs::File::create(path).map_err(ObjError::Io)?;
    data.write_to_buf(&mut file)
}

impl ConvexHull {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        let data = ObjData {
            position: obj_positions(self.vertices()),
            objects: vec![obj_object("hull".to_string(), self.indices(), 0)],
            ..Default::default()
        };
        write_obj_file(path.as_ref(), data)
    }
}

impl MeshFragment {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        let data = ObjData {
            position: obj_positions(self.vertices()),
            objects: vec![obj_object("fragment".to_string(), self.triangles(), 0)],
            ..Default::default()
        };
        write_obj_file(path.as_ref(), data)
    }
}

impl ConvexDecomposition {
    /// Outputs all the hulls of this decomposition into a single Wavefront (`.obj`) file,
    /// with one object per hull.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        let mut objects = Vec::with_capacity(self.len());
        let mut first_vertex = 0;

        for (i, hull) in self.hulls().enumerate() {
            objects.push(obj_object(format!("hull{}", i), hull.indices(), first_vertex));
            first_vertex += hull.vertex_count();
        }

        let data = ObjData {
            position: obj_positions(self.hulls().flat_map(|h| h.vertices())),
            objects,
            ..Default::default()
        };
        write_obj_file(path.as_ref(), data)
    }
}
