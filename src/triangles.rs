//! Indexed triangle input for the voxelizer.
//!
//! A [`MarkedTriangleSet`] owns one vertex buffer; its triangles only hold
//! indices into that buffer plus an area tag, so triangles sharing a corner
//! share the vertex.

use std::io::BufRead;
use std::path::Path;

use crate::error::LoadError;
use crate::field::AreaId;
use crate::geometry::Aabb;
use crate::math::Vec3;

/// A triangle referencing three vertices of its set, tagged with an area id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkedTriangle {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub area: AreaId,
}

impl MarkedTriangle {
    pub const fn new(a: u32, b: u32, c: u32, area: AreaId) -> Self {
        Self { a, b, c, area }
    }

    pub fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

/// A shared vertex buffer plus the triangles indexing into it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkedTriangleSet {
    vertices: Vec<Vec3>,
    triangles: Vec<MarkedTriangle>,
}

impl MarkedTriangleSet {
    /// Build a set, checking that every index refers to an existing vertex.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<MarkedTriangle>) -> Result<Self, LoadError> {
        for (i, tri) in triangles.iter().enumerate() {
            check_indices(i, tri, vertices.len())?;
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Load every object of a Wavefront OBJ file into one set, all triangles
    /// tagged with `area`. Faces are triangulated.
    pub fn from_obj<P: AsRef<Path>>(path: P, area: AreaId) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj(path.as_ref(), &obj_load_options())?;
        let set = Self::from_models(&models, area)?;
        log::debug!(
            "loaded {} ({} vertices, {} triangles)",
            path.as_ref().display(),
            set.vertices.len(),
            set.triangles.len()
        );
        Ok(set)
    }

    /// Like [`from_obj`](Self::from_obj), reading OBJ text from `reader`.
    /// Material libraries are ignored.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R, area: AreaId) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &obj_load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_models(&models, area)
    }

    fn from_models(models: &[tobj::Model], area: AreaId) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut triangles = Vec::new();
        for model in models {
            let base = vertices.len() as u32;
            let mesh = &model.mesh;
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            triangles.extend(mesh.indices.chunks_exact(3).map(|f| {
                MarkedTriangle::new(base + f[0], base + f[1], base + f[2], area)
            }));
        }
        Self::new(vertices, triangles)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[MarkedTriangle] {
        &self.triangles
    }

    /// Area tags of all triangles, for re-marking in place.
    pub fn areas_mut(&mut self) -> impl Iterator<Item = &mut AreaId> + '_ {
        self.triangles.iter_mut().map(|tri| &mut tri.area)
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append a vertex, returning its index.
    pub fn push_vertex(&mut self, v: Vec3) -> u32 {
        self.vertices.push(v);
        (self.vertices.len() - 1) as u32
    }

    /// Append a triangle over existing vertices.
    pub fn push_triangle(&mut self, triangle: MarkedTriangle) -> Result<(), LoadError> {
        check_indices(self.triangles.len(), &triangle, self.vertices.len())?;
        self.triangles.push(triangle);
        Ok(())
    }

    /// Vertex positions of `triangle`.
    ///
    /// # Panics
    /// If `triangle` indexes past this set's vertices, which cannot happen
    /// for triangles obtained from this set.
    pub fn positions(&self, triangle: &MarkedTriangle) -> [Vec3; 3] {
        triangle.indices().map(|i| self.vertices[i as usize])
    }

    /// Iterate over triangles as `([a, b, c], area)`.
    pub fn iter(&self) -> impl Iterator<Item = ([Vec3; 3], AreaId)> + '_ {
        self.triangles
            .iter()
            .map(move |tri| (self.positions(tri), tri.area))
    }

    /// Bounds of the referenced geometry, or `None` for an empty set.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.triangles
                .iter()
                .flat_map(|tri| self.positions(tri)),
        )
    }
}

fn check_indices(
    triangle: usize,
    tri: &MarkedTriangle,
    vertex_count: usize,
) -> Result<(), LoadError> {
    match tri.indices().into_iter().find(|&i| i as usize >= vertex_count) {
        Some(index) => Err(LoadError::IndexOutOfRange {
            triangle,
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}
