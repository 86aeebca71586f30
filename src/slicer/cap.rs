use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{GeometryError, Result};
use crate::geometry::Plane;
use crate::math::Point2;
use crate::mesh::TriMesh;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Closes the open cross-section of a cut mesh with a flat cap lying on the
/// cutting plane.
///
/// Loops are given in plane-local coordinates. Nested loops alternate
/// between filled and hollow (even-odd), so holes in a section stay open.
pub struct SectionCap<'a> {
    plane: &'a Plane,
}

impl<'a> SectionCap<'a> {
    /// Creates a new `SectionCap` operation.
    #[must_use]
    pub fn new(plane: &'a Plane) -> Self {
        Self { plane }
    }

    /// Executes the triangulation, returning the cap mesh.
    ///
    /// Loops with fewer than three points are ignored. A constraint edge
    /// crossing one already inserted is dropped, which keeps
    /// self-intersecting sections from failing outright.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if a point cannot be inserted
    /// into the triangulation (e.g. NaN coordinates).
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self, loops: &[Vec<Point2>]) -> Result<TriMesh> {
        let mut cdt = Cdt::new();
        for ring in loops.iter().filter(|r| r.len() >= 3) {
            insert_constraint_loop(&mut cdt, ring)?;
        }

        let interior = classify_interior_faces(&cdt);
        let mut mesh = TriMesh::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face in cdt.inner_faces() {
            if !interior.contains(&face.fix().index()) {
                continue;
            }
            let mut tri = [0u32; 3];
            for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
                *slot = *vertex_map.entry(vh.fix().index()).or_insert_with(|| {
                    let pos = vh.position();
                    mesh.vertices.push(self.plane.lift(&Point2::new(pos.x, pos.y)));
                    (mesh.vertices.len() - 1) as u32
                });
            }
            mesh.indices.push(tri);
        }

        tracing::trace!(triangles = mesh.indices.len(), "section capped");
        Ok(mesh)
    }
}

fn insert_constraint_loop(cdt: &mut Cdt, ring: &[Point2]) -> Result<()> {
    let mut handles = Vec::with_capacity(ring.len());
    for p in ring {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| GeometryError::Degenerate(format!("cap insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to && cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        }
    }
    Ok(())
}

/// Flood-fills from the convex hull inwards, counting constraint edges
/// crossed. Faces at odd depth are inside.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_of: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer {
            continue;
        }
        let Some(inner) = edge.rev().face().as_inner() else {
            continue;
        };
        let idx = inner.fix().index();
        if depth_of.contains_key(&idx) {
            continue;
        }
        let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
        depth_of.insert(idx, depth);
        queue.push_back((inner.fix(), depth));
    }

    while let Some((fix, depth)) = queue.pop_front() {
        if depth % 2 == 1 {
            interior.insert(fix.index());
        }
        for edge in cdt.face(fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth_of.contains_key(&idx) {
                continue;
            }
            let next = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_of.insert(idx, next);
            queue.push_back((neighbor.fix(), next));
        }
    }

    interior
}
