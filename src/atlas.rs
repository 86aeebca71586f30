use slotmap::SlotMap;

use crate::color::Rgb;
use crate::mesh::TriMesh;

/// Name of the synthetic outline region covering the whole atlas.
pub const ROOT: &str = "root";

slotmap::new_key_type! {
    /// Unique identifier for a region in the region store.
    pub struct RegionId;
}

/// A named anatomical region and its surface mesh.
#[derive(Debug, Clone)]
pub struct RegionData {
    /// Region acronym, e.g. `"TH"`.
    pub name: String,
    /// Closed surface mesh of the region.
    pub mesh: TriMesh,
    /// Display color, if assigned.
    pub color: Option<Rgb>,
    /// Whether the region is shown.
    pub visible: bool,
}

impl RegionData {
    /// Creates a visible, uncolored region.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: TriMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            color: None,
            visible: true,
        }
    }
}

/// Lookup interface of the reference atlas.
pub trait Atlas {
    /// Returns `true` if `name` is a region acronym known to the atlas.
    fn contains_region(&self, name: &str) -> bool;

    /// Mesh of a named region.
    fn region_mesh(&self, name: &str) -> Option<&TriMesh>;

    /// Mesh of the root (whole-brain outline) region.
    fn root_mesh(&self) -> Option<&TriMesh> {
        self.region_mesh(ROOT)
    }
}

impl<T: Atlas + ?Sized> Atlas for &T {
    fn contains_region(&self, name: &str) -> bool {
        (**self).contains_region(name)
    }

    fn region_mesh(&self, name: &str) -> Option<&TriMesh> {
        (**self).region_mesh(name)
    }
}

/// Arena owning region meshes, addressed by [`RegionId`] or by name.
///
/// Insertion order is preserved by [`RegionStore::iter`].
#[derive(Debug, Default)]
pub struct RegionStore {
    regions: SlotMap<RegionId, RegionData>,
    order: Vec<RegionId>,
}

impl RegionStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a region and returns its ID. A region with the same name is
    /// replaced.
    pub fn add_region(&mut self, data: RegionData) -> RegionId {
        if let Some(id) = self.find(&data.name) {
            self.remove_region(id);
        }
        let id = self.regions.insert(data);
        self.order.push(id);
        id
    }

    /// Removes a region, returning its data.
    pub fn remove_region(&mut self, id: RegionId) -> Option<RegionData> {
        self.order.retain(|&o| o != id);
        self.regions.remove(id)
    }

    /// Returns the region data, if present.
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&RegionData> {
        self.regions.get(id)
    }

    /// Returns a mutable reference to the region data, if present.
    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut RegionData> {
        self.regions.get_mut(id)
    }

    /// Finds a region by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<RegionId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.regions.get(id).is_some_and(|r| r.name == name))
    }

    /// Returns the root region, if present.
    #[must_use]
    pub fn root(&self) -> Option<&RegionData> {
        self.find(ROOT).and_then(|id| self.region(id))
    }

    /// Iterates over regions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &RegionData)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.regions.get(id).map(|r| (id, r)))
    }

    /// Number of regions, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if the store holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Atlas for RegionStore {
    fn contains_region(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn region_mesh(&self, name: &str) -> Option<&TriMesh> {
        self.find(name)
            .and_then(|id| self.region(id))
            .map(|r| &r.mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn cube(at: f64) -> TriMesh {
        TriMesh::cuboid(Point3::new(at, 0.0, 0.0), Point3::new(at + 1.0, 1.0, 1.0))
    }

    #[test]
    fn add_and_find() {
        let mut store = RegionStore::new();
        let th = store.add_region(RegionData::new("TH", cube(0.0)));
        store.add_region(RegionData::new(ROOT, cube(-5.0)));

        assert_eq!(store.find("TH"), Some(th));
        assert!(store.contains_region("TH"));
        assert!(!store.contains_region("RSP"));
        assert_eq!(store.root().unwrap().name, ROOT);
        assert!(store.root_mesh().is_some());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_same_name_keeps_one() {
        let mut store = RegionStore::new();
        store.add_region(RegionData::new("TH", cube(0.0)));
        let second = store.add_region(RegionData::new("TH", cube(3.0)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.find("TH"), Some(second));
        let bounds = store.region_mesh("TH").unwrap().bounds().unwrap();
        assert_eq!(bounds.min.x, 3.0);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut store = RegionStore::new();
        for name in ["RSP", "TH", ROOT, "HIP"] {
            store.add_region(RegionData::new(name, cube(0.0)));
        }
        let id = store.find("TH").unwrap();
        store.remove_region(id);
        let names: Vec<_> = store.iter().map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(names, ["RSP", ROOT, "HIP"]);
    }

    #[test]
    fn region_mut_updates_color() {
        let mut store = RegionStore::new();
        let id = store.add_region(RegionData::new("TH", cube(0.0)));
        store.region_mut(id).unwrap().color = Some(Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(store.region(id).unwrap().color, Some(Rgb::new(1.0, 0.0, 0.0)));
    }
}
