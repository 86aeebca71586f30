use crate::atlas::Atlas;
use crate::error::{Result, ValueError};

/// Scalar value per region, in insertion order.
///
/// NaN marks a region without a value: it is shown but gets no color and
/// does not count towards the automatic color range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionValues {
    entries: Vec<(String, f64)>,
}

impl RegionValues {
    /// Creates an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a region, keeping its original position if it was
    /// already present.
    pub fn insert(&mut self, region: impl Into<String>, value: f64) {
        let region = region.into();
        match self.entries.iter_mut().find(|(name, _)| *name == region) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((region, value)),
        }
    }

    /// Value of a region.
    #[must_use]
    pub fn get(&self, region: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == region)
            .map(|&(_, v)| v)
    }

    /// Returns `true` if the region has an entry.
    #[must_use]
    pub fn contains(&self, region: &str) -> bool {
        self.get(region).is_some()
    }

    /// Iterates over `(region, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, v)| (name.as_str(), *v))
    }

    /// Region names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// All values, NaN included.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|&(_, v)| v)
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks every entry against the atlas.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NonNumeric`] for an infinite value and
    /// [`ValueError::UnknownRegion`] for a name the atlas does not know.
    pub fn validate<A: Atlas + ?Sized>(&self, atlas: &A) -> Result<()> {
        for (region, value) in self.iter() {
            if value.is_infinite() {
                return Err(ValueError::NonNumeric {
                    region: region.to_owned(),
                    value,
                }
                .into());
            }
            if !atlas.contains_region(region) {
                return Err(ValueError::UnknownRegion(region.to_owned()).into());
            }
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RegionValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (region, value) in iter {
            values.insert(region, value);
        }
        values
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for RegionValues {
    fn from(entries: [(K, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}
