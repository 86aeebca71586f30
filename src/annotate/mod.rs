mod interior_point;
mod repair;

pub use interior_point::{pole_of_inaccessibility, FindInteriorPoint, ANNOTATION_PRECISION};
pub use repair::RepairPolygon;

use std::collections::{BTreeMap, BTreeSet};

use crate::atlas::ROOT;

/// Which regions get a text label on the 2D plot, and with what text.
///
/// The root outline is never labelled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnnotationPolicy {
    /// No labels.
    #[default]
    None,
    /// Every region, labelled with its own name.
    All,
    /// Only the listed regions, labelled with their own names.
    Only(BTreeSet<String>),
    /// Only the keyed regions, labelled with the mapped text.
    Custom(BTreeMap<String, String>),
}

impl AnnotationPolicy {
    /// Labels exactly the named regions.
    #[must_use]
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    /// Labels the keyed regions with the display form of each value.
    #[must_use]
    pub fn custom<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self::Custom(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }

    /// Returns `true` if at least one region could be labelled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Only(names) => !names.is_empty(),
            Self::Custom(map) => !map.is_empty(),
        }
    }

    /// Label text for `region`, or `None` if it is not annotated.
    #[must_use]
    pub fn should_annotate(&self, region: &str) -> Option<String> {
        if region == ROOT {
            return None;
        }
        match self {
            Self::None => None,
            Self::All => Some(region.to_owned()),
            Self::Only(names) => names.contains(region).then(|| region.to_owned()),
            Self::Custom(map) => map.get(region).cloned(),
        }
    }
}

impl From<bool> for AnnotationPolicy {
    fn from(annotate: bool) -> Self {
        if annotate {
            Self::All
        } else {
            Self::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_policies() {
        assert_eq!(AnnotationPolicy::from(false).should_annotate("TH"), None);
        assert_eq!(AnnotationPolicy::from(true).should_annotate("TH").as_deref(), Some("TH"));
        assert_eq!(AnnotationPolicy::All.should_annotate(ROOT), None);
    }

    #[test]
    fn listed_names() {
        let policy = AnnotationPolicy::only(["TH"]);
        assert_eq!(policy.should_annotate("TH").as_deref(), Some("TH"));
        assert_eq!(policy.should_annotate("RSP"), None);
        assert_eq!(AnnotationPolicy::only([ROOT]).should_annotate(ROOT), None);
        assert_eq!(AnnotationPolicy::only(["3N"]).should_annotate("3N").as_deref(), Some("3N"));
    }

    #[test]
    fn custom_text() {
        let policy = AnnotationPolicy::custom([("TH", "Thalamus"), ("RSP", "0.5")]);
        assert_eq!(policy.should_annotate("TH").as_deref(), Some("Thalamus"));
        assert_eq!(policy.should_annotate("RSP").as_deref(), Some("0.5"));
        assert_eq!(policy.should_annotate("AI"), None);

        let numeric = AnnotationPolicy::custom([("TH", 123.0), ("RSP", 0.5)]);
        assert_eq!(numeric.should_annotate("TH").as_deref(), Some("123"));
        assert_eq!(numeric.should_annotate("RSP").as_deref(), Some("0.5"));

        let flags = AnnotationPolicy::custom([("VIS", true)]);
        assert_eq!(flags.should_annotate("VIS").as_deref(), Some("true"));

        let special = AnnotationPolicy::custom([("3N", 41)]);
        assert_eq!(special.should_annotate("3N").as_deref(), Some("41"));
    }

    #[test]
    fn empty_collections_annotate_nothing() {
        let empty_list = AnnotationPolicy::only(Vec::<String>::new());
        let empty_map = AnnotationPolicy::custom(Vec::<(String, String)>::new());
        for policy in [empty_list, empty_map, AnnotationPolicy::None] {
            assert!(!policy.is_enabled());
            for region in ["TH", ROOT] {
                assert_eq!(policy.should_annotate(region), None);
            }
        }
    }
}
