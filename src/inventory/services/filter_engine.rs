use crate::inventory::domain::{Catalog, FilterState, Resource, ResourceId};
use std::collections::BTreeSet;

/// FilterEngine service computing the visible subset of a catalog
///
/// Stateless: the same catalog and filter state always yield the same
/// subset. An empty result is a valid outcome, not an error.
pub struct FilterEngine;

impl FilterEngine {
    /// Applies a filter state to a catalog
    ///
    /// # Arguments
    /// * `catalog` - The resources to filter
    /// * `state` - Active constraints (AND across dimensions, OR within one)
    ///
    /// # Returns
    /// Ids of the resources passing every active constraint
    pub fn apply(catalog: &Catalog, state: &FilterState) -> BTreeSet<ResourceId> {
        let name_matcher = state.name_pattern().map(NameMatcher::compile);

        catalog
            .resources()
            .iter()
            .filter(|resource| Self::matches(resource, state, name_matcher.as_ref()))
            .map(|resource| resource.id().clone())
            .collect()
    }

    fn matches(resource: &Resource, state: &FilterState, name: Option<&NameMatcher>) -> bool {
        accepts(state.resource_groups(), resource.resource_group())
            && accepts(state.types(), resource.resource_type())
            && accepts(state.locations(), resource.location())
            && (state.categories().is_empty() || state.categories().contains(&resource.category()))
            && name.map_or(true, |matcher| matcher.matches(resource.name()))
    }
}

/// Empty set means no constraint; otherwise ASCII case-insensitive membership
fn accepts(accepted: &BTreeSet<String>, value: &str) -> bool {
    accepted.is_empty()
        || accepted
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(value))
}

/// Compiled, case-insensitive name matcher
///
/// Without `*` the pattern matches as a substring anywhere in the name.
/// With `*` it is anchored, and each `*` stands for zero or more characters.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NameMatcher {
    /// "web" (no wildcard)
    Substring(String),
    /// "web-*"
    Prefix(String),
    /// "*-prod"
    Suffix(String),
    /// "*api*"
    Contains(String),
    /// "web*eu*01"
    Multiple {
        parts: Vec<String>,
        anchored_start: bool,
        anchored_end: bool,
    },
    /// "*" alone
    Any,
}

impl NameMatcher {
    fn compile(pattern: &str) -> Self {
        let pattern = pattern.to_lowercase();
        let wildcard_count = pattern.matches('*').count();

        if wildcard_count == 0 {
            return NameMatcher::Substring(pattern);
        }

        let parts: Vec<String> = pattern
            .split('*')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        let anchored_start = !pattern.starts_with('*');
        let anchored_end = !pattern.ends_with('*');

        match (parts.as_slice(), anchored_start, anchored_end) {
            ([], _, _) => NameMatcher::Any,
            ([single], true, false) => NameMatcher::Prefix(single.clone()),
            ([single], false, true) => NameMatcher::Suffix(single.clone()),
            ([single], false, false) => NameMatcher::Contains(single.clone()),
            _ => NameMatcher::Multiple {
                parts,
                anchored_start,
                anchored_end,
            },
        }
    }

    fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            NameMatcher::Substring(s) | NameMatcher::Contains(s) => name.contains(s.as_str()),
            NameMatcher::Prefix(prefix) => name.starts_with(prefix.as_str()),
            NameMatcher::Suffix(suffix) => name.ends_with(suffix.as_str()),
            NameMatcher::Any => true,
            NameMatcher::Multiple {
                parts,
                anchored_start,
                anchored_end,
            } => Self::matches_parts(&name, parts, *anchored_start, *anchored_end),
        }
    }

    /// Parts must appear in order without overlapping
    fn matches_parts(name: &str, parts: &[String], anchored_start: bool, anchored_end: bool) -> bool {
        let (first, rest) = match parts.split_first() {
            Some(split) => split,
            None => return true,
        };

        let mut remaining = name;
        if anchored_start {
            match remaining.strip_prefix(first.as_str()) {
                Some(after) => remaining = after,
                None => return false,
            }
        } else {
            match remaining.find(first.as_str()) {
                Some(pos) => remaining = &remaining[pos + first.len()..],
                None => return false,
            }
        }

        let (middle, last) = match (anchored_end, rest.split_last()) {
            (true, Some((last, middle))) => (middle, Some(last)),
            _ => (rest, None),
        };

        for part in middle {
            match remaining.find(part.as_str()) {
                Some(pos) => remaining = &remaining[pos + part.len()..],
                None => return false,
            }
        }

        match last {
            Some(last) => remaining.ends_with(last.as_str()),
            None => !anchored_end || remaining.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::{FilterDimension, SnapshotMetadata};
    use serde_json::json;

    fn resource(id: &str, name: &str, rg: &str, resource_type: &str, location: &str) -> Resource {
        Resource::new(
            ResourceId::new(id.to_string()).unwrap(),
            name.to_string(),
            resource_type.to_string(),
            rg.to_string(),
            location.to_string(),
            json!({}),
        )
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                resource("r1", "web-01", "rg-prod", "compute.vm", "westeurope"),
                resource("r2", "web-02", "rg-prod", "compute.vm", "northeurope"),
                resource("r3", "db-prod", "rg-prod", "database.sql", "westeurope"),
                resource("r4", "Web-Dev", "rg-dev", "compute.vm", "westeurope"),
                resource("r5", "vnet-dev", "rg-dev", "network.vnet", "westeurope"),
            ],
            SnapshotMetadata::default(),
        )
        .unwrap()
    }

    fn ids(set: &BTreeSet<ResourceId>) -> Vec<&str> {
        set.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_empty_state_passes_everything() {
        let visible = FilterEngine::apply(&catalog(), &FilterState::new());
        assert_eq!(visible.len(), 5);
    }

    #[test]
    fn test_resource_group_filter() {
        let mut state = FilterState::new();
        state.apply_expression("resourceGroup=rg-prod").unwrap();
        let visible = FilterEngine::apply(&catalog(), &state);
        assert_eq!(ids(&visible), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn test_or_within_and_across_dimensions() {
        let mut state = FilterState::new();
        state
            .apply_expression("location=westeurope,northeurope")
            .unwrap();
        state.apply_expression("type=compute.vm").unwrap();
        state.apply_expression("rg=rg-prod").unwrap();
        let visible = FilterEngine::apply(&catalog(), &state);
        assert_eq!(ids(&visible), vec!["r1", "r2"]);
    }

    #[test]
    fn test_values_match_case_insensitively() {
        let mut state = FilterState::new();
        state.apply_expression("location=WestEurope").unwrap();
        let visible = FilterEngine::apply(&catalog(), &state);
        assert_eq!(visible.len(), 4);
    }

    #[test]
    fn test_name_substring_anywhere() {
        let mut state = FilterState::new();
        state.apply_expression("name=DEV").unwrap();
        let visible = FilterEngine::apply(&catalog(), &state);
        assert_eq!(ids(&visible), vec!["r4", "r5"]);
    }

    #[test]
    fn test_name_wildcards() {
        let catalog = catalog();
        let cases = [
            ("web-*", vec!["r1", "r2", "r4"]),
            ("*-dev", vec!["r4", "r5"]),
            ("*prod*", vec!["r3"]),
            ("w*0*", vec!["r1", "r2"]),
            ("w*2", vec!["r2"]),
            ("*", vec!["r1", "r2", "r3", "r4", "r5"]),
        ];
        for (pattern, expected) in cases {
            let mut state = FilterState::new();
            state.add_value(FilterDimension::Name, pattern).unwrap();
            let visible = FilterEngine::apply(&catalog, &state);
            assert_eq!(ids(&visible), expected, "pattern {}", pattern);
        }
    }

    #[test]
    fn test_category_filter() {
        let mut state = FilterState::new();
        state.apply_expression("category=network,database").unwrap();
        let visible = FilterEngine::apply(&catalog(), &state);
        assert_eq!(ids(&visible), vec!["r3", "r5"]);
    }

    #[test]
    fn test_zero_matches_is_empty_not_error() {
        let mut state = FilterState::new();
        state.apply_expression("rg=rg-prod").unwrap();
        state.apply_expression("location=eastus").unwrap();
        assert!(FilterEngine::apply(&catalog(), &state).is_empty());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let catalog = catalog();
        let mut state = FilterState::new();
        state.apply_expression("type=compute.vm").unwrap();
        assert_eq!(
            FilterEngine::apply(&catalog, &state),
            FilterEngine::apply(&catalog, &state)
        );
    }

    #[test]
    fn test_adding_constraint_never_grows_subset() {
        let catalog = catalog();
        let mut state = FilterState::new();
        state.apply_expression("location=westeurope").unwrap();
        let before = FilterEngine::apply(&catalog, &state);

        for expression in ["rg=rg-dev", "type=compute.vm", "name=web", "category=compute"] {
            let mut narrowed = state.clone();
            narrowed.apply_expression(expression).unwrap();
            let after = FilterEngine::apply(&catalog, &narrowed);
            assert!(after.len() <= before.len(), "{} grew the subset", expression);
            assert!(after.is_subset(&before));
        }
    }

    #[test]
    fn test_multiple_matcher_anchoring() {
        let matcher = NameMatcher::compile("a*b*c");
        assert!(matcher.matches("aXbYc"));
        assert!(matcher.matches("abc"));
        assert!(!matcher.matches("aXbYcZ"));
        assert!(!matcher.matches("ZaXbYc"));

        let open = NameMatcher::compile("*a*b");
        assert!(open.matches("xxaYYb"));
        assert!(!open.matches("xxaYYbZ"));
    }
}
