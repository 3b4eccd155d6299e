use crate::inventory::domain::{
    Catalog, EdgeKind, Reference, Resource, ResourceId, ResourceKind, ResourceProperties,
};
use crate::inventory::policies::ReferenceRules;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Provider path ids are reference-shaped even under unknown keys
const PROVIDER_ID_PREFIX: &str = "/subscriptions/";

/// Keys that only wrap an id and carry no relation of their own
const STRUCTURAL_KEYS: &[&str] = &["id", "properties"];

/// Data-quality counters collected while resolving
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDiagnostics {
    /// Resources whose properties were not an object; they contribute no property edges
    pub malformed_resources: Vec<ResourceId>,
    /// Reference-shaped values whose target is not in the catalog
    pub dangling_references: usize,
    /// Reference-shaped values examined, including parent path prefixes that matched
    pub scanned_candidates: usize,
    /// Resources whose properties nest deeper than the scan limit
    pub truncated_resources: usize,
}

/// Result of a resolution pass
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub references: Vec<Reference>,
    pub diagnostics: ResolutionDiagnostics,
}

/// ReferenceResolver service inferring edges from embedded identifiers
///
/// Pure and total: the output is sorted and does not depend on catalog
/// order. Data-quality problems are counted, never returned as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceResolver {
    case_insensitive_ids: bool,
}

impl ReferenceResolver {
    /// Maximum nesting depth scanned inside one properties blob
    const MAX_SCAN_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Match candidate ids ignoring ASCII case (provider ids are
    /// case-insensitive, and exports mix casings)
    pub fn with_case_insensitive_ids(mut self, enabled: bool) -> Self {
        self.case_insensitive_ids = enabled;
        self
    }

    pub fn resolve(&self, catalog: &Catalog) -> Vec<Reference> {
        self.resolve_with_diagnostics(catalog).references
    }

    /// Resolves every reference of the catalog
    ///
    /// # Arguments
    /// * `catalog` - The loaded snapshot
    ///
    /// # Returns
    /// The deduplicated, sorted references plus diagnostics
    pub fn resolve_with_diagnostics(&self, catalog: &Catalog) -> Resolution {
        let index = IdIndex::new(catalog, self.case_insensitive_ids);
        let mut references = BTreeSet::new();
        let mut diagnostics = ResolutionDiagnostics::default();

        for resource in catalog.resources() {
            Self::resolve_parent(resource, &index, &mut references, &mut diagnostics);

            if let ResourceProperties::Malformed(_) = resource.typed_properties() {
                tracing::debug!(
                    resource = %resource.id(),
                    "properties are not an object; skipping reference scan"
                );
                diagnostics.malformed_resources.push(resource.id().clone());
                continue;
            }

            let mut scanner = PropertyScanner {
                index: &index,
                resource,
                kind: resource.kind(),
                references: &mut references,
                diagnostics: &mut diagnostics,
                truncated: false,
            };
            scanner.scan(resource.properties(), None, 0);
            if scanner.truncated {
                tracing::warn!(
                    resource = %resource.id(),
                    max_depth = Self::MAX_SCAN_DEPTH,
                    "properties nest too deeply; deeper references were ignored"
                );
                diagnostics.truncated_resources += 1;
            }
        }

        diagnostics.malformed_resources.sort();

        Resolution {
            references: references.into_iter().collect(),
            diagnostics,
        }
    }

    /// Emits `parent-of` from every catalog resource whose id is a strict
    /// path prefix of this one
    fn resolve_parent(
        resource: &Resource,
        index: &IdIndex<'_>,
        references: &mut BTreeSet<Reference>,
        diagnostics: &mut ResolutionDiagnostics,
    ) {
        for parent in resource
            .id()
            .path_prefixes()
            .filter_map(|prefix| index.lookup(prefix))
        {
            diagnostics.scanned_candidates += 1;
            references.insert(Reference::new(
                parent.clone(),
                resource.id().clone(),
                EdgeKind::ParentOf,
            ));
        }
    }
}

/// Catalog id lookup honoring the case-sensitivity setting
struct IdIndex<'a> {
    catalog: &'a Catalog,
    lowered: Option<HashMap<String, &'a ResourceId>>,
}

impl<'a> IdIndex<'a> {
    fn new(catalog: &'a Catalog, case_insensitive: bool) -> Self {
        let lowered = case_insensitive.then(|| {
            let mut map: HashMap<String, &'a ResourceId> = HashMap::new();
            for id in catalog.ids() {
                let entry = map.entry(id.as_str().to_ascii_lowercase()).or_insert(id);
                // Ids differing only in case: the smallest wins, independent of order
                if id < *entry {
                    *entry = id;
                }
            }
            map
        });
        Self { catalog, lowered }
    }

    fn lookup(&self, candidate: &str) -> Option<&'a ResourceId> {
        match &self.lowered {
            Some(map) => map.get(&candidate.to_ascii_lowercase()).copied(),
            None => self.catalog.get(candidate).map(Resource::id),
        }
    }

    fn same_id(&self, a: &str, b: &str) -> bool {
        if self.lowered.is_some() {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    }

    /// Whether `candidate` names `owner` or one of its own sub-resources
    fn is_own(&self, owner: &str, candidate: &str) -> bool {
        // A split inside a multi-byte character cannot name the owner
        let (Some(head), Some(tail)) =
            (candidate.get(..owner.len()), candidate.get(owner.len()..))
        else {
            return false;
        };
        self.same_id(head, owner) && (tail.is_empty() || tail.starts_with('/'))
    }
}

/// Walks one properties blob, recording candidate references
struct PropertyScanner<'s, 'a> {
    index: &'s IdIndex<'a>,
    resource: &'s Resource,
    kind: ResourceKind,
    references: &'s mut BTreeSet<Reference>,
    diagnostics: &'s mut ResolutionDiagnostics,
    truncated: bool,
}

impl PropertyScanner<'_, '_> {
    /// `key` is the nearest enclosing object key that is not structural;
    /// array elements inherit the key of their array.
    fn scan(&mut self, value: &Value, key: Option<&str>, depth: usize) {
        if depth > ReferenceResolver::MAX_SCAN_DEPTH {
            self.truncated = true;
            return;
        }

        match value {
            Value::Object(map) => {
                for (child_key, child) in map {
                    let structural = STRUCTURAL_KEYS
                        .iter()
                        .any(|s| child_key.eq_ignore_ascii_case(s));
                    let context = if structural {
                        key
                    } else {
                        Some(child_key.as_str())
                    };
                    self.scan(child, context, depth + 1);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.scan(item, key, depth + 1);
                }
            }
            Value::String(candidate) => self.consider(candidate, key),
            _ => {}
        }
    }

    fn consider(&mut self, candidate: &str, key: Option<&str>) {
        if candidate.trim().is_empty() {
            return;
        }

        let rule_kind = key.and_then(|key| ReferenceRules::lookup(self.kind, key));
        let target = self.index.lookup(candidate);
        let provider_shaped = candidate
            .get(..PROVIDER_ID_PREFIX.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(PROVIDER_ID_PREFIX));

        if rule_kind.is_none() && target.is_none() && !provider_shaped {
            return;
        }

        let own_id = self.resource.id().as_str();
        if self.index.is_own(own_id, candidate) {
            return;
        }

        self.diagnostics.scanned_candidates += 1;

        match target {
            Some(target) => {
                let kind = rule_kind.unwrap_or(EdgeKind::References);
                self.references.insert(Reference::new(
                    self.resource.id().clone(),
                    target.clone(),
                    kind,
                ));
            }
            None => {
                self.diagnostics.dangling_references += 1;
                tracing::debug!(
                    resource = %self.resource.id(),
                    target = candidate,
                    property = key.unwrap_or(""),
                    "dangling reference"
                );
            }
        }
    }
}
