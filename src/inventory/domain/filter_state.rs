use super::category::ServiceCategory;
use crate::shared::error::InventoryError;
use crate::shared::Result;
use serde::Serialize;
use std::collections::BTreeSet;

/// Maximum length of a name pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// Maximum number of accepted values per dimension
const MAX_VALUES_PER_DIMENSION: usize = 256;

/// A filterable attribute of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDimension {
    ResourceGroup,
    Type,
    Location,
    /// Case-insensitive substring (or `*` wildcard pattern) on `name`
    Name,
    Category,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 5] = [
        FilterDimension::ResourceGroup,
        FilterDimension::Type,
        FilterDimension::Location,
        FilterDimension::Name,
        FilterDimension::Category,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterDimension::ResourceGroup => "resourceGroup",
            FilterDimension::Type => "type",
            FilterDimension::Location => "location",
            FilterDimension::Name => "name",
            FilterDimension::Category => "category",
        }
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::str::FromStr for FilterDimension {
    type Err = InventoryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resourcegroup" | "resource-group" | "resource_group" | "rg" => {
                Ok(FilterDimension::ResourceGroup)
            }
            "type" | "resourcetype" => Ok(FilterDimension::Type),
            "location" | "region" => Ok(FilterDimension::Location),
            "name" => Ok(FilterDimension::Name),
            "category" => Ok(FilterDimension::Category),
            _ => Err(InventoryError::InvalidFilterDimension {
                dimension: s.to_string(),
                supported: Self::supported_list(),
            }),
        }
    }
}

impl std::fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// FilterState value object: the active predicate per dimension
///
/// Dimensions combine with AND, values within a dimension with OR. An empty
/// dimension places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    resource_groups: BTreeSet<String>,
    types: BTreeSet<String>,
    locations: BTreeSet<String>,
    categories: BTreeSet<ServiceCategory>,
    name_pattern: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `dimension=value[,value...]` into its parts.
    ///
    /// Values are trimmed and empty ones dropped; at least one must remain.
    pub fn parse_expression(expression: &str) -> Result<(FilterDimension, Vec<String>)> {
        let (raw_dimension, raw_values) = expression.split_once('=').ok_or_else(|| {
            InventoryError::InvalidFilterExpression {
                expression: expression.to_string(),
                reason: "missing '='".to_string(),
            }
        })?;

        let dimension: FilterDimension = raw_dimension.parse()?;

        let values: Vec<String> = raw_values
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect();

        if values.is_empty() {
            return Err(InventoryError::InvalidFilterExpression {
                expression: expression.to_string(),
                reason: "no values given".to_string(),
            }
            .into());
        }

        Ok((dimension, values))
    }

    /// Applies a `dimension=value[,value...]` expression, replacing that
    /// dimension's current values. The state is unchanged on error.
    pub fn apply_expression(&mut self, expression: &str) -> Result<()> {
        let (dimension, values) = Self::parse_expression(expression)?;
        self.set_values(dimension, values)
    }

    /// Replaces the accepted values of one dimension. An empty list clears it.
    pub fn set_values<I, S>(&mut self, dimension: FilterDimension, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();

        if values.len() > MAX_VALUES_PER_DIMENSION {
            return Err(InventoryError::InvalidFilterExpression {
                expression: dimension.to_string(),
                reason: format!(
                    "too many values: {} (maximum: {})",
                    values.len(),
                    MAX_VALUES_PER_DIMENSION
                ),
            }
            .into());
        }

        match dimension {
            FilterDimension::ResourceGroup => self.resource_groups = values.into_iter().collect(),
            FilterDimension::Type => self.types = values.into_iter().collect(),
            FilterDimension::Location => self.locations = values.into_iter().collect(),
            FilterDimension::Category => {
                self.categories = values
                    .iter()
                    .map(|value| parse_category(value))
                    .collect::<Result<BTreeSet<_>>>()?;
            }
            FilterDimension::Name => {
                self.name_pattern = match values.as_slice() {
                    [] => None,
                    [pattern] => Some(validate_name_pattern(pattern)?),
                    _ => {
                        return Err(InventoryError::InvalidFilterExpression {
                            expression: values.join(","),
                            reason: "the name dimension takes a single pattern".to_string(),
                        }
                        .into())
                    }
                };
            }
        }
        Ok(())
    }

    /// Adds one accepted value to a dimension (for `Name`, replaces the pattern)
    pub fn add_value(&mut self, dimension: FilterDimension, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }
        match dimension {
            FilterDimension::ResourceGroup => {
                self.resource_groups.insert(value.to_string());
            }
            FilterDimension::Type => {
                self.types.insert(value.to_string());
            }
            FilterDimension::Location => {
                self.locations.insert(value.to_string());
            }
            FilterDimension::Category => {
                self.categories.insert(parse_category(value)?);
            }
            FilterDimension::Name => {
                self.name_pattern = Some(validate_name_pattern(value)?);
            }
        }
        Ok(())
    }

    /// Removes every constraint on one dimension
    pub fn clear(&mut self, dimension: FilterDimension) {
        match dimension {
            FilterDimension::ResourceGroup => self.resource_groups.clear(),
            FilterDimension::Type => self.types.clear(),
            FilterDimension::Location => self.locations.clear(),
            FilterDimension::Category => self.categories.clear(),
            FilterDimension::Name => self.name_pattern = None,
        }
    }

    /// Removes every constraint
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds the category if absent, removes it otherwise
    pub fn toggle_category(&mut self, category: ServiceCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    /// Current values of one dimension, as strings
    pub fn values(&self, dimension: FilterDimension) -> Vec<String> {
        match dimension {
            FilterDimension::ResourceGroup => self.resource_groups.iter().cloned().collect(),
            FilterDimension::Type => self.types.iter().cloned().collect(),
            FilterDimension::Location => self.locations.iter().cloned().collect(),
            FilterDimension::Category => self
                .categories
                .iter()
                .map(|category| category.as_str().to_string())
                .collect(),
            FilterDimension::Name => self.name_pattern.iter().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resource_groups.is_empty()
            && self.types.is_empty()
            && self.locations.is_empty()
            && self.categories.is_empty()
            && self.name_pattern.is_none()
    }

    /// Dimensions that currently constrain the result
    pub fn active_dimensions(&self) -> Vec<FilterDimension> {
        FilterDimension::ALL
            .into_iter()
            .filter(|dimension| !self.values(*dimension).is_empty())
            .collect()
    }

    pub fn resource_groups(&self) -> &BTreeSet<String> {
        &self.resource_groups
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    pub fn categories(&self) -> &BTreeSet<ServiceCategory> {
        &self.categories
    }

    pub fn name_pattern(&self) -> Option<&str> {
        self.name_pattern.as_deref()
    }
}

fn parse_category(value: &str) -> Result<ServiceCategory> {
    value.parse::<ServiceCategory>().map_err(|reason| {
        InventoryError::InvalidFilterExpression {
            expression: format!("category={}", value),
            reason,
        }
        .into()
    })
}

fn validate_name_pattern(pattern: &str) -> Result<String> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(InventoryError::InvalidFilterExpression {
            expression: format!("name={}", pattern),
            reason: format!(
                "pattern is too long ({} chars). Maximum: {} chars",
                pattern.len(),
                MAX_PATTERN_LENGTH
            ),
        }
        .into());
    }
    Ok(pattern.to_string())
}
