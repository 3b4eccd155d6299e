mod exposure_policy;
mod reference_rules;

pub use exposure_policy::{ExposurePolicy, SecurityFinding};
pub use reference_rules::{ReferenceRule, ReferenceRules};
