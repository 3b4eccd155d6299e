//! Security view: rules of the visible network security groups

use crate::inventory::domain::SecurityRule;
use crate::inventory::policies::SecurityFinding;
use serde::Serialize;

/// Rules of one security group, ascending by priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupView {
    pub nsg_id: String,
    pub nsg_name: String,
    pub resource_group: String,
    pub rules: Vec<SecurityRule>,
    pub findings: Vec<SecurityFinding>,
}
