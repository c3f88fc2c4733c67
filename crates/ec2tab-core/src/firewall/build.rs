use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::firewall::model::{GroupIndex, Rule, SecurityGroup};
use crate::firewall::parse::expand_permission;
use crate::firewall::resolve::resolve_references;
use crate::source::Ec2Source;
use crate::source::raw::{DescribeSecurityGroupsOutput, RawIpPermission, RawSecurityGroup};
use crate::util::tags::parse_tags;

/// Fetch every security group visible to `source` and resolve the group
/// references inside their rules against that same snapshot.
pub fn fetch_all(source: &dyn Ec2Source) -> Result<GroupIndex> {
    let output = source.describe_security_groups()?;
    let index = from_output(output)?;
    Ok(resolve_references(&index))
}

/// Decode and index groups by id, without resolving references.
///
/// A later group with an already-seen id replaces the earlier one.
pub fn from_output(output: DescribeSecurityGroupsOutput) -> Result<GroupIndex> {
    let mut index = GroupIndex::new();
    for raw in output.security_groups {
        let group = SecurityGroup::try_from(raw)?;
        index.insert(group.id.clone(), group);
    }
    debug!(groups = index.len(), "decoded security groups");
    Ok(index)
}

impl TryFrom<RawSecurityGroup> for SecurityGroup {
    type Error = InventoryError;

    fn try_from(raw: RawSecurityGroup) -> Result<Self> {
        let incoming = expand_all(&raw.group_id, raw.ip_permissions)?;
        let outgoing = expand_all(&raw.group_id, raw.ip_permissions_egress)?;

        Ok(Self {
            tags: parse_tags(&raw.tags),
            id: raw.group_id,
            name: raw.group_name,
            incoming,
            outgoing,
        })
    }
}

fn expand_all(group_id: &str, permissions: Vec<RawIpPermission>) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    for permission in permissions {
        let expanded = expand_permission(permission).map_err(|source| InventoryError::Rule {
            group_id: group_id.to_string(),
            source,
        })?;
        rules.extend(expanded);
    }
    Ok(rules)
}
