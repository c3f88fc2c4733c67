use std::collections::BTreeMap;
use std::fmt;

use crate::error::RuleError;
use crate::source::raw::RawUserIdGroupPair;
use crate::util::tags::Tags;

/// Every fetched security group keyed by id; one fetch snapshot.
pub type GroupIndex = BTreeMap<String, SecurityGroup>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroup {
    pub id: String,
    pub name: Option<String>,
    pub tags: Tags,
    pub incoming: Vec<Rule>,
    pub outgoing: Vec<Rule>,
}

impl SecurityGroup {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Another security group named from inside a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub id: String,
    /// May be missing from the provider; filled by reference resolution.
    pub name: Option<String>,
    pub vpc_id: Option<String>,
    pub vpc_peering_connection_id: Option<String>,
}

impl GroupRef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl From<RawUserIdGroupPair> for GroupRef {
    fn from(raw: RawUserIdGroupPair) -> Self {
        Self {
            id: raw.group_id,
            name: raw.group_name,
            vpc_id: raw.vpc_id,
            vpc_peering_connection_id: raw.vpc_peering_connection_id,
        }
    }
}

/// Inclusive port bounds; both absent means every port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl PortRange {
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (None, None) => write!(f, "*"),
            (Some(from), Some(to)) if from == to => write!(f, "{from}"),
            (Some(from), Some(to)) => write!(f, "{from}-{to}"),
            (Some(port), None) | (None, Some(port)) => write!(f, "{port}"),
        }
    }
}

/// What a rule allows traffic from (ingress) or to (egress).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTarget {
    Cidr(String),
    Group(GroupRef),
}

impl RuleTarget {
    /// The CIDR itself, or the group's name falling back to its id.
    pub fn display(&self) -> &str {
        match self {
            RuleTarget::Cidr(cidr) => cidr,
            RuleTarget::Group(group) => group.display_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub ports: PortRange,
    /// Provider protocol string; "-1" means any protocol.
    pub protocol: String,
    pub target: RuleTarget,
}

impl Rule {
    /// Build a rule from optional targets; exactly one must be present.
    pub fn new(
        ports: PortRange,
        protocol: impl Into<String>,
        cidr: Option<String>,
        group: Option<GroupRef>,
    ) -> Result<Self, RuleError> {
        let target = match (cidr, group) {
            (Some(cidr), None) => RuleTarget::Cidr(cidr),
            (None, Some(group)) => RuleTarget::Group(group),
            (None, None) => return Err(RuleError::MissingTarget),
            (Some(cidr), Some(group)) => {
                return Err(RuleError::ConflictingTargets {
                    cidr,
                    group_id: group.id,
                });
            }
        };

        Ok(Self {
            ports,
            protocol: protocol.into(),
            target,
        })
    }

    pub fn group_ref(&self) -> Option<&GroupRef> {
        match &self.target {
            RuleTarget::Group(group) => Some(group),
            RuleTarget::Cidr(_) => None,
        }
    }
}
