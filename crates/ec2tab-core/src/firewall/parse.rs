use crate::error::RuleError;
use crate::firewall::model::{GroupRef, PortRange, Rule};
use crate::source::raw::RawIpPermission;

/// Expand one raw permission into one `Rule` per target.
///
/// Port range and protocol are shared by every produced rule. Order is
/// IPv4 ranges, IPv6 ranges, prefix lists, then group references, each in
/// input order. A permission without targets yields no rules. A range entry
/// without its address fails with `RuleError::MissingTarget`.
pub fn expand_permission(raw: RawIpPermission) -> Result<Vec<Rule>, RuleError> {
    let ports = PortRange::new(raw.from_port, raw.to_port);
    let protocol = raw.ip_protocol.unwrap_or_default();

    let cidrs = raw
        .ip_ranges
        .into_iter()
        .map(|r| r.cidr_ip)
        .chain(raw.ipv6_ranges.into_iter().map(|r| r.cidr_ipv6))
        .chain(raw.prefix_list_ids.into_iter().map(|p| p.prefix_list_id));

    let mut rules = Vec::new();
    for cidr in cidrs {
        rules.push(Rule::new(ports, protocol.as_str(), cidr, None)?);
    }
    for pair in raw.user_id_group_pairs {
        rules.push(Rule::new(
            ports,
            protocol.as_str(),
            None,
            Some(GroupRef::from(pair)),
        )?);
    }
    Ok(rules)
}
