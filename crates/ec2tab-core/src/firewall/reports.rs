use tracing::info;

use crate::firewall::model::GroupIndex;
use crate::report::model::RuleRow;

/// Which rule list of each group a report walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Incoming,
    Outgoing,
}

/// One row per rule, groups in id order, rules in provider order.
pub fn rule_rows(index: &GroupIndex, direction: Direction) -> Vec<RuleRow> {
    let rows: Vec<RuleRow> = index
        .values()
        .flat_map(|group| {
            let rules = match direction {
                Direction::Incoming => &group.incoming,
                Direction::Outgoing => &group.outgoing,
            };
            rules.iter().map(move |rule| RuleRow {
                target: rule.target.display().to_string(),
                group: group.display_name().to_string(),
                protocol: rule.protocol.clone(),
                ports: rule.ports.to_string(),
            })
        })
        .collect();

    info!(?direction, rules = rows.len(), "collected security group rules");
    rows
}
