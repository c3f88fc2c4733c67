//! Security group reference resolution.
//!
//! Rules may name another group by id only. Names are recovered from the
//! full index of one fetch snapshot, which must be complete before any lookup
//! starts: a rule can point at a group listed after its owner.
//!
//! The input index is never mutated. Resolution returns an enriched copy, so
//! the decoded snapshot and the resolved view never share mutable state.

use tracing::debug;

use crate::firewall::model::{GroupIndex, GroupRef, Rule, RuleTarget, SecurityGroup};

/// Return a copy of `index` where every unnamed group reference whose id is
/// present in `index` carries that group's name.
///
/// References that already have a name are left alone, and ids missing from
/// the index stay bare. Running it again on its own output changes nothing.
pub fn resolve_references(index: &GroupIndex) -> GroupIndex {
    let mut unresolved = 0usize;

    let resolved: GroupIndex = index
        .iter()
        .map(|(id, group)| {
            let group = SecurityGroup {
                incoming: resolve_rules(&group.incoming, index, &mut unresolved),
                outgoing: resolve_rules(&group.outgoing, index, &mut unresolved),
                ..group.clone()
            };
            (id.clone(), group)
        })
        .collect();

    debug!(unresolved, "resolved security group references");
    resolved
}

fn resolve_rules(rules: &[Rule], index: &GroupIndex, unresolved: &mut usize) -> Vec<Rule> {
    rules
        .iter()
        .map(|rule| match &rule.target {
            RuleTarget::Group(group) if group.name.is_none() => {
                let name = lookup_name(group, index);
                if name.is_none() {
                    debug!(group_id = %group.id, "security group reference left unresolved");
                    *unresolved += 1;
                }
                Rule {
                    target: RuleTarget::Group(GroupRef {
                        name,
                        ..group.clone()
                    }),
                    ..rule.clone()
                }
            }
            _ => rule.clone(),
        })
        .collect()
}

fn lookup_name(group: &GroupRef, index: &GroupIndex) -> Option<String> {
    index.get(&group.id).and_then(|g| g.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firewall::model::PortRange;
    use crate::util::tags::Tags;

    fn reference(id: &str, name: Option<&str>) -> Rule {
        Rule::new(
            PortRange::new(Some(5432), Some(5432)),
            "tcp",
            None,
            Some(GroupRef {
                id: id.into(),
                name: name.map(Into::into),
                vpc_id: None,
                vpc_peering_connection_id: None,
            }),
        )
        .unwrap()
    }

    fn group(id: &str, name: Option<&str>, incoming: Vec<Rule>) -> SecurityGroup {
        SecurityGroup {
            id: id.into(),
            name: name.map(Into::into),
            tags: Tags::new(),
            incoming,
            outgoing: vec![],
        }
    }

    fn index(groups: Vec<SecurityGroup>) -> GroupIndex {
        groups.into_iter().map(|g| (g.id.clone(), g)).collect()
    }

    #[test]
    fn fills_name_from_index() {
        let idx = index(vec![
            group("A", Some("web"), vec![]),
            group("B", None, vec![reference("A", None)]),
        ]);

        let resolved = resolve_references(&idx);

        assert_eq!(resolved["B"].incoming[0].target.display(), "web");
    }

    #[test]
    fn unknown_id_stays_bare() {
        let idx = index(vec![group("B", None, vec![reference("sg-missing", None)])]);

        let resolved = resolve_references(&idx);
        let rule = &resolved["B"].incoming[0];

        assert!(rule.group_ref().unwrap().name.is_none());
        assert_eq!(rule.target.display(), "sg-missing");
    }

    #[test]
    fn existing_name_is_kept() {
        let idx = index(vec![
            group("A", Some("web"), vec![]),
            group("B", None, vec![reference("A", Some("provider-name"))]),
        ]);

        let resolved = resolve_references(&idx);

        assert_eq!(resolved["B"].incoming[0].target.display(), "provider-name");
    }

    #[test]
    fn resolves_egress_rules_too() {
        let mut b = group("B", None, vec![]);
        b.outgoing.push(reference("A", None));
        let idx = index(vec![group("A", Some("web"), vec![]), b]);

        let resolved = resolve_references(&idx);

        assert_eq!(resolved["B"].outgoing[0].target.display(), "web");
    }

    #[test]
    fn input_index_is_untouched() {
        let idx = index(vec![
            group("A", Some("web"), vec![]),
            group("B", None, vec![reference("A", None)]),
        ]);

        let _ = resolve_references(&idx);

        assert!(idx["B"].incoming[0].group_ref().unwrap().name.is_none());
    }

    #[test]
    fn resolution_is_idempotent() {
        let idx = index(vec![
            group("A", Some("web"), vec![reference("C", None)]),
            group("B", None, vec![reference("A", None), reference("B", None)]),
        ]);

        let once = resolve_references(&idx);
        let twice = resolve_references(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn referenced_group_without_name_leaves_reference_bare() {
        let idx = index(vec![
            group("A", None, vec![]),
            group("B", None, vec![reference("A", None)]),
        ]);

        let resolved = resolve_references(&idx);

        assert_eq!(resolved["B"].incoming[0].target.display(), "A");
    }
}
