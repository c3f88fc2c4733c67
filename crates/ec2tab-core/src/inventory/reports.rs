//! Pure reports over a fetched instance list.

use std::collections::BTreeMap;

use tracing::info;

use crate::inventory::model::InstanceInfo;
use crate::report::model::{ClientRow, ClientServiceRow, GroupMemberRow, InterfaceRow};
use crate::util::tags::render_tags;

/// Security group display name → instances attached to it.
///
/// Instances are deduplicated by id: one with several interfaces in the same
/// group appears once. Both levels are ordered by key.
pub fn group_by_security_group(
    instances: &[InstanceInfo],
) -> BTreeMap<String, BTreeMap<&str, &InstanceInfo>> {
    let mut groups: BTreeMap<String, BTreeMap<&str, &InstanceInfo>> = BTreeMap::new();
    for instance in instances {
        for nif in &instance.interfaces {
            for sg in &nif.security_groups {
                groups
                    .entry(sg.display_name().to_string())
                    .or_default()
                    .insert(instance.id.as_str(), instance);
            }
        }
    }
    groups
}

pub fn machines_by_group(instances: &[InstanceInfo]) -> Vec<GroupMemberRow> {
    let groups = group_by_security_group(instances);
    info!(groups = groups.len(), "grouped instances by security group");

    groups
        .iter()
        .flat_map(|(sg, members)| {
            members.values().map(move |i| GroupMemberRow {
                sg: sg.clone(),
                instance_id: i.id.clone(),
                instance_type: i.service_type.clone(),
                instance_name: i.name.clone(),
            })
        })
        .collect()
}

/// Instances carrying a `Client` tag.
pub fn client_machines(instances: &[InstanceInfo]) -> Vec<ClientRow> {
    instances
        .iter()
        .filter_map(|i| {
            let client = i.client.as_ref()?;
            Some(ClientRow {
                instance_id: i.id.clone(),
                client: client.clone(),
                service_type: i.service_type.clone(),
            })
        })
        .collect()
}

/// Instances carrying both a `Client` and a `Type` tag.
pub fn client_service_machines(instances: &[InstanceInfo]) -> Vec<ClientServiceRow> {
    instances
        .iter()
        .filter_map(|i| match (&i.client, &i.service_type) {
            (Some(client), Some(service_type)) => Some(ClientServiceRow {
                instance_id: i.id.clone(),
                name: i.name.clone(),
                client: client.clone(),
                service_type: service_type.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// One row per (instance, interface), in fetch order.
pub fn interface_rows(instances: &[InstanceInfo]) -> Vec<InterfaceRow> {
    instances
        .iter()
        .flat_map(|i| {
            let tags = render_tags(&i.tags);
            i.interfaces.iter().map(move |nif| InterfaceRow {
                instance_id: i.id.clone(),
                state: i.state.clone(),
                nif_id: nif.id.clone(),
                ip: nif.private_ip.clone(),
                pub_ip: nif.public_ip.clone(),
                sgs: nif.group_names(),
                tags: tags.clone(),
                launch_time: i.launch_time,
            })
        })
        .collect()
}
