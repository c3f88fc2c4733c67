use chrono::{DateTime, Utc};

use crate::source::raw::{RawGroupIdentifier, RawInstance, RawNetworkInterface};
use crate::util::tags::{Tags, parse_tags};

pub const CLIENT_TAG: &str = "Client";
pub const NAME_TAG: &str = "Name";
pub const DEPLOYER_TAG: &str = "User";
pub const SERVICE_TYPE_TAG: &str = "Type";

/// One virtual machine, with the business attributes recovered from its tags.
///
/// Built once from a raw record and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct InstanceInfo {
    pub id: String,
    pub machine_type: String,
    pub tags: Tags,
    pub client: Option<String>,
    pub name: Option<String>,
    pub deployer: Option<String>,
    pub service_type: Option<String>,
    pub state: String,
    pub launch_time: Option<DateTime<Utc>>,
    pub interfaces: Vec<NetworkInterface>,
}

impl From<RawInstance> for InstanceInfo {
    fn from(raw: RawInstance) -> Self {
        let tags = parse_tags(&raw.tags);
        let tag = |key: &str| tags.get(key).cloned();

        Self {
            client: tag(CLIENT_TAG),
            name: tag(NAME_TAG),
            deployer: tag(DEPLOYER_TAG),
            service_type: tag(SERVICE_TYPE_TAG),
            id: raw.instance_id,
            machine_type: raw.instance_type,
            state: raw.state.name,
            launch_time: raw.launch_time,
            interfaces: raw
                .network_interfaces
                .into_iter()
                .map(NetworkInterface::from)
                .collect(),
            tags,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NetworkInterface {
    pub id: String,
    pub private_ip: String,
    /// Present only when the interface has a public association.
    pub public_ip: Option<String>,
    pub subnet_id: String,
    pub vpc_id: String,
    pub security_groups: Vec<AttachedGroup>,
}

impl From<RawNetworkInterface> for NetworkInterface {
    fn from(raw: RawNetworkInterface) -> Self {
        Self {
            id: raw.network_interface_id,
            private_ip: raw.private_ip_address,
            public_ip: raw.association.and_then(|a| a.public_ip),
            subnet_id: raw.subnet_id,
            vpc_id: raw.vpc_id,
            security_groups: raw
                .groups
                .into_iter()
                .map(AttachedGroup::from)
                .collect(),
        }
    }
}

impl NetworkInterface {
    /// Space-joined display names of the attached groups, in attachment order.
    pub fn group_names(&self) -> String {
        self.security_groups
            .iter()
            .map(AttachedGroup::display_name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Security group stub as attached to an interface (not the full group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedGroup {
    pub id: String,
    pub name: Option<String>,
}

impl AttachedGroup {
    /// Name when known, otherwise the raw id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl From<RawGroupIdentifier> for AttachedGroup {
    fn from(raw: RawGroupIdentifier) -> Self {
        Self {
            id: raw.group_id,
            name: raw.group_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::raw::{RawAssociation, RawInstanceState, RawTag};

    fn tag(k: &str, v: &str) -> RawTag {
        RawTag {
            key: k.into(),
            value: v.into(),
        }
    }

    fn raw_nif(public_ip: Option<&str>) -> RawNetworkInterface {
        RawNetworkInterface {
            network_interface_id: "eni-1".into(),
            private_ip_address: "10.0.0.5".into(),
            association: public_ip.map(|ip| RawAssociation {
                public_ip: Some(ip.into()),
            }),
            subnet_id: "subnet-1".into(),
            vpc_id: "vpc-1".into(),
            groups: vec![
                RawGroupIdentifier {
                    group_id: "sg-1".into(),
                    group_name: Some("web".into()),
                },
                RawGroupIdentifier {
                    group_id: "sg-2".into(),
                    group_name: None,
                },
            ],
        }
    }

    #[test]
    fn derives_attributes_from_well_known_tags() {
        let raw = RawInstance {
            instance_id: "i-1".into(),
            instance_type: "m5.large".into(),
            state: RawInstanceState {
                name: "running".into(),
            },
            launch_time: None,
            tags: vec![
                tag("Client", "acme"),
                tag("Name", "web-1"),
                tag("User", "alice"),
                tag("Type", "frontend"),
                tag("Env", "prod"),
            ],
            network_interfaces: vec![raw_nif(None)],
        };

        let info = InstanceInfo::from(raw);

        assert_eq!(info.id, "i-1");
        assert_eq!(info.machine_type, "m5.large");
        assert_eq!(info.state, "running");
        assert_eq!(info.client.as_deref(), Some("acme"));
        assert_eq!(info.name.as_deref(), Some("web-1"));
        assert_eq!(info.deployer.as_deref(), Some("alice"));
        assert_eq!(info.service_type.as_deref(), Some("frontend"));
        assert_eq!(info.tags.len(), 5);
        assert_eq!(info.interfaces.len(), 1);
    }

    #[test]
    fn absent_tags_are_none() {
        let raw = RawInstance {
            instance_id: "i-2".into(),
            instance_type: "t3.nano".into(),
            state: RawInstanceState {
                name: "stopped".into(),
            },
            launch_time: None,
            tags: vec![],
            network_interfaces: vec![],
        };

        let info = InstanceInfo::from(raw);

        assert!(info.client.is_none());
        assert!(info.name.is_none());
        assert!(info.deployer.is_none());
        assert!(info.service_type.is_none());
        assert!(info.interfaces.is_empty());
    }

    #[test]
    fn public_ip_only_with_association() {
        assert!(NetworkInterface::from(raw_nif(None)).public_ip.is_none());
        assert_eq!(
            NetworkInterface::from(raw_nif(Some("3.3.3.3"))).public_ip.as_deref(),
            Some("3.3.3.3")
        );
    }

    #[test]
    fn group_names_fall_back_to_id() {
        let nif = NetworkInterface::from(raw_nif(None));
        assert_eq!(nif.group_names(), "web sg-2");
    }
}
