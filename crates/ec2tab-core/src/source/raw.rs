//! Raw provider records, decoded once at the fetch boundary.
//!
//! Field names mirror the JSON emitted by `aws ec2 describe-instances` and
//! `aws ec2 describe-security-groups`. Required fields are plain values so a
//! missing one fails the whole decode; everything the provider may omit is an
//! `Option` or a defaulted list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key/value label as listed by the provider. Keys are not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeInstancesOutput {
    #[serde(default)]
    pub reservations: Vec<RawReservation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawReservation {
    #[serde(default)]
    pub instances: Vec<RawInstance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawInstance {
    pub instance_id: String,
    pub instance_type: String,
    pub state: RawInstanceState,
    #[serde(default)]
    pub launch_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
    #[serde(default)]
    pub network_interfaces: Vec<RawNetworkInterface>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawInstanceState {
    /// e.g. "pending", "running", "stopped", "terminated".
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawNetworkInterface {
    pub network_interface_id: String,
    pub private_ip_address: String,
    #[serde(default)]
    pub association: Option<RawAssociation>,
    pub subnet_id: String,
    pub vpc_id: String,
    #[serde(default)]
    pub groups: Vec<RawGroupIdentifier>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawAssociation {
    #[serde(default)]
    pub public_ip: Option<String>,
}

/// Group stub attached to a network interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawGroupIdentifier {
    pub group_id: String,
    #[serde(default)]
    pub group_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSecurityGroupsOutput {
    #[serde(default)]
    pub security_groups: Vec<RawSecurityGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSecurityGroup {
    pub group_id: String,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
    #[serde(default)]
    pub ip_permissions: Vec<RawIpPermission>,
    #[serde(default)]
    pub ip_permissions_egress: Vec<RawIpPermission>,
}

/// One permission entry: a shared port range and protocol fanned out over
/// any number of targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawIpPermission {
    #[serde(default)]
    pub from_port: Option<i32>,
    #[serde(default)]
    pub to_port: Option<i32>,
    /// "tcp", "udp", "icmp", a protocol number, or "-1" for all.
    #[serde(default)]
    pub ip_protocol: Option<String>,
    #[serde(default)]
    pub ip_ranges: Vec<RawIpRange>,
    #[serde(default)]
    pub ipv6_ranges: Vec<RawIpv6Range>,
    #[serde(default)]
    pub prefix_list_ids: Vec<RawPrefixListId>,
    #[serde(default)]
    pub user_id_group_pairs: Vec<RawUserIdGroupPair>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawIpRange {
    #[serde(default)]
    pub cidr_ip: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawIpv6Range {
    #[serde(default)]
    pub cidr_ipv6: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPrefixListId {
    #[serde(default)]
    pub prefix_list_id: Option<String>,
}

/// Reference to another group from inside a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawUserIdGroupPair {
    pub group_id: String,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub vpc_id: Option<String>,
    #[serde(default)]
    pub vpc_peering_connection_id: Option<String>,
}
