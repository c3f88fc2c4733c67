use chrono::{DateTime, Utc};
use serde::Serialize;

/// A report row with a fixed, ordered column set.
///
/// `fields` must return exactly one value per `HEADER` column, already
/// formatted for the text table (absent values as empty strings).
pub trait Row: Serialize {
    const HEADER: &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// One (instance, network interface) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRow {
    pub instance_id: String,
    pub state: String,
    pub nif_id: String,
    pub ip: String,
    pub pub_ip: Option<String>,
    /// Space-joined group display names.
    pub sgs: String,
    /// Whole tag mapping as one opaque string.
    pub tags: String,
    /// JSON only; the text table keeps its fixed columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_time: Option<DateTime<Utc>>,
}

impl Row for InterfaceRow {
    const HEADER: &'static [&'static str] =
        &["instance_id", "state", "nif_id", "ip", "pub_ip", "sgs", "tags"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.instance_id.clone(),
            self.state.clone(),
            self.nif_id.clone(),
            self.ip.clone(),
            or_empty(&self.pub_ip),
            self.sgs.clone(),
            format!("\"{}\"", self.tags),
        ]
    }
}

/// One (security group, member instance) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMemberRow {
    pub sg: String,
    pub instance_id: String,
    /// Service type from the `Type` tag, not the machine type.
    pub instance_type: Option<String>,
    pub instance_name: Option<String>,
}

impl Row for GroupMemberRow {
    const HEADER: &'static [&'static str] =
        &["sg", "instance_id", "instance_type", "instance_name"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.sg.clone(),
            self.instance_id.clone(),
            or_empty(&self.instance_type),
            or_empty(&self.instance_name),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRow {
    pub instance_id: String,
    pub client: String,
    pub service_type: Option<String>,
}

impl Row for ClientRow {
    const HEADER: &'static [&'static str] = &["instance_id", "client", "service_type"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.instance_id.clone(),
            self.client.clone(),
            or_empty(&self.service_type),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientServiceRow {
    pub instance_id: String,
    pub name: Option<String>,
    pub client: String,
    pub service_type: String,
}

impl Row for ClientServiceRow {
    const HEADER: &'static [&'static str] = &["instance_id", "name", "client", "service_type"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.instance_id.clone(),
            or_empty(&self.name),
            self.client.clone(),
            self.service_type.clone(),
        ]
    }
}

/// One firewall rule of one security group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRow {
    /// CIDR, or the referenced group's name (raw id when unresolved).
    pub target: String,
    pub group: String,
    pub protocol: String,
    pub ports: String,
}

impl Row for RuleRow {
    const HEADER: &'static [&'static str] = &["target", "group", "protocol", "ports"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.target.clone(),
            self.group.clone(),
            self.protocol.clone(),
            self.ports.clone(),
        ]
    }
}
