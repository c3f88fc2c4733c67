use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::source::raw::{DescribeInstancesOutput, DescribeSecurityGroupsOutput};

/// The two enumeration calls the reports are built from.
///
/// Each call is a single blocking request; implementations do not paginate
/// or retry.
pub trait Ec2Source {
    fn describe_instances(&self) -> Result<DescribeInstancesOutput>;
    fn describe_security_groups(&self) -> Result<DescribeSecurityGroupsOutput>;
}

/// Replays previously captured `describe-*` JSON documents from disk.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    pub instances: Option<PathBuf>,
    pub security_groups: Option<PathBuf>,
}

impl SnapshotSource {
    pub fn new(instances: Option<PathBuf>, security_groups: Option<PathBuf>) -> Self {
        Self {
            instances,
            security_groups,
        }
    }
}

impl Ec2Source for SnapshotSource {
    fn describe_instances(&self) -> Result<DescribeInstancesOutput> {
        let path = self
            .instances
            .as_deref()
            .ok_or(InventoryError::MissingSnapshot { what: "instances" })?;
        read_snapshot(path, "instances snapshot")
    }

    fn describe_security_groups(&self) -> Result<DescribeSecurityGroupsOutput> {
        let path = self
            .security_groups
            .as_deref()
            .ok_or(InventoryError::MissingSnapshot {
                what: "security groups",
            })?;
        read_snapshot(path, "security groups snapshot")
    }
}

/// Read and decode one snapshot document.
///
/// The whole file is decoded at once; a missing required field anywhere
/// rejects the snapshot.
pub fn read_snapshot<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<T> {
    let bytes = fs::read(path).map_err(|source| InventoryError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read snapshot");

    serde_json::from_slice(&bytes).map_err(|source| InventoryError::Decode { what, source })
}

/// Queries the live account through the `aws` command line tool.
///
/// Credentials and endpoint resolution are left entirely to that tool.
#[derive(Debug, Clone)]
pub struct AwsCliSource {
    pub program: String,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl Default for AwsCliSource {
    fn default() -> Self {
        Self {
            program: "aws".to_string(),
            profile: None,
            region: None,
        }
    }
}

impl AwsCliSource {
    /// Arguments for a single `aws ec2 <operation>` call.
    pub fn args(&self, operation: &str) -> Vec<String> {
        let mut args = vec![
            "ec2".to_string(),
            operation.to_string(),
            "--output".to_string(),
            "json".to_string(),
        ];
        if let Some(profile) = &self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        if let Some(region) = &self.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }
        args
    }

    fn run<T: DeserializeOwned>(&self, operation: &str, what: &'static str) -> Result<T> {
        let args = self.args(operation);
        let command = format!("{} {}", self.program, args.join(" "));
        debug!(%command, "querying provider");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| InventoryError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(InventoryError::Command {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|source| InventoryError::Decode { what, source })
    }
}

impl Ec2Source for AwsCliSource {
    fn describe_instances(&self) -> Result<DescribeInstancesOutput> {
        self.run("describe-instances", "describe-instances output")
    }

    fn describe_security_groups(&self) -> Result<DescribeSecurityGroupsOutput> {
        self.run("describe-security-groups", "describe-security-groups output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_snapshot(data: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_instances_snapshot() {
        let file = temp_snapshot(
            r#"{"Reservations": [{"Instances": [
                {"InstanceId": "i-1", "InstanceType": "t3.micro", "State": {"Name": "running"}}
            ]}]}"#,
        );
        let source = SnapshotSource::new(Some(file.path().to_path_buf()), None);

        let out = source.describe_instances().expect("snapshot decodes");
        assert_eq!(out.reservations.len(), 1);
        assert_eq!(out.reservations[0].instances[0].instance_id, "i-1");
    }

    #[test]
    fn missing_snapshot_path_is_reported() {
        let source = SnapshotSource::default();

        let err = source.describe_security_groups().unwrap_err();
        assert!(matches!(err, InventoryError::MissingSnapshot { .. }));
    }

    #[test]
    fn unreadable_snapshot_returns_error() {
        let source = SnapshotSource::new(Some(PathBuf::from("does-not-exist.json")), None);

        let err = source.describe_instances().unwrap_err();
        assert!(matches!(err, InventoryError::Snapshot { .. }));
    }

    #[test]
    fn malformed_snapshot_is_a_decode_error() {
        let file = temp_snapshot(r#"{"SecurityGroups": [{"GroupName": "no-id"}]}"#);
        let source = SnapshotSource::new(None, Some(file.path().to_path_buf()));

        let err = source.describe_security_groups().unwrap_err();
        assert!(matches!(err, InventoryError::Decode { .. }));
    }

    #[test]
    fn cli_args_include_profile_and_region() {
        let source = AwsCliSource {
            profile: Some("ops".into()),
            region: Some("eu-west-1".into()),
            ..Default::default()
        };

        assert_eq!(
            source.args("describe-instances"),
            vec![
                "ec2",
                "describe-instances",
                "--output",
                "json",
                "--profile",
                "ops",
                "--region",
                "eu-west-1"
            ]
        );
    }

    #[test]
    fn cli_args_without_options() {
        let source = AwsCliSource::default();
        assert_eq!(
            source.args("describe-security-groups"),
            vec!["ec2", "describe-security-groups", "--output", "json"]
        );
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let source = AwsCliSource {
            program: "ec2tab-no-such-program".into(),
            ..Default::default()
        };

        let err = source.describe_instances().unwrap_err();
        assert!(matches!(err, InventoryError::Spawn { .. }));
    }
}
