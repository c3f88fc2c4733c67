use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching or decoding inventory.
///
/// Every variant aborts the report being built; there is no partial result.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no {what} snapshot file was given")]
    MissingSnapshot { what: &'static str },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid rule in security group {group_id}: {source}")]
    Rule {
        group_id: String,
        #[source]
        source: RuleError,
    },
}

/// Violations of the one-target-per-rule invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule has neither a CIDR nor a group reference")]
    MissingTarget,

    #[error("rule cannot target both CIDR {cidr} and group {group_id}")]
    ConflictingTargets { cidr: String, group_id: String },
}

pub type Result<T, E = InventoryError> = std::result::Result<T, E>;
