use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = ec2tab_core::TOOL_NAME,
    version,
    about = "Flattened CSV-like reports of EC2 instances and security group rules"
)]
pub struct Args {
    #[command(subcommand)]
    pub report: ReportCommand,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    /// Read instances from a saved `aws ec2 describe-instances` JSON document
    #[arg(long, global = true)]
    pub instances_file: Option<PathBuf>,

    /// Read security groups from a saved `aws ec2 describe-security-groups` JSON document
    #[arg(long, global = true)]
    pub groups_file: Option<PathBuf>,

    /// AWS CLI profile used for live queries
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// AWS region used for live queries
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); logs go to stderr
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// One row per instance network interface
    Nifs,
    /// Instances grouped by attached security group
    BySg,
    /// Instances tagged with a client
    Clients,
    /// Instances tagged with both a client and a service type
    ClientServices,
    /// Security group rules with resolved group references
    Rules {
        /// Report outgoing rules instead of incoming ones
        #[arg(long)]
        egress: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    /// Snapshot files take precedence over querying the live account.
    pub fn uses_snapshots(&self) -> bool {
        self.instances_file.is_some() || self.groups_file.is_some()
    }
}
