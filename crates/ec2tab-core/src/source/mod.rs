pub mod raw;
pub mod read;

pub use read::{AwsCliSource, Ec2Source, SnapshotSource};
