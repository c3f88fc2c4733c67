use tracing::debug;

use crate::error::Result;
use crate::inventory::model::InstanceInfo;
use crate::source::Ec2Source;
use crate::source::raw::DescribeInstancesOutput;

/// Fetch every instance visible to `source`, in provider order.
///
/// One `describe_instances` call; a failed call or a record missing a
/// required field aborts the whole fetch.
pub fn fetch_all(source: &dyn Ec2Source) -> Result<Vec<InstanceInfo>> {
    let output = source.describe_instances()?;
    Ok(from_output(output))
}

/// Flatten reservations into one `InstanceInfo` per raw instance.
pub fn from_output(output: DescribeInstancesOutput) -> Vec<InstanceInfo> {
    let reservations = output.reservations.len();
    let instances: Vec<InstanceInfo> = output
        .reservations
        .into_iter()
        .flat_map(|r| r.instances)
        .map(InstanceInfo::from)
        .collect();

    debug!(reservations, instances = instances.len(), "decoded instances");
    instances
}
