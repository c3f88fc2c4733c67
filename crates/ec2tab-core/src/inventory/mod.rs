//! Instance inventory: decoding instances and the reports built over them.

pub mod build;
pub mod model;
pub mod reports;

pub use build::{fetch_all, from_output};
pub use model::{AttachedGroup, InstanceInfo, NetworkInterface};
