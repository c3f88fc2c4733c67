//! Flattened, CSV-like reports over a cloud account's compute inventory:
//! instances, their network interfaces, and the rules of the security groups
//! that govern them.

pub mod error;
pub mod firewall;
pub mod inventory;
pub mod report;
pub mod source;
pub mod util;

pub use error::{InventoryError, Result, RuleError};

pub const TOOL_NAME: &str = "ec2tab";
