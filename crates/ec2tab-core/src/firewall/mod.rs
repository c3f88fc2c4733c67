//! Security groups: rule decoding, reference resolution and the rule report.

pub mod build;
pub mod model;
pub mod parse;
pub mod reports;
pub mod resolve;

pub use build::{fetch_all, from_output};
pub use model::{GroupIndex, GroupRef, PortRange, Rule, RuleTarget, SecurityGroup};
pub use resolve::resolve_references;
