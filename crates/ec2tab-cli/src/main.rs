use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ec2tab_core::firewall::{self, reports::Direction};
use ec2tab_core::inventory::{self, reports};
use ec2tab_core::report::{model::Row, render};
use ec2tab_core::source::{AwsCliSource, Ec2Source, SnapshotSource};

mod args;

use args::{Args, OutputFormat, ReportCommand};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = build_source(&args);
    let output = run(&args, source.as_ref())?;

    match &args.out {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("failed to write report: {}", path.display()))?,
        None => print!("{output}"),
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_source(args: &Args) -> Box<dyn Ec2Source> {
    if args.uses_snapshots() {
        info!("reading inventory from snapshot files");
        Box::new(SnapshotSource::new(
            args.instances_file.clone(),
            args.groups_file.clone(),
        ))
    } else {
        info!("querying inventory through the aws cli");
        Box::new(AwsCliSource {
            profile: args.profile.clone(),
            region: args.region.clone(),
            ..Default::default()
        })
    }
}

fn run(args: &Args, source: &dyn Ec2Source) -> Result<String> {
    match &args.report {
        ReportCommand::Nifs => {
            let instances = inventory::fetch_all(source).context("failed to fetch instances")?;
            format_rows(&reports::interface_rows(&instances), args.format)
        }
        ReportCommand::BySg => {
            let instances = inventory::fetch_all(source).context("failed to fetch instances")?;
            format_rows(&reports::machines_by_group(&instances), args.format)
        }
        ReportCommand::Clients => {
            let instances = inventory::fetch_all(source).context("failed to fetch instances")?;
            format_rows(&reports::client_machines(&instances), args.format)
        }
        ReportCommand::ClientServices => {
            let instances = inventory::fetch_all(source).context("failed to fetch instances")?;
            format_rows(&reports::client_service_machines(&instances), args.format)
        }
        ReportCommand::Rules { egress } => {
            let groups = firewall::fetch_all(source).context("failed to fetch security groups")?;
            let direction = if *egress {
                Direction::Outgoing
            } else {
                Direction::Incoming
            };
            format_rows(&firewall::reports::rule_rows(&groups, direction), args.format)
        }
    }
}

fn format_rows<R: Row>(rows: &[R], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render::render_text(rows),
        OutputFormat::Json => render::render_json(rows)?,
    })
}
