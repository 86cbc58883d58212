use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use technitium_reconcile::{
    Diagnostics, Resource, Session, Updatable,
    config::SessionConfig,
    identity,
    model::{DesiredRecord, DesiredZone, ObservedRecord, ObservedZone, ZoneKind},
};
use tracing::error;

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// Technitium API URL (falls back to TECHNITIUM_HOST)
    #[arg(long, value_name = "URL", global = true)]
    host: Option<String>,
    /// Technitium API token (falls back to TECHNITIUM_TOKEN)
    #[arg(long, value_name = "TOKEN", global = true)]
    token: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30, global = true)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every zone hosted on the server
    Zones,
    /// Create or delete a zone
    #[command(subcommand)]
    Zone(ZoneCommand),
    /// Create, update or delete a record
    #[command(subcommand)]
    Record(RecordCommand),
}

#[derive(Subcommand, Debug)]
enum ZoneCommand {
    Create {
        #[arg(long)]
        name: String,
        /// Primary, Secondary, Stub, Forwarder, ...
        #[arg(long, default_value = "Primary")]
        kind: ZoneKind,
    },
    Delete {
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum RecordCommand {
    Create(RecordArgs),
    Update {
        #[command(flatten)]
        record: RecordArgs,
        /// Domain the record currently has
        #[arg(long, value_name = "DOMAIN")]
        from_domain: String,
        /// Address the record currently has
        #[arg(long, value_name = "IP")]
        from_ip: String,
    },
    Delete {
        #[arg(long)]
        zone: String,
        #[arg(long)]
        domain: String,
        #[arg(long = "type", value_name = "TYPE")]
        record_type: String,
        #[arg(long, value_name = "IP")]
        ip_address: String,
    },
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[arg(long)]
    zone: String,
    #[arg(long)]
    domain: String,
    #[arg(long = "type", value_name = "TYPE", default_value = "A")]
    record_type: String,
    #[arg(long, value_name = "IP")]
    ip_address: String,
    #[arg(long)]
    ttl: Option<u32>,
    #[arg(long)]
    ptr: Option<bool>,
    #[arg(long)]
    create_ptr_zone: Option<bool>,
}

impl From<RecordArgs> for DesiredRecord {
    fn from(args: RecordArgs) -> Self {
        DesiredRecord {
            zone: args.zone,
            domain: args.domain,
            record_type: args.record_type,
            ip_address: args.ip_address,
            ttl: args.ttl,
            ptr: args.ptr,
            create_ptr_zone: args.create_ptr_zone,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = SessionConfig::resolve(cli.host.clone(), cli.token.clone())
        .map_err(report)?
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let session = Session::connect(&config).map_err(report)?;

    match cli.command {
        Command::Zones => print(&session.inventory.list().await.map_err(report)?),
        Command::Zone(ZoneCommand::Create { name, kind }) => {
            let observed = session
                .zones
                .create(&DesiredZone { name, kind })
                .await
                .map_err(report)?;
            print(&observed)
        }
        Command::Zone(ZoneCommand::Delete { name }) => {
            let observed = ObservedZone {
                identity: identity::derive(&name),
                name,
                kind: ZoneKind::Primary,
                status: None,
                dnssec_status: None,
                serial: None,
                expiry: None,
                last_modified: String::new(),
            };
            session.zones.delete(&observed).await.map_err(report)
        }
        Command::Record(RecordCommand::Create(args)) => {
            let observed = session
                .records
                .create(&DesiredRecord::from(args))
                .await
                .map_err(report)?;
            print(&observed)
        }
        Command::Record(RecordCommand::Update {
            record,
            from_domain,
            from_ip,
        }) => {
            let desired = DesiredRecord::from(record);
            let prior = DesiredRecord {
                domain: from_domain,
                ip_address: from_ip,
                ..desired.clone()
            };
            let prior = ObservedRecord {
                identity: identity::derive(&prior.fqdn()),
                record: prior,
                last_updated: String::new(),
            };
            let observed = session
                .records
                .update(&desired, &prior)
                .await
                .map_err(report)?;
            print(&observed)
        }
        Command::Record(RecordCommand::Delete {
            zone,
            domain,
            record_type,
            ip_address,
        }) => {
            let record = DesiredRecord {
                zone,
                domain,
                record_type,
                ip_address,
                ttl: None,
                ptr: None,
                create_ptr_zone: None,
            };
            let observed = ObservedRecord {
                identity: identity::derive(&record.fqdn()),
                record,
                last_updated: String::new(),
            };
            session.records.delete(&observed).await.map_err(report)
        }
    }
}

fn report(diags: Diagnostics) -> anyhow::Error {
    for diag in &diags {
        error!(summary = %diag.summary, "{}", diag.detail);
    }
    match diags.len() {
        1 => anyhow::anyhow!("{diags}"),
        n => anyhow::anyhow!("{n} errors: {diags}"),
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
