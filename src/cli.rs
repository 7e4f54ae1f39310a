use crate::diagnostics::Diagnostics;
use crate::inventory::files::InventoryRequest;
use crate::inventory::{load_inventory_source, InventorySource};
use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde_yaml::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// configuration file (YAML) with temp_dir and prefix settings
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an inventory file and print its path
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// file name pattern, the last '*' is replaced by a random string
        #[arg(short, long, value_name = "PATTERN")]
        dest: Option<String>,

        /// log the ansible-playbook invocation with this many -v flags
        #[arg(short, long, action = ArgAction::Count)]
        verbose: u8,
    },
    /// Print the inventory to stdout without creating a file
    Render {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List generated inventories
    List {
        /// file name prefix, defaults to the configured prefix
        #[arg(short, long)]
        prefix: Option<String>,
    },
    /// Remove an inventory file
    Remove { path: PathBuf },
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// inventory description (YAML or JSON) with hosts and groups
    #[arg(short, long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// host used when the source defines no hosts
    #[arg(long)]
    pub hostname: Option<String>,

    /// ansible_port of the fallback host
    #[arg(short, long)]
    pub port: Option<u16>,

    /// group of the fallback host, may be repeated
    #[arg(short, long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,
}

impl SourceArgs {
    /// Reads the source file (if any) and applies command line overrides.
    pub fn to_request(&self, dest_pattern: &str) -> Result<(InventoryRequest, Diagnostics)> {
        let mut source = match &self.source {
            Some(path) => {
                let file = std::fs::File::open(path)
                    .with_context(|| format!("Could not open inventory source {}", path.display()))?;
                load_inventory_source(file)
                    .with_context(|| format!("Could not read inventory source {}", path.display()))?
            }
            None => InventorySource::default(),
        };

        if let Some(hostname) = &self.hostname {
            source.hostname = Some(hostname.to_string());
        }

        if self.port.is_some() {
            source.port = self.port;
        }

        source
            .host_groups
            .extend(self.groups.iter().map(|g| Value::String(g.to_string())));

        Ok(source.into_request(dest_pattern))
    }
}
