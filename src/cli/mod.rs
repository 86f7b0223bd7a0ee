//! CLI command definitions and handlers

pub mod lookup;
pub mod rebuild;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::service::IndexService;
use crate::tree::MemoryTree;

const LONG_ABOUT: &str = r#"
Builds a flat, addressable catalog of the control points in a station's
component tree, grouped by the device or folder they belong to.

Every command below reads a JSON dump of the tree, rebuilds the index
from it, and reports on the result.

EXAMPLES:
    station-index rebuild --tree station.json
    station-index sources --tree station.json --json
    station-index point --tree station.json --source 2f1a --addr ai.points.SupplyTemp
    station-index resolve pt:2f3c

LOGGING:
    STATION_INDEX_LOG=debug station-index rebuild --tree station.json
"#;

/// Point catalog for facility-automation stations
#[derive(Parser, Debug)]
#[command(name = "station-index")]
#[command(author, version)]
#[command(about = "Point catalog for facility-automation stations")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the index and print a summary
    #[command(visible_alias = "r")]
    Rebuild(TreeArgs),

    /// List indexed sources
    #[command(visible_alias = "ls")]
    Sources(TreeArgs),

    /// Show a single point by source id and address
    #[command(visible_alias = "p")]
    Point(PointArgs),

    /// Print the tree handle a point id maps back to
    Resolve(ResolveArgs),
}

/// Arguments shared by every command that reads a tree
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// JSON dump of the station tree
    #[arg(short, long)]
    pub tree: PathBuf,

    /// Config file (default: $STATION_INDEX_HOME/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    station-index point -t station.json -s 2f1a -a ai.points.SupplyTemp")]
pub struct PointArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Source id
    #[arg(short, long)]
    pub source: String,

    /// Point address within the source
    #[arg(short, long)]
    pub addr: String,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Point id, e.g. pt:2f3c
    pub id: String,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl TreeArgs {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    /// Load config and tree, and wrap them in a service
    pub fn open_service(&self) -> Result<IndexService> {
        let config = load_config(self.config.as_deref())?;
        let tree = MemoryTree::load(&self.tree)?;
        Ok(IndexService::new(config, Arc::new(tree)))
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load_from(p),
        None => Config::load(),
    }
}
