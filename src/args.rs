use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Track daily shipment volumes of logs, wood chips and firewood per client.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to a YAML config file
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to the interactive dashboard
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse, edit, import and export records interactively
    Dashboard(SessionArgs),

    /// Print the records, accumulated volume and client ranking of a period
    Report(ViewArgs),

    /// Write the records of a period to gv_volumes_<year>-<month>.csv
    ExportCsv(ExportArgs),

    /// Write the client ranking image of a period to gv_ranking_<year>-<month>.<ext>
    ExportRanking(ExportArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct SessionArgs {
    /// Start from an empty ledger instead of the built-in records
    #[clap(long)]
    pub no_seed: bool,

    /// CSV file to import when the session starts. Can be given multiple times.
    #[clap(long = "import", value_name = "FILE")]
    pub imports: Vec<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ViewArgs {
    #[clap(flatten)]
    pub session: SessionArgs,

    #[clap(long)]
    pub year: Option<i32>,

    /// 1 to 12
    #[clap(long)]
    pub month: Option<u32>,

    /// Toras, Cavaco, Lenha or Todos
    #[clap(long = "type", value_name = "TYPE")]
    pub product_type: Option<String>,

    /// Client name or Todos
    #[clap(long)]
    pub client: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[clap(flatten)]
    pub view: ViewArgs,

    /// Overrides export_dir from the config
    #[clap(short, long)]
    pub out_dir: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}
