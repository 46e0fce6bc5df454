pub mod init;
pub mod run;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cafe-etl",
    version,
    about = "Clean a raw cafe sales export into fact and dimension tables."
)]
pub struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline once (the default when no command is given).
    Run {
        /// Source CSV export (default: from settings)
        #[arg(long)]
        input: Option<String>,
        /// Directory receiving reject/, accepted/ and manifests/ (default: from settings)
        #[arg(long = "target-dir")]
        target_dir: Option<String>,
    },
    /// Save default input file and target directory.
    Init {
        /// Source CSV export
        #[arg(long)]
        input: Option<String>,
        /// Output directory
        #[arg(long = "target-dir")]
        target_dir: Option<String>,
    },
    /// Show the most recent run.
    Status {
        /// Output directory to inspect (default: from settings)
        #[arg(long = "target-dir")]
        target_dir: Option<String>,
    },
}
