use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// EnergyPlus IDD/IDF tooling
#[derive(Parser)]
#[command(name = "idfkit")]
#[command(version, about = "EnergyPlus IDD and IDF tooling", long_about = None)]
pub struct CliCommand {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub options: GlobalOptions,
}

#[derive(Args)]
pub struct GlobalOptions {
    /// Directory holding cached schemas
    #[arg(long, global = true, env = "IDFKIT_CACHE_DIR", default_value = ".idfkit/cache")]
    pub cache_dir: PathBuf,

    /// Parse this IDD instead of using the cache
    #[arg(long, global = true, value_name = "IDD")]
    pub idd: Option<PathBuf>,

    /// Version to assume for files without a `Version` object
    #[arg(long, global = true, value_name = "VERSION")]
    pub default_version: Option<String>,

    /// Log parse milestones
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colors in the output
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an IDD and cache its schema
    Idd {
        /// Path to the Energy+.idd file
        #[arg(value_name = "IDD")]
        file: PathBuf,
    },
    /// Parse an IDF and summarize its objects and references
    Check {
        /// Path to the IDF
        #[arg(value_name = "IDF")]
        file: PathBuf,
    },
    /// Search the field values of an IDF
    Search {
        /// Path to the IDF
        #[arg(value_name = "IDF")]
        file: PathBuf,

        /// Text to look for; `*` and `?` are wildcards
        query: String,

        /// Match whole values only
        #[arg(long)]
        whole_field: bool,

        /// Skip surface and vertex classes
        #[arg(long)]
        ignore_geometry: bool,
    },
    /// Print the fields connected to one field
    Refs {
        /// Path to the IDF
        #[arg(value_name = "IDF")]
        file: PathBuf,

        /// Object class, in any case
        class: String,

        /// Row of the object within its class, from 0
        row: usize,

        /// Field position within the object, from 0
        field: usize,
    },
    /// Parse an IDF and write it back out
    Rewrite {
        /// Path to the IDF
        #[arg(value_name = "IDF")]
        file: PathBuf,

        /// Where to write; defaults to overwriting the input
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
