use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the rs-restream tool.
///
/// This struct defines all available command-line options for the restream
/// uploader. Options are organized into destination settings, key generation
/// settings, and subcommands. Flags override both the config file and any
/// `RESTREAM_*` environment variables.
#[derive(Parser, Debug)]
#[clap(name = "rs-restream", about = "Restream remote sources into S3 multipart uploads")]
pub struct Args {
    /// Source URLs to fetch and upload
    pub sources: Vec<String>,

    /// S3 bucket name for uploading objects
    #[clap(short, long)]
    pub bucket: Option<String>,

    /// Key namespace (prefix) for generated destination keys
    #[clap(short, long)]
    pub namespace: Option<String>,

    /// AWS region for S3 uploads
    #[clap(long)]
    pub region: Option<String>,

    /// AWS profile to use for S3 uploads
    #[clap(long)]
    pub profile: Option<String>,

    /// Part size for multipart uploads (in MB, minimum 5)
    #[clap(long, help = "Part size for multipart uploads (in MB, minimum 5)")]
    pub part_size: Option<usize>,

    /// File extension for generated destination keys
    #[clap(long)]
    pub extension: Option<String>,

    /// Content type recorded on uploaded objects
    #[clap(long)]
    pub content_type: Option<String>,

    /// Path to configuration YAML file
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Skip printing the JSON report after the run
    #[clap(long)]
    pub skip_report: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the uploader.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default configuration file
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = "config.yaml")]
        path: PathBuf,
    },
}
