use std::path::PathBuf;

use clap::Parser;

/// Practice player for past listening exams, organized by year and session.
#[derive(Debug, Parser)]
#[command(name = "monlis", version, about)]
pub struct Cli {
    /// Catalog index file (`.json` / `.toml`) or a directory of audio files.
    ///
    /// Defaults to `library.catalog` from the config, then the current directory.
    pub catalog: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
