//! CLI entry point for the dataset explorer

use clap::Parser;
use dataset_explorer::io::cli::{Cli, DatasetExplorer};

fn main() -> dataset_explorer::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    DatasetExplorer::new(cli).run()?;
    Ok(())
}
