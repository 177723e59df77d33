//! CLI entry point for Markov chain image forgetting

use blockforget::io::cli::{Cli, FileProcessor};
use clap::Parser;

fn main() -> blockforget::Result<()> {
    let cli = Cli::parse();
    let processor = FileProcessor::new(cli);
    processor.process()
}
