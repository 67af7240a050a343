use std::process::ExitCode;

use clap::Parser;

use doc_tools::cli::{self, ExtractTaggedCli};

fn main() -> ExitCode {
    cli::init_tracing();

    let cli = ExtractTaggedCli::parse();
    cli::run_extract_tagged(&cli.args)
}
