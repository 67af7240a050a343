use std::process::ExitCode;

use clap::Parser;

use doc_tools::cli::{self, Cli, Commands};

fn main() -> anyhow::Result<ExitCode> {
    cli::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::RenderConf(args) => {
            cli::run_render_conf(&args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::ExtractTagged(args) => Ok(cli::run_extract_tagged(&args)),
    }
}
