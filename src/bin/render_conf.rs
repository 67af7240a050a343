use clap::Parser;

use doc_tools::cli::{self, RenderConfCli};

fn main() -> anyhow::Result<()> {
    cli::init_tracing();

    let cli = RenderConfCli::parse();
    cli::run_render_conf(&cli.args)
}
