//! Command-line front ends shared by the `doc-tools`, `render-conf` and
//! `extract-tagged` binaries.

mod commands;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use commands::{
    extract_tagged, render_conf, run_extract_tagged, run_render_conf, Cli, Commands,
    ExtractTaggedArgs, ExtractTaggedCli, RenderConfArgs, RenderConfCli,
};

pub fn init_tracing() {
    // stdout carries the rendered output, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_tools=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
