use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::error::DocToolError;
use crate::{diagnostic_line, ExtractOptions, RenderOptions, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "doc-tools")]
#[command(about = "Helpers for the documentation build")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Check that a config edit does not change its meaning
    doc-tools render-conf > conf.before.yaml
    # (edit conf.yaml)
    doc-tools render-conf > conf.after.yaml
    diff conf.before.yaml conf.after.yaml

    # Print the region between `tag::init` and `end::init`
    doc-tools extract-tagged src/Client.java init

    # Same, turning `// <1>` comments into bare callouts
    doc-tools extract-tagged src/Client.java init --callouts

The standalone `render-conf` and `extract-tagged` binaries take the same
arguments as the subcommands.
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a YAML config and print a canonical, alias-free rendering
    RenderConf(RenderConfArgs),

    /// Print the tagged region of a file with its indentation removed
    ExtractTagged(ExtractTaggedArgs),
}

#[derive(Args, Debug)]
pub struct RenderConfArgs {
    /// Path to the YAML config
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    pub path: PathBuf,

    /// Sort mapping keys instead of keeping document order
    #[arg(long)]
    pub sort_keys: bool,

    /// Keep `<<` merge keys as written instead of resolving them
    #[arg(long)]
    pub no_merge: bool,
}

#[derive(Args, Debug)]
pub struct ExtractTaggedArgs {
    /// Source file to scan
    pub file: PathBuf,

    /// Tag name (matches `tag::<TAG>` and `end::<TAG>`)
    pub tag: String,

    /// Rewrite `// <N>` comment callouts to `<N>`
    #[arg(long)]
    pub callouts: bool,
}

/// Standalone `render-conf` binary
#[derive(Parser)]
#[command(name = "render-conf")]
#[command(about = "Load a YAML config and print a canonical, alias-free rendering")]
#[command(version)]
pub struct RenderConfCli {
    #[command(flatten)]
    pub args: RenderConfArgs,
}

/// Standalone `extract-tagged` binary
#[derive(Parser)]
#[command(name = "extract-tagged")]
#[command(about = "Print the tagged region of a file with its indentation removed")]
#[command(version)]
pub struct ExtractTaggedCli {
    #[command(flatten)]
    pub args: ExtractTaggedArgs,
}

pub fn render_conf(path: &Path, sort_keys: bool, no_merge: bool) -> anyhow::Result<()> {
    let options = RenderOptions {
        merge_keys: !no_merge,
        sort_keys,
    };
    let rendered = crate::render_file(path, &options)
        .with_context(|| format!("Failed to render {}", path.display()))?;

    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .map_err(DocToolError::Output)?;
    Ok(())
}

pub fn extract_tagged(file: &Path, tag: &str, callouts: bool) -> Result<(), DocToolError> {
    let options = ExtractOptions {
        rewrite_callouts: callouts,
    };
    let region = crate::extract_with(file, tag, &options)?;

    io::stdout()
        .lock()
        .write_all(region.text.as_bytes())
        .map_err(DocToolError::Output)
}

pub fn run_render_conf(args: &RenderConfArgs) -> anyhow::Result<()> {
    render_conf(&args.path, args.sort_keys, args.no_merge)
}

/// Run the extractor, reporting failure as a single asciidoc diagnostic line.
pub fn run_extract_tagged(args: &ExtractTaggedArgs) -> ExitCode {
    match extract_tagged(&args.file, &args.tag, args.callouts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", diagnostic_line(&args.file, &args.tag, &e));
            ExitCode::from(1)
        }
    }
}
