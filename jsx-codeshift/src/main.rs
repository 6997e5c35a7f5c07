use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use jsx_codeshift::{driver, init_tracing, migrate, TransformConfig};

#[derive(Parser, Debug)]
#[command(
    name = "decaf-transform",
    version,
    about = "Migrate React.DOM factory calls to JSX",
    long_about = "Runs the migration steps over a file or directory. With no step flag, \
                  references are patched (-r) and the codeshifts run (-t)."
)]
struct CliArgs {
    /// Remove hard-coded `.coffee` references from .coffee and .md files
    #[arg(short = 'r', long = "replace")]
    replace: bool,

    /// Delete the .coffee files
    #[arg(short = 'm', long = "remove-coffee-files")]
    remove_coffee_files: bool,

    /// Rewrite legacy factory calls in .js files to JSX
    #[arg(short = 't', long = "transform")]
    transform: bool,

    /// File or directory to migrate, relative to the current directory
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Only look at files directly inside --path
    #[arg(long)]
    skip_subdirectories: bool,

    /// JSON file overriding the names the codeshifts look for
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl CliArgs {
    fn customized(&self) -> bool {
        self.replace || self.remove_coffee_files || self.transform
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => TransformConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TransformConfig::default(),
    };

    let root = &args.path;
    let files = migrate::discover_files(root, args.skip_subdirectories)
        .with_context(|| format!("failed to list {}", root.display()))?;

    if args.replace || !args.customized() {
        migrate::patch_files(&files)?;
    }
    if args.remove_coffee_files {
        migrate::remove_coffee_files(&files)?;
    }

    if args.transform || !args.customized() {
        // Earlier steps may have added or removed files.
        let js_files: Vec<PathBuf> = migrate::discover_files(root, args.skip_subdirectories)?
            .into_iter()
            .filter(|p| migrate::is_js_file(p))
            .collect();
        let outcomes = driver::transform_files(&js_files, &config);
        let summary = driver::Summary::of(&outcomes);
        if summary.failed > 0 {
            bail!("{} of {} files failed to transform", summary.failed, outcomes.len());
        }
    }

    info!("done");
    Ok(())
}
