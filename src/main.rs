//! treesum - concurrent directory size reporter.
//!
//! Usage:
//!   treesum [PATH]           Print the size tree for PATH (default `.`)
//!   treesum --json [PATH]    Emit the tree as JSON
//!   treesum -j 16 [PATH]     Bound concurrent filesystem operations
//!   treesum --help           Show help

use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};

use treesum_core::WalkConfig;
use treesum_walk::{TreeWalker, walk_sync};

#[derive(Parser)]
#[command(
    name = "treesum",
    version,
    about = "Concurrent directory size reporter",
    long_about = "treesum computes the recursive size of a directory tree and \
                  prints it as an indented tree, walking sibling \
                  subdirectories in parallel."
)]
struct Cli {
    /// Directory to walk (defaults to the current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Bound on concurrent filesystem operations (0 = unbounded)
    #[arg(short = 'j', long, default_value_t = 0)]
    jobs: usize,

    /// Use the single-threaded walker instead of the concurrent engine
    #[arg(long)]
    sequential: bool,

    /// Human-readable sizes
    #[arg(short = 'H', long)]
    human: bool,

    /// Emit the tree as JSON instead of rendered text
    #[arg(long)]
    json: bool,

    /// Suppress the summary footer
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // The path is passed through as given: canonicalizing would resolve a
    // symlink root, and the walk counts a symlink's own size.
    let config = WalkConfig::builder()
        .root(cli.path)
        .max_in_flight(match cli.jobs {
            0 => None,
            n => Some(n),
        })
        .build()
        .context("invalid configuration")?;

    let tree = if cli.sequential {
        walk_sync(&config.root).context("walk failed")?
    } else {
        TreeWalker::new()
            .walk(&config)
            .await
            .context("walk failed")?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else if cli.human {
        print!("{}", tree.render_human());
    } else {
        print!("{}", tree.render());
    }

    if !cli.quiet {
        let summary = tree.summarize();
        eprintln!(
            " {} files, {} directories, {} total",
            summary.total_files,
            summary.total_dirs,
            humansize::format_size(summary.total_size, humansize::BINARY)
        );
    }

    Ok(())
}
