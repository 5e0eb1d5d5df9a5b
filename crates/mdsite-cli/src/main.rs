//! mdsite CLI - Convert markdown to HTML and build static sites
//!
//! Usage:
//!   mdsite [OPTIONS] <COMMAND>
//!
//! Commands:
//!   convert   Convert a markdown file to an HTML fragment
//!   title     Print the `# ` title of a markdown file
//!   tree      Print the node tree of a markdown file as JSON
//!   render    Render a JSON node tree to HTML
//!   build     Generate a site from content, static and template paths

mod config;
mod error;
mod site;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite_core::{extract_title, markdown_to_html, parse_document, Node};

use config::{Config, PathOverrides};
use error::CliError;

/// mdsite - markdown to HTML converter and static site generator.
#[derive(Parser)]
#[command(name = "mdsite", version, about)]
struct Cli {
    /// Log progress at info level (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a markdown file to an HTML fragment.
    Convert {
        /// Markdown file to read.
        file: PathBuf,
        /// Write HTML here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the `# ` title of a markdown file.
    Title {
        file: PathBuf,
    },
    /// Print the node tree of a markdown file as JSON.
    Tree {
        file: PathBuf,
    },
    /// Render a JSON node tree to HTML.
    Render {
        /// JSON file holding a single node object.
        file: PathBuf,
    },
    /// Generate a site from content, static and template paths.
    Build(BuildArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Config file (defaults to ./mdsite.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory of markdown sources.
    #[arg(long)]
    content: Option<PathBuf>,
    /// Directory copied verbatim into the output.
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,
    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders.
    #[arg(long)]
    template: Option<PathBuf>,
    /// Output directory.
    #[arg(long)]
    public: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Convert { file, output } => cmd_convert(&file, output.as_deref()),
        Command::Title { file } => cmd_title(&file),
        Command::Tree { file } => cmd_tree(&file),
        Command::Render { file } => cmd_render(&file),
        Command::Build(args) => cmd_build(args),
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

// =============================================================================
// Single Document Commands
// =============================================================================

fn cmd_convert(file: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let html = markdown_to_html(&read_input(file)?)?;

    match output {
        Some(path) => fs::write(path, html).map_err(|e| CliError::io(path, e)),
        None => {
            println!("{html}");
            Ok(())
        }
    }
}

fn cmd_title(file: &Path) -> Result<(), CliError> {
    let input = read_input(file)?;
    println!("{}", extract_title(&input)?);
    Ok(())
}

fn cmd_tree(file: &Path) -> Result<(), CliError> {
    let node = parse_document(&read_input(file)?)?;
    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}

fn cmd_render(file: &Path) -> Result<(), CliError> {
    let value: serde_json::Value = serde_json::from_str(&read_input(file)?)?;
    let node = Node::from_value(&value)?;
    println!("{}", node.render()?);
    Ok(())
}

// =============================================================================
// Build Command
// =============================================================================

fn cmd_build(args: BuildArgs) -> Result<(), CliError> {
    let config = Config::load(args.config.as_deref())?.with_overrides(PathOverrides {
        content: args.content,
        static_dir: args.static_dir,
        template: args.template,
        public: args.public,
    });

    let summary = site::build(&config.paths)?;
    tracing::info!(
        pages = summary.pages,
        assets = summary.assets,
        "site written to {}",
        config.paths.public.display()
    );
    Ok(())
}
