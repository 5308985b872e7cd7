//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Larder - Chef environment resolution and cookbook dependency checks.
#[derive(Debug, Parser)]
#[command(name = "larder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides .larder.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the effective environment after merging all parents
    Resolve(ResolveArgs),

    /// List the cookbooks pinned by the effective environment
    Cookbooks(CookbooksArgs),

    /// Check installed cookbooks against each other's dependencies
    Verify(VerifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by commands that resolve an environment file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvironmentArgs {
    /// Environment file (JSON or YAML)
    #[arg(value_name = "ENV_FILE")]
    pub env_file: PathBuf,

    /// Maximum number of parent hops
    #[arg(long, env = "LARDER_MAX_DEPTH", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Directory relative parent references are resolved against
    #[arg(long, env = "LARDER_PARENT_ENV_DIR", value_name = "DIR")]
    pub parent_env_dir: Option<PathBuf>,
}

/// Output format for a resolved environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub environment: EnvironmentArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = RenderFormat::Json)]
    pub format: RenderFormat,
}

/// Arguments for the `cookbooks` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CookbooksArgs {
    #[command(flatten)]
    pub environment: EnvironmentArgs,
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Directory holding one sub-directory per installed cookbook
    #[arg(value_name = "COOKBOOKS_DIR")]
    pub cookbooks_dir: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
