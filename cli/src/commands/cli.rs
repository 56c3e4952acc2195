use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tmstore_core::api::ProviderKind;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tmstore", version, about = "Load, edit and save threat models")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file. Defaults to ~/.tmstore/config.toml, then ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage provider for this run (local, desktop, remote).
    #[arg(long, global = true)]
    pub provider: Option<ProviderKind>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ShowArgs {
    /// Model name (title, path or repository model name, per provider).
    pub name: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CreateArgs {
    /// JSON document to store as a new model.
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SaveArgs {
    /// JSON document to store.
    #[arg(long)]
    pub file: PathBuf,

    /// File name reported with the save. Desktop sessions write to it;
    /// defaults to `--file`.
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ContributorsArgs {
    pub name: String,

    /// Replace the contributor list and save.
    #[arg(long, num_args = 1..)]
    pub set: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CheckVersionArgs {
    pub name: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the models visible to the provider.
    List(ListArgs),
    /// Print a model as JSON.
    Show(ShowArgs),
    Create(CreateArgs),
    Save(SaveArgs),
    /// Print, or replace, a model's contributors.
    Contributors(ContributorsArgs),
    /// Report whether a model predates the 2.x format.
    CheckVersion(CheckVersionArgs),
    /// Read JSON commands from stdin, one per line, and answer on stdout.
    Session,
}
