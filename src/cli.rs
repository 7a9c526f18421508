use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use folio_config::{Config, ConflictPolicy};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(version, about = "Turn a Goodreads library export into linked Markdown notes", long_about = None)]
#[command(after_help = "EXAMPLES:
    folio                                   Export ./goodreads_library_export.csv
    folio export -o ~/Vault/Books           Export into an existing vault
    folio export --dry-run -v               Show what would be written
    folio print authors                     Print author notes to stdout")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More logging; repeat for even more
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Defaults to `export`
    #[command(subcommand)]
    pub command: Option<Command>,
}
impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write one note per book and per author, and the list of book IDs
    Export(ExportArgs),
    /// Print the rendered notes instead of writing them
    Print(PrintArgs),
}

#[derive(Debug, Default, Args)]
pub struct ExportArgs {
    /// Goodreads library export (CSV)
    #[arg(short, long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Directory the notes are written to
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// File the exported book IDs are written to
    #[arg(long, value_name = "FILE")]
    pub ids: Option<PathBuf>,

    /// Log every write without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// When two notes share a path, keep the last one instead of failing
    #[arg(long)]
    pub overwrite_conflicts: bool,
}
impl ExportArgs {
    /// Flags win over every configuration layer.
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.export.output = output.clone();
        }
        if let Some(ids) = &self.ids {
            config.export.ids = ids.clone();
        }
        if self.overwrite_conflicts {
            config.export.conflicts = ConflictPolicy::Overwrite;
        }
    }
}

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Goodreads library export (CSV)
    #[arg(short, long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    #[arg(value_enum, default_value_t = Section::All)]
    pub section: Section,
}
impl PrintArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Books,
    Authors,
    All,
}
