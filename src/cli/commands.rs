use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "folio", about = concat!("◆ folio v", env!("CARGO_PKG_VERSION"), " - a design portfolio in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (default: $FOLIO_DIR or ~/.local/share/folio)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep edits in memory only; nothing is written to the store
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Open the TUI with editing enabled
    #[arg(long)]
    pub admin: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write folio.toml and seed the store with the bundled projects
    Init(InitArgs),
    /// List projects
    List(ListArgs),
    /// Show one project
    Show(ShowArgs),
    /// Change a text field of a project
    Set(SetArgs),
    /// Replace a project's cover image
    Cover(CoverArgs),
    /// Add, replace or remove detail images
    Image(ImageCmd),
    /// Write the project list to a JSON file
    Export(ExportArgs),
    /// Discard all edits and restore the bundled projects
    Reset(ResetArgs),
    /// Print the resolved URL for an image reference
    Url(UrlArgs),
    /// Edit folio.toml
    Config(ConfigCmd),
    /// View the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing folio.toml and reseed the store
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only projects in this category (UI/UX, WEB, VISUAL, PRACTICE, ILLUSTRATION)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Project ID
    pub id: String,
}

#[derive(Args)]
pub struct UrlArgs {
    /// Image reference as stored in a project (path, URL or data URL)
    pub reference: String,
}

// ---------------------------------------------------------------------------
// Edit command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SetArgs {
    /// Project ID
    pub id: String,
    /// Field name (title, subtitle, description, role, year, category, tags)
    pub field: String,
    /// New value (tags are comma-separated)
    pub value: String,
}

#[derive(Args)]
pub struct CoverArgs {
    /// Project ID
    pub id: String,
    /// Image file to upload, or an http(s) URL
    pub source: String,
}

#[derive(Args)]
pub struct ImageCmd {
    #[command(subcommand)]
    pub action: ImageAction,
}

#[derive(Subcommand)]
pub enum ImageAction {
    /// Append a detail image
    Add(ImageAddArgs),
    /// Replace the detail image at a position
    Set(ImageSetArgs),
    /// Remove the detail image at a position
    Rm(ImageRmArgs),
}

#[derive(Args)]
pub struct ImageAddArgs {
    /// Project ID
    pub id: String,
    /// Image file to upload, or an http(s) URL
    pub source: String,
}

#[derive(Args)]
pub struct ImageSetArgs {
    /// Project ID
    pub id: String,
    /// Image position, starting at 1
    pub index: usize,
    /// Image file to upload, or an http(s) URL
    pub source: String,
}

#[derive(Args)]
pub struct ImageRmArgs {
    /// Project ID
    pub id: String,
    /// Image position, starting at 1
    pub index: usize,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: portfolio-export-<timestamp>.json)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set <section>.<name> = <value>, keeping comments intact
    Set(ConfigSetArgs),
    /// Print the effective configuration
    Show,
    /// Print the path to folio.toml
    Path,
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Key such as startup.source or upload.max_bytes
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Print the absolute path to the recovery log
    Path,
}
