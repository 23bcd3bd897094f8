mod init;
pub use init::cmd_init;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::{ImageSlot, Session};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, config_path, read_config, store_dir, update_config_file};
use crate::io::export::default_export_name;
use crate::io::image::is_absolute;
use crate::io::recovery::{read_recovery_entries, recovery_log_path};
use crate::io::store::{JsonFileStore, MemoryStore, ProjectStore};
use crate::model::project::ProjectField;
use crate::ops::edit::EditCommand;
use crate::ops::filter::{CategoryFilter, filter_projects, find_project};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Settings shared by every subcommand.
pub struct Context {
    pub data_dir: PathBuf,
    pub json: bool,
    pub persist: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        Context {
            data_dir: config_io::data_dir(cli.data_dir.as_deref()),
            json: cli.json,
            persist: !cli.no_persist,
        }
    }
}

/// The store behind `data_dir`, or an in-memory one when not persisting.
pub fn open_store(data_dir: &Path, persist: bool) -> Arc<dyn ProjectStore> {
    if persist {
        Arc::new(JsonFileStore::new(store_dir(data_dir)))
    } else {
        Arc::new(MemoryStore::new())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(ctx: &Context, command: Commands) -> CmdResult {
    match command {
        Commands::Init(args) => cmd_init(ctx, args),

        // Read commands
        Commands::List(args) => cmd_list(ctx, args),
        Commands::Show(args) => cmd_show(ctx, args),
        Commands::Url(args) => cmd_url(ctx, args),
        Commands::Recovery(args) => cmd_recovery(ctx, args),

        // Write commands
        Commands::Set(args) => cmd_set(ctx, args),
        Commands::Cover(args) => cmd_cover(ctx, args),
        Commands::Image(args) => match args.action {
            ImageAction::Add(a) => cmd_image_add(ctx, a),
            ImageAction::Set(a) => cmd_image_set(ctx, a),
            ImageAction::Rm(a) => cmd_image_rm(ctx, a),
        },
        Commands::Export(args) => cmd_export(ctx, args),
        Commands::Reset(args) => cmd_reset(ctx, args),
        Commands::Config(args) => cmd_config(ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_session(ctx: &Context) -> Result<Session, Box<dyn std::error::Error>> {
    let config = read_config(&ctx.data_dir)?;
    let store = open_store(&ctx.data_dir, ctx.persist);
    let recovery_dir = ctx.persist.then(|| ctx.data_dir.clone());
    let session = Session::open(store, config, recovery_dir);
    if let Some(notice) = &session.state().notice
        && notice.is_error()
    {
        eprintln!("warning: {}", notice.text);
    }
    Ok(session)
}

/// Apply `cmd`, wait for the save and print what changed.
fn apply_and_save(session: &mut Session, cmd: EditCommand) -> CmdResult {
    let summary = format!("{}: {}", cmd.project_id(), cmd.describe());
    session.edit(cmd)?;
    session.flush()?;
    println!("{}", summary);
    Ok(())
}

/// Store `source` in `slot`: URLs are stored as given, anything else is
/// read from disk and inlined.
fn set_image(session: &mut Session, id: &str, slot: ImageSlot, source: &str) -> CmdResult {
    if is_absolute(source) {
        let id = id.to_string();
        let image = source.to_string();
        let cmd = match slot {
            ImageSlot::Cover => EditCommand::UpdateCover { id, image },
            ImageSlot::Detail(index) => EditCommand::UpdateDetailImage { id, index, image },
            ImageSlot::Append => EditCommand::AppendDetailImage { id, image },
        };
        return apply_and_save(session, cmd);
    }
    session.upload_image(id, slot, Path::new(source))?;
    session.flush()?;
    if let Some(notice) = &session.state().notice {
        println!("{}: {}", id, notice.text);
    }
    Ok(())
}

/// CLI image positions start at 1.
fn to_index(position: usize) -> Result<usize, String> {
    position
        .checked_sub(1)
        .ok_or_else(|| "image positions start at 1".to_string())
}

fn confirm(prompt: &str) -> Result<bool, std::io::Error> {
    eprint!("{} [y/N] ", prompt);
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs) -> CmdResult {
    let session = open_session(ctx)?;
    let filter = match args.category.as_deref() {
        Some(c) => CategoryFilter::parse(c)?,
        None => CategoryFilter::All,
    };
    let projects = filter_projects(session.projects(), filter);

    if ctx.json {
        let out: Vec<ProjectSummaryJson> = projects.iter().map(|p| project_summary(p)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_project_list(&projects) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(ctx: &Context, args: ShowArgs) -> CmdResult {
    let session = open_session(ctx)?;
    let project = find_project(session.projects(), &args.id)
        .ok_or_else(|| format!("project not found: {}", args.id))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(project)?);
    } else {
        for line in format_project_detail(project) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_url(ctx: &Context, args: UrlArgs) -> CmdResult {
    let config = read_config(&ctx.data_dir)?;
    let resolved = resolved_url(&args.reference, &config.images);
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        for line in format_resolved_url(&resolved) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_recovery(ctx: &Context, args: RecoveryCmd) -> CmdResult {
    if let Some(RecoveryAction::Path) = args.action {
        println!("{}", recovery_log_path(&ctx.data_dir).display());
        return Ok(());
    }

    let entries = read_recovery_entries(&ctx.data_dir, Some(args.limit.unwrap_or(10)));
    if ctx.json {
        let out: Vec<RecoveryEntryJson> = entries.iter().map(recovery_entry_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("recovery log is empty");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in format_recovery_entry(entry) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_set(ctx: &Context, args: SetArgs) -> CmdResult {
    let field: ProjectField = args.field.parse()?;
    let mut session = open_session(ctx)?;
    apply_and_save(
        &mut session,
        EditCommand::UpdateField {
            id: args.id,
            field,
            value: args.value,
        },
    )
}

fn cmd_cover(ctx: &Context, args: CoverArgs) -> CmdResult {
    let mut session = open_session(ctx)?;
    set_image(&mut session, &args.id, ImageSlot::Cover, &args.source)
}

fn cmd_image_add(ctx: &Context, args: ImageAddArgs) -> CmdResult {
    let mut session = open_session(ctx)?;
    set_image(&mut session, &args.id, ImageSlot::Append, &args.source)
}

fn cmd_image_set(ctx: &Context, args: ImageSetArgs) -> CmdResult {
    let index = to_index(args.index)?;
    let mut session = open_session(ctx)?;
    set_image(&mut session, &args.id, ImageSlot::Detail(index), &args.source)
}

fn cmd_image_rm(ctx: &Context, args: ImageRmArgs) -> CmdResult {
    let index = to_index(args.index)?;
    let mut session = open_session(ctx)?;
    let project = find_project(session.projects(), &args.id)
        .ok_or_else(|| format!("project not found: {}", args.id))?;
    let count = project.detail_images.len();
    if index >= count {
        return Err(format!(
            "{} has {} images; there is no image {}",
            args.id, count, args.index
        )
        .into());
    }

    if !args.yes && !confirm(&format!("Delete image {} of {}?", args.index, args.id))? {
        println!("cancelled");
        return Ok(());
    }
    apply_and_save(
        &mut session,
        EditCommand::RemoveDetailImage { id: args.id, index },
    )
}

fn cmd_export(ctx: &Context, args: ExportArgs) -> CmdResult {
    let mut session = open_session(ctx)?;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_export_name(chrono::Local::now())));
    let count = session.export(&path)?;
    println!("exported {} projects to {}", count, path.display());
    Ok(())
}

fn cmd_reset(ctx: &Context, args: ResetArgs) -> CmdResult {
    if !args.yes && !confirm("Discard all edits and restore the bundled projects?")? {
        println!("cancelled");
        return Ok(());
    }
    let mut session = open_session(ctx)?;
    session.reset();
    session.flush()?;
    println!("restored {} bundled projects", session.projects().len());
    Ok(())
}

fn cmd_config(ctx: &Context, args: ConfigCmd) -> CmdResult {
    match args.action {
        ConfigAction::Set(a) => {
            update_config_file(&ctx.data_dir, &a.key, &a.value)?;
            println!("{} = {}", a.key, a.value);
        }
        ConfigAction::Show => {
            let config = read_config(&ctx.data_dir)?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Path => println!("{}", config_path(&ctx.data_dir).display()),
    }
    Ok(())
}
