use crate::cli::commands::InitArgs;
use crate::io::config_io::{ConfigError, config_path, store_dir, write_template};
use crate::io::dataset::bundled_projects;
use crate::io::store::{JsonFileStore, ProjectStore};

use super::Context;

/// Write folio.toml and seed the store with the bundled projects.
///
/// An existing config is left alone unless `--force`; the store is only
/// seeded when empty, or reseeded with `--force`.
pub fn cmd_init(ctx: &Context, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    match write_template(&ctx.data_dir, args.force) {
        Ok(path) => println!("wrote {}", path.display()),
        Err(ConfigError::AlreadyExists { .. }) => {
            println!(
                "kept {} (use --force to overwrite)",
                config_path(&ctx.data_dir).display()
            );
        }
        Err(e) => return Err(e.into()),
    }

    if !ctx.persist {
        return Ok(());
    }

    let store = JsonFileStore::new(store_dir(&ctx.data_dir));
    let existing = store.load()?;
    match existing {
        Some(projects) if !args.force => {
            println!("store already has {} projects", projects.len());
        }
        _ => {
            let projects = bundled_projects();
            store.save(&projects)?;
            println!(
                "seeded {} with {} projects",
                store.dir().display(),
                projects.len()
            );
        }
    }
    Ok(())
}
