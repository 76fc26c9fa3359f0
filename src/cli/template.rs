//! Code related to the packaged default entity and the CLI commands for working with it.
use super::init_logging;
use crate::entity::Entity;
use crate::input::{DEFAULT_ENTITY_DIR, DEFAULT_ENTITY_NAME};
use crate::settings::Settings;
use ::log::info;
use anyhow::{Context, Result, bail, ensure};
use clap::Subcommand;
use include_dir::DirEntry;
use std::fs;
use std::path::{Path, PathBuf};

/// The available subcommands for managing the default entity.
#[derive(Subcommand)]
pub enum TemplateSubcommands {
    /// List the files making up the default entity.
    List,
    /// Extract the default entity files to a new directory.
    Extract {
        /// The destination folder for the files.
        new_path: Option<PathBuf>,
    },
    /// Check that the default entity is valid.
    Validate,
}

impl TemplateSubcommands {
    /// Execute the supplied template subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_template_list_command(),
            Self::Extract { new_path } => handle_template_extract_command(new_path.as_deref())?,
            Self::Validate => handle_template_validate_command(None)?,
        }

        Ok(())
    }
}

/// Handle the `template list` command.
fn handle_template_list_command() {
    for file in DEFAULT_ENTITY_DIR.files() {
        println!("{}", file.path().display());
    }
}

/// Handle the `template extract` command
fn handle_template_extract_command(dest: Option<&Path>) -> Result<()> {
    let dest = dest.unwrap_or(Path::new(DEFAULT_ENTITY_NAME));
    extract_template(dest)
}

/// Write the files of the default entity to a new directory
pub fn extract_template(new_path: &Path) -> Result<()> {
    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    fs::create_dir(new_path)
        .with_context(|| format!("Failed to create directory: {}", new_path.display()))?;
    for entry in DEFAULT_ENTITY_DIR.entries() {
        match entry {
            DirEntry::Dir(dir) => bail!(
                "Subdirectories in the default entity are not supported: {}",
                dir.path().display()
            ),
            DirEntry::File(file) => {
                let file_name = file
                    .path()
                    .file_name()
                    .context("Packaged file has no name")?;
                fs::write(new_path.join(file_name), file.contents())?;
            }
        }
    }

    Ok(())
}

/// Handle the `template validate` command.
pub fn handle_template_validate_command(settings: Option<Settings>) -> Result<()> {
    init_logging(settings)?;

    let entity = Entity::new();
    entity
        .check()
        .context("Default entity failed validation.")?;
    info!("Default entity is valid");

    Ok(())
}
