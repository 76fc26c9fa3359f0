//! The command line interface for working with entities.
use crate::entity::{Description, Entity, EntitySource};
use crate::input::EntityCollection;
use crate::log;
use crate::settings::Settings;
use ::log::info;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

pub mod settings;
use settings::SettingsSubcommands;
pub mod template;
use template::TemplateSubcommands;

/// The command line interface for working with entities.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Read an entity and check that it is valid.
    Validate {
        /// Folder(s) containing entity files. Records from several folders are appended.
        #[arg(required = true)]
        entity_dirs: Vec<PathBuf>,
        /// A description of the data: either one for all folders or one per folder.
        #[arg(short, long)]
        description: Vec<String>,
    },
    /// Manage the packaged default entity.
    Template {
        /// The available subcommands for managing the default entity.
        #[command(subcommand)]
        subcommand: TemplateSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Validate {
                entity_dirs,
                description,
            } => {
                let source = entity_source(entity_dirs);
                let description = descriptions(description);
                handle_validate_command(&source, description.as_ref(), None)
            }
            Self::Template { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and run the requested command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ climada-entity --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Convert the folders given on the command line into an [`EntitySource`]
fn entity_source(mut entity_dirs: Vec<PathBuf>) -> EntitySource {
    if entity_dirs.len() == 1 {
        EntitySource::Single(entity_dirs.remove(0))
    } else {
        EntitySource::Many(entity_dirs)
    }
}

/// Convert the descriptions given on the command line into a [`Description`]
fn descriptions(mut descriptions: Vec<String>) -> Option<Description> {
    match descriptions.len() {
        0 => None,
        1 => Some(Description::Single(descriptions.remove(0))),
        _ => Some(Description::Many(descriptions)),
    }
}

/// Load program settings, if not provided, and start the logger
fn init_logging(settings: Option<Settings>) -> Result<()> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    log::init(&settings.log_level).context("Failed to initialise logging.")
}

/// Log a summary of the entity's contents
fn log_summary(entity: &Entity) {
    info!(
        "{} exposures ({} {} in total, reference year {})",
        entity.exposures().len(),
        entity.exposures().total_value(),
        entity.exposures().value_unit(),
        entity.exposures().ref_year()
    );
    info!("{} impact functions", entity.impact_funcs().len());
    info!("{} measures", entity.measures().len());
    info!("{} discount rates", entity.disc_rates().len());
}

/// Handle the `validate` command.
pub fn handle_validate_command(
    source: &EntitySource,
    description: Option<&Description>,
    settings: Option<Settings>,
) -> Result<()> {
    init_logging(settings)?;

    let entity = Entity::from_source(source, description).context("Failed to read entity.")?;
    log_summary(&entity);
    entity.check().context("Failed to validate entity.")?;
    info!("Entity validation successful!");

    Ok(())
}
