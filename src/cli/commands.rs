//! Command dispatch
//!
//! Every mutating command opens a session, subscribes the terminal renderer
//! and runs exactly one service operation.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{ExportService, WishlistService};
use crate::cli::args::{
    Cli, Commands, ConfigCommands, ItemCommands, PhaseCommands, SectionCommands, ThemeCommands,
};
use crate::cli::render::{render, TerminalRenderer};
use crate::cli::{output, CliError, CliResult};
use crate::config::{expand_env_vars, global_config_path, Settings};
use crate::domain::EntityId;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => execute_config(cli, command),
        Some(command) => {
            let container = build_container(cli)?;
            execute_wishlist(&container, command)
        }
        None => {
            let container = build_container(cli)?;
            execute_wishlist(&container, &Commands::Show)
        }
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = PathBuf::from(expand_env_vars(dir.to_string_lossy().as_ref()));
    }
    Ok(settings)
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = load_settings(cli)?;
    debug!("data_dir={}", settings.data_dir.display());
    if cli.ephemeral {
        output::warning("ephemeral session, changes are not saved");
        return Ok(ServiceContainer::ephemeral(settings));
    }
    Ok(ServiceContainer::new(settings))
}

/// Open a session that re-renders after each change.
fn open_session(container: &ServiceContainer) -> CliResult<WishlistService> {
    let mut wishlist = container.wishlist()?;
    wishlist.subscribe(Box::new(TerminalRenderer));
    Ok(wishlist)
}

#[instrument(level = "debug", skip(container))]
fn execute_wishlist(container: &ServiceContainer, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Show => {
            let wishlist = container.wishlist()?;
            output::info(&render(wishlist.hierarchy(), wishlist.theme()));
            Ok(())
        }
        Commands::Phase { command } => execute_phase(&mut open_session(container)?, command),
        Commands::Section { command } => execute_section(&mut open_session(container)?, command),
        Commands::Item { command } => execute_item(&mut open_session(container)?, command),
        Commands::Theme { command } => execute_theme(container, command),
        Commands::Export { output: target, stdout } => {
            let wishlist = container.wishlist()?;
            if *stdout {
                output::info(&ExportService::to_json(wishlist.phases())?);
                return Ok(());
            }
            let path = target
                .clone()
                .unwrap_or_else(|| container.settings.export_file.clone());
            container.export().write(wishlist.phases(), &path)?;
            output::action("Exported", &path.display());
            Ok(())
        }
        Commands::Reset { yes } => {
            if !*yes {
                return Err(CliError::Usage(
                    "reset deletes the stored wishlist, rerun with --yes".to_string(),
                ));
            }
            container.persistence().clear()?;
            output::success("Wishlist reset");
            Ok(())
        }
        Commands::Config { .. } | Commands::Completion { .. } => Err(CliError::InvalidArgs(
            "command does not operate on a wishlist".to_string(),
        )),
    }
}

fn execute_phase(wishlist: &mut WishlistService, command: &PhaseCommands) -> CliResult<()> {
    match command {
        PhaseCommands::Add { title } => {
            wishlist.add_phase(title)?;
        }
        PhaseCommands::Rename { id, title } => {
            wishlist.rename_phase(&EntityId::from(id.as_str()), title)?;
        }
        PhaseCommands::Delete { id } => {
            wishlist.delete_phase(&EntityId::from(id.as_str()))?;
        }
        PhaseCommands::Toggle { id } => {
            wishlist.toggle_collapse_phase(&EntityId::from(id.as_str()))?;
        }
        PhaseCommands::Move { from, to } => {
            wishlist.reorder_phases(*from, *to)?;
        }
    }
    Ok(())
}

fn execute_section(wishlist: &mut WishlistService, command: &SectionCommands) -> CliResult<()> {
    match command {
        SectionCommands::Add { phase, title } => {
            wishlist.add_section(&EntityId::from(phase.as_str()), title)?;
        }
        SectionCommands::Rename { id, title } => {
            wishlist.rename_section(&EntityId::from(id.as_str()), title)?;
        }
        SectionCommands::Delete { id } => {
            let section_id = EntityId::from(id.as_str());
            let phase_id = wishlist.store().phase_of_section(&section_id)?.id.clone();
            wishlist.delete_section(&phase_id, &section_id)?;
        }
        SectionCommands::Toggle { id } => {
            wishlist.toggle_collapse_section(&EntityId::from(id.as_str()))?;
        }
        SectionCommands::Move { phase, from, to } => {
            wishlist.reorder_sections(&EntityId::from(phase.as_str()), *from, *to)?;
        }
    }
    Ok(())
}

fn execute_item(wishlist: &mut WishlistService, command: &ItemCommands) -> CliResult<()> {
    match command {
        ItemCommands::Add {
            section,
            name,
            link,
            note,
        } => {
            wishlist.add_item(&EntityId::from(section.as_str()), name, link, note)?;
        }
        ItemCommands::Edit {
            id,
            name,
            link,
            note,
        } => {
            let item_id = EntityId::from(id.as_str());
            let current = wishlist.store().item(&item_id)?.clone();
            wishlist.edit_item(
                &item_id,
                name.as_deref().unwrap_or(&current.name),
                link.as_deref().unwrap_or(&current.link),
                note.as_deref().unwrap_or(&current.note),
            )?;
        }
        ItemCommands::Toggle { id } => {
            wishlist.toggle_ordered(&EntityId::from(id.as_str()))?;
        }
        ItemCommands::Delete { id } => {
            let item_id = EntityId::from(id.as_str());
            let section_id = wishlist.store().section_of_item(&item_id)?.id.clone();
            wishlist.delete_item(&section_id, &item_id)?;
        }
        ItemCommands::Move { section, from, to } => {
            wishlist.reorder_items(&EntityId::from(section.as_str()), *from, *to)?;
        }
    }
    Ok(())
}

fn execute_theme(container: &ServiceContainer, command: &ThemeCommands) -> CliResult<()> {
    match command {
        ThemeCommands::Toggle => {
            let mut wishlist = container.wishlist()?;
            let theme = wishlist.toggle_theme()?;
            output::action("Theme", &theme);
        }
        ThemeCommands::Show => {
            let wishlist = container.wishlist()?;
            output::info(&wishlist.theme());
        }
    }
    Ok(())
}

fn execute_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let settings = load_settings(cli)?;
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            output::action("Global config", &global);
            output::action("Data dir", &settings.data_dir.display());
        }
        ConfigCommands::Init { force } => {
            let path: PathBuf = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".to_string()))?;
            write_config_template(&RealFileSystem, &path, *force)?;
            output::action("Created", &path.display());
            output::detail("edit it to change data_dir or storage keys");
        }
    }
    Ok(())
}

/// Write [`Settings::template`] to `path`; an existing file is kept unless `force`.
pub fn write_config_template(fs: &dyn FileSystem, path: &Path, force: bool) -> CliResult<()> {
    if fs.exists(path) && !force {
        return Err(CliError::Usage(format!(
            "{} exists, use --force to overwrite",
            path.display()
        )));
    }
    fs.ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create parent of {}", path.display()), e))?;
    fs.write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}
