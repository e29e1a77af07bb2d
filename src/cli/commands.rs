//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{load_records, BuildOptions, RenderService};
use crate::cli::args::{BuildArgs, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Record;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| CliError::Usage(e.to_string()))?,
    };

    match &cli.command {
        Some(Commands::Render(args)) => cmd_render(&config_dir, args),
        Some(Commands::Show(args)) => cmd_show(&config_dir, args),
        Some(Commands::Config { command }) => cmd_config(&config_dir, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help".to_string(),
        )),
    }
}

#[instrument]
fn cmd_render(config_dir: &Path, args: &BuildArgs) -> CliResult<()> {
    let (service, tree) = build(config_dir, args)?;
    output::info(&service.render_html(tree));
    Ok(())
}

#[instrument]
fn cmd_show(config_dir: &Path, args: &BuildArgs) -> CliResult<()> {
    let (service, tree) = build(config_dir, args)?;
    let summary = service.summary(&tree);
    let root = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| args.file.display().to_string());

    output::info(&service.render_tree(&tree, &root));
    output::header(&format!(
        "{} nodes, {} leaves, depth {}",
        summary.nodes, summary.leaves, summary.depth
    ));
    Ok(())
}

#[instrument]
fn cmd_config(config_dir: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(config_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files:");
            let global = global_config_path().unwrap_or_else(|| PathBuf::from("<unavailable>"));
            output::detail(&format!("global: {}", global.display()));
            output::detail(&format!("local:  {}", local_config_path(config_dir).display()));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

fn build(config_dir: &Path, args: &BuildArgs) -> CliResult<(RenderService, Record)> {
    let settings = apply_args(Settings::load(Some(config_dir))?, args);
    let options = build_options(args)?;
    debug!(?options, "building tree");

    let records = load_records(&args.file)?;
    let service = RenderService::new(settings);
    let tree = service.build(records, &options);
    Ok((service, tree))
}

/// Command line field names override configured ones.
fn apply_args(mut settings: Settings, args: &BuildArgs) -> Settings {
    if let Some(id) = &args.id {
        settings.fields.id = id.clone();
    }
    if let Some(parent) = &args.parent {
        settings.fields.parent = parent.clone();
    }
    if let Some(children) = &args.children {
        settings.fields.children = children.clone();
    }
    if let Some(label) = &args.label {
        settings.html.label_field = Some(label.clone());
    }
    settings
}

fn build_options(args: &BuildArgs) -> CliResult<BuildOptions> {
    if args.max_depth == Some(0) {
        return Err(CliError::InvalidArgs(
            "--max-depth must be at least 1".to_string(),
        ));
    }
    Ok(BuildOptions {
        sort: args.sort.clone(),
        active: args.active.clone(),
        max_depth: args.max_depth,
    })
}
