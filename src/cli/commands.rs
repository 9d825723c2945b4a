//! Command dispatch: builds settings and sessions, renders reports

use std::io::{self, IsTerminal};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{open_session, report, ApplicationError, Session};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::shell::Shell;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Summary { scenario }) => cmd_summary(cli, scenario),
        Some(Commands::Project { scenario }) => cmd_project(cli, scenario),
        Some(Commands::Chart { scenario, step }) => cmd_chart(cli, scenario, *step),
        Some(Commands::Tree { scenario }) => cmd_tree(cli, scenario),
        Some(Commands::Shell { scenario }) => cmd_shell(cli, scenario.as_deref()),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given (try 'spacecost --help')".into(),
        )),
    }
}

/// Layered settings with command-line flags applied last.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(months) = cli.horizon {
        settings.horizon_months = months;
    }
    if let Some(currency) = &cli.currency {
        settings.currency = currency.clone();
    }
    if let Some(rate) = cli.growth_rate {
        settings.growth_rate = rate;
    }
    settings.validate()?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn load_session(cli: &Cli, scenario: &Path) -> CliResult<Session> {
    let settings = resolve_settings(cli)?;
    let (session, stats) = open_session(scenario, Session::new(&settings)?)?;
    if stats.skipped > 0 {
        output::warning(&stats);
    }
    Ok(session)
}

#[instrument(skip(cli))]
fn cmd_summary(cli: &Cli, scenario: &Path) -> CliResult<()> {
    let session = load_session(cli, scenario)?;
    output::info(report::summary(&session).trim_end());
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_project(cli: &Cli, scenario: &Path) -> CliResult<()> {
    let session = load_session(cli, scenario)?;
    output::info(report::table(&session).trim_end());
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_chart(cli: &Cli, scenario: &Path, step: usize) -> CliResult<()> {
    if step == 0 {
        return Err(CliError::InvalidArgs("step must be at least 1".into()));
    }
    let session = load_session(cli, scenario)?;
    output::info(report::chart(&session, step).trim_end());
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, scenario: &Path) -> CliResult<()> {
    let session = load_session(cli, scenario)?;
    for side in [crate::domain::Side::Office, crate::domain::Side::Coworking] {
        output::info(&report::item_tree(&session, side, &[]));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_shell(cli: &Cli, scenario: Option<&Path>) -> CliResult<()> {
    let session = match scenario {
        Some(path) => load_session(cli, path)?,
        None => Session::new(&resolve_settings(cli)?)?,
    };
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        output::header("spacecost shell (type 'help' for commands)");
    }
    let mut shell = Shell::new(session, io::stdout());
    shell.run(stdin.lock(), interactive)
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = resolve_settings(cli)?;
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no config directory for this platform"),
            }
            if let Some(local) = &cli.config {
                output::action("local", &local.display());
            }
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| ApplicationError::Config {
                message: "no config directory for this platform".into(),
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "{} exists (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}
